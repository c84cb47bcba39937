//! Key script replay

use calcpad::config::CalcConfig;
use calcpad::core::{CalcEvent, CalculatorState};
use calcpad::keypad::key_to_event;
use serde::Serialize;
use tracing::debug;

/// One replayed key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// Key name as given in the script
    pub key: String,
    /// Event the key mapped to; `None` when the key was ignored
    pub event: Option<CalcEvent>,
    /// Display text after the key
    pub display: String,
}

/// Result of replaying a script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Every key, in order
    pub steps: Vec<Step>,
    /// Engine state after the last key
    #[serde(rename = "final")]
    pub final_state: CalculatorState,
}

impl Transcript {
    /// Final display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.final_state.display()
    }

    /// Number of keys that mapped to an event
    #[must_use]
    pub fn handled_count(&self) -> usize {
        self.steps.iter().filter(|step| step.event.is_some()).count()
    }
}

/// Replays `keys` against a fresh calculator
#[must_use]
pub fn replay<S: AsRef<str>>(config: &CalcConfig, keys: &[S]) -> Transcript {
    let mut state = CalculatorState::with_format(config.format);
    let steps = keys
        .iter()
        .map(|key| {
            let key = key.as_ref();
            let event = key_to_event(key);
            if let Some(event) = event {
                state.apply(event);
            }
            Step {
                key: key.to_string(),
                event,
                display: state.display().to_string(),
            }
        })
        .collect::<Vec<_>>();
    debug!(keys = steps.len(), display = state.display(), "script replayed");
    Transcript {
        steps,
        final_state: state,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use calcpad::core::{NumberFormat, Operator};

    #[test]
    fn test_replay_basic() {
        let transcript = replay(&CalcConfig::default(), &["6", "+", "3", "="]);
        assert_eq!(transcript.display(), "9");
        assert_eq!(transcript.steps.len(), 4);
        assert_eq!(transcript.handled_count(), 4);
        assert_eq!(transcript.steps[1].event, Some(CalcEvent::Operator(Operator::Add)));
        assert_eq!(transcript.steps[1].display, "6");
    }

    #[test]
    fn test_replay_ignores_unknown_keys() {
        let transcript = replay(&CalcConfig::default(), &["1", "Tab", "x", "2"]);
        assert_eq!(transcript.display(), "12");
        assert_eq!(transcript.handled_count(), 2);
        assert_eq!(transcript.steps[1].event, None);
        assert_eq!(transcript.steps[1].display, "1");
    }

    #[test]
    fn test_replay_empty() {
        let keys: [&str; 0] = [];
        let transcript = replay(&CalcConfig::default(), &keys);
        assert_eq!(transcript.display(), "0");
        assert!(transcript.steps.is_empty());
    }

    #[test]
    fn test_replay_uses_config_format() {
        let mut config = CalcConfig::default();
        config.format = NumberFormat::new().with_decimal_places(2);
        let transcript = replay(&config, &["2", "/", "3", "Enter"]);
        assert_eq!(transcript.display(), "0.67");
    }

    #[test]
    fn test_transcript_json_shape() {
        let transcript = replay(&CalcConfig::default(), &["5", "/", "0", "Enter"]);
        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json["final"]["display"], "Error");
        assert_eq!(json["steps"][0]["key"], "5");
        assert_eq!(json["steps"][0]["event"]["event"], "digit");
        assert_eq!(json["steps"][0]["event"]["value"], 5);
        assert_eq!(json["steps"][3]["event"]["event"], "equals");
    }
}
