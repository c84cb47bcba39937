//! Interactive terminal session
//!
//! Raw mode, the alternate screen and mouse capture are switched on for the
//! session and always switched off again, whether the event loop ends
//! normally or with an error.

use std::io::{self, Write};

use calcpad::config::CalcConfig;
use calcpad::tui::{render, CalculatorApp};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Runs the terminal calculator until the user quits
pub fn run_tui(config: &CalcConfig) -> CliResult<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(CliError::terminal("stdout is not a terminal"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let setup = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide);

    let result = match setup {
        Ok(()) => run_app(&mut stdout, CalculatorApp::with_config(config)),
        Err(err) => Err(err.into()),
    };

    let restored = restore(&mut stdout);
    result?;
    restored
}

fn restore(stdout: &mut io::Stdout) -> CliResult<()> {
    let screen = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw).map_err(|e| CliError::terminal(format!("restoring terminal: {e}")))
}

fn run_app<W: Write>(out: &mut W, mut app: CalculatorApp) -> CliResult<()> {
    let (width, height) = terminal::size()?;
    app.set_viewport(width, height);
    info!(width, height, "terminal session started");
    draw(out, &app)?;

    while !app.should_quit() {
        let redraw = match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "resize");
                app.set_viewport(width, height);
                true
            }
            _ => false,
        };
        if redraw && !app.should_quit() {
            draw(out, &app)?;
        }
    }

    info!(display = app.state().display(), "terminal session ended");
    Ok(())
}

/// Draws the current frame over the whole screen
fn draw<W: Write>(out: &mut W, app: &CalculatorApp) -> io::Result<()> {
    let (width, height) = app.viewport();
    let frame = render(app, width, height);
    for (y, line) in frame.to_lines().iter().enumerate() {
        queue!(
            out,
            MoveTo(0, y as u16),
            Print(line),
            Clear(ClearType::UntilNewLine)
        )?;
    }
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use calcpad::core::{CalcEvent, Operator};
    use calcpad::tui::KeyAction;

    #[test]
    fn test_draw_writes_frame() {
        let mut app = CalculatorApp::new();
        app.set_viewport(40, 16);
        for event in [
            CalcEvent::Digit(1),
            CalcEvent::Operator(Operator::Add),
            CalcEvent::Digit(2),
        ] {
            app.handle_action(KeyAction::Calc(event));
        }
        let mut buf = Vec::new();
        draw(&mut buf, &app).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("calcpad"));
        assert!(text.contains("1 +"));
        assert!(text.contains("[7]"));
        assert!(text.contains("q:quit"));
    }

    #[test]
    fn test_draw_too_small() {
        let mut app = CalculatorApp::new();
        app.set_viewport(12, 4);
        let mut buf = Vec::new();
        draw(&mut buf, &app).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Terminal too"));
    }
}
