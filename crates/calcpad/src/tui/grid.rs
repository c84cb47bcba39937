//! Character grid frames
//!
//! The terminal front-end draws into a [`TextGrid`] and then flushes it line
//! by line, so every frame can also be asserted on as plain text.

/// A rectangle in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Rect {
    /// Creates a rectangle
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if `(x, y)` lies inside
    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && u32::from(x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(y) < u32::from(self.y) + u32::from(self.height)
    }

    /// Center cell
    #[must_use]
    pub fn center(&self) -> (u16, u16) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Fixed-size grid of characters, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    cells: Vec<char>,
    width: u16,
    height: u16,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl TextGrid {
    /// Creates a grid filled with spaces
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![' '; size],
            width,
            height,
        }
    }

    /// Width in columns
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole grid as a rectangle
    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Character at `(x, y)`
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Sets the character at `(x, y)`; out-of-bounds writes are dropped
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    /// Writes `s` from `(x, y)`, truncating at the right edge
    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        for (offset, ch) in s.chars().enumerate() {
            let Some(pos_x) = x.checked_add(offset as u16) else {
                break;
            };
            if pos_x >= self.width {
                break;
            }
            self.set(pos_x, y, ch);
        }
    }

    /// Writes `s` so it ends at column `right` (exclusive). When `s` is
    /// wider than `width`, its leading characters are cut so the tail stays
    /// visible.
    pub fn write_right(&mut self, right: u16, y: u16, width: u16, s: &str) {
        let chars: Vec<char> = s.chars().collect();
        let visible = chars.len().min(width as usize);
        let start = right.saturating_sub(visible as u16);
        let tail: String = chars[chars.len() - visible..].iter().collect();
        self.write_str(start, y, &tail);
    }

    /// Draws a single-line box outline, with an optional title on the top edge
    pub fn draw_box(&mut self, area: Rect, title: Option<&str>) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;
        for x in area.x + 1..right {
            self.set(x, area.y, '─');
            self.set(x, bottom, '─');
        }
        for y in area.y + 1..bottom {
            self.set(area.x, y, '│');
            self.set(right, y, '│');
        }
        self.set(area.x, area.y, '┌');
        self.set(right, area.y, '┐');
        self.set(area.x, bottom, '└');
        self.set(right, bottom, '┘');
        if let Some(title) = title {
            let max = area.width.saturating_sub(4) as usize;
            let title: String = title.chars().take(max).collect();
            self.write_str(area.x + 2, area.y, &title);
        }
    }

    /// Rows as strings with trailing spaces trimmed
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let width = self.width as usize;
        if width == 0 {
            return vec![String::new(); self.height as usize];
        }
        self.cells
            .chunks(width)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Returns true if any row contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.to_lines().iter().any(|line| line.contains(needle))
    }
}
