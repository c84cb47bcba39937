//! Frame rendering
//!
//! Layout, top to bottom: a boxed display line, the boxed keypad grid, and an
//! optional help line. [`KeypadLayout`] is shared by rendering and mouse hit
//! testing so a click always lands on the button drawn under it.

use super::app::CalculatorApp;
use super::grid::{Rect, TextGrid};
use crate::keypad::Keypad;

/// Title on the display box
pub const TITLE: &str = "calcpad";

/// Help line shown under the keypad
pub const HELP_TEXT: &str = "Enter:=  Esc:C  Bksp:<  q:quit";

/// Rows taken by the display box
pub const DISPLAY_HEIGHT: u16 = 3;

/// Smallest frame the calculator is drawn in
pub const MIN_WIDTH: u16 = 22;
/// Smallest frame the calculator is drawn in
pub const MIN_HEIGHT: u16 = 12;

/// Shown instead of the calculator when the frame is below the minimum size
pub const TOO_SMALL_TEXT: &str = "Terminal too small";

/// Button cells of the keypad inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadLayout {
    area: Rect,
    rows: usize,
    cols: usize,
    cell_width: u16,
    cell_height: u16,
}

impl KeypadLayout {
    /// Splits the inside of `area` (a one-cell border) into a `rows` x `cols`
    /// grid. Returns `None` when a cell would be empty.
    #[must_use]
    pub fn new(area: Rect, rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 || area.width < 2 || area.height < 2 {
            return None;
        }
        let cell_width = (area.width - 2) / cols as u16;
        let cell_height = (area.height - 2) / rows as u16;
        if cell_width == 0 || cell_height == 0 {
            return None;
        }
        Some(Self {
            area,
            rows,
            cols,
            cell_width,
            cell_height,
        })
    }

    /// Keypad layout of a full `width` x `height` frame
    #[must_use]
    pub fn for_frame(keypad: &Keypad, width: u16, height: u16, show_help: bool) -> Option<Self> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return None;
        }
        let help = u16::from(show_help);
        let area = Rect::new(0, DISPLAY_HEIGHT, width, height - DISPLAY_HEIGHT - help);
        let (rows, cols) = keypad.dimensions();
        Self::new(area, rows, cols)
    }

    /// The keypad box, border included
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Cell of the button at `(row, col)`
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Rect> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(Rect::new(
            self.area.x + 1 + col as u16 * self.cell_width,
            self.area.y + 1 + row as u16 * self.cell_height,
            self.cell_width,
            self.cell_height,
        ))
    }

    /// Grid position under the screen cell `(x, y)`
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if !self.area.contains(x, y) {
            return None;
        }
        let rel_x = x - self.area.x;
        let rel_y = y - self.area.y;

        // border
        if rel_x == 0 || rel_y == 0 || rel_x >= self.area.width - 1 || rel_y >= self.area.height - 1
        {
            return None;
        }

        let col = ((rel_x - 1) / self.cell_width) as usize;
        let row = ((rel_y - 1) / self.cell_height) as usize;
        (row < self.rows && col < self.cols).then_some((row, col))
    }
}

/// Renders the application into a fresh `width` x `height` frame
#[must_use]
pub fn render(app: &CalculatorApp, width: u16, height: u16) -> TextGrid {
    let mut grid = TextGrid::new(width, height);
    let Some(layout) = KeypadLayout::for_frame(app.keypad(), width, height, app.show_help())
    else {
        grid.write_str(0, 0, TOO_SMALL_TEXT);
        return grid;
    };

    render_display(app, &mut grid, Rect::new(0, 0, width, DISPLAY_HEIGHT));
    render_keypad(app, &mut grid, &layout);
    if app.show_help() {
        grid.write_str(1, height - 1, HELP_TEXT);
    }
    grid
}

fn render_display(app: &CalculatorApp, grid: &mut TextGrid, area: Rect) {
    grid.draw_box(area, Some(TITLE));
    let state = app.state();
    let y = area.y + 1;

    if let (Some(op), Some(lhs)) = (state.pending_operator(), state.stored_operand()) {
        let indicator = format!("{} {}", state.format().render(lhs), op);
        grid.write_str(area.x + 2, y, &indicator);
    }

    let right = area.x + area.width - 2;
    grid.write_right(right, y, area.width - 4, state.display());
}

fn render_keypad(app: &CalculatorApp, grid: &mut TextGrid, layout: &KeypadLayout) {
    grid.draw_box(layout.area(), None);
    for (index, button) in app.keypad().buttons().iter().enumerate() {
        let Some(cell) = layout.cell(button.row, button.col) else {
            continue;
        };
        let label = if app.pressed_button() == Some(index) {
            format!("<{}>", button.label())
        } else {
            format!("[{}]", button.label())
        };
        let len = label.chars().count() as u16;
        let x = cell.x + cell.width.saturating_sub(len) / 2;
        let y = cell.y + cell.height / 2;
        grid.write_str(x, y, &label);
    }
}
