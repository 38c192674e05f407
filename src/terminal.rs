use crate::color::Color;
use crate::config::DotStyle;
use crate::motion::Position;
use crate::session::{SessionSnapshot, SessionState};
use crate::viewport::Viewport;
use crossterm::{
    cursor, queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// A terminal cell is roughly twice as tall as it is wide.
const CELL_ASPECT: f64 = 2.0;

/// Approximate width of a terminal cell in pixels, used to size the dot.
const CELL_WIDTH_PIXELS: f64 = 8.0;

/// Rows reserved at the top for the status line.
const STATUS_ROWS: u16 = 1;

/// Share of the dot's radius drawn in the base color before switching to the darker shade.
const CORE_RATIO: f64 = 0.6;

/// How far the glow reaches past the dot's edge, in columns.
const GLOW_WIDTH: f64 = 1.0;

const KEY_HINTS: &str = "[space] start/pause  [s] stop  [tab] pattern  [+/-] period  [q] quit";

/// The drawable area of the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    pub rows: u16,
}

impl Layout {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// The area the dot moves in, in abstract units where a column is one unit wide.
    pub fn viewport(&self) -> Viewport {
        let rows = self.rows.saturating_sub(STATUS_ROWS);
        Viewport::new(self.columns as f64, rows as f64 * CELL_ASPECT)
    }

    /// The cell the origin maps to.
    fn centre(&self) -> (f64, f64) {
        let rows = self.rows.saturating_sub(STATUS_ROWS);
        ((self.columns / 2) as f64, (STATUS_ROWS + rows / 2) as f64)
    }
}

/// Which part of the dot a cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellShade {
    /// The dot's center, drawn in the base color.
    Core,

    /// The dot's edge, drawn in the darker shade.
    Rim,

    /// Just outside the dot, drawn in the translucent glow color.
    Glow,
}

/// A single cell covered by the dot or its glow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotCell {
    pub column: u16,
    pub row: u16,
    pub shade: CellShade,
}

/// The cells covered by a dot of `size` pixels at `position`, plus the ring of glow around it.
pub fn dot_cells(layout: Layout, position: Position, size: u16) -> Vec<DotCell> {
    let radius = (size as f64 / 2.0 / CELL_WIDTH_PIXELS).max(0.5);
    let outer = radius + GLOW_WIDTH;
    let (centre_x, centre_y) = layout.centre();
    let x = centre_x + position.x;
    let y = centre_y + position.y / CELL_ASPECT;

    let first_column = (x - outer).ceil().max(0.0) as u16;
    let last_column = ((x + outer).floor().max(0.0) as u16).min(layout.columns.saturating_sub(1));
    let first_row = (y - outer / CELL_ASPECT).ceil().max(STATUS_ROWS as f64) as u16;
    let last_row = ((y + outer / CELL_ASPECT).floor().max(0.0) as u16).min(layout.rows.saturating_sub(1));

    let mut cells = Vec::new();
    for row in first_row..=last_row {
        for column in first_column..=last_column {
            let dx = column as f64 - x;
            let dy = (row as f64 - y) * CELL_ASPECT;
            let distance = (dx * dx + dy * dy).sqrt();
            let shade = if distance <= radius * CORE_RATIO {
                CellShade::Core
            } else if distance <= radius {
                CellShade::Rim
            } else if distance <= outer {
                CellShade::Glow
            } else {
                continue;
            };
            cells.push(DotCell { column, row, shade });
        }
    }
    let on_screen = (0.0..layout.columns as f64).contains(&x) && (STATUS_ROWS as f64..layout.rows as f64).contains(&y);
    if on_screen && cells.iter().all(|cell| cell.shade == CellShade::Glow) {
        // Dots smaller than a cell still take up the nearest one.
        let column = (x.round() as u16).min(layout.columns - 1);
        let row = (y.round() as u16).min(layout.rows - 1);
        cells.retain(|cell| (cell.column, cell.row) != (column, row));
        cells.push(DotCell { column, row, shade: CellShade::Core });
    }
    cells
}

/// Format seconds as `mm:ss`.
pub fn format_remaining(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Build the status line text for a session.
pub fn status_line(snapshot: &SessionSnapshot, message: Option<&str>) -> String {
    let remaining = match snapshot.state {
        SessionState::Running | SessionState::Paused => format_remaining(snapshot.remaining_secs),
        SessionState::Idle | SessionState::Finished => "--:--".to_string(),
    };
    let mut line = format!(
        " {}  {}s/cycle  {}  {}  {}",
        snapshot.pattern,
        snapshot.period.as_secs(),
        snapshot.state,
        remaining,
        KEY_HINTS
    );
    if let Some(message) = message {
        line.push_str("  ");
        line.push_str(message);
    }
    line
}

/// Draws the dot and the status line.
pub struct Renderer<W: Write> {
    writer: W,
    layout: Layout,
    style: DotStyle,
    background: Color,
    drawn: Vec<DotCell>,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, layout: Layout, style: DotStyle) -> Self {
        let background = style.background.over(Color::BLACK);
        Self { writer, layout, style, background, drawn: Vec::new() }
    }

    /// Repaint everything, e.g. after a resize.
    pub fn resize(&mut self, layout: Layout) -> io::Result<()> {
        self.layout = layout;
        self.drawn.clear();
        self.clear()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, SetBackgroundColor(self.background.into()), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Move the dot, erasing it from where it was drawn last.
    pub fn draw_dot(&mut self, position: Position) -> io::Result<()> {
        let background = self.background.into();
        for cell in self.drawn.drain(..) {
            queue!(self.writer, cursor::MoveTo(cell.column, cell.row), SetBackgroundColor(background), Print(' '))?;
        }
        let color = self.style.color;
        let rim = color.gradient_shade();
        let glow = color.glow_over(self.background);
        let cells = dot_cells(self.layout, position, self.style.size);
        for cell in &cells {
            let fill = match cell.shade {
                CellShade::Core => color,
                CellShade::Rim => rim,
                CellShade::Glow => glow,
            };
            queue!(self.writer, cursor::MoveTo(cell.column, cell.row), SetBackgroundColor(fill.into()), Print(' '))?;
        }
        self.drawn = cells;
        Ok(())
    }

    pub fn draw_status(&mut self, snapshot: &SessionSnapshot, message: Option<&str>) -> io::Result<()> {
        let width = self.layout.columns as usize;
        let mut line: String = status_line(snapshot, message).chars().take(width).collect();
        let padding = width.saturating_sub(line.chars().count());
        line.push_str(&" ".repeat(padding));
        queue!(
            self.writer,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(style::Color::Reset),
            SetForegroundColor(style::Color::Reset),
            Print(line)
        )?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Puts the terminal in raw mode on the alternate screen, restoring it when dropped.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(io::stdout(), style::ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
