//! Output formatting for search results.
//!
//! Text and JSON renderings come straight from the library's
//! [`RouteSummary`]; the plot renderer draws the star field and route on a
//! character grid covering the `0..=100` square.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

use starpath_lib::{RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Side length of the plotted area in point-space units.
pub const CANVAS_SIZE: f32 = 100.0;
/// Blank border around the plotted area in point-space units.
pub const CANVAS_MARGIN: f32 = 5.0;

/// Supported output formats for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Index list followed by a step-by-step breakdown.
    #[default]
    Text,
    /// Pretty-printed JSON route summary.
    Json,
    /// Character plot of the star field and route.
    Plot,
}

/// Plot rendering settings.
#[derive(Debug, Clone, Copy)]
pub struct PlotStyle {
    /// Grid cells per 10 units of point space.
    pub scale: u16,
    pub palette: ColorPalette,
    pub unicode: bool,
}

impl PlotStyle {
    pub fn detect(scale: u16) -> Self {
        Self {
            scale,
            palette: ColorPalette::detect(),
            unicode: crate::terminal::supports_unicode(),
        }
    }

    /// Uncoloured ASCII style, used for piping and tests.
    pub fn plain(scale: u16) -> Self {
        Self {
            scale,
            palette: ColorPalette::plain(),
            unicode: false,
        }
    }
}

/// Write `summary` to `out` in the requested format.
pub fn render<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
    style: &PlotStyle,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            out.write_all(summary.render(RouteRenderMode::Indices).as_bytes())?;
            if summary.found {
                out.write_all(summary.render(RouteRenderMode::PlainText).as_bytes())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Plot => out.write_all(render_plot(summary, style).as_bytes())?,
    }
    Ok(())
}

/// Content of one plot cell; later variants draw over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cell {
    Empty,
    Line,
    Star,
    RouteStar,
    Start,
    Goal,
}

/// Draw the star field with the route overlaid, or a banner when no route
/// exists.
pub fn render_plot(summary: &RouteSummary, style: &PlotStyle) -> String {
    let side = grid_side(style.scale);
    let palette = &style.palette;
    let frame = Frame::new(style.unicode);
    let width = side * 2;

    let mut buffer = String::new();
    buffer.push_str(&frame.top(width, palette));

    if !summary.found {
        let message = "No Path Found!";
        let padding = width.saturating_sub(message.len());
        let left = padding / 2;
        let right = padding - left;
        buffer.push_str(&frame.row(" ".repeat(width), palette));
        buffer.push_str(&frame.row(
            format!(
                "{}{}{message}{}{}",
                " ".repeat(left),
                palette.banner,
                palette.reset,
                " ".repeat(right)
            ),
            palette,
        ));
        buffer.push_str(&frame.row(" ".repeat(width), palette));
        buffer.push_str(&frame.bottom(width, palette));
        return buffer;
    }

    let mut grid = vec![vec![Cell::Empty; side]; side];
    let mut paint = |cell: Option<(usize, usize)>, kind: Cell| {
        if let Some((column, row)) = cell {
            let slot = &mut grid[row][column];
            *slot = (*slot).max(kind);
        }
    };

    let path = summary.path.as_deref().unwrap_or_default();
    let project_index = |index: usize| {
        summary
            .points
            .get(index)
            .and_then(|point| project(point.x, point.y, style.scale))
    };

    for pair in path.windows(2) {
        if let (Some(from), Some(to)) = (project_index(pair[0]), project_index(pair[1])) {
            for cell in line_cells(from, to) {
                paint(Some(cell), Cell::Line);
            }
        }
    }
    for point in &summary.points {
        paint(project(point.x, point.y, style.scale), Cell::Star);
    }
    for &index in path {
        paint(project_index(index), Cell::RouteStar);
    }
    paint(project_index(summary.start), Cell::Start);
    paint(project_index(summary.goal), Cell::Goal);

    for row in &grid {
        let mut line = String::with_capacity(width);
        for &cell in row {
            line.push_str(&glyph(cell, style));
        }
        buffer.push_str(&frame.row(line, palette));
    }
    buffer.push_str(&frame.bottom(width, palette));
    buffer.push_str("S start  G goal  o route  * star\n");
    buffer
}

fn glyph(cell: Cell, style: &PlotStyle) -> String {
    let p = &style.palette;
    let (color, symbol) = match cell {
        Cell::Empty => return "  ".to_string(),
        Cell::Line => (p.route, if style.unicode { '·' } else { '.' }),
        Cell::Star => (p.star, '*'),
        Cell::RouteStar => (p.route, 'o'),
        Cell::Start => (p.start, 'S'),
        Cell::Goal => (p.goal, 'G'),
    };
    format!("{color}{symbol}{} ", p.reset)
}

/// Number of cells along each side of the square grid.
fn grid_side(scale: u16) -> usize {
    ((CANVAS_SIZE + 2.0 * CANVAS_MARGIN) * f32::from(scale) / 10.0).ceil() as usize
}

/// Map a point to `(column, row)` with the y axis pointing up. Points outside
/// the canvas are not drawn.
fn project(x: f32, y: f32, scale: u16) -> Option<(usize, usize)> {
    let unit = f32::from(scale) / 10.0;
    let column = ((x + CANVAS_MARGIN) * unit).floor();
    let row = ((CANVAS_SIZE - y + CANVAS_MARGIN) * unit).floor();
    let side = grid_side(scale) as f32;

    if column < 0.0 || row < 0.0 || column >= side || row >= side {
        return None;
    }
    Some((column as usize, row as usize))
}

/// Bresenham line between two cells, endpoints included.
fn line_cells(from: (usize, usize), to: (usize, usize)) -> Vec<(usize, usize)> {
    let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut error = dx + dy;

    let mut cells = Vec::new();
    loop {
        cells.push((x0 as usize, y0 as usize));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x0 += sx;
        }
        if doubled <= dx {
            error += dx;
            y0 += sy;
        }
    }
    cells
}

struct Frame {
    horizontal: &'static str,
    vertical: &'static str,
    corners: [&'static str; 4],
}

impl Frame {
    fn new(unicode: bool) -> Self {
        if unicode {
            Self {
                horizontal: "─",
                vertical: "│",
                corners: ["╭", "╮", "╰", "╯"],
            }
        } else {
            Self {
                horizontal: "-",
                vertical: "|",
                corners: ["+", "+", "+", "+"],
            }
        }
    }

    fn top(&self, width: usize, palette: &ColorPalette) -> String {
        format!(
            "{}{}{}{}{}\n",
            palette.frame,
            self.corners[0],
            self.horizontal.repeat(width),
            self.corners[1],
            palette.reset
        )
    }

    fn bottom(&self, width: usize, palette: &ColorPalette) -> String {
        format!(
            "{}{}{}{}{}\n",
            palette.frame,
            self.corners[2],
            self.horizontal.repeat(width),
            self.corners[3],
            palette.reset
        )
    }

    fn row(&self, content: String, palette: &ColorPalette) -> String {
        format!(
            "{frame}{v}{reset}{content}{frame}{v}{reset}\n",
            frame = palette.frame,
            v = self.vertical,
            reset = palette.reset
        )
    }
}
