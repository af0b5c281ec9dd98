//! Frame Rendering
//!
//! Draws the whole UI each frame: the gradient strip, the per-channel
//! curve plot, the parameter table with its selection, the sampled
//! color swatches, and the status bar. Painting goes straight into the
//! frame buffer cell by cell; the gradient needs per-column background
//! colors that no widget provides.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// Curve plot spans palette values in [-1, 1]: row = (1 - v)/2 of the
/// plot height. Values past the span clip at the plot edges.
const PLOT_MIN: f64 = -1.0;
const PLOT_MAX: f64 = 1.0;

/// Labels for the four parameter rows
const PARAM_LABELS: [&str; 4] = ["A offset", "B amplitude", "C frequency", "D shift"];

/// Draw the full UI and remember the gradient area for mouse hits.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [strip, plot, table, swatches, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    app.gradient_area = strip;

    draw_gradient(app, frame, strip);
    draw_curves(app, frame, plot);
    draw_table(app, frame, table);
    draw_swatches(app, frame, swatches);
    draw_status(app, frame, status);
}

/// Map a palette value to a plot row (0 = top).
pub(crate) fn curve_row(value: f64, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    let t = ((PLOT_MAX - value) / (PLOT_MAX - PLOT_MIN)).clamp(0.0, 1.0);
    ((t * f64::from(height - 1)).round() as u16).min(height - 1)
}

fn draw_gradient(app: &App, frame: &mut Frame, area: Rect) {
    let buf = frame.buffer_mut();
    for x in 0..area.width {
        let Some(color) = app.raster.pixel(x as usize) else {
            continue;
        };
        let bg = Color::Rgb(color.r, color.g, color.b);
        for y in area.y..area.y + area.height {
            if let Some(cell) = buf.cell_mut((area.x + x, y)) {
                cell.set_char(' ');
                cell.set_bg(bg);
            }
        }
    }
}

fn draw_curves(app: &App, frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let palette = *app.palette();
    let buf = frame.buffer_mut();

    // midline at value 0 and 1 for orientation
    for value in [0.0, 1.0] {
        let y = area.y + curve_row(value, area.height);
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char('-');
                cell.set_fg(theme::DIM_GRAY);
            }
        }
    }

    let colors = [theme::CURVE_RED, theme::CURVE_GREEN, theme::CURVE_BLUE];
    for x in 0..area.width {
        let u = f64::from(x) / f64::from(area.width);
        let channels = palette.color_at(u);
        for (value, color) in channels.into_iter().zip(colors) {
            let y = area.y + curve_row(value, area.height);
            if let Some(cell) = buf.cell_mut((area.x + x, y)) {
                cell.set_char('•');
                cell.set_fg(color);
            }
        }
    }
}

fn draw_table(app: &App, frame: &mut Frame, area: Rect) {
    if area.height < 5 {
        return;
    }
    let palette = app.palette();
    let buf = frame.buffer_mut();
    let label_width = 14u16;
    let cell_width = 10u16;

    let header = Style::default().fg(theme::DIM_GRAY);
    for (col, name) in ["R", "G", "B"].iter().enumerate() {
        let x = area.x + label_width + col as u16 * cell_width;
        buf.set_string(x, area.y, *name, header);
    }

    let rows = [palette.a, palette.b, palette.c, palette.d];
    for (row, (label, param)) in PARAM_LABELS.iter().zip(rows).enumerate() {
        let y = area.y + 1 + row as u16;
        buf.set_string(area.x, y, *label, Style::default().fg(theme::TEXT));

        for (col, value) in [param.r, param.g, param.b].into_iter().enumerate() {
            let x = area.x + label_width + col as u16 * cell_width;
            let mut style = Style::default().fg(theme::TEXT);
            if app.selection == (row, col) {
                style = style.bg(theme::SELECTION_BG).add_modifier(Modifier::BOLD);
            }
            buf.set_string(x, y, format!("{value:+.3}"), style);
        }
    }
}

fn draw_swatches(app: &App, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let buf = frame.buffer_mut();

    if app.samples.is_empty() {
        buf.set_string(
            area.x,
            area.y,
            "click the gradient to sample colors",
            Style::default().fg(theme::DIM_GRAY),
        );
        return;
    }

    let mut x = area.x;
    for (index, color) in app.samples.colors().iter().enumerate() {
        if x + 4 > area.x + area.width {
            break;
        }
        let selected = app.selected_sample == Some(index);
        let marker = if selected { ('[', ']') } else { (' ', ' ') };
        buf.set_string(x, area.y, marker.0.to_string(), Style::default());
        buf.set_string(
            x + 1,
            area.y,
            "  ",
            Style::default().bg(Color::Rgb(color.r, color.g, color.b)),
        );
        buf.set_string(x + 3, area.y, marker.1.to_string(), Style::default());
        x += 4;
    }

    if area.height > 1 {
        if let Some(color) = app.selected_sample.and_then(|i| app.samples.get(i)) {
            buf.set_string(
                area.x,
                area.y + 1,
                color.format(app.color_format),
                Style::default().fg(theme::TEXT),
            );
        }
    }
}

fn draw_status(app: &App, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let accent = theme::complement_accent(app.raster.average_hue());
    let buf = frame.buffer_mut();

    let text = match app.notice() {
        Some(notice) => notice.to_string(),
        None if app.is_animating() => "randomizing...".to_string(),
        None => {
            "r randomize  R instant  arrows select  -/= adjust  [/] pick  d remove  \
             f format  y/Y copy  q quit"
                .to_string()
        }
    };
    buf.set_string(area.x, area.y, &text, Style::default().fg(accent));

    // share code on the right, truncated to whatever room is left
    let used = text.chars().count() as u16 + 2;
    if area.width > used {
        let room = (area.width - used) as usize;
        let mut code = app.palette().to_share();
        code.truncate(room);
        let x = area.x + area.width - code.len() as u16;
        buf.set_string(x, area.y, code, Style::default().fg(theme::DIM_GRAY));
    }
}
