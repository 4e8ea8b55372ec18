use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::app::App;
use crate::sort::Highlight;
use crate::viz::{BOTTOM_PAD, Entry, Geometry, SUBCELLS, TOP_PAD, plot_rows};

pub const HEADER_ROWS: u16 = 3;
pub const CONSOLE_ROWS: u16 = 4;

pub const GRADIENTS: [Color; 3] = [
    Color::Rgb(128, 128, 128),
    Color::Rgb(160, 160, 160),
    Color::Rgb(192, 192, 192),
];
pub const LANDED_COLOR: Color = Color::Green;
pub const SOURCE_COLOR: Color = Color::Red;

const CONTROLS: &str = "R - Reload Data | SPACE - Start Sorting | A - Ascending | D - Descending";
const ALGORITHMS: &str = "I - Insertion Sort | B - Bubble Sort | Q - Quit";
const FULL_BLOCK: &str = "█";
const EIGHTHS: [&str; 8] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇"];

/// Header, chart and console rectangles for a terminal of `area`.
pub fn layout_areas(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(1),
            Constraint::Length(CONSOLE_ROWS),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn chart_area(area: Rect) -> Rect {
    layout_areas(area)[1]
}

/// Full frame: title, instructions, chart and console. While a sort runs
/// the chart region is cleared on its own and drawn with the step highlight.
pub fn render_frame(frame: &mut Frame, app: &App) {
    let [header, chart, console] = layout_areas(frame.size());

    frame.render_widget(header_paragraph(app), header);

    let view = BarChartView::new(app.viz.entries(), app.viz.geometry())
        .highlight(app.highlight())
        .clear_background(app.is_sorting());
    frame.render_widget(view, chart);

    let console_block = Block::default().title("Console").borders(Borders::TOP);
    frame.render_widget(
        Paragraph::new(console_text(app)).block(console_block),
        console,
    );
}

fn header_paragraph(app: &App) -> Paragraph<'static> {
    let mut title = app.title();
    if app.is_sorting() {
        title.push_str(" [sorting]");
    }
    let title_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    Paragraph::new(vec![
        Line::styled(title, title_style),
        Line::raw(CONTROLS),
        Line::raw(ALGORITHMS),
    ])
    .alignment(Alignment::Center)
}

fn console_text(app: &App) -> String {
    if app.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = app.logs.len().saturating_sub(3);
    app.logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Label under a bar: the last word of the name, shortened further when
/// many bars compete for the width.
pub fn short_label(name: &str, count: usize) -> String {
    let last = name.split_whitespace().last().unwrap_or("");
    let len = last.chars().count();
    if len > 8 && count > 12 {
        format!("{}.", last.chars().take(5).collect::<String>())
    } else if len > 5 && count > 18 {
        format!("{}.", last.chars().take(4).collect::<String>())
    } else {
        last.to_string()
    }
}

pub fn bar_color(idx: usize, highlight: Option<Highlight>) -> Color {
    match highlight {
        Some(h) if h.landed == idx => LANDED_COLOR,
        Some(h) if h.source == idx => SOURCE_COLOR,
        _ => GRADIENTS[idx % GRADIENTS.len()],
    }
}

pub struct BarChartView<'a> {
    entries: &'a [Entry],
    geometry: Geometry,
    highlight: Option<Highlight>,
    clear_background: bool,
}

impl<'a> BarChartView<'a> {
    pub fn new(entries: &'a [Entry], geometry: Geometry) -> Self {
        Self {
            entries,
            geometry,
            highlight: None,
            clear_background: false,
        }
    }

    pub fn highlight(mut self, highlight: Option<Highlight>) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn clear_background(mut self, clear: bool) -> Self {
        self.clear_background = clear;
        self
    }
}

impl Widget for BarChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.clear_background {
            Clear.render(area, buf);
        }
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.entries.is_empty() {
            buf.set_string(area.x, area.y, "No data", Style::default().fg(Color::DarkGray));
            return;
        }

        let rows = plot_rows(area.height);
        let bottom = area.bottom().saturating_sub(BOTTOM_PAD);
        let max_units = rows as u32 * SUBCELLS;
        let slot = self.geometry.bar_width;
        let fill = if slot >= 3 { slot - 1 } else { slot };
        let count = self.entries.len();

        for (idx, entry) in self.entries.iter().enumerate() {
            let offset = self.geometry.bar_x(idx);
            if offset >= area.width as u32 {
                break;
            }
            let x = area.x + offset as u16;
            let width = fill.min(area.right() - x);
            let style = Style::default().fg(bar_color(idx, self.highlight));

            let units = self.geometry.bar_units(entry.goals).min(max_units);
            let full_rows = (units / SUBCELLS) as u16;
            let partial = (units % SUBCELLS) as usize;
            for k in 0..full_rows {
                fill_row(buf, x, bottom - 1 - k, width, FULL_BLOCK, style);
            }
            if partial > 0 {
                fill_row(buf, x, bottom - 1 - full_rows, width, EIGHTHS[partial], style);
            }

            let used_rows = full_rows + u16::from(partial > 0);
            let label_width = slot.min(area.right() - x);
            if rows > 0 && bottom > area.y + used_rows {
                let value_row = bottom - 1 - used_rows;
                let value = entry.goals.to_string();
                draw_centered(buf, x, value_row, label_width, &value, Style::default());
            }

            if area.height > TOP_PAD {
                let name = short_label(&entry.name, count);
                draw_centered(buf, x, area.bottom() - 1, label_width, &name, Style::default());
            }
        }
    }
}

fn fill_row(buf: &mut Buffer, x: u16, y: u16, width: u16, symbol: &str, style: Style) {
    for dx in 0..width {
        buf.get_mut(x + dx, y).set_symbol(symbol).set_style(style);
    }
}

fn draw_centered(buf: &mut Buffer, x: u16, y: u16, width: u16, text: &str, style: Style) {
    if width == 0 {
        return;
    }
    let len = text.chars().count() as u16;
    let pad = width.saturating_sub(len) / 2;
    buf.set_stringn(x + pad, y, text, (width - pad) as usize, style);
}
