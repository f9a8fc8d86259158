//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row,
    Table,
};

use super::runtime::App;
use super::style;
use crate::data::Country;
use crate::stats::{CorrelationMatrix, GroupMeans, HistogramBin};
use crate::view::render::{RenderRequest, Series};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_sidebar(frame, app, body[0]);
    render_main(frame, app, body[1]);
    render_footer(frame, chunks[2]);
}

/// Header bar: selected country, section count, heatmap state, read count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let heatmap = if app.show_heatmap() { "on" } else { "off" };
    let header = Line::from(vec![
        Span::styled(
            " SOLAR-DASH ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            app.country.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ sections={} │ heatmap={} │ reads={} ",
            app.section_count(),
            heatmap,
            app.file_reads(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Sidebar: country selector, heatmap toggle state, section list, warnings.
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Countries",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for (i, country) in Country::ALL.into_iter().enumerate() {
        let marker = if country == app.country { "▶" } else { " " };
        let cached = if app.is_cached(country) { "*" } else { " " };
        let text = format!(" {marker} {}. {}{cached}", i + 1, country.label());
        let line_style = if country == app.country {
            Style::default().fg(style::SELECTED_FG)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, line_style)));
    }

    lines.push(Line::default());
    lines.push(Line::from(format!(
        " [h] heatmap: {}",
        if app.show_heatmap() { "on" } else { "off" }
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Sections",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if let Some(pass) = &app.pass {
        for (i, request) in pass.requests.iter().enumerate() {
            let marker = if i == app.selected { "▶" } else { " " };
            let line_style = if i == app.selected {
                Style::default().fg(style::SELECTED_FG)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(" {marker} {}", request.title()),
                line_style,
            )));
        }
        for warning in &pass.warnings {
            lines.push(Line::from(Span::styled(
                format!(" ! {warning}"),
                Style::default().fg(style::WARNING_FG),
            )));
        }
    }

    if let Some(err) = &app.load_error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(style::ERROR_FG),
        )));
    }

    let block = Block::default().title(" Filters ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Main chart area: renders the section under the cursor.
fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    let Some(request) = app.selected_request() else {
        let message = app
            .load_error
            .as_deref()
            .unwrap_or("No sections eligible for this dataset.");
        let block = Block::default().borders(Borders::ALL);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(style::ERROR_FG),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", request.title()))
        .borders(Borders::ALL);

    match request {
        RenderRequest::Preview { columns, rows, .. } => {
            render_preview(frame, area, block, columns, rows);
        }
        RenderRequest::IrradianceTimeSeries {
            timestamps,
            series,
            x_label,
            y_label,
        } => {
            render_time_series(frame, area, block, timestamps, series, x_label, y_label);
        }
        RenderRequest::GhiHistogram { bins, .. } => {
            render_histogram(frame, area, block, bins, style::GHI_BAR);
        }
        RenderRequest::GhiTambBubble {
            tamb,
            ghi,
            x_label,
            y_label,
            ..
        } => {
            render_bubble(frame, area, block, tamb, ghi, x_label, y_label);
        }
        RenderRequest::CleaningImpactBar { means } => {
            render_cleaning_bar(frame, area, block, means);
        }
        RenderRequest::CorrelationHeatmap {
            matrix, annotate, ..
        } => {
            render_heatmap(frame, area, block, matrix, *annotate);
        }
        RenderRequest::WindSpeedHistogram { bins, .. } => {
            render_histogram(frame, area, block, bins, style::WS_BAR);
        }
    }
}

/// First rows of the table as a scroll-less grid.
fn render_preview(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    columns: &[String],
    rows: &[Vec<String>],
) {
    let header = Row::new(columns.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let body = rows.iter().map(|r| Row::new(r.clone()));
    let widths = vec![Constraint::Min(8); columns.len()];
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

/// GHI/DNI/DHI line chart over the timestamp axis.
fn render_time_series(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    timestamps: &[Option<chrono::NaiveDateTime>],
    series: &[Series],
    x_label: &str,
    y_label: &str,
) {
    let colors = [style::GHI_COLOR, style::DNI_COLOR, style::DHI_COLOR];
    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .filter(|(i, _)| timestamps.get(*i).copied().flatten().is_some())
                .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (s, data))| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors[i % colors.len()]))
                .data(data)
        })
        .collect();

    let y_bounds = style::auto_bounds(points.iter().flatten().map(|&(_, y)| y));
    let x_hi = (timestamps.len().saturating_sub(1) as f64).max(1.0);

    let fmt_stamp = |idx: usize| {
        timestamps
            .get(idx)
            .copied()
            .flatten()
            .map(|t| t.format("%m-%d %H:%M").to_string())
            .unwrap_or_default()
    };
    let first = timestamps.iter().position(Option::is_some).unwrap_or(0);
    let last = timestamps
        .iter()
        .rposition(Option::is_some)
        .unwrap_or(timestamps.len().saturating_sub(1));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(x_label.to_string())
                .bounds([0.0, x_hi])
                .labels(vec![fmt_stamp(first), fmt_stamp(last)]),
        )
        .y_axis(
            Axis::default()
                .title(y_label.to_string())
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Histogram as a bar chart, one bar per bin that fits the area.
fn render_histogram(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    bins: &[HistogramBin],
    color: ratatui::style::Color,
) {
    // 3-wide bars with a 1-cell gap; surplus bins are clipped to the area
    let max_bars = (area.width.saturating_sub(2) as usize / 4).max(1);
    let labels: Vec<String> = bins
        .iter()
        .take(max_bars)
        .map(|b| format!("{:.0}", b.lower))
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(bins)
        .map(|(label, b)| (label.as_str(), b.count))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .data(data.as_slice());
    frame.render_widget(chart, area);
}

/// GHI vs Tamb scatter (the RH size/color channel has no braille encoding).
fn render_bubble(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    tamb: &[Option<f64>],
    ghi: &[Option<f64>],
    x_label: &str,
    y_label: &str,
) {
    let points: Vec<(f64, f64)> = tamb
        .iter()
        .zip(ghi)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((*x, *y)),
            _ => None,
        })
        .collect();

    let x_bounds = style::auto_bounds(points.iter().map(|&(x, _)| x));
    let y_bounds = style::auto_bounds(points.iter().map(|&(_, y)| y));

    let datasets = vec![
        Dataset::default()
            .name("GHI")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(style::BUBBLE_COLOR))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(x_label.to_string())
                .bounds(x_bounds)
                .labels(vec![
                    format!("{:.1}", x_bounds[0]),
                    format!("{:.1}", x_bounds[1]),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(y_label.to_string())
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Grouped bars: mean ModA/ModB per cleaning flag value.
fn render_cleaning_bar(frame: &mut Frame, area: Rect, block: Block, means: &GroupMeans) {
    let colors = [style::MODA_COLOR, style::MODB_COLOR];
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(7)
        .bar_gap(1)
        .group_gap(3);

    for group in &means.groups {
        let bars: Vec<Bar> = means
            .value_columns
            .iter()
            .zip(&group.means)
            .enumerate()
            .map(|(i, (name, mean))| {
                let value = mean.unwrap_or(0.0);
                Bar::default()
                    .value(value.round().max(0.0) as u64)
                    .text_value(format!("{value:.1}"))
                    .label(Line::from(name.clone()))
                    .style(Style::default().fg(colors[i % colors.len()]))
            })
            .collect();
        let label = format!("{}={}", means.key, group.label);
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }
    frame.render_widget(chart, area);
}

/// Correlation heatmap: colored cells for the visible lower triangle.
fn render_heatmap(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    matrix: &CorrelationMatrix,
    annotate: bool,
) {
    let mut lines = Vec::with_capacity(matrix.len() + 1);

    // Column header row, offset past the row labels
    let mut header = vec![Span::raw(" ".repeat(11))];
    for label in &matrix.labels {
        header.push(Span::styled(
            format!("{:>7} ", trunc(label, 7)),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(header));

    for (row, label) in matrix.labels.iter().enumerate() {
        let mut spans = vec![Span::raw(format!("{:<11}", trunc(label, 10)))];
        for col in 0..matrix.len() {
            if matrix.masked(row, col) {
                spans.push(Span::raw(" ".repeat(8)));
                continue;
            }
            let r = matrix.values[row][col];
            let cell_style = Style::default().fg(style::corr_color(r));
            let text = if r.is_nan() {
                format!("{:>7} ", "·")
            } else if annotate {
                format!("{r:>7.2} ")
            } else {
                format!("{:>7} ", "██████")
            };
            spans.push(Span::styled(text, cell_style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Truncates a label to at most `n` characters.
fn trunc(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  1/2/3:Country  h:Heatmap  j/k:Section  r:Rerun",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
