use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
};

use super::app::{Focus, MessageType, StatusMessage, Tab};
use super::layout::{DashboardLayout, SidebarLayout};
use crate::conversation::{is_error_message, usage_note};
use crate::models::{ConversationTurn, MetricSample, MetricsSummary, Role};
use crate::utils::sanitize_for_terminal;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const EMERALD: Color = Color::Rgb(16, 185, 129);
const RED: Color = Color::Rgb(239, 68, 68);
const BACKGROUND: Color = Color::Rgb(24, 24, 27);
const ACCURACY_COLOR: Color = Color::Rgb(0x4C, 0xAF, 0x50);
const LATENCY_COLOR: Color = Color::Rgb(0xFF, 0x57, 0x22);

const ACCURACY_BOUNDS: [f64; 2] = [0.80, 1.00];
const LATENCY_BOUNDS: [f64; 2] = [60.0, 220.0];

const INPUT_PLACEHOLDER: &str = "How can I help with your AI model?";
const FOOTER_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Everything the dashboard needs for one frame
pub struct DashboardView<'a> {
    pub samples: &'a [MetricSample],
    pub summary: MetricsSummary,
    pub selected_tab: Tab,
    pub focus: Focus,
    pub api_key: &'a str,
    pub api_connected: bool,
    pub last_usage: Option<u64>,
    pub default_model: &'a str,
    pub turns: &'a [ConversationTurn],
    pub pending_prompt: Option<&'a str>,
    pub chat_input: &'a str,
    pub chat_scroll: u16,
    pub status_message: Option<&'a StatusMessage>,
    pub updated_at: DateTime<Local>,
}

/// Render the entire dashboard
pub fn render_dashboard(frame: &mut Frame, view: &DashboardView) {
    let layout = DashboardLayout::new(frame.area());

    render_sidebar(frame, layout.sidebar_area, view);
    render_header(frame, layout.header_area);
    render_cards(frame, &layout.cards_area, &view.summary);
    render_tabs(frame, layout.tabs_area, view.selected_tab);
    match view.selected_tab {
        Tab::Data => render_table(frame, layout.tab_content_area, view.samples),
        Tab::Charts => render_charts(frame, layout.tab_content_area, view.samples),
    }
    render_chat(frame, layout.chat_area, view.turns, view.pending_prompt, view.chat_scroll);
    render_input(frame, layout.input_area, view.chat_input, view.focus == Focus::ChatInput);
    render_footer(frame, layout.footer_area, view.status_message, &view.updated_at);
}

fn bordered(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { EMERALD } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
}

fn render_sidebar(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = bordered(" ⚙️ Settings ", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = SidebarLayout::new(inner);
    let key_focused = view.focus == Focus::ApiKey;

    let label_style = if key_focused {
        Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    frame.render_widget(Paragraph::new("OpenAI API key").style(label_style), layout.label_area);

    let masked = "*".repeat(view.api_key.chars().count());
    let key_field = Paragraph::new(masked.as_str()).block(bordered("", key_focused));
    frame.render_widget(key_field, layout.key_field_area);
    if key_focused {
        let width = masked.chars().count() as u16;
        set_cursor_in(frame, layout.key_field_area, width);
    }

    let mut lines = vec![Line::from("")];
    if view.api_connected {
        lines.push(Line::styled("✅ API connected", Style::default().fg(EMERALD)));
    } else {
        lines.push(Line::styled("API not connected", Style::default().fg(MUTED)));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("Tokens are calculated automatically", Style::default().fg(MUTED)));
    lines.push(Line::styled(
        format!("Default model: {}", view.default_model),
        Style::default().fg(MUTED),
    ));

    if let Some(total_tokens) = view.last_usage {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("🔢 {}", usage_note(total_tokens)),
            Style::default().fg(BRIGHT),
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled("Tab: focus  Ctrl+T: tab", Style::default().fg(MUTED)));
    lines.push(Line::styled("Ctrl+Y: copy  Ctrl+L: clear", Style::default().fg(MUTED)));
    lines.push(Line::styled("Esc: clear  Ctrl+C: quit", Style::default().fg(MUTED)));

    let info = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    frame.render_widget(info, layout.info_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(" 📊 AI Model Monitoring")
        .style(Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

fn render_cards(frame: &mut Frame, areas: &[Rect; 3], summary: &MetricsSummary) {
    let cards = [
        ("Average accuracy", format!("{:.2}%", summary.mean_accuracy * 100.0)),
        ("Average latency", format!("{:.1} ms", summary.mean_latency_ms)),
        ("Total calls", summary.total_calls.to_string()),
    ];

    for ((title, value), area) in cards.iter().zip(areas) {
        let card = Paragraph::new(Line::from(Span::styled(
            value.as_str(),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )))
        .block(bordered(title, false));
        frame.render_widget(card, *area);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, selected: Tab) {
    let tabs = Tabs::new(Tab::ALL.map(Tab::title))
        .select(selected.index())
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(BRIGHT).bg(EMERALD).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, samples: &[MetricSample]) {
    let header = Row::new(["Date", "Model", "Accuracy", "Latency (ms)", "Calls"])
        .style(Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD));

    let rows = samples.iter().map(|sample| {
        Row::new([
            Cell::from(sample.formatted_date()),
            Cell::from(sample.model.clone()),
            Cell::from(format!("{:.2}", sample.accuracy)),
            Cell::from(format!("{:.1}", sample.latency_ms)),
            Cell::from(sample.calls.to_string()),
        ])
        .style(Style::default().fg(MUTED))
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(bordered(" Samples ", false));
    frame.render_widget(table, area);
}

fn render_charts(frame: &mut Frame, area: Rect, samples: &[MetricSample]) {
    // Accuracy and latency have unrelated scales, so each gets its own panel
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let accuracy: Vec<(f64, f64)> =
        samples.iter().enumerate().map(|(i, s)| (i as f64, s.accuracy)).collect();
    let latency: Vec<(f64, f64)> =
        samples.iter().enumerate().map(|(i, s)| (i as f64, s.latency_ms)).collect();

    render_line_chart(
        frame,
        panels[0],
        samples,
        " Accuracy ",
        &accuracy,
        ACCURACY_COLOR,
        ACCURACY_BOUNDS,
        |v| format!("{v:.2}"),
    );
    render_line_chart(
        frame,
        panels[1],
        samples,
        " Latency (ms) ",
        &latency,
        LATENCY_COLOR,
        LATENCY_BOUNDS,
        |v| format!("{v:.0}"),
    );
}

#[allow(clippy::too_many_arguments)]
fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    samples: &[MetricSample],
    title: &str,
    points: &[(f64, f64)],
    color: Color,
    y_bounds: [f64; 2],
    y_label: fn(f64) -> String,
) {
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(points);

    // Dates of the first and last sample label the x axis
    let x_labels: Vec<String> = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => vec![first.formatted_date(), last.formatted_date()],
        _ => Vec::new(),
    };
    let x_max = samples.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(vec![dataset])
        .block(bordered(title, false))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds(y_bounds)
                .labels([y_label(y_bounds[0]), y_label(y_bounds[1])]),
        );

    frame.render_widget(chart, area);
}

fn turn_lines(turn: &ConversationTurn) -> Vec<Line<'static>> {
    let (label, label_color) = match turn.role {
        Role::User => ("👤 You", BRIGHT),
        Role::Assistant => ("🤖 Assistant", EMERALD),
        Role::System => ("System", MUTED),
    };
    let body_color = if turn.role == Role::Assistant && is_error_message(&turn.content) {
        RED
    } else {
        BRIGHT
    };

    let mut lines = vec![Line::styled(
        label,
        Style::default().fg(label_color).add_modifier(Modifier::BOLD),
    )];
    let content = sanitize_for_terminal(&turn.content);
    lines.extend(
        content.lines().map(|l| Line::styled(l.to_string(), Style::default().fg(body_color))),
    );
    lines.push(Line::from(""));
    lines
}

/// Rows needed to show `lines` wrapped at `width` columns (approximate for wide characters)
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines.iter().map(|line| line.width().div_ceil(width).max(1)).sum();
    rows.min(u16::MAX as usize) as u16
}

fn render_chat(
    frame: &mut Frame,
    area: Rect,
    turns: &[ConversationTurn],
    pending_prompt: Option<&str>,
    scroll_from_bottom: u16,
) {
    let block = bordered(" 🤖 AI Assistant ", false);
    let inner = block.inner(area);

    let mut lines: Vec<Line<'static>> = turns.iter().flat_map(turn_lines).collect();
    if let Some(prompt) = pending_prompt {
        lines.push(Line::styled(
            "👤 You",
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        ));
        let prompt = sanitize_for_terminal(prompt);
        lines.extend(
            prompt.lines().map(|l| Line::styled(l.to_string(), Style::default().fg(BRIGHT))),
        );
        lines.push(Line::from(""));
        lines.push(Line::styled("⏳ Analyzing your query...", Style::default().fg(MUTED)));
    }
    if lines.is_empty() {
        lines.push(Line::styled(
            "Ask a question about your models below.",
            Style::default().fg(MUTED),
        ));
    }

    // Keep the newest lines in view; scrolling moves up from the bottom
    let total = wrapped_height(&lines, inner.width);
    let offset = total.saturating_sub(inner.height).saturating_sub(scroll_from_bottom);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, focused: bool) {
    let content = if input.is_empty() {
        Line::styled(INPUT_PLACEHOLDER, Style::default().fg(MUTED))
    } else {
        Line::styled(input, Style::default().fg(BRIGHT))
    };
    let paragraph = Paragraph::new(content).block(bordered(" Message ", focused));
    frame.render_widget(paragraph, area);

    if focused {
        set_cursor_in(frame, area, Line::from(input).width() as u16);
    }
}

/// Place the cursor after `offset` columns inside a bordered field
fn set_cursor_in(frame: &mut Frame, area: Rect, offset: u16) {
    let max_x = area.x + area.width.saturating_sub(2);
    let x = (area.x + 1 + offset).min(max_x);
    frame.set_cursor_position(Position::new(x, area.y + 1));
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    status: Option<&StatusMessage>,
    updated_at: &DateTime<Local>,
) {
    let (text, style) = if let Some(msg) = status {
        let color = match msg.message_type {
            MessageType::Success => EMERALD,
            MessageType::Error => RED,
        };
        (format!(" {} ", msg.text), Style::default().fg(color).bg(BACKGROUND))
    } else {
        (
            format!(
                " 📌 Real-time monitoring - Updated at {} ",
                updated_at.format(FOOTER_TIME_FORMAT)
            ),
            Style::default().fg(BRIGHT).bg(BACKGROUND),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::{NaiveDate, TimeZone};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::conversation::format_error_message;
    use crate::metrics::summarize;

    fn sample(day: u32, accuracy: f64, latency_ms: f64, calls: u32) -> MetricSample {
        MetricSample {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            model: "Model A".to_string(),
            accuracy,
            latency_ms,
            calls,
        }
    }

    fn test_samples() -> Vec<MetricSample> {
        vec![sample(14, 0.90, 100.0, 300), sample(15, 0.94, 120.0, 500)]
    }

    fn view<'a>(samples: &'a [MetricSample], turns: &'a [ConversationTurn]) -> DashboardView<'a> {
        DashboardView {
            samples,
            summary: summarize(samples),
            selected_tab: Tab::Data,
            focus: Focus::ChatInput,
            api_key: "",
            api_connected: false,
            last_usage: None,
            default_model: "gpt-3.5-turbo",
            turns,
            pending_prompt: None,
            chat_input: "",
            chat_scroll: 0,
            status_message: None,
            updated_at: Local.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap(),
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(view: &DashboardView) -> String {
        let backend = TestBackend::new(140, 44);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_dashboard(f, view)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_render_dashboard_data_tab() {
        let samples = test_samples();
        let text = draw(&view(&samples, &[]));

        assert!(text.contains("AI Model Monitoring"));
        assert!(text.contains("92.00%"));
        assert!(text.contains("110.0 ms"));
        assert!(text.contains("800"));
        assert!(text.contains("14/06/2024"));
        assert!(text.contains("Model A"));
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(text.contains("Updated at 15/06/2024 09:30"));
    }

    #[test]
    fn test_render_dashboard_charts_tab() {
        let samples = test_samples();
        let mut v = view(&samples, &[]);
        v.selected_tab = Tab::Charts;

        let text = draw(&v);

        assert!(text.contains("Accuracy"));
        assert!(text.contains("Latency (ms)"));
        assert!(text.contains("0.80"));
        assert!(text.contains("220"));
    }

    #[test]
    fn test_render_empty_samples() {
        let mut v = view(&[], &[]);
        v.selected_tab = Tab::Charts;

        // Must not panic with no data
        let text = draw(&v);
        assert!(text.contains("0.00%"));
    }

    #[test]
    fn test_sidebar_masks_api_key() {
        let samples = test_samples();
        let mut v = view(&samples, &[]);
        v.api_key = "sk-secret";

        let text = draw(&v);

        assert!(text.contains("*********"));
        assert!(!text.contains("sk-secret"));
        assert!(text.contains("API not connected"));
        assert!(text.contains("Default model: gpt-3.5-turbo"));
        assert!(text.contains("Tokens are calculated"));
    }

    #[test]
    fn test_sidebar_shows_status_and_usage() {
        let samples = test_samples();
        let mut v = view(&samples, &[]);
        v.api_connected = true;
        v.last_usage = Some(42);

        let text = draw(&v);

        assert!(text.contains("API connected"));
        assert!(!text.contains("API not connected"));
        assert!(text.contains("Tokens used: 42"));
    }

    #[test]
    fn test_chat_shows_turns() {
        let samples = test_samples();
        let turns = vec![
            ConversationTurn::user("What is drift?"),
            ConversationTurn::assistant("Drift is a change in input data."),
        ];

        let text = draw(&view(&samples, &turns));

        assert!(text.contains("What is drift?"));
        assert!(text.contains("Drift is a change in input data."));
        assert!(text.contains("Assistant"));
    }

    #[test]
    fn test_chat_shows_pending_prompt() {
        let samples = test_samples();
        let mut v = view(&samples, &[]);
        v.pending_prompt = Some("Explain precision");

        let text = draw(&v);

        assert!(text.contains("Explain precision"));
        assert!(text.contains("Analyzing your query..."));
    }

    #[test]
    fn test_chat_error_turn_rendered_red() {
        let turns = vec![
            ConversationTurn::user("hello"),
            ConversationTurn::assistant(format_error_message(&"quota exceeded")),
        ];
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_chat(f, area, &turns, None, 0);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let red_cells = buffer.content().iter().filter(|cell| cell.fg == RED).count();
        assert!(red_cells > 0);
        assert!(buffer_text(&terminal).contains("quota exceeded"));
    }

    #[test]
    fn test_chat_strips_escape_sequences() {
        let turns = vec![ConversationTurn::assistant("\x1b[2J\x1b]0;title\x07clean reply")];
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_chat(f, area, &turns, None, 0);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("clean reply"));
        assert!(!text.contains("title"));
    }

    #[test]
    fn test_chat_keeps_newest_lines_visible() {
        let turns: Vec<ConversationTurn> =
            (0..6).map(|i| ConversationTurn::assistant(format!("reply number {i}"))).collect();
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_chat(f, area, &turns, None, 0);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("reply number 5"));
        assert!(!text.contains("reply number 0"));
    }

    #[test]
    fn test_chat_scroll_reveals_older_lines() {
        let turns: Vec<ConversationTurn> =
            (0..6).map(|i| ConversationTurn::assistant(format!("reply number {i}"))).collect();
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_chat(f, area, &turns, None, u16::MAX);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("reply number 0"));
        assert!(!text.contains("reply number 5"));
    }

    #[test]
    fn test_footer_shows_status_message() {
        let samples = test_samples();
        let status = StatusMessage {
            text: "✓ Conversation cleared".to_string(),
            message_type: MessageType::Success,
            expires_at: Instant::now() + Duration::from_secs(5),
        };
        let mut v = view(&samples, &[]);
        v.status_message = Some(&status);

        let text = draw(&v);

        assert!(text.contains("Conversation cleared"));
        assert!(!text.contains("Updated at"));
    }

    #[test]
    fn test_input_shows_typed_text() {
        let samples = test_samples();
        let mut v = view(&samples, &[]);
        v.chat_input = "How do I reduce latency";

        let text = draw(&v);

        assert!(text.contains("How do I reduce latency"));
        assert!(!text.contains(INPUT_PLACEHOLDER));
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("abcdef"), Line::from(""), Line::from("abc")];

        assert_eq!(wrapped_height(&lines, 3), 4);
        assert_eq!(wrapped_height(&lines, 10), 3);
        assert_eq!(wrapped_height(&lines, 0), 10);
    }
}
