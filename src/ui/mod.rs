pub mod widgets;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub input: Rect,
    pub button: Rect,
    pub results: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect, button_label: &str) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let label_width = u16::try_from(Line::from(button_label).width()).unwrap_or(u16::MAX);
    let button_width = label_width.saturating_add(4).max(10);
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(button_width)])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        input: input_row[0],
        button: input_row[1],
        results: rows[2],
        footer: rows[3],
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let regions = layout(frame.area(), &app.config().search.button_label);

    render_header(frame, regions.header, app);
    app.search().render_input(frame, regions.input, regions.button);
    app.search().render_results(frame, regions.results, app.tick());
    render_footer(frame, regions.footer);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.search().is_loading() {
        Span::styled("loading", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("idle", Style::default().fg(Color::Green))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", app.config().general.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        status,
    ]));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " Enter: search | ↑/↓: select | Ctrl-U: clear | Esc: quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_regions() {
        let regions = layout(Rect::new(0, 0, 80, 24), "Search");

        assert_eq!(regions.header, Rect::new(0, 0, 80, 1));
        assert_eq!(regions.input.height, 3);
        assert_eq!(regions.button.width, 10);
        assert_eq!(regions.button.x, 70);
        assert_eq!(regions.input.width, 70);
        assert_eq!(regions.results.y, 4);
        assert_eq!(regions.footer.y, 23);
    }

    #[test]
    fn test_layout_button_fits_long_label() {
        let regions = layout(Rect::new(0, 0, 80, 24), "Look it up now");
        assert_eq!(regions.button.width, 18);
    }

    #[test]
    fn test_layout_button_measures_display_width() {
        let regions = layout(Rect::new(0, 0, 80, 24), "検索する検索");
        assert_eq!(regions.button.width, 16);
    }

    #[test]
    fn test_layout_oversized_label_does_not_overflow() {
        let label = "x".repeat(70_000);
        let regions = layout(Rect::new(0, 0, 80, 24), &label);
        assert!(regions.button.width <= 80);
        assert_eq!(regions.header, Rect::new(0, 0, 80, 1));
    }
}
