use crate::App;
use moodjournal_core::Language;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the language selector popup
pub fn render_language_picker(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(40, 50, area);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = Language::ALL
        .iter()
        .enumerate()
        .map(|(idx, language)| {
            let indicator = if *language == app.language { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(indicator),
                Span::styled(format!("{} ", idx + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(language.name(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" ({})", language.code()),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", app.labels.language))
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White))
        .highlight_style(Style::default().bg(Color::Rgb(68, 71, 90)).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(app.language_cursor));
    frame.render_stateful_widget(list, popup_area, &mut state);

    // Help text on the bottom border
    let help_area = Rect {
        y: popup_area.y + popup_area.height.saturating_sub(1),
        height: 1,
        ..popup_area
    };

    let help = Paragraph::new(Line::from(vec![
        Span::styled("j/k: navigate | ", Style::default().fg(Color::Gray)),
        Span::styled("ENTER: apply | ", Style::default().fg(Color::Yellow)),
        Span::styled("ESC: cancel", Style::default().fg(Color::Gray)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(help, help_area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
