// UI rendering logic
use crate::{App, InputMode, Phase};
use moodjournal_core::Color as MoodColor;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Widest the quote card is allowed to get
const CARD_MAX_WIDTH: u16 = 72;

const QUOTE_TEXT: Color = Color::Rgb(0x33, 0x33, 0x33);
const AUTHOR_TEXT: Color = Color::Rgb(0x55, 0x55, 0x55);
const BUTTON_PINK: Color = Color::Rgb(0xff, 0x6e, 0xc4);
const BUTTON_VIOLET: Color = Color::Rgb(0x78, 0x73, 0xf5);

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let background = to_ratatui_color(app.palette.background);
    let foreground = text_on(app.palette.background);

    frame.render_widget(
        Block::default().style(Style::default().bg(background).fg(foreground)),
        area,
    );

    // Favorites take up to a third of the screen once there are any
    let favorites_height = if app.favorites.is_empty() {
        0
    } else {
        (app.favorites.len() as u16 + 2).min(area.height / 3).max(3)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Title + subtitle
            Constraint::Length(1),                // Language
            Constraint::Min(5),                   // Quote card
            Constraint::Length(1),                // Buttons
            Constraint::Length(favorites_height), // Favorites
            Constraint::Length(1),                // Status bar
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_language_line(frame, app, chunks[1]);
    render_card(frame, app, chunks[2]);
    render_buttons(frame, app, chunks[3]);
    if favorites_height > 0 {
        render_favorites(frame, app, chunks[4]);
    }
    render_status_bar(frame, app, chunks[5]);

    render_confetti(frame, app, area);

    if app.input_mode == InputMode::LanguagePicker {
        crate::language_ui::render_language_picker(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            app.labels.title,
            Style::default().fg(BUTTON_PINK).add_modifier(Modifier::BOLD),
        )),
        Line::from(app.labels.subtitle),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_language_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::raw(format!("{}: ", app.labels.language)),
        Span::styled(
            format!("{} ({})", app.language.name(), app.language.code()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let card_area = centered_width(area, CARD_MAX_WIDTH);

    // Card fades out while a fetch is in flight
    if app.phase == Phase::Loading {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "…",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().add_modifier(Modifier::DIM)));
        frame.render_widget(placeholder, card_area);
        return;
    }

    let Some(quote) = &app.quote else {
        return;
    };

    let card_bg = to_ratatui_color(app.palette.card);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("\"{}\"", quote.content),
            Style::default().fg(QUOTE_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("- {}", quote.author),
            Style::default().fg(AUTHOR_TEXT).add_modifier(Modifier::BOLD),
        )),
    ];

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(AUTHOR_TEXT))
        .title(Line::from(format!(" {} ", app.palette.mood)).right_aligned())
        .style(Style::default().bg(card_bg));

    if app.translating {
        block = block.title_bottom(Line::from(" … ").right_aligned());
    }

    let card = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(card, card_area);
}

fn render_buttons(frame: &mut Frame, app: &App, area: Rect) {
    let button = |key: &str, label: &str, bg: Color| {
        Span::styled(
            format!(" [{}] {} ", key, label),
            Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
        )
    };

    let line = Line::from(vec![
        button("n", app.labels.new_quote, BUTTON_VIOLET),
        Span::raw("  "),
        button("f", &format!("❤ {}", app.labels.favorite), BUTTON_PINK),
        Span::raw("  "),
        button("l", app.labels.language, BUTTON_VIOLET),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_favorites(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .favorites
        .iter()
        .map(|f| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} - {}", f.quote.content, f.quote.author)),
                Span::styled(
                    format!("  {}", f.saved_at.with_timezone(&chrono::Local).format("%H:%M")),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!("{}:", app.labels.favorites)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("❤ ");

    let area = centered_width(area, CARD_MAX_WIDTH);
    frame.render_stateful_widget(list, area, &mut app.favorites_state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &app.status_message {
        Line::from(Span::raw(status.as_str()))
    } else {
        Line::from(Span::styled(
            "n new · f favorite · l/1-6 language · j/k scroll · q quit",
            Style::default().add_modifier(Modifier::DIM),
        ))
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Paint confetti particles straight into the buffer over everything else
fn render_confetti(frame: &mut Frame, app: &App, area: Rect) {
    let buf = frame.buffer_mut();
    for p in app.confetti.particles() {
        if p.x < 0.0 || p.y < 0.0 {
            continue;
        }
        let x = area.x.saturating_add(p.x as u16);
        let y = area.y.saturating_add(p.y as u16);
        if x >= area.right() || y >= area.bottom() {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(p.glyph).set_fg(to_ratatui_color(p.color));
        }
    }
}

/// Convert our Color to ratatui Color
pub(crate) fn to_ratatui_color(color: MoodColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Black or white, whichever reads better on `background`
fn text_on(background: MoodColor) -> Color {
    if background.is_light() {
        Color::Black
    } else {
        Color::White
    }
}

/// Horizontally centered slice of `area`, at most `max_width` wide
fn centered_width(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodjournal_core::{Language, Quote};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn displaying(quote: Quote) -> App {
        let mut app = App::default().with_confetti(false);
        let token = app.begin_fetch();
        app.complete_fetch(token, Ok(quote));
        app
    }

    #[test]
    fn test_renders_english_labels_and_quote() {
        let mut app = displaying(Quote::new("Stay curious", "Ada"));
        let text = screen(&mut app);

        assert!(text.contains("Mood Journal"));
        assert!(text.contains("New Quote"));
        assert!(text.contains("\"Stay curious\""));
        assert!(text.contains("- Ada"));
    }

    #[test]
    fn test_renders_french_labels() {
        let mut app = displaying(Quote::new("Stay curious", "Ada"));
        app.set_language(Language::Fr);
        let text = screen(&mut app);

        assert!(text.contains("Journal d'Humeur"));
        assert!(text.contains("Nouvelle citation"));
        assert!(text.contains("Langue"));
        assert!(!text.contains("Mood Journal"));
    }

    #[test]
    fn test_loading_hides_quote() {
        let mut app = displaying(Quote::new("Stay curious", "Ada"));
        app.begin_fetch();
        let text = screen(&mut app);

        assert!(!text.contains("Stay curious"));
    }

    #[test]
    fn test_favorites_section_appears_after_save() {
        let mut app = displaying(Quote::new("Stay curious", "Ada"));
        assert!(!screen(&mut app).contains("Favorites:"));

        app.save_favorite();
        let text = screen(&mut app);
        assert!(text.contains("Favorites:"));
        assert!(text.contains("Stay curious - Ada"));
    }

    #[test]
    fn test_error_shows_in_status_bar() {
        let mut app = App::default();
        let token = app.begin_fetch();
        app.complete_fetch(token, Err(moodjournal_core::Error::EmptyQuoteList));

        assert!(screen(&mut app).contains("Failed to load quote"));
    }

    #[test]
    fn test_picker_lists_languages() {
        let mut app = displaying(Quote::new("Stay curious", "Ada"));
        app.open_language_picker();
        let text = screen(&mut app);

        for language in Language::ALL {
            assert!(text.contains(language.name()), "{}", language.name());
        }
    }

    #[test]
    fn test_centered_width() {
        let area = Rect::new(0, 0, 100, 10);
        assert_eq!(centered_width(area, 60), Rect::new(20, 0, 60, 10));
        assert_eq!(centered_width(Rect::new(0, 0, 40, 10), 60), Rect::new(0, 0, 40, 10));
    }
}
