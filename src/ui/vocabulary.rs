use crate::models::AppState;
use crate::screens::VocabularyScreen;
use crate::swipe::SwipeDirection;
use crate::ui::layout::{
    calculate_card_chunks, calculate_screen_chunks, draw_header, draw_help, help_line, stars,
};
use crate::ui::popup::draw_popup;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub const EMPTY_CONTENT: &str = "Không thể tải nội dung.";

pub fn draw_vocabulary(f: &mut Frame, screen: &mut VocabularyScreen) {
    let layout = calculate_screen_chunks(f.area());

    let Some(item) = screen.session.current() else {
        draw_header(f, layout.header_area, AppState::Vocabulary.title());
        let empty = Paragraph::new(EMPTY_CONTENT)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout.body_area);
        draw_help(f, layout.help_area, vec![help_line(&[("Esc", "Menu")])]);
        return;
    };

    let progress = format!(
        "{} {} / {} - {}",
        AppState::Vocabulary.title(),
        screen.session.index() + 1,
        screen.session.len(),
        item.category
    );
    draw_header(f, layout.header_area, &progress);

    let chunks = calculate_card_chunks(layout.body_area);
    let feedback = screen.session.scratch.swipe.feedback();

    let mut card = Text::default();
    card.push_line(Line::from(Span::styled(
        item.korean_word.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    card.push_line(Line::from(item.vietnamese_word.as_str()));
    card.push_line(Line::from(Span::styled(
        stars(item.stars()),
        Style::default().fg(Color::Yellow),
    )));
    card.push_line(Line::from(""));
    card.push_line(Line::from(item.example_ko.as_str()));
    card.push_line(Line::from(Span::styled(
        item.example_vi.as_str(),
        Style::default().fg(Color::DarkGray),
    )));

    let mut status = Vec::new();
    if screen.is_checked(item.id) {
        status.push(Span::styled("✓ 알아요", Style::default().fg(Color::Green)));
    }
    if screen.is_difficult(item.id) {
        if !status.is_empty() {
            status.push(Span::from("  "));
        }
        status.push(Span::styled("! 어려워요", Style::default().fg(Color::Red)));
    }
    if !status.is_empty() {
        card.push_line(Line::from(""));
        card.push_line(Line::from(status));
    }

    let (border_color, swipe_label) = match feedback.direction {
        Some(SwipeDirection::Right) => (
            Color::Green,
            format!(" → 알아요 {:.0}% ", feedback.progress * 100.0),
        ),
        Some(SwipeDirection::Left) => (
            Color::Red,
            format!(" ← 어려워요 {:.0}% ", feedback.progress * 100.0),
        ),
        None => (Color::Cyan, String::new()),
    };

    let card_widget = Paragraph::new(card)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(swipe_label),
        );
    f.render_widget(card_widget, chunks.card_area);

    let related: Vec<ListItem> = item
        .related_terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let ticked = screen.session.scratch.related_checked.contains(&i);
            let mark = if ticked { "[✓]" } else { "[ ]" };
            let style = if ticked {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}. {} - {}", mark, i + 1, term.korean, term.vietnamese))
                .style(style)
        })
        .collect();
    let related_list =
        List::new(related).block(Block::default().borders(Borders::ALL).title("Từ liên quan"));
    f.render_widget(related_list, chunks.related_area);

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[
                ("↑/↓", "Previous/Next"),
                ("→", "Known"),
                ("←", "Difficult"),
                ("1-9", "Related"),
                ("c", "Check"),
            ]),
            help_line(&[("s", "Speak word"), ("e", "Speak example"), ("Esc", "Menu")]),
        ],
    );

    screen.card_area = chunks.card_area;

    if let Some(popup) = &screen.popup {
        draw_popup(f, popup);
    }
}
