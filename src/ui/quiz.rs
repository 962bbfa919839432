use crate::models::AppState;
use crate::screens::QuizScreen;
use crate::ui::layout::{calculate_screen_chunks, draw_header, draw_help, help_line};
use crate::ui::popup::draw_popup;
use crate::ui::vocabulary::EMPTY_CONTENT;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, screen: &QuizScreen) {
    let layout = calculate_screen_chunks(f.area());

    let Some(item) = screen.session.current() else {
        draw_header(f, layout.header_area, AppState::Quiz.title());
        let empty = Paragraph::new(EMPTY_CONTENT)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout.body_area);
        draw_help(f, layout.help_area, vec![help_line(&[("Esc", "Menu")])]);
        return;
    };

    let progress = format!(
        "{} {} / {} - {}",
        AppState::Quiz.title(),
        screen.session.index() + 1,
        screen.session.len(),
        item.category
    );
    draw_header(f, layout.header_area, &progress);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .split(layout.body_area);

    let question = Paragraph::new(item.vietnamese_sentence.clone().unwrap_or_default())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Câu tiếng Việt"));
    f.render_widget(question, chunks[0]);

    let scratch = &screen.session.scratch;
    let options: Vec<ListItem> = screen
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_answer = item.correct_answer == Some(i);
            let style = match scratch.answered {
                Some(_) if is_answer => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Some(_) if i == scratch.selected => Style::default().fg(Color::Red),
                None if i == scratch.selected => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
            let marker = if i == scratch.selected { "→" } else { " " };
            ListItem::new(format!("{} {}. {}", marker, i + 1, option)).style(style)
        })
        .collect();
    let list = List::new(options).block(Block::default().borders(Borders::ALL).title("한국어"));
    f.render_widget(list, chunks[1]);

    let mut result = Text::default();
    match scratch.answered {
        Some(verdict) => {
            let (label, color) = if verdict.is_correct() {
                ("정답입니다!", Color::Green)
            } else {
                ("오답", Color::Red)
            };
            result.push_line(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            if let Some(explanation) = &item.explanation {
                result.push_line(Line::from(explanation.as_str()));
            }
            if let Some(usage) = &item.usage {
                result.push_line(Line::from(Span::styled(
                    usage.as_str(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => result.push_line(Line::from(Span::styled(
            "Chọn câu đúng và nhấn Enter.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    let result_widget = Paragraph::new(result)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(result_widget, chunks[2]);

    let first = if scratch.answered.is_some() {
        help_line(&[("Enter/→/n", "Next"), ("←/p", "Previous")])
    } else {
        help_line(&[("↑/↓", "Select"), ("Enter", "Answer"), ("←/→", "Previous/Next")])
    };
    draw_help(
        f,
        layout.help_area,
        vec![first, help_line(&[("Esc", "Menu"), ("Ctrl+C", "Exit App")])],
    );

    if let Some(popup) = &screen.popup {
        draw_popup(f, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Verdict;
    use crate::screens::test_support::quiz_items;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_answered_quiz_highlights_correct_option() {
        let mut screen = QuizScreen::new(quiz_items(2));
        screen.session.scratch.selected = 1;
        screen.session.scratch.answered = Some(Verdict::Incorrect);

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw_quiz(f, &screen)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Câu 1"));

        let chosen = buffer
            .content()
            .iter()
            .find(|c| c.symbol() == "→")
            .unwrap();
        assert_eq!(chosen.fg, Color::Red);
    }
}
