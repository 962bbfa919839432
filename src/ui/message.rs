use crate::grading::{feedback_comment, FeedbackLanguage};
use crate::models::AppState;
use crate::screens::{MessageScreen, MESSAGE_MAX_CHARS};
use crate::ui::layout::{calculate_screen_chunks, draw_header, draw_help, help_line, stars};
use crate::ui::popup::draw_popup;
use crate::utils::calculate_wrapped_cursor_position;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const SCENARIO_MISSING: &str = "Không thể tải kịch bản.";

fn usage_label(screen: &MessageScreen) -> String {
    if screen.gate.premium {
        "Người dùng Premium".to_string()
    } else {
        format!("Số lần còn lại hôm nay: {}", screen.gate.remaining())
    }
}

pub fn draw_message(f: &mut Frame, screen: &mut MessageScreen) {
    let layout = calculate_screen_chunks(f.area());

    let scenario = screen
        .session
        .current()
        .and_then(|item| item.scenario_data.clone());
    let Some(scenario) = scenario else {
        draw_header(f, layout.header_area, AppState::MessageWriting.title());
        let empty = Paragraph::new(SCENARIO_MISSING)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout.body_area);
        draw_help(f, layout.help_area, vec![help_line(&[("Esc", "Menu")])]);
        return;
    };

    let header = format!(
        "{} {} / {} · {}",
        AppState::MessageWriting.title(),
        screen.session.index() + 1,
        screen.session.len(),
        usage_label(screen)
    );
    draw_header(f, layout.header_area, &header);

    let feedback_height = if screen.session.scratch.feedback.is_some() {
        8
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(feedback_height),
        ])
        .split(layout.body_area);

    let mut scenario_text = Text::default();
    scenario_text.push_line(Line::from(vec![
        Span::styled(
            scenario.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("  "),
        Span::styled(stars(scenario.difficulty), Style::default().fg(Color::Yellow)),
    ]));
    scenario_text.push_line(Line::from(scenario.description.clone()));
    if screen.session.scratch.show_hint {
        scenario_text.push_line(Line::from(""));
        scenario_text.push_line(Line::from(Span::styled(
            "💡 Gợi ý",
            Style::default().fg(Color::Yellow),
        )));
        for sample in &scenario.sample_messages {
            scenario_text.push_line(Line::from(format!("• {}", sample)));
        }
        if !scenario.key_expressions.is_empty() {
            scenario_text.push_line(Line::from(Span::styled(
                scenario.key_expressions.join(" · "),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    let scenario_widget = Paragraph::new(scenario_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Kịch bản"));
    f.render_widget(scenario_widget, chunks[0]);

    let scratch = &mut screen.session.scratch;
    let input_area = chunks[1];
    let text_width = input_area.width.saturating_sub(2) as usize;
    let visible_height = input_area.height.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) = calculate_wrapped_cursor_position(
        scratch.input.value(),
        scratch.input.cursor(),
        text_width,
    );
    let mut scroll = scratch.input_scroll_y as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= scroll + visible_height {
        scroll = cursor_line - visible_height + 1;
    }
    scratch.input_scroll_y = scroll as u16;

    let input = Paragraph::new(scratch.input.value().to_string())
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(
                    "Tin nhắn ({}/{})",
                    scratch.input.char_count(),
                    MESSAGE_MAX_CHARS
                )),
        );
    f.render_widget(input, input_area);

    if let Some(feedback) = &scratch.feedback {
        let mut text = Text::default();
        text.push_line(Line::from(Span::styled(
            feedback.corrected.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(Span::styled(
            feedback.original.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )));
        text.push_line(Line::from(""));
        text.push_line(Line::from(feedback_comment(screen.language)));
        let flag = match screen.language {
            FeedbackLanguage::Korean => "🇰🇷",
            FeedbackLanguage::Vietnamese => "🇻🇳",
        };
        let feedback_widget = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(format!(
                    "Tin nhắn đã sửa · {} {}",
                    flag,
                    screen.language.label()
                )),
        );
        f.render_widget(feedback_widget, chunks[2]);
    }

    if screen.popup.is_none() {
        let cursor_x = input_area.x + 1 + cursor_col as u16;
        let cursor_y = input_area.y + 1 + (cursor_line as u16).saturating_sub(scroll as u16);
        f.set_cursor_position((cursor_x, cursor_y));
    }

    let submit_label = if screen.session.scratch.feedback.is_some() {
        "Next"
    } else {
        "Correct"
    };
    let mut second = vec![("Ctrl+L", "Language"), ("Esc", "Menu")];
    if !screen.gate.premium {
        second.insert(1, ("Ctrl+U", "Premium"));
    }
    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[
                ("Enter", submit_label),
                ("Tab", "Hint"),
                ("↑/↓", "Previous/Next"),
            ]),
            help_line(&second),
        ],
    );

    if let Some(popup) = &screen.popup {
        draw_popup(f, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::message::CorrectionFeedback;
    use crate::screens::test_support::{catalog, repo};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(screen: &mut MessageScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_message(f, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_shows_remaining_uses_and_feedback() {
        let progress = repo();
        let mut screen = MessageScreen::new(
            catalog().scenario_items(),
            &progress,
            "Thu Oct 15 2026".to_string(),
        );
        let text = render(&mut screen);
        assert!(text.contains("Số lần còn lại hôm nay: 3"));
        assert!(text.contains("Báo tình trạng sức khỏe của bà"));

        screen.session.scratch.feedback = Some(CorrectionFeedback {
            original: "x".to_string(),
            corrected: "y".to_string(),
        });
        screen.language = FeedbackLanguage::Vietnamese;
        let text = render(&mut screen);
        assert!(text.contains("Tiếng Việt"));
    }

    #[test]
    fn test_missing_scenario() {
        let progress = repo();
        let mut screen = MessageScreen::new(Vec::new(), &progress, "Thu Oct 15 2026".to_string());
        assert!(render(&mut screen).contains(SCENARIO_MISSING));
    }
}
