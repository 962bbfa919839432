use crate::grading::{annotate, CharMark, Verdict};
use crate::models::AppState;
use crate::screens::WritingScreen;
use crate::ui::layout::{calculate_screen_chunks, draw_header, draw_help, help_line};
use crate::ui::popup::draw_popup;
use crate::ui::vocabulary::EMPTY_CONTENT;
use crate::utils::calculate_wrapped_cursor_position;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn mark_style(mark: CharMark) -> Style {
    match mark {
        CharMark::Correct => Style::default().fg(Color::Green),
        CharMark::Wrong => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::UNDERLINED),
        CharMark::Ghost => Style::default().fg(Color::DarkGray),
    }
}

pub fn draw_writing(f: &mut Frame, screen: &mut WritingScreen) {
    let layout = calculate_screen_chunks(f.area());

    let Some(target) = screen.target().map(str::to_string) else {
        draw_header(f, layout.header_area, AppState::Writing.title());
        let empty = Paragraph::new(EMPTY_CONTENT)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, layout.body_area);
        draw_help(f, layout.help_area, vec![help_line(&[("Esc", "Menu")])]);
        return;
    };

    let progress = format!(
        "{} {} / {}",
        AppState::Writing.title(),
        screen.session.index() + 1,
        screen.session.len()
    );
    draw_header(f, layout.header_area, &progress);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.body_area);

    let scratch = &mut screen.session.scratch;
    let spans: Vec<Span> = annotate(&target, scratch.input.value(), scratch.show_diff)
        .into_iter()
        .map(|c| Span::styled(c.ch.to_string(), mark_style(c.mark)))
        .collect();
    let mut guide = Text::from(Line::from(spans));
    match scratch.verdict {
        Some(Verdict::Correct) => guide.push_line(Line::from(Span::styled(
            "정답입니다!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(Verdict::Incorrect) => guide.push_line(Line::from(Span::styled(
            "틀린 부분을 확인해 수정해 보세요.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => {}
    }
    let guide_widget = Paragraph::new(guide)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("🔊 듣기"));
    f.render_widget(guide_widget, chunks[0]);

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

    let border = if scratch.show_diff {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let input = Paragraph::new(scratch.input.value().to_string())
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Câu trả lời"),
        );
    f.render_widget(input, input_area);

    if screen.popup.is_none() {
        let cursor_x = input_area.x + 1 + cursor_col as u16;
        let cursor_y = input_area.y + 1 + (cursor_line as u16).saturating_sub(scroll as u16);
        f.set_cursor_position((cursor_x, cursor_y));
    }

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[("Enter", "Submit"), ("Tab", "Replay"), ("↑/↓", "Previous/Next")]),
            help_line(&[("Esc", "Menu"), ("Ctrl+C", "Exit App")]),
        ],
    );

    if let Some(popup) = &screen.popup {
        draw_popup(f, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::catalog;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_ghost_target_is_visible_before_typing() {
        let mut screen = WritingScreen::new(catalog().writing_items());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw_writing(f, &mut screen)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("할"));
        assert!(text.contains("Câu trả lời"));
    }

    #[test]
    fn test_diff_marks_wrong_chars() {
        let mut screen = WritingScreen::new(catalog().writing_items());
        screen.session.scratch.input.set_value("할아");
        screen.session.scratch.show_diff = true;
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| draw_writing(f, &mut screen)).unwrap();

        let buffer = terminal.backend().buffer();
        let wrong = buffer
            .content()
            .iter()
            .find(|c| c.symbol() == "아")
            .unwrap();
        assert_eq!(wrong.fg, Color::Red);
    }
}
