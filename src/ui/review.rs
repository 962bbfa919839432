use crate::models::AppState;
use crate::screens::ReviewScreen;
use crate::ui::layout::{calculate_screen_chunks, draw_header, draw_help, help_line, stars};
use crate::utils::truncate_string;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn draw_review(f: &mut Frame, screen: &ReviewScreen) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, AppState::Review.title());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.body_area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(columns[0]);

    let stats: Vec<Line> = if screen.stats.is_empty() {
        vec![Line::from("Chưa có dữ liệu.")]
    } else {
        screen
            .stats
            .iter()
            .map(|s| {
                Line::from(format!(
                    "{}  {}/{} ({}%)",
                    s.category,
                    s.checked,
                    s.total,
                    s.percent()
                ))
            })
            .collect()
    };
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title("Thống kê"));
    f.render_widget(stats_widget, left[0]);

    let checked: Vec<ListItem> = if screen.checked.is_empty() {
        vec![ListItem::new("Chưa có từ nào.").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        screen
            .checked
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let related: Vec<&str> = item
                    .related_terms
                    .iter()
                    .map(|t| t.korean.as_str())
                    .collect();
                let style = if i == screen.checked.index() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(vec![
                    Line::from(format!(
                        "[✓] {} {} - {}",
                        stars(item.stars()),
                        item.korean_word,
                        item.vietnamese_word
                    )),
                    Line::from(Span::styled(
                        format!("    {}", truncate_string(&related.join(", "), 40)),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .style(style)
            })
            .collect()
    };
    let checked_list = List::new(checked).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Từ đã thuộc ({})", screen.checked.len())),
    );
    f.render_widget(checked_list, left[1]);

    let mut right = Text::default();
    right.push_line(section_title(&format!(
        "Từ khó ({})",
        screen.difficult.len()
    )));
    for item in &screen.difficult {
        right.push_line(Line::from(format!(
            "! {} - {}",
            item.korean_word, item.vietnamese_word
        )));
    }
    right.push_line(Line::from(""));
    right.push_line(section_title(&format!(
        "Câu sai ({})",
        screen.wrong_answers.len()
    )));
    for wrong in &screen.wrong_answers {
        right.push_line(Line::from(Span::styled(
            format!("✗ {}", truncate_string(&wrong.chosen, 40)),
            Style::default().fg(Color::Red),
        )));
        right.push_line(Line::from(Span::styled(
            format!("✓ {}", truncate_string(&wrong.correct, 40)),
            Style::default().fg(Color::Green),
        )));
    }
    right.push_line(Line::from(""));
    right.push_line(section_title(&format!(
        "Tin nhắn đã sửa ({})",
        screen.message_records.len()
    )));
    for record in screen.message_records.iter().rev().take(5) {
        right.push_line(Line::from(truncate_string(&record.corrected_message, 40)));
    }
    let right_widget = Paragraph::new(right)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right_widget, columns[1]);

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[("↑/↓", "Select"), ("Space/Enter", "Uncheck")]),
            help_line(&[("Esc", "Menu"), ("Ctrl+C", "Exit App")]),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{catalog, repo};
    use crate::store::Flag;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_review_shows_stats_and_counts() {
        let catalog = catalog();
        let mut progress = repo();
        progress.set_flag(Flag::Checked, 2, true).unwrap();
        progress.set_flag(Flag::Difficult, 4, true).unwrap();
        let screen = ReviewScreen::new(&catalog, &progress);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_review(f, &screen)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("1/2 (50%)"));
        assert!(text.contains("Từ đã thuộc (1)"));
        assert!(text.contains("Từ khó (1)"));
        assert!(text.contains("bữa ăn"));
    }
}
