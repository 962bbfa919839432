use crate::models::AppState;
use crate::ui::layout::{calculate_screen_chunks, draw_help, help_line};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn describe(state: AppState) -> &'static str {
    match state {
        AppState::Writing => "Nghe và viết lại câu",
        AppState::Vocabulary => "Thẻ từ vựng",
        AppState::Quiz => "Chọn câu tiếng Hàn đúng",
        AppState::MessageWriting => "Nhắn tin cho người giám hộ",
        AppState::Review => "Xem lại tiến độ",
        AppState::Main => "",
    }
}

pub fn draw_menu(f: &mut Frame, selected: usize, catalog_loaded: bool) {
    let layout = calculate_screen_chunks(f.area());

    let title = Paragraph::new("aigo v0.1.0 · Xin chào, chào mừng!")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(layout.body_area);

    let items: Vec<ListItem> = AppState::MENU
        .iter()
        .enumerate()
        .map(|(i, state)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == selected { "→" } else { " " };
            ListItem::new(format!(
                "{} {}. {}  {}",
                marker,
                i + 1,
                state.title(),
                describe(*state)
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, body[0]);

    if !catalog_loaded {
        let warning = Paragraph::new("Không thể tải nội dung.")
            .style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        f.render_widget(warning, body[1]);
    }

    draw_help(
        f,
        layout.help_area,
        vec![
            help_line(&[("↑/↓", "Navigate"), ("1-5", "Jump"), ("Enter", "Select")]),
            help_line(&[("Esc/Ctrl+C", "Quit")]),
        ],
    );
}
