use crate::screens::Popup;
use crate::ui::layout::{centered_rect, help_line};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PREMIUM_FEATURES: [&str; 4] = [
    "✅ AI sửa lỗi không giới hạn",
    "✅ Luyện phát âm và phản hồi âm thanh",
    "✅ Phân tích và thống kê nâng cao",
    "✅ Học tự động đề xuất cá nhân",
];

pub fn draw_popup(f: &mut Frame, popup: &Popup) {
    let (title, color, mut text) = match popup {
        Popup::Notice { title, body } => {
            let mut text = Text::default();
            if !body.is_empty() {
                text.push_line(Line::from(body.as_str()));
            }
            (title.clone(), Color::Yellow, text)
        }
        Popup::Premium => {
            let mut text = Text::default();
            text.push_line(Line::from(
                "Sử dụng các tính năng AI không giới hạn và các tính năng nâng cao!",
            ));
            text.push_line(Line::from(""));
            for feature in PREMIUM_FEATURES {
                text.push_line(Line::from(feature));
            }
            text.push_line(Line::from(""));
            text.push_line(Line::from(Span::styled(
                "🚧 Đang phát triển. Dịch vụ sẽ sớm khởi động!",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
            ("🌟 Nâng cấp Premium".to_string(), Color::Magenta, text)
        }
        Popup::Celebration { body } => {
            let mut text = Text::default();
            text.push_line(Line::from(Span::styled(
                "🎉 Chúc mừng! 🎉",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(""));
            text.push_line(Line::from(body.as_str()));
            ("Chúc mừng".to_string(), Color::Green, text)
        }
    };
    text.push_line(Line::from(""));
    text.push_line(help_line(&[("Enter", "Xác nhận")]));

    let area = centered_rect(60, 40, f.area());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title)),
        );
    f.render_widget(paragraph, area);
}
