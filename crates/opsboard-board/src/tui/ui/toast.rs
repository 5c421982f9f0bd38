/*
[INPUT]:  Notification queue
[OUTPUT]: Toast box in the top-right corner of the content area
[POS]:    TUI UI toast overlay
[UPDATE]: When toast presentation changes
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::notify::{Notifications, ToastLevel};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

pub(super) fn draw_toast(frame: &mut ratatui::Frame, area: Rect, notifications: &Notifications) {
    let Some(toast) = notifications.current() else {
        return;
    };
    let width = TOAST_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    let toast_area = Rect::new(area.x + area.width - width, area.y, width, height);

    let (title, color) = match toast.level {
        ToastLevel::Info => ("Info", Color::Cyan),
        ToastLevel::Success => ("Done", Color::LightGreen),
        ToastLevel::Error => ("Error", Color::LightRed),
    };
    let queued = notifications.len().saturating_sub(1);
    let title = if queued > 0 {
        format!("{title} (+{queued})")
    } else {
        title.to_string()
    };

    let widget = Paragraph::new(toast.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(Clear, toast_area);
    frame.render_widget(widget, toast_area);
}
