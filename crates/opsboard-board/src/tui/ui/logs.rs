/*
[INPUT]:  LogBufferHandle
[OUTPUT]: Log panel showing the newest lines that fit
[POS]:    TUI UI logs panel
[UPDATE]: When log panel presentation changes
*/

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::border_style;
use crate::logging::LogBufferHandle;

pub(super) fn draw_logs(frame: &mut ratatui::Frame, area: Rect, buffer: &LogBufferHandle) {
    let available = area.height.saturating_sub(2) as usize;
    let lines = match buffer.lock() {
        Ok(guard) => guard.tail(available),
        Err(_) => vec!["log buffer unavailable".to_string()],
    };

    let text = lines.into_iter().map(Line::from).collect::<Vec<_>>();
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Logs"),
    );
    frame.render_widget(widget, area);
}
