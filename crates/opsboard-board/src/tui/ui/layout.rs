/*
[INPUT]:  Current tab, drag state and status message
[OUTPUT]: Tab bar and hotkey footer
[POS]:    TUI UI chrome
[UPDATE]: When tabs or keybindings change
*/

use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use super::{border_style, header_style, key_style};
use crate::tui::app::{AppState, Tab};

pub(super) fn draw_tabs(frame: &mut ratatui::Frame, area: Rect, current_tab: Tab) {
    let titles = vec![Line::from("Board"), Line::from("Logs")];
    let selected = match current_tab {
        Tab::Board => 0,
        Tab::Logs => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Tabs"),
        )
        .highlight_style(header_style())
        .select(selected);

    frame.render_widget(tabs, area);
}

fn hotkey(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [Span::styled(key, key_style()), Span::raw(label)]
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let keys: Vec<[Span<'static>; 2]> = if app.pending_delete.is_some() {
        vec![hotkey("[y]", " Delete  "), hotkey("[n/Esc]", " Keep  ")]
    } else if app.coordinator.is_dragging() {
        vec![
            hotkey("[Arrows]", " Move pointer  "),
            hotkey("[Enter]", " Drop  "),
            hotkey("[Esc]", " Cancel drag  "),
        ]
    } else {
        vec![
            hotkey("[Arrows/hjkl]", " Select  "),
            hotkey("[Space]", " Drag  "),
            hotkey("[s]", " Next status  "),
            hotkey("[c]", " Cancel task  "),
            hotkey("[d]", " Delete  "),
            hotkey("[r]", " Refresh  "),
            hotkey("[Tab/1/2]", " Tabs  "),
            hotkey("[q]", " Quit"),
        ]
    };

    let line1 = Line::from(keys.into_iter().flatten().collect::<Vec<_>>());
    let line2 = Line::from(format!("Status: {}", app.status_message));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
