/*
[INPUT]:  AppState board view (columns, cards, overlay) and selection
[OUTPUT]: Five side-by-side columns with cards, placeholders and the drag overlay
[POS]:    TUI UI board panel
[UPDATE]: When card or column presentation changes
*/

use chrono::Local;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::accent_color;
use crate::board::{CardTreatment, DraggableCard, DroppableColumn};
use crate::tui::app::AppState;

const CARD_HEIGHT: u16 = 4;

pub(super) fn draw_board(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let view = app.view();
    if view.columns.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, view.columns.len() as u32); view.columns.len()];
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let dragging = app.coordinator.is_dragging();
    for (index, column) in view.columns.iter().enumerate() {
        let selected_row = (!dragging && index == app.selected_column).then_some(app.selected_row);
        draw_column(frame, areas[index], column, selected_row);
    }

    if let Some(overlay) = view.overlay.as_ref() {
        if let Some(column_area) = areas.get(app.pointer.column) {
            draw_overlay(frame, *column_area, overlay);
        }
    }
}

fn draw_column(
    frame: &mut ratatui::Frame,
    area: Rect,
    column: &DroppableColumn<'_>,
    selected_row: Option<usize>,
) {
    let accent = accent_color(column.column.accent);
    let mut border = Style::default().fg(accent);
    let mut border_type = BorderType::Plain;
    if column.is_over {
        border = border.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        border_type = BorderType::Thick;
    } else if selected_row.is_some() {
        border = border.add_modifier(Modifier::BOLD);
        border_type = BorderType::Rounded;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border)
        .title(Span::styled(
            column.header(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    if let Some(placeholder) = column.placeholder() {
        let style = if column.is_over {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC)
        };
        let widget = Paragraph::new(Line::from(Span::styled(placeholder, style)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items = column
        .cards
        .iter()
        .enumerate()
        .map(|(row, card)| card_item(card, width, selected_row == Some(row)))
        .collect::<Vec<_>>();
    frame.render_widget(List::new(items).block(block), area);
}

fn card_item(card: &DraggableCard<'_>, width: usize, selected: bool) -> ListItem<'static> {
    let mut style = Style::default();
    if card.treatment == CardTreatment::Ghost {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let mut lines = card_lines(card, width);
    lines.push(Line::from(""));
    ListItem::new(lines).style(style)
}

fn card_lines(card: &DraggableCard<'_>, width: usize) -> Vec<Line<'static>> {
    let badge = card.priority_badge();
    let title_width = width.saturating_sub(badge.len() + 1);
    let title = truncate(&card.task.title, title_width);

    let mut meta = Vec::new();
    if let Some(assignee) = card.task.assignee.as_deref() {
        meta.push(Span::raw(format!("@{assignee} ")));
    }
    if let Some((due, overdue)) = card.due_label(Local::now().date_naive()) {
        let style = if overdue {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        meta.push(Span::styled(format!("{due} "), style));
    }
    if let Some(hours) = card.hours_label() {
        meta.push(Span::styled(hours, Style::default().fg(Color::Cyan)));
    }

    vec![
        Line::from(vec![
            Span::styled(badge, priority_style(badge)),
            Span::raw(" "),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(meta),
    ]
}

fn priority_style(badge: &str) -> Style {
    match badge {
        "CRIT" => Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        "HIGH" => Style::default().fg(Color::Yellow),
        "LOW" => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Gray),
    }
}

/// Floating card under the pointer column with a one-cell shadow.
fn draw_overlay(frame: &mut ratatui::Frame, column_area: Rect, card: &DraggableCard<'_>) {
    if column_area.width < 6 || column_area.height < CARD_HEIGHT + 3 {
        return;
    }
    let width = column_area.width.saturating_sub(3);
    let y = column_area.y + column_area.height.saturating_sub(CARD_HEIGHT + 2);
    let card_area = Rect::new(column_area.x + 1, y, width, CARD_HEIGHT);
    let shadow_area = Rect::new(card_area.x + 1, card_area.y + 1, width, CARD_HEIGHT);

    frame.render_widget(Clear, shadow_area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::DarkGray)),
        shadow_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .title("Moving");
    let inner_width = card_area.width.saturating_sub(2) as usize;
    frame.render_widget(Clear, card_area);
    frame.render_widget(Paragraph::new(card_lines(card, inner_width)).block(block), card_area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
        assert_eq!(truncate("任务标题", 5), "任务…");
    }
}
