//! Toast overlay, stacked in the top-right corner (oldest on top)

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::toast::{Toast, ToastId, ToastKind};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => Color::Blue,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

/// Areas the given number of toasts occupy inside `area`; toasts that
/// do not fit vertically are left out.
pub fn toast_areas(count: usize, area: Rect) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.right().saturating_sub(width);
    let capacity = (area.height / TOAST_HEIGHT) as usize;

    (0..count.min(capacity))
        .map(|i| Rect::new(x, area.y + i as u16 * TOAST_HEIGHT, width, TOAST_HEIGHT))
        .collect()
}

/// Draw the toasts and return where each one landed, for click dismissal
pub fn render_toasts(f: &mut Frame, toasts: &[Toast], area: Rect) -> Vec<(ToastId, Rect)> {
    let mut drawn = Vec::with_capacity(toasts.len());
    for (toast, rect) in toasts.iter().zip(toast_areas(toasts.len(), area)) {
        let color = kind_color(toast.kind);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(format!("{} {}", toast.kind.icon(), toast.message))
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title_top(Line::from(" ✕ ").right_aligned()),
                ),
            rect,
        );
        drawn.push((toast.id, rect));
    }
    drawn
}
