//! Calendar popup rendering and pointer hit-testing for [`DatePicker`]

use chrono::NaiveDate;
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::date_picker::{DatePicker, DayCell, WEEKDAYS_FR};

/// Columns used by one day cell
pub const CELL_WIDTH: u16 = 4;
/// Popup size: 7 cells wide; title, weekdays, up to 6 weeks and a footer high
pub const POPUP_WIDTH: u16 = 7 * CELL_WIDTH + 2;
pub const POPUP_HEIGHT: u16 = 1 + 1 + 6 + 1 + 2;

/// Screen regions recorded by the last render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarLayout {
    pub field: Rect,
    pub popup: Option<Rect>,
    title: Rect,
    grid: Rect,
    footer: Rect,
}

/// What a pointer press at a terminal cell landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarHit {
    /// Grid cell index, blank cells included
    Cell(usize),
    PrevYear,
    PrevMonth,
    NextMonth,
    NextYear,
    Today,
    Clear,
    /// Inside the popup but on nothing interactive
    Popup,
    Field,
    Outside,
}

impl CalendarLayout {
    /// Layout of a closed picker
    pub fn closed(field: Rect) -> Self {
        Self {
            field,
            ..Self::default()
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> CalendarHit {
        let pos = Position::new(column, row);
        if let Some(popup) = self.popup {
            if popup.contains(pos) {
                return self.hit_popup(pos);
            }
        }
        if self.field.contains(pos) {
            CalendarHit::Field
        } else {
            CalendarHit::Outside
        }
    }

    fn hit_popup(&self, pos: Position) -> CalendarHit {
        if self.grid.contains(pos) {
            let col = (pos.x - self.grid.x) / CELL_WIDTH;
            let week = pos.y - self.grid.y;
            if col < 7 {
                return CalendarHit::Cell((week * 7 + col) as usize);
            }
        } else if self.title.contains(pos) {
            let offset = pos.x - self.title.x;
            let from_right = self.title.right() - pos.x;
            match (offset, from_right) {
                (0..=1, _) => return CalendarHit::PrevYear,
                (2..=3, _) => return CalendarHit::PrevMonth,
                (_, 1..=2) => return CalendarHit::NextYear,
                (_, 3..=4) => return CalendarHit::NextMonth,
                _ => {}
            }
        } else if self.footer.contains(pos) {
            let half = self.footer.x + self.footer.width / 2;
            return if pos.x < half {
                CalendarHit::Today
            } else {
                CalendarHit::Clear
            };
        }
        CalendarHit::Popup
    }
}

/// Render the closed field showing the French long date or the placeholder
pub fn render_date_field(f: &mut Frame, picker: &DatePicker, label: &str, focused: bool, area: Rect) {
    let border_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    let text_style = if picker.selected().is_some() {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    };
    let arrow = if picker.is_open() { "▲" } else { "▼" };

    f.render_widget(
        Paragraph::new(format!("{} {}", picker.display_text(), arrow))
            .style(text_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label)
                    .border_style(border_style),
            ),
        area,
    );
}

/// Render the calendar popup anchored below `anchor` (above when it does not fit)
pub fn render_calendar_popup(
    f: &mut Frame,
    picker: &DatePicker,
    anchor: Rect,
    today: NaiveDate,
) -> CalendarLayout {
    let bounds = f.area();
    let width = POPUP_WIDTH.min(bounds.width);
    let height = POPUP_HEIGHT.min(bounds.height);
    let below = anchor.bottom();
    let y = if below + height <= bounds.bottom() {
        below
    } else {
        anchor.y.saturating_sub(height).max(bounds.y)
    };
    let x = anchor.x.min(bounds.right().saturating_sub(width));
    let popup = Rect::new(x, y, width, height);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Month title
            Constraint::Length(1), // Weekdays
            Constraint::Length(6), // Weeks
            Constraint::Length(1), // Today / Clear
        ])
        .split(inner);

    let cursor = picker.cursor();
    // « ◀ title ▶ »: year steppers on the outer edges
    let title_width = (rows[0].width as usize).saturating_sub(8);
    let title_line = Line::from(vec![
        Span::styled("« ", Style::default().fg(Color::Cyan)),
        Span::styled("◀ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:^width$}", cursor.title(), width = title_width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::Yellow)),
        Span::styled(" »", Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(title_line), rows[0]);

    let weekdays: Vec<Span> = WEEKDAYS_FR
        .iter()
        .map(|d| Span::styled(format!("{:>3} ", d), Style::default().fg(Color::Cyan)))
        .collect();
    f.render_widget(Paragraph::new(Line::from(weekdays)), rows[1]);

    let grid = picker.grid();
    let weeks: Vec<Line> = grid
        .chunks(7)
        .map(|week| {
            Line::from(
                week.iter()
                    .map(|cell| day_span(picker, *cell, today))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(weeks), rows[2]);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    f.render_widget(
        Paragraph::new("Aujourd'hui")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green)),
        footer[0],
    );
    f.render_widget(
        Paragraph::new("Effacer")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red)),
        footer[1],
    );

    CalendarLayout {
        field: anchor,
        popup: Some(popup),
        title: rows[0],
        grid: rows[2],
        footer: rows[3],
    }
}

fn day_span(picker: &DatePicker, cell: DayCell, today: NaiveDate) -> Span<'static> {
    match cell {
        DayCell::Blank => Span::raw(" ".repeat(CELL_WIDTH as usize)),
        DayCell::Day(day) => {
            let mut style = Style::default().fg(Color::White);
            if picker.is_today_on(day, today) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if picker.is_selected(day) {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            if day == picker.highlighted() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Span::styled(format!("{:>3} ", day), style)
        }
    }
}
