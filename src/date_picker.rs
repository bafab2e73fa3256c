//! Calendar date picker state
//!
//! Holds the visible month, the committed selection and the open/closed
//! state. Navigation only moves the cursor; a [`ChangeEvent`] is produced
//! exactly once per commit (a day, "today" or "clear"). Rendering and
//! pointer hit-testing live in the TUI layer.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Wire format of a committed value
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Column headers, Sunday first
pub const WEEKDAYS_FR: [&str; 7] = ["Di", "Lu", "Ma", "Me", "Je", "Ve", "Sa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    Open,
}

/// Month shown by the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    year: i32,
    month: u32,
}

impl CalendarCursor {
    /// `month` is 1-based; returns `None` outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Blank cells before day 1 (weekday of day 1, Sunday = 0)
    pub fn leading_blanks(&self) -> u32 {
        self.date(1)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    /// Date of `day` in this month, if it exists
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn step_month(&self, delta: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn step_year(&self, delta: i32) -> Self {
        Self {
            year: self.year + delta,
            month: self.month,
        }
    }

    /// Header label, e.g. "janvier 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Blank,
    Day(u32),
}

/// Number of days in `month` (1-based) of `year`, Gregorian rules
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let is_leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap => 29,
        2 => 28,
        _ => 0,
    }
}

/// Leading blanks followed by one cell per day; no trailing blanks
pub fn month_grid(cursor: CalendarCursor) -> Vec<DayCell> {
    let blanks = cursor.leading_blanks() as usize;
    let days = cursor.days_in_month();
    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat(DayCell::Blank).take(blanks));
    cells.extend((1..=days).map(DayCell::Day));
    cells
}

/// Parse a `YYYY-MM-DD` value; anything else is `None`
pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date_value(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn month_name(month: u32) -> &'static str {
    MONTHS_FR
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// French long form, e.g. "5 janvier 2024"
pub fn format_long_fr(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Field change notification, shaped like an input change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub target: ChangeTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTarget {
    pub name: String,
    pub value: String,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: ChangeTarget {
                name: name.into(),
                value: value.into(),
            },
        }
    }

    /// Committed date, `None` when cleared
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date_value(&self.target.value)
    }
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    name: String,
    placeholder: String,
    state: PickerState,
    cursor: CalendarCursor,
    selected: Option<NaiveDate>,
    highlighted: u32,
}

impl DatePicker {
    /// Closed picker with no selection, showing the current month
    pub fn new(name: impl Into<String>) -> Self {
        Self::new_on(name, Local::now().date_naive())
    }

    pub fn new_on(name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            placeholder: "Choisir une date".to_string(),
            state: PickerState::Closed,
            cursor: CalendarCursor::from_date(today),
            selected: None,
            highlighted: today.day(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::Open
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Committed value as `YYYY-MM-DD`, empty when unset
    pub fn value(&self) -> String {
        self.selected.map(format_date_value).unwrap_or_default()
    }

    pub fn highlighted(&self) -> u32 {
        self.highlighted
    }

    pub fn grid(&self) -> Vec<DayCell> {
        month_grid(self.cursor)
    }

    /// Text shown in the closed field
    pub fn display_text(&self) -> String {
        self.selected
            .map(format_long_fr)
            .unwrap_or_else(|| self.placeholder.clone())
    }

    /// Adopt an externally supplied value. Invalid or empty input is ignored.
    pub fn sync_value(&mut self, value: &str) {
        if let Some(date) = parse_date_value(value) {
            self.selected = Some(date);
            self.cursor = CalendarCursor::from_date(date);
            self.highlighted = date.day();
        }
    }

    /// Drop the selection without emitting, e.g. after a form reset
    pub fn reset_on(&mut self, today: NaiveDate) {
        self.selected = None;
        self.state = PickerState::Closed;
        self.cursor = CalendarCursor::from_date(today);
        self.highlighted = today.day();
    }

    pub fn reset(&mut self) {
        self.reset_on(Local::now().date_naive());
    }

    pub fn toggle(&mut self) {
        match self.state {
            PickerState::Closed => self.open(),
            PickerState::Open => self.close(),
        }
    }

    pub fn open(&mut self) {
        if let Some(date) = self.selected {
            self.cursor = CalendarCursor::from_date(date);
            self.highlighted = date.day();
        }
        self.clamp_highlight();
        self.state = PickerState::Open;
    }

    /// Close without touching the selection
    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.step_month(1);
        self.clamp_highlight();
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.step_month(-1);
        self.clamp_highlight();
    }

    pub fn next_year(&mut self) {
        self.cursor = self.cursor.step_year(1);
        self.clamp_highlight();
    }

    pub fn prev_year(&mut self) {
        self.cursor = self.cursor.step_year(-1);
        self.clamp_highlight();
    }

    /// Move the highlighted day by `delta`, clamped to the visible month
    pub fn move_highlight(&mut self, delta: i32) {
        let max = self.cursor.days_in_month() as i32;
        self.highlighted = (self.highlighted as i32 + delta).clamp(1, max) as u32;
    }

    /// Commit `day` of the visible month
    pub fn select_day(&mut self, day: u32) -> Option<ChangeEvent> {
        let date = self.cursor.date(day)?;
        Some(self.commit(Some(date)))
    }

    /// Commit the grid cell at `index`; blank cells are ignored
    pub fn select_cell(&mut self, index: usize) -> Option<ChangeEvent> {
        match self.grid().get(index) {
            Some(DayCell::Day(day)) => self.select_day(*day),
            Some(DayCell::Blank) | None => None,
        }
    }

    pub fn select_highlighted(&mut self) -> Option<ChangeEvent> {
        self.select_day(self.highlighted)
    }

    pub fn select_today_on(&mut self, today: NaiveDate) -> ChangeEvent {
        self.cursor = CalendarCursor::from_date(today);
        self.highlighted = today.day();
        self.commit(Some(today))
    }

    pub fn select_today(&mut self) -> ChangeEvent {
        self.select_today_on(Local::now().date_naive())
    }

    pub fn clear(&mut self) -> ChangeEvent {
        self.commit(None)
    }

    pub fn is_selected(&self, day: u32) -> bool {
        self.selected.is_some() && self.cursor.date(day) == self.selected
    }

    pub fn is_today_on(&self, day: u32, today: NaiveDate) -> bool {
        self.cursor.date(day) == Some(today)
    }

    pub fn is_today(&self, day: u32) -> bool {
        self.is_today_on(day, Local::now().date_naive())
    }

    fn commit(&mut self, date: Option<NaiveDate>) -> ChangeEvent {
        self.selected = date;
        self.state = PickerState::Closed;
        let event = ChangeEvent::new(self.name.clone(), self.value());
        tracing::debug!(field = %self.name, value = %event.target.value, "date committed");
        event
    }

    fn clamp_highlight(&mut self) {
        let max = self.cursor.days_in_month();
        self.highlighted = self.highlighted.clamp(1, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker() -> DatePicker {
        DatePicker::new_on("dateCreation", date(2024, 1, 15))
    }

    #[test]
    fn test_grid_length_is_blanks_plus_days() {
        // 1 January 2024 was a Monday
        let cursor = CalendarCursor::new(2024, 1).unwrap();
        assert_eq!(cursor.leading_blanks(), 1);
        let grid = month_grid(cursor);
        assert_eq!(grid.len(), 1 + 31);
        assert_eq!(grid[0], DayCell::Blank);
        assert_eq!(grid[1], DayCell::Day(1));
        assert_eq!(grid.last(), Some(&DayCell::Day(31)));
    }

    #[test]
    fn test_february_leap_years() {
        let days = |y| {
            month_grid(CalendarCursor::new(y, 2).unwrap())
                .iter()
                .filter(|c| matches!(c, DayCell::Day(_)))
                .count()
        };
        assert_eq!(days(2024), 29);
        assert_eq!(days(2023), 28);
        assert_eq!(days(1900), 28);
        assert_eq!(days(2000), 29);
    }

    #[test]
    fn test_sunday_start_has_no_blanks() {
        // 1 September 2024 was a Sunday
        let cursor = CalendarCursor::new(2024, 9).unwrap();
        assert_eq!(cursor.leading_blanks(), 0);
        assert_eq!(month_grid(cursor).len(), 30);
    }

    #[test]
    fn test_month_and_year_rollover() {
        let dec = CalendarCursor::new(2023, 12).unwrap();
        assert_eq!(dec.step_month(1), CalendarCursor::new(2024, 1).unwrap());
        let jan = CalendarCursor::new(2024, 1).unwrap();
        assert_eq!(jan.step_month(-1), dec);
        assert_eq!(jan.step_year(-1), CalendarCursor::new(2023, 1).unwrap());
        assert!(CalendarCursor::new(2024, 13).is_none());
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut p = picker();
        assert_eq!(p.state(), PickerState::Closed);
        p.toggle();
        assert!(p.is_open());
        p.toggle();
        assert!(!p.is_open());
    }

    #[test]
    fn test_commit_day_emits_and_closes() {
        let mut p = picker();
        p.open();
        let event = p.select_day(5).unwrap();
        assert_eq!(event, ChangeEvent::new("dateCreation", "2024-01-05"));
        assert_eq!(p.selected(), Some(date(2024, 1, 5)));
        assert!(!p.is_open());
        assert_eq!(p.display_text(), "5 janvier 2024");
    }

    #[test]
    fn test_blank_cell_does_nothing() {
        let mut p = picker();
        p.open();
        assert!(p.select_cell(0).is_none());
        assert!(p.is_open());
        assert_eq!(p.selected(), None);

        let event = p.select_cell(1).unwrap();
        assert_eq!(event.target.value, "2024-01-01");
    }

    #[test]
    fn test_navigation_never_changes_selection() {
        let mut p = picker();
        p.sync_value("2024-01-10");
        p.open();
        p.next_month();
        p.next_year();
        p.prev_month();
        assert_eq!(p.selected(), Some(date(2024, 1, 10)));
        assert_eq!(p.cursor(), CalendarCursor::new(2025, 1).unwrap());
        assert!(p.is_open());
    }

    #[test]
    fn test_sync_value_moves_cursor_and_ignores_invalid() {
        let mut p = picker();
        p.sync_value("2023-07-04");
        assert_eq!(p.cursor(), CalendarCursor::new(2023, 7).unwrap());
        assert_eq!(p.selected(), Some(date(2023, 7, 4)));

        p.sync_value("");
        p.sync_value("2023-02-30");
        p.sync_value("hier");
        assert_eq!(p.selected(), Some(date(2023, 7, 4)));
        assert_eq!(p.cursor(), CalendarCursor::new(2023, 7).unwrap());
    }

    #[test]
    fn test_open_seeds_cursor_from_selection() {
        let mut p = picker();
        p.sync_value("2022-03-09");
        p.next_month();
        p.next_month();
        p.open();
        assert_eq!(p.cursor(), CalendarCursor::new(2022, 3).unwrap());
        assert_eq!(p.highlighted(), 9);
    }

    #[test]
    fn test_today_from_another_month() {
        let mut p = picker();
        p.open();
        p.prev_year();
        let event = p.select_today_on(date(2024, 1, 15));
        assert_eq!(event.target.value, "2024-01-15");
        assert!(!p.is_open());
        assert!(p.is_today_on(15, date(2024, 1, 15)));
        assert!(p.is_selected(15));
    }

    #[test]
    fn test_clear_emits_empty_value() {
        let mut p = picker();
        p.sync_value("2024-01-20");
        p.open();
        let event = p.clear();
        assert_eq!(event.target.value, "");
        assert_eq!(event.date(), None);
        assert_eq!(p.selected(), None);
        assert!(!p.is_open());
        assert_eq!(p.display_text(), "Choisir une date");
    }

    #[test]
    fn test_highlight_clamps_to_month() {
        let mut p = DatePicker::new_on("d", date(2024, 1, 31));
        p.open();
        p.next_month();
        assert_eq!(p.highlighted(), 29);
        p.move_highlight(7);
        assert_eq!(p.highlighted(), 29);
        p.move_highlight(-40);
        assert_eq!(p.highlighted(), 1);
    }

    #[test]
    fn test_change_event_wire_shape() {
        let value = serde_json::to_value(ChangeEvent::new("dateCreation", "2024-01-05")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"target": {"name": "dateCreation", "value": "2024-01-05"}})
        );
    }
}
