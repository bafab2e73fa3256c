//! Account form shared by the create screen and the edit modal
//!
//! Field values flow through [`ChangeEvent`]s the same way for every field,
//! so the date picker reports its commits exactly like a text input.

use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tui_input::InputRequest;

use crate::account::{Account, AccountDraft, AccountType};
use crate::date_picker::{parse_date_value, ChangeEvent, DatePicker};
use crate::error::Error;
use crate::tui::components::date_picker::{
    render_calendar_popup, render_date_field, CalendarHit, CalendarLayout,
};
use crate::tui::components::forms::{Dropdown, DropdownOption, InputType, TextInput};
use crate::tui::events::Event;
use crate::tui::utils::validation::validate_amount;

pub const FIELD_SOLDE: &str = "solde";
pub const FIELD_DATE_CREATION: &str = "dateCreation";
pub const FIELD_TYPE: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Solde,
    DateCreation,
    Type,
    Submit,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Solde => FormField::DateCreation,
            FormField::DateCreation => FormField::Type,
            FormField::Type => FormField::Submit,
            FormField::Submit => FormField::Solde,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Solde => FormField::Submit,
            FormField::DateCreation => FormField::Solde,
            FormField::Type => FormField::DateCreation,
            FormField::Submit => FormField::Type,
        }
    }
}

/// What the owner of the form should do after an input
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    None,
    Changed(ChangeEvent),
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, Default)]
struct FormLayout {
    solde: Rect,
    calendar: CalendarLayout,
    account_type: Rect,
    submit: Rect,
}

#[derive(Debug, Clone)]
pub struct AccountForm {
    solde: TextInput,
    date_value: String,
    date_picker: DatePicker,
    account_type: Dropdown<AccountType>,
    focus: FormField,
    submit_label: String,
    busy_label: String,
    busy: bool,
    layout: FormLayout,
}

impl AccountForm {
    pub fn new(submit_label: impl Into<String>, busy_label: impl Into<String>) -> Self {
        let mut account_type = Dropdown::new("Type de compte")
            .with_placeholder("Selectionner un type");
        for kind in AccountType::all() {
            account_type = account_type.add_option(DropdownOption::new(kind.label(), kind));
        }

        let mut form = Self {
            solde: TextInput::new("Solde (MAD)")
                .with_type(InputType::Amount)
                .required()
                .with_placeholder("0.00"),
            date_value: String::new(),
            date_picker: DatePicker::new(FIELD_DATE_CREATION),
            account_type,
            focus: FormField::Solde,
            submit_label: submit_label.into(),
            busy_label: busy_label.into(),
            busy: false,
            layout: FormLayout::default(),
        };
        form.set_focus(FormField::Solde);
        form
    }

    /// Form pre-filled from an existing account
    pub fn from_account(
        account: &Account,
        submit_label: impl Into<String>,
        busy_label: impl Into<String>,
    ) -> Self {
        let mut form = Self::new(submit_label, busy_label);
        let draft = account.to_draft();
        form.apply_change(&ChangeEvent::new(FIELD_SOLDE, draft.solde.to_string()));
        if let Some(date) = draft.date_creation {
            form.apply_change(&ChangeEvent::new(
                FIELD_DATE_CREATION,
                date.format("%Y-%m-%d").to_string(),
            ));
        }
        if let Some(kind) = draft.account_type {
            form.apply_change(&ChangeEvent::new(FIELD_TYPE, kind.as_str()));
        }
        form
    }

    /// Clear every field and focus the first one
    pub fn reset(&mut self) {
        self.solde.clear();
        self.date_value.clear();
        self.date_picker.reset();
        self.account_type.clear_selection();
        self.busy = false;
        self.set_focus(FormField::Solde);
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        if self.focus == FormField::DateCreation && field != FormField::DateCreation {
            self.date_picker.close();
        }
        self.focus = field;
        self.solde.set_focused(field == FormField::Solde);
        self.account_type.set_focused(field == FormField::Type);
    }

    /// Close the calendar and the type list, e.g. when the form loses focus
    pub fn close_popups(&mut self) {
        self.date_picker.close();
        self.account_type.close();
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn solde(&self) -> &TextInput {
        &self.solde
    }

    pub fn date_picker(&self) -> &DatePicker {
        &self.date_picker
    }

    /// Current `dateCreation` value, empty when unset
    pub fn date_value(&self) -> &str {
        &self.date_value
    }

    pub fn account_type(&self) -> Option<AccountType> {
        self.account_type.selected_value().copied()
    }

    /// Whether the focused field consumes plain characters
    pub fn is_typing(&self) -> bool {
        self.focus == FormField::Solde || self.date_picker.is_open()
    }

    /// Whether a popup (calendar or type list) is currently open
    pub fn has_popup(&self) -> bool {
        self.date_picker.is_open() || self.account_type.is_open()
    }

    /// Apply a field change, whatever widget produced it
    pub fn apply_change(&mut self, change: &ChangeEvent) {
        let value = change.target.value.as_str();
        match change.target.name.as_str() {
            FIELD_SOLDE => self.solde.set_value(value),
            FIELD_DATE_CREATION => {
                self.date_value = value.to_string();
                self.date_picker.sync_value(value);
            }
            FIELD_TYPE => match AccountType::parse(value) {
                Some(kind) => {
                    self.account_type.select_by_value(&kind);
                }
                None => self.account_type.clear_selection(),
            },
            other => tracing::warn!(field = other, "change for unknown form field"),
        }
    }

    /// Build the request body, flagging the balance field when invalid
    pub fn to_draft(&mut self) -> Result<AccountDraft, Error> {
        let solde = validate_amount(self.solde.value()).map_err(|e| {
            self.solde.set_error(e.clone());
            Error::Validation(e)
        })?;

        Ok(AccountDraft {
            solde,
            date_creation: parse_date_value(&self.date_value),
            account_type: self.account_type(),
        })
    }

    pub fn handle_event(&mut self, event: &Event) -> FormAction {
        if self.date_picker.is_open() {
            return self.handle_calendar_key(event);
        }
        if self.account_type.is_open() {
            return self.handle_dropdown_key(event);
        }

        match event {
            Event::Tab | Event::Down => {
                self.set_focus(self.focus.next());
                FormAction::None
            }
            Event::BackTab | Event::Up => {
                self.set_focus(self.focus.prev());
                FormAction::None
            }
            Event::Escape => FormAction::Cancel,
            Event::Ctrl('s') => FormAction::Submit,
            _ => match self.focus {
                FormField::Solde => self.handle_solde_key(event),
                FormField::DateCreation => match event {
                    Event::Enter | Event::Char(' ') => {
                        self.date_picker.toggle();
                        FormAction::None
                    }
                    Event::Delete | Event::Backspace => {
                        let change = self.date_picker.clear();
                        self.commit(change)
                    }
                    _ => FormAction::None,
                },
                FormField::Type => match event {
                    Event::Enter | Event::Char(' ') => {
                        self.account_type.toggle();
                        FormAction::None
                    }
                    _ => FormAction::None,
                },
                FormField::Submit => match event {
                    Event::Enter => FormAction::Submit,
                    _ => FormAction::None,
                },
            },
        }
    }

    /// Handle a pointer press at a terminal cell
    pub fn handle_click(&mut self, column: u16, row: u16) -> FormAction {
        if self.date_picker.is_open() {
            match self.layout.calendar.hit(column, row) {
                CalendarHit::Cell(index) => {
                    return match self.date_picker.select_cell(index) {
                        Some(change) => self.commit(change),
                        None => FormAction::None,
                    };
                }
                CalendarHit::PrevYear => {
                    self.date_picker.prev_year();
                    return FormAction::None;
                }
                CalendarHit::PrevMonth => {
                    self.date_picker.prev_month();
                    return FormAction::None;
                }
                CalendarHit::NextMonth => {
                    self.date_picker.next_month();
                    return FormAction::None;
                }
                CalendarHit::NextYear => {
                    self.date_picker.next_year();
                    return FormAction::None;
                }
                CalendarHit::Today => {
                    let change = self.date_picker.select_today();
                    return self.commit(change);
                }
                CalendarHit::Clear => {
                    let change = self.date_picker.clear();
                    return self.commit(change);
                }
                CalendarHit::Popup => return FormAction::None,
                CalendarHit::Field => {
                    self.date_picker.close();
                    return FormAction::None;
                }
                // Press outside closes, then still reaches whatever it landed on
                CalendarHit::Outside => self.date_picker.close(),
            }
        }

        let pos = ratatui::layout::Position::new(column, row);
        if self.layout.solde.contains(pos) {
            self.set_focus(FormField::Solde);
        } else if self.layout.calendar.field.contains(pos) {
            self.set_focus(FormField::DateCreation);
            self.date_picker.toggle();
        } else if self.layout.account_type.contains(pos) {
            self.set_focus(FormField::Type);
            self.account_type.toggle();
        } else if self.layout.submit.contains(pos) {
            self.set_focus(FormField::Submit);
            return FormAction::Submit;
        } else {
            self.account_type.close();
        }
        FormAction::None
    }

    fn handle_solde_key(&mut self, event: &Event) -> FormAction {
        let request = match event {
            Event::Char(c) => InputRequest::InsertChar(*c),
            Event::Backspace => InputRequest::DeletePrevChar,
            Event::Delete => InputRequest::DeleteNextChar,
            Event::Left => InputRequest::GoToPrevChar,
            Event::Right => InputRequest::GoToNextChar,
            Event::Home => InputRequest::GoToStart,
            Event::End => InputRequest::GoToEnd,
            Event::Enter => {
                self.set_focus(FormField::DateCreation);
                return FormAction::None;
            }
            _ => return FormAction::None,
        };

        let before = self.solde.value().to_string();
        self.solde.handle_input(request);
        if self.solde.value() != before {
            FormAction::Changed(ChangeEvent::new(FIELD_SOLDE, self.solde.value()))
        } else {
            FormAction::None
        }
    }

    fn handle_calendar_key(&mut self, event: &Event) -> FormAction {
        let picker = &mut self.date_picker;
        match event {
            Event::Left => picker.move_highlight(-1),
            Event::Right => picker.move_highlight(1),
            Event::Up => picker.move_highlight(-7),
            Event::Down => picker.move_highlight(7),
            Event::PageUp => picker.prev_month(),
            Event::PageDown => picker.next_month(),
            Event::Char('[') => picker.prev_year(),
            Event::Char(']') => picker.next_year(),
            Event::Enter => {
                if let Some(change) = picker.select_highlighted() {
                    return self.commit(change);
                }
            }
            Event::Char('t') => {
                let change = picker.select_today_on(Local::now().date_naive());
                return self.commit(change);
            }
            Event::Char('c') | Event::Delete => {
                let change = picker.clear();
                return self.commit(change);
            }
            Event::Escape => picker.close(),
            Event::Tab => self.set_focus(self.focus.next()),
            Event::BackTab => self.set_focus(self.focus.prev()),
            _ => {}
        }
        FormAction::None
    }

    fn handle_dropdown_key(&mut self, event: &Event) -> FormAction {
        match event {
            Event::Up => self.account_type.move_up(),
            Event::Down => self.account_type.move_down(),
            Event::Enter | Event::Char(' ') => {
                if let Some(kind) = self.account_type.select_current() {
                    let change = ChangeEvent::new(FIELD_TYPE, kind.as_str());
                    self.apply_change(&change);
                    return FormAction::Changed(change);
                }
            }
            Event::Escape => self.account_type.close(),
            Event::Tab => self.set_focus(self.focus.next()),
            Event::BackTab => self.set_focus(self.focus.prev()),
            _ => {}
        }
        FormAction::None
    }

    fn commit(&mut self, change: ChangeEvent) -> FormAction {
        self.apply_change(&change);
        FormAction::Changed(change)
    }

    /// Render the fields; popups are drawn last so they overlay the others
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Solde
                Constraint::Length(1), // Solde error
                Constraint::Length(3), // Date de creation
                Constraint::Length(1),
                Constraint::Length(3), // Type
                Constraint::Length(1),
                Constraint::Length(3), // Submit
                Constraint::Min(0),
            ])
            .split(area);

        self.solde.render(f, chunks[0]);
        if let Some(error) = self.solde.error() {
            f.render_widget(
                Paragraph::new(format!("⚠ {}", error)).style(Style::default().fg(Color::Red)),
                chunks[1],
            );
        }

        render_date_field(
            f,
            &self.date_picker,
            "Date de creation",
            self.focus == FormField::DateCreation,
            chunks[2],
        );

        let submit_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else if self.focus == FormField::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let label = if self.busy {
            format!("⏳ {}", self.busy_label)
        } else {
            format!("✓ {}", self.submit_label)
        };
        let submit_area = Rect {
            width: chunks[6].width.min(32),
            ..chunks[6]
        };
        f.render_widget(
            Paragraph::new(label)
                .style(submit_style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            submit_area,
        );

        // The type list opens downwards over the submit button
        self.account_type.render(f, chunks[4]);

        let calendar = if self.date_picker.is_open() {
            render_calendar_popup(f, &self.date_picker, chunks[2], Local::now().date_naive())
        } else {
            CalendarLayout::closed(chunks[2])
        };

        self.layout = FormLayout {
            solde: chunks[0],
            calendar,
            account_type: chunks[4],
            submit: submit_area,
        };
    }
}
