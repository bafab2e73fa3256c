//! Form input components
//!
//! Text inputs with validation (balances, search) and dropdowns (account type).

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_input::{Input, InputRequest, InputResponse};

use crate::tui::utils::validation::{is_amount_char, validate_amount};

/// Text input component with validation
#[derive(Debug, Clone)]
pub struct TextInput {
    input: Input,
    label: String,
    focused: bool,
    error: Option<String>,
    input_type: InputType,
    required: bool,
    placeholder: String,
}

/// Input validation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// Any text input
    Text,
    /// Non-negative amount with decimal point or comma
    Amount,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            label: label.into(),
            focused: false,
            error: None,
            input_type: InputType::Text,
            required: false,
            placeholder: String::new(),
        }
    }

    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = Input::default().with_value(value.into());
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.input = Input::default().with_value(value.to_string());
        self.error = None;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
        self.error = None;
    }

    /// Handle keyboard input. Characters an amount field cannot hold are dropped.
    pub fn handle_input(&mut self, request: InputRequest) -> InputResponse {
        if let InputRequest::InsertChar(c) = request {
            if self.input_type == InputType::Amount && !is_amount_char(c) {
                return None;
            }
            self.error = None;
        }
        self.input.handle(request)
    }

    /// Validate the current input
    pub fn validate(&mut self) -> bool {
        self.error = None;

        let value = self.input.value().trim().to_string();

        if self.required && value.is_empty() {
            self.error = Some("Ce champ est requis".to_string());
            return false;
        }

        if value.is_empty() {
            return true;
        }

        match self.input_type {
            InputType::Text => true,
            InputType::Amount => match validate_amount(&value) {
                Ok(_) => true,
                Err(e) => {
                    self.error = Some(e);
                    false
                }
            },
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Render the bordered box, titled with the label
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Blue)
        };

        let title = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        let showing_placeholder = self.input.value().is_empty() && !self.focused;
        let display_value = if showing_placeholder {
            self.placeholder.clone()
        } else {
            self.input.value().to_string()
        };
        let text_style = if showing_placeholder {
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC)
        } else if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        frame.render_widget(
            Paragraph::new(display_value).block(block).style(text_style),
            area,
        );

        if self.focused {
            let cursor_x = area.x + self.input.visual_cursor() as u16 + 1;
            let cursor_y = area.y + 1;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Dropdown/select component
#[derive(Debug, Clone)]
pub struct Dropdown<T> {
    label: String,
    placeholder: String,
    options: Vec<DropdownOption<T>>,
    selected: Option<usize>,
    open: bool,
    focused: bool,
    list_state: ListState,
    required: bool,
    highlighted: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DropdownOption<T> {
    pub text: String,
    pub value: T,
}

impl<T> DropdownOption<T> {
    pub fn new(text: impl Into<String>, value: T) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

impl<T: Clone + PartialEq> Dropdown<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: "Selectionner...".to_string(),
            options: Vec::new(),
            selected: None,
            open: false,
            focused: false,
            list_state: ListState::default(),
            required: false,
            highlighted: None,
        }
    }

    pub fn add_option(mut self, option: DropdownOption<T>) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set focus state; losing focus closes the list
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.close();
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        if self.focused && !self.options.is_empty() {
            self.open = !self.open;
            if self.open {
                let initial = self.selected.unwrap_or(0);
                self.highlighted = Some(initial);
                self.list_state.select(Some(initial));
            } else {
                self.highlighted = None;
            }
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    pub fn move_up(&mut self) {
        if self.open && !self.options.is_empty() {
            let current = self.highlighted.unwrap_or(0);
            let next = if current > 0 {
                current - 1
            } else {
                self.options.len() - 1
            };
            self.highlighted = Some(next);
            self.list_state.select(Some(next));
        }
    }

    pub fn move_down(&mut self) {
        if self.open && !self.options.is_empty() {
            let current = self.highlighted.unwrap_or(0);
            let next = if current + 1 < self.options.len() {
                current + 1
            } else {
                0
            };
            self.highlighted = Some(next);
            self.list_state.select(Some(next));
        }
    }

    /// Select the highlighted option and close; returns the new value
    pub fn select_current(&mut self) -> Option<T> {
        if !self.open {
            return None;
        }
        let highlighted = self.highlighted?;
        if highlighted >= self.options.len() {
            return None;
        }
        self.selected = Some(highlighted);
        self.close();
        self.selected_value().cloned()
    }

    pub fn selected_value(&self) -> Option<&T> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|opt| &opt.value)
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|opt| opt.text.as_str())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn select_by_value(&mut self, value: &T) -> bool {
        match self.options.iter().position(|opt| &opt.value == value) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// Render the selected value box, plus the option list below it when open
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let box_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Blue)
        };

        let title = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };
        let arrow = if self.open { "▲" } else { "▼" };
        let (text, text_style) = match self.selected_text() {
            Some(text) => (text.to_string(), Style::default().fg(Color::White)),
            None => (
                self.placeholder.clone(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ),
        };

        frame.render_widget(
            Paragraph::new(format!("{} {}", text, arrow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(box_style),
                )
                .style(text_style),
            area,
        );

        if self.open && !self.options.is_empty() {
            let list_height = (self.options.len() as u16 + 2).min(8);
            let list_area = Rect {
                x: area.x,
                y: area.y + area.height,
                width: area.width,
                height: list_height,
            }
            .intersection(frame.area());

            frame.render_widget(Clear, list_area);

            let items: Vec<ListItem> = self
                .options
                .iter()
                .enumerate()
                .map(|(idx, opt)| {
                    let style = if Some(idx) == self.highlighted {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let text = if Some(idx) == self.selected {
                        format!("✓ {}", opt.text)
                    } else {
                        format!("  {}", opt.text)
                    };
                    ListItem::new(text).style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }
    }
}
