//! Modal/Popup Components
//!
//! Confirmation dialogs and the key binding help overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ModalType {
    Confirmation {
        title: String,
        message: String,
        confirm_text: String,
        cancel_text: String,
    },
    Help {
        title: String,
        sections: Vec<HelpSection>,
    },
}

/// Help section for help modal
#[derive(Debug, Clone, PartialEq)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>, // (key, description) pairs
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub modal_type: ModalType,
    /// 0 = confirm, 1 = cancel
    pub selected_option: usize,
    pub scroll_offset: usize,
}

impl ModalState {
    pub fn confirmation(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_text: Option<String>,
        cancel_text: Option<String>,
    ) -> Self {
        Self {
            modal_type: ModalType::Confirmation {
                title: title.into(),
                message: message.into(),
                confirm_text: confirm_text.unwrap_or_else(|| "Oui".to_string()),
                cancel_text: cancel_text.unwrap_or_else(|| "Non".to_string()),
            },
            selected_option: 0,
            scroll_offset: 0,
        }
    }

    pub fn help(title: impl Into<String>, sections: Vec<HelpSection>) -> Self {
        Self {
            modal_type: ModalType::Help {
                title: title.into(),
                sections,
            },
            selected_option: 0,
            scroll_offset: 0,
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_option > 0 {
            self.selected_option -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if matches!(self.modal_type, ModalType::Confirmation { .. }) && self.selected_option < 1 {
            self.selected_option += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
    }

    /// Whether the confirm button is selected
    pub fn is_confirmed(&self) -> bool {
        self.selected_option == 0
    }
}

/// Key bindings overlay
pub fn create_help_modal() -> ModalState {
    let section = |title: &str, items: &[(&str, &str)]| HelpSection {
        title: title.to_string(),
        items: items
            .iter()
            .map(|(k, d)| (k.to_string(), d.to_string()))
            .collect(),
    };

    ModalState::help(
        "Aide",
        vec![
            section(
                "General",
                &[
                    ("F2", "Liste des comptes"),
                    ("F3 / n", "Nouveau compte"),
                    ("F1 / ?", "Aide"),
                    ("x / clic", "Fermer la derniere notification"),
                    ("q / Ctrl+C", "Quitter"),
                ],
            ),
            section(
                "Comptes",
                &[
                    ("↑/↓", "Selectionner un compte"),
                    ("/", "Rechercher"),
                    ("Esc", "Effacer la recherche"),
                    ("e", "Modifier le compte"),
                    ("d", "Supprimer le compte"),
                    ("r / F5", "Actualiser"),
                ],
            ),
            section(
                "Formulaire",
                &[
                    ("Tab", "Champ suivant"),
                    ("Entree", "Ouvrir / valider"),
                    ("Ctrl+S", "Enregistrer"),
                ],
            ),
            section(
                "Calendrier",
                &[
                    ("Fleches", "Changer de jour"),
                    ("PgPrec/PgSuiv", "Mois precedent / suivant"),
                    ("[ / ]", "Annee precedente / suivante"),
                    ("t", "Aujourd'hui"),
                    ("c / Suppr", "Effacer"),
                    ("Esc", "Fermer"),
                ],
            ),
        ],
    )
}

/// Where a modal is drawn inside the terminal `area`
pub fn modal_area(modal_state: &ModalState, area: Rect) -> Rect {
    match modal_state.modal_type {
        ModalType::Confirmation { .. } => centered_rect_fixed(52, 9, area),
        ModalType::Help { .. } => centered_rect(70, 80, area),
    }
}

/// Confirm and cancel button areas of a confirmation modal drawn at `area`
pub fn confirmation_buttons(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    (buttons[0], buttons[1])
}

pub fn render_modal(f: &mut Frame, modal_state: &ModalState, area: Rect) {
    let modal_area = modal_area(modal_state, area);
    f.render_widget(Clear, modal_area);
    match &modal_state.modal_type {
        ModalType::Confirmation {
            title,
            message,
            confirm_text,
            cancel_text,
        } => {
            render_confirmation_modal(
                f,
                title,
                message,
                confirm_text,
                cancel_text,
                modal_state.selected_option,
                modal_area,
            )
        }
        ModalType::Help { title, sections } => {
            render_help_modal(f, title, sections, modal_state.scroll_offset, modal_area)
        }
    }
}

fn render_confirmation_modal(
    f: &mut Frame,
    title: &str,
    message: &str,
    confirm_text: &str,
    cancel_text: &str,
    selected_option: usize,
    area: Rect,
) {
    let (confirm_area, cancel_area) = confirmation_buttons(area);
    let message_area = Rect {
        height: area.height.saturating_sub(confirm_area.height),
        ..area
    };

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(title)
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(message_paragraph, message_area);

    // Destructive action in red, cancel neutral
    let confirm_style = if selected_option == 0 {
        Style::default().bg(Color::Red).fg(Color::Black)
    } else {
        Style::default().fg(Color::Red)
    };
    f.render_widget(
        Paragraph::new(confirm_text)
            .style(confirm_style)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        confirm_area,
    );

    let cancel_style = if selected_option == 1 {
        Style::default().bg(Color::Gray).fg(Color::Black)
    } else {
        Style::default().fg(Color::Gray)
    };
    f.render_widget(
        Paragraph::new(cancel_text)
            .style(cancel_style)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        cancel_area,
    );
}

fn render_help_modal(
    f: &mut Frame,
    title: &str,
    sections: &[HelpSection],
    scroll_offset: usize,
    area: Rect,
) {
    let mut content = Vec::new();
    for section in sections {
        content.push(format!("═══ {} ═══", section.title));
        for (key, description) in &section.items {
            content.push(format!("  {:<14} {}", key, description));
        }
        content.push(String::new());
    }
    content.push("  Esc            Fermer l'aide".to_string());

    let items: Vec<ListItem> = content
        .iter()
        .skip(scroll_offset)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            if line.starts_with("═══") {
                ListItem::new(line.as_str()).style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(line.as_str()).style(Style::default().fg(Color::White))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(title),
    );

    f.render_widget(list, area);
}

/// Rectangle centered in `r`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rectangle of at most `width` x `height` centered in `r`
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_selection() {
        let mut modal = ModalState::confirmation(
            "Supprimer le compte",
            "Voulez-vous vraiment supprimer ce compte ?",
            Some("Supprimer".to_string()),
            Some("Annuler".to_string()),
        );
        assert!(modal.is_confirmed());
        modal.select_next();
        modal.select_next();
        assert_eq!(modal.selected_option, 1);
        assert!(!modal.is_confirmed());
        modal.select_previous();
        assert!(modal.is_confirmed());
    }

    #[test]
    fn test_help_has_no_buttons() {
        let mut help = create_help_modal();
        help.select_next();
        assert_eq!(help.selected_option, 0);
        help.scroll_down();
        help.scroll_up();
        help.scroll_up();
        assert_eq!(help.scroll_offset, 0);
    }

    #[test]
    fn test_confirmation_buttons_split_bottom_row() {
        let area = Rect::new(24, 10, 52, 9);
        let (confirm, cancel) = confirmation_buttons(area);
        assert_eq!(confirm, Rect::new(24, 16, 26, 3));
        assert_eq!(cancel, Rect::new(50, 16, 26, 3));
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 4, area);
        assert_eq!(rect, Rect::new(0, 3, 40, 4));
    }
}
