//! The contacts tab: accepted friends with derived presence and the call
//! action.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use hotline_client::AppCore;
use hotline_shared::format::initials;

use crate::styles::Styles;

#[derive(Default)]
pub struct ContactsScreen {
    selected: usize,
}

impl ContactsScreen {
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore) {
        let len = core.contacts.items.len();
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down if len > 0 => self.selected = (self.selected + 1).min(len - 1),
            KeyCode::Char('r') => core.load_friends(),
            KeyCode::Enter | KeyCode::Char('c') => {
                if let Some(contact) = core.contacts.items.get(self.selected) {
                    core.start_call(contact.clone());
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border())
            .title(" Contacts — Enter call · r reload ");

        if core.contacts.loading {
            f.render_widget(
                Paragraph::new("Loading contacts...")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }
        if core.contacts.items.is_empty() {
            f.render_widget(
                Paragraph::new("No contacts yet. Find people in the Search tab.")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }

        let now = Utc::now();
        self.selected = self.selected.min(core.contacts.items.len() - 1);

        let items: Vec<ListItem> = core
            .contacts
            .items
            .iter()
            .map(|contact| {
                let online = contact.is_online_at(now);
                let dot = if online {
                    Span::styled("● ", styles.online_dot())
                } else {
                    Span::styled("○ ", styles.text_muted())
                };
                let mut spans = vec![
                    dot,
                    Span::styled(
                        format!("[{}] ", initials(&contact.display_name)),
                        styles.text_highlight(),
                    ),
                    Span::styled(contact.display_name.clone(), styles.text()),
                    Span::styled(format!("  {}", contact.email), styles.text_muted()),
                ];
                if online {
                    spans.push(Span::styled("  online", styles.online_dot()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected));

        let list = List::new(items)
            .block(block)
            .highlight_style(styles.selection())
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut state);
    }
}
