//! The search tab: query input plus transient results with the send action.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use hotline_client::AppCore;

use crate::components::TextInput;
use crate::styles::Styles;

pub struct SearchScreen {
    input: TextInput,
    pub editing: bool,
    selected: usize,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self {
            input: TextInput::new("Search by name or email"),
            editing: true,
            selected: 0,
        }
    }
}

impl SearchScreen {
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore) {
        if self.editing {
            match key.code {
                KeyCode::Enter => {
                    core.run_search(self.input.text());
                    self.editing = false;
                    self.selected = 0;
                }
                KeyCode::Esc => self.editing = false,
                _ => {
                    self.input.handle_key(key);
                }
            }
            return;
        }

        let len = core.search.results.items.len();
        match key.code {
            KeyCode::Char('/') => self.editing = true,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down if len > 0 => self.selected = (self.selected + 1).min(len - 1),
            KeyCode::Enter => {
                if let Some(result) = core.search.results.items.get(self.selected) {
                    let id = result.id;
                    if core.search.can_send(id) {
                        core.send_friend_request(id);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        self.input.render(f, rows[0], styles, self.editing);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border())
            .title(" Results — / edit query · Enter send request ");

        if core.search.results.loading {
            f.render_widget(
                Paragraph::new("Searching...")
                    .style(styles.text_muted())
                    .block(block),
                rows[1],
            );
            return;
        }
        if core.search.results.items.is_empty() {
            f.render_widget(
                Paragraph::new("Type a query and press Enter.")
                    .style(styles.text_muted())
                    .block(block),
                rows[1],
            );
            return;
        }

        self.selected = self.selected.min(core.search.results.items.len() - 1);

        let items: Vec<ListItem> = core
            .search
            .results
            .items
            .iter()
            .map(|result| {
                let mut spans = vec![
                    Span::styled(result.display_name.clone(), styles.text()),
                    Span::styled(format!("  {}", result.email), styles.text_muted()),
                ];
                if core.search.sent.contains(&result.id) {
                    spans.push(Span::styled("  [request sent]", styles.text_success()));
                } else if core.search.sending.contains(&result.id) {
                    spans.push(Span::styled("  [sending...]", styles.text_muted()));
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
        f.render_stateful_widget(list, rows[1], &mut state);
    }
}
