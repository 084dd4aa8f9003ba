//! The requests tab: pending incoming friend requests with accept/reject.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use hotline_client::AppCore;

use crate::styles::Styles;

#[derive(Default)]
pub struct RequestsScreen {
    selected: usize,
}

impl RequestsScreen {
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore) {
        let len = core.inbox.list.items.len();
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down if len > 0 => self.selected = (self.selected + 1).min(len - 1),
            KeyCode::Char('r') => core.load_requests(),
            KeyCode::Char('a') | KeyCode::Enter => {
                if let Some(request) = core.inbox.list.items.get(self.selected) {
                    core.accept_request(request.id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(request) = core.inbox.list.items.get(self.selected) {
                    core.reject_request(request.id);
                }
            }
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
        let title = format!(
            " Requests ({}) — a accept · x reject · r reload ",
            core.inbox.count()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border())
            .title(title);

        if core.inbox.list.loading {
            f.render_widget(
                Paragraph::new("Loading requests...")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }
        if core.inbox.list.items.is_empty() {
            f.render_widget(
                Paragraph::new("No pending requests.")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }

        self.selected = self.selected.min(core.inbox.list.items.len() - 1);

        let items: Vec<ListItem> = core
            .inbox
            .list
            .items
            .iter()
            .map(|request| {
                let mut spans = vec![
                    Span::styled(request.display_name.clone(), styles.text()),
                    Span::styled(format!("  {}", request.email), styles.text_muted()),
                ];
                if let Some(created) = request.created_at {
                    spans.push(Span::styled(
                        format!("  {}", created.format("%Y-%m-%d %H:%M")),
                        styles.text_muted(),
                    ));
                }
                if core.inbox.in_flight.contains(&request.id) {
                    spans.push(Span::styled("  [working...]", styles.text_muted()));
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
