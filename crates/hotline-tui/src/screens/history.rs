//! The history tab: recent calls, newest first, as the calls service
//! reports them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use hotline_client::AppCore;
use hotline_shared::format::format_duration;

use crate::styles::Styles;

#[derive(Default)]
pub struct HistoryScreen {
    selected: usize,
}

impl HistoryScreen {
    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore) {
        let len = core.history.items.len();
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down if len > 0 => self.selected = (self.selected + 1).min(len - 1),
            KeyCode::Char('r') => core.load_history(),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border())
            .title(" Call history — r reload ");

        if core.history.loading {
            f.render_widget(
                Paragraph::new("Loading history...")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }
        if core.history.items.is_empty() {
            f.render_widget(
                Paragraph::new("No calls yet.")
                    .style(styles.text_muted())
                    .block(block),
                area,
            );
            return;
        }

        self.selected = self.selected.min(core.history.items.len() - 1);
        let user = core.session.user().map(|u| u.id);

        let items: Vec<ListItem> = core
            .history
            .items
            .iter()
            .map(|record| {
                let outgoing = user.map(|u| record.is_outgoing_for(u)).unwrap_or(false);
                let arrow = if outgoing {
                    Span::styled("→ ", styles.text_highlight())
                } else {
                    Span::styled("← ", styles.text_success())
                };
                let duration = record
                    .duration_seconds
                    .map(|secs| format_duration(secs.max(0) as u64))
                    .unwrap_or_else(|| "--:--".to_string());
                let mut spans = vec![
                    arrow,
                    Span::styled(record.other_user_name.clone(), styles.text()),
                    Span::styled(format!("  {duration}"), styles.text_muted()),
                    Span::styled(format!("  {}", record.status), styles.text_muted()),
                ];
                if let Some(started) = record.started_at {
                    spans.push(Span::styled(
                        format!("  {}", started.format("%Y-%m-%d %H:%M")),
                        styles.text_muted(),
                    ));
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
