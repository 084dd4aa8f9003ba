//! Ephemeral notifications that appear briefly and auto-dismiss.
//! Stacked in the bottom-right corner, newest on top.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use hotline_client::{Notice, NoticeLevel};

use crate::styles::Styles;

const TOAST_DURATION: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 4;

#[derive(Debug)]
struct Toast {
    notice: Notice,
    created_at: Instant,
}

impl Toast {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    fn icon(&self) -> &'static str {
        match self.notice.level {
            NoticeLevel::Info => "i",
            NoticeLevel::Success => "*",
            NoticeLevel::Error => "x",
        }
    }
}

/// Manager for the active toast stack.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn push(&mut self, notice: Notice) {
        self.toasts.push_back(Toast {
            notice,
            created_at: Instant::now(),
        });
        while self.toasts.len() > MAX_VISIBLE * 2 {
            self.toasts.pop_front();
        }
    }

    /// Remove expired toasts. Call once per frame, before rendering.
    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, styles: &Styles) {
        if self.toasts.is_empty() {
            return;
        }

        let toast_width = area.width.min(44);
        let toast_height = 3;
        let gap = 1;
        let mut y_offset = area.height;

        for toast in self.toasts.iter().rev().take(MAX_VISIBLE) {
            if y_offset < toast_height + gap {
                break;
            }
            y_offset -= toast_height + gap;

            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(toast_width),
                y: area.y + y_offset,
                width: toast_width,
                height: toast_height,
            };

            f.render_widget(Clear, toast_area);

            let style = styles.notice(toast.notice.level);
            let content = vec![Line::from(vec![
                Span::styled(format!("[{}] ", toast.icon()), style),
                Span::raw(toast.notice.message.as_str()),
            ])];

            let paragraph = Paragraph::new(content)
                .block(Block::default().borders(Borders::ALL).border_style(style))
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: true });

            f.render_widget(paragraph, toast_area);
        }
    }
}
