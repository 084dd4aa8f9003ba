//! Single-line text input with cursor editing and optional masking for
//! passwords.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::styles::Styles;

#[derive(Debug, Clone)]
pub struct TextInput {
    buffer: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
    label: String,
    masked: bool,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            label: label.into(),
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// Apply one key press. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.buffer.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.buffer.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    let at = self.byte_index();
                    self.buffer.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.buffer.chars().count();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, styles: &Styles, focused: bool) {
        let shown: String = if self.masked {
            self.buffer.chars().map(|_| '*').collect()
        } else {
            self.buffer.clone()
        };

        let mut spans = Vec::new();
        if focused {
            // split at the cursor and render a block cursor cell
            let before: String = shown.chars().take(self.cursor).collect();
            let at: String = shown.chars().skip(self.cursor).take(1).collect();
            let after: String = shown.chars().skip(self.cursor + 1).collect();
            spans.push(Span::styled(before, styles.text()));
            spans.push(Span::styled(
                if at.is_empty() { " ".to_string() } else { at },
                styles.selection(),
            ));
            spans.push(Span::styled(after, styles.text()));
        } else {
            spans.push(Span::styled(shown, styles.text_muted()));
        }

        let border = if focused {
            styles.border_focused()
        } else {
            styles.border()
        };

        let widget = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(self.label.as_str()),
        );
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(input: &mut TextInput, code: KeyCode) {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::new("email");
        for c in "abc".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        assert_eq!(input.text(), "abc");

        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn cursor_editing_mid_string() {
        let mut input = TextInput::new("email");
        for c in "ac".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Char('b'));
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut input = TextInput::new("name");
        for c in "Аня".chars() {
            press(&mut input, KeyCode::Char(c));
        }
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text(), "Ан");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.text(), "н");
    }
}
