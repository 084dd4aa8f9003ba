//! The auth screen: login and register forms sharing one set of inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use hotline_client::AppCore;

use crate::components::TextInput;
use crate::styles::Styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

pub struct AuthScreen {
    mode: Mode,
    email: TextInput,
    password: TextInput,
    display_name: TextInput,
    focus: usize,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self {
            mode: Mode::Login,
            email: TextInput::new("Email"),
            password: TextInput::new("Password").masked(),
            display_name: TextInput::new("Display name"),
            focus: 0,
        }
    }
}

impl AuthScreen {
    fn field_count(&self) -> usize {
        match self.mode {
            Mode::Login => 2,
            Mode::Register => 3,
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match (self.mode, self.focus) {
            (_, 0) => &mut self.email,
            (_, 1) => &mut self.password,
            _ => &mut self.display_name,
        }
    }

    fn submit(&mut self, core: &mut AppCore) {
        match self.mode {
            Mode::Login => core.login(self.email.text(), self.password.text()),
            Mode::Register => core.register(
                self.email.text(),
                self.password.text(),
                self.display_name.text(),
            ),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, core: &mut AppCore) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => {
                    self.mode = match self.mode {
                        Mode::Login => Mode::Register,
                        Mode::Register => Mode::Login,
                    };
                    self.focus = self.focus.min(self.field_count() - 1);
                }
                KeyCode::Char('g') => core.google_sign_in(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.field_count();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.field_count() - 1) % self.field_count();
            }
            KeyCode::Enter => self.submit(core),
            _ => {
                self.focused_input().handle_key(key);
            }
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
        let box_width = area.width.min(52);
        let box_height = match self.mode {
            Mode::Login => 14,
            Mode::Register => 17,
        };
        let form = Rect {
            x: area.x + (area.width.saturating_sub(box_width)) / 2,
            y: area.y + (area.height.saturating_sub(box_height)) / 2,
            width: box_width,
            height: box_height.min(area.height),
        };

        let title = match self.mode {
            Mode::Login => " Hotline — sign in ",
            Mode::Register => " Hotline — create account ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border_focused())
            .title(title);
        let inner = block.inner(form);
        f.render_widget(block, form);

        let mut constraints = vec![Constraint::Length(3), Constraint::Length(3)];
        if self.mode == Mode::Register {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        self.email.render(f, rows[0], styles, self.focus == 0);
        self.password.render(f, rows[1], styles, self.focus == 1);
        let mut next = 2;
        if self.mode == Mode::Register {
            self.display_name.render(f, rows[2], styles, self.focus == 2);
            next = 3;
        }

        let status = if core.auth_busy {
            Line::from(Span::styled("Signing in...", styles.text_highlight()))
        } else {
            Line::from(Span::raw(""))
        };
        f.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[next]);

        let hint = match self.mode {
            Mode::Login => "Enter sign in · ^R register · ^G Google · Esc quit",
            Mode::Register => "Enter create · ^R back to login · Esc quit",
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(hint, styles.text_muted())))
                .alignment(Alignment::Center),
            rows[next + 1],
        );
    }
}
