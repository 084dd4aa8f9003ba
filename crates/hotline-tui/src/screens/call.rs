//! The exclusive full-screen call view.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use hotline_client::{AppCore, CallPhase};
use hotline_shared::format::{format_duration, initials};

use crate::styles::Styles;

pub fn handle_key(key: KeyEvent, core: &mut AppCore) {
    match key.code {
        KeyCode::Char('m') => core.toggle_mute(),
        KeyCode::Char('v') => core.toggle_video(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h') => core.end_call(),
        _ => {}
    }
}

pub fn render(f: &mut Frame<'_>, area: Rect, core: &AppCore, styles: &Styles) {
    let Some(call) = &core.call else { return };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border_focused())
        .title(" Call ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let avatar = Line::from(Span::styled(
        format!("[ {} ]", initials(&call.contact.display_name)),
        styles.text_highlight(),
    ));
    f.render_widget(Paragraph::new(avatar).alignment(Alignment::Center), rows[1]);

    let identity = vec![
        Line::from(Span::styled(
            call.contact.display_name.clone(),
            styles.text_highlight(),
        )),
        Line::from(Span::styled(call.contact.email.clone(), styles.text_muted())),
    ];
    f.render_widget(
        Paragraph::new(identity).alignment(Alignment::Center),
        rows[2],
    );

    let status = match call.phase {
        CallPhase::Calling => Line::from(Span::styled("Calling...", styles.badge())),
        CallPhase::Connected => Line::from(Span::styled(
            format!(" {} ", format_duration(call.duration_secs)),
            styles.text_success(),
        )),
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[3]);

    let mic = if call.muted { "mic off" } else { "mic on" };
    let cam = if call.video_on { "video on" } else { "video off" };
    let toggles = Line::from(vec![
        Span::styled(
            mic,
            if call.muted {
                styles.text_error()
            } else {
                styles.text_muted()
            },
        ),
        Span::raw("   "),
        Span::styled(
            cam,
            if call.video_on {
                styles.text_muted()
            } else {
                styles.text_error()
            },
        ),
    ]);
    f.render_widget(Paragraph::new(toggles).alignment(Alignment::Center), rows[4]);

    let hint = Line::from(Span::styled(
        "m mute · v video · Enter hang up",
        styles.text_muted(),
    ));
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[6]);
}
