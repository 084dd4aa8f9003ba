//! Terminal lifecycle and the main event loop.
//!
//! One loop per process: draw, poll the terminal for ~100 ms, drain the
//! app-event channel into [`AppCore`], move notices into the toast stack,
//! expire old toasts. All state lives on this thread; spawned tasks only
//! ever talk back through the channel.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use hotline_client::{AppCore, AppEvent, RootView, Tab};
use hotline_shared::format::initials;

use crate::components::ToastManager;
use crate::screens::{
    auth::AuthScreen, call, contacts::ContactsScreen, history::HistoryScreen,
    requests::RequestsScreen, search::SearchScreen,
};
use crate::styles::Styles;

const TAB_ORDER: [Tab; 4] = [Tab::Contacts, Tab::Search, Tab::Requests, Tab::History];

pub struct App {
    core: AppCore,
    rx: UnboundedReceiver<AppEvent>,
    toasts: ToastManager,
    styles: Styles,
    should_quit: bool,

    auth: AuthScreen,
    contacts: ContactsScreen,
    search: SearchScreen,
    requests: RequestsScreen,
    history: HistoryScreen,
}

impl App {
    pub fn new(core: AppCore, rx: UnboundedReceiver<AppEvent>) -> Self {
        Self {
            core,
            rx,
            toasts: ToastManager::default(),
            styles: Styles::default(),
            should_quit: false,
            auth: AuthScreen::default(),
            contacts: ContactsScreen::default(),
            search: SearchScreen::default(),
            requests: RequestsScreen::default(),
            history: HistoryScreen::default(),
        }
    }

    pub async fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> io::Result<()> {
        loop {
            self.housekeeping();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                // releases call timers and reports a dangling call
                self.core.end_call();
                return Ok(());
            }
        }
    }

    /// Apply pending task answers and move notices into the toast stack.
    fn housekeeping(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.core.handle_event(event);
        }
        for notice in self.core.drain_notices() {
            self.toasts.push(notice);
        }
        self.toasts.cleanup();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.core.root_view() {
            RootView::Auth => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.auth.handle_key(key, &mut self.core);
                }
            }
            RootView::Call => call::handle_key(key, &mut self.core),
            RootView::Main => self.handle_main_key(key),
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        // while the search query is being edited, it owns the keyboard
        if self.core.tab == Tab::Search && self.search.editing {
            self.search.handle_key(key, &mut self.core);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
            self.core.logout();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('1') => return self.core.select_tab(Tab::Contacts),
            KeyCode::Char('2') => return self.core.select_tab(Tab::Search),
            KeyCode::Char('3') => return self.core.select_tab(Tab::Requests),
            KeyCode::Char('4') => return self.core.select_tab(Tab::History),
            KeyCode::Tab => {
                let at = TAB_ORDER.iter().position(|t| *t == self.core.tab).unwrap_or(0);
                return self.core.select_tab(TAB_ORDER[(at + 1) % TAB_ORDER.len()]);
            }
            _ => {}
        }

        match self.core.tab {
            Tab::Contacts => self.contacts.handle_key(key, &mut self.core),
            Tab::Search => self.search.handle_key(key, &mut self.core),
            Tab::Requests => self.requests.handle_key(key, &mut self.core),
            Tab::History => self.history.handle_key(key, &mut self.core),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>) {
        let area = f.size();

        match self.core.root_view() {
            RootView::Auth => self.auth.render(f, area, &self.core, &self.styles),
            RootView::Call => call::render(f, area, &self.core, &self.styles),
            RootView::Main => self.draw_main(f, area),
        }

        self.toasts.render(f, area, &self.styles);
    }

    fn draw_main(&mut self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.draw_header(f, rows[0]);
        self.draw_tab_bar(f, rows[1]);

        match self.core.tab {
            Tab::Contacts => self.contacts.render(f, rows[2], &self.core, &self.styles),
            Tab::Search => self.search.render(f, rows[2], &self.core, &self.styles),
            Tab::Requests => self.requests.render(f, rows[2], &self.core, &self.styles),
            Tab::History => self.history.render(f, rows[2], &self.core, &self.styles),
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(user) = self.core.session.user() else {
            return;
        };
        let header = Line::from(vec![
            Span::styled(" Hotline ", self.styles.text_highlight()),
            Span::styled(
                format!("[{}] ", initials(&user.display_name)),
                self.styles.text_highlight(),
            ),
            Span::styled(user.display_name.clone(), self.styles.text()),
            Span::styled(format!("  {}", user.email), self.styles.text_muted()),
            Span::styled("   ^L logout · q quit", self.styles.text_muted()),
        ]);
        f.render_widget(Paragraph::new(header), area);
    }

    fn draw_tab_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let pending = self.core.inbox.count();
        let requests_label = if pending > 0 {
            format!("3 Requests ({pending})")
        } else {
            "3 Requests".to_string()
        };
        let titles = vec![
            Line::from("1 Contacts"),
            Line::from("2 Search"),
            Line::from(requests_label),
            Line::from("4 History"),
        ];
        let selected = TAB_ORDER
            .iter()
            .position(|t| *t == self.core.tab)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(self.styles.text_muted())
            .highlight_style(self.styles.text_highlight());
        f.render_widget(tabs, area);
    }
}
