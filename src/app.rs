use crate::config::Config;
use crate::search::SearchMessage;
use crate::ui;
use crate::ui::widgets::SearchWidget;
use anyhow::{Context, Result};
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

pub struct App {
    config: Config,
    search: SearchWidget,
    rx: UnboundedReceiver<SearchMessage>,
    tick: usize,
    should_quit: bool,
}

enum Action {
    Lookup(SearchMessage),
    Terminal(Option<std::io::Result<Event>>),
    Tick,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let search = SearchWidget::new(config.search.clone(), tx);

        Self {
            config,
            search,
            rx,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn search(&self) -> &SearchWidget {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchWidget {
        &mut self.search
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let tick_rate = Duration::from_millis(self.config.general.tick_rate_ms.max(1));
        let mut ticker = tokio::time::interval(tick_rate);

        info!("Event loop started");

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self))
                .context("Failed to draw frame")?;

            let action = tokio::select! {
                Some(message) = self.rx.recv() => Action::Lookup(message),
                event = events.next() => Action::Terminal(event),
                _ = ticker.tick() => Action::Tick,
            };

            match action {
                Action::Lookup(message) => self.search.update_results(message),
                Action::Terminal(Some(event)) => {
                    let event = event.context("Failed to read terminal event")?;
                    let size = terminal.size().context("Failed to query terminal size")?;
                    self.handle_event(event, Rect::new(0, 0, size.width, size.height));
                }
                Action::Terminal(None) => {
                    debug!("Terminal event stream closed");
                    break;
                }
                Action::Tick => self.on_tick(),
            }
        }

        info!("Event loop stopped");
        Ok(())
    }

    fn on_tick(&mut self) {
        if self.search.is_loading() {
            self.tick = self.tick.wrapping_add(1);
        }
    }

    pub fn handle_event(&mut self, event: Event, area: Rect) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, area),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear_query();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.add_char(c);
            }
            KeyCode::Backspace => self.search.delete_char(),
            KeyCode::Enter => self.search.submit(),
            KeyCode::Up => self.search.scroll_up(),
            KeyCode::Down => self.search.scroll_down(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let button = ui::layout(area, &self.config.search.button_label).button;
        let inside = mouse.column >= button.x
            && mouse.column < button.x + button.width
            && mouse.row >= button.y
            && mouse.row < button.y + button.height;

        if inside {
            self.search.submit();
        }
    }
}
