use crate::config::SearchConfig;
use crate::search::simulated::SimulatedProvider;
use crate::search::state::SearchState;
use crate::search::{ResultItem, SearchMessage, SearchProvider};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct SearchWidget {
    config: SearchConfig,
    state: SearchState,
    provider: Arc<dyn SearchProvider>,
    tx: UnboundedSender<SearchMessage>,
    scroll_state: ListState,
    next_seq: u64,
    latest_seq: u64,
}

impl SearchWidget {
    pub fn new(config: SearchConfig, tx: UnboundedSender<SearchMessage>) -> Self {
        Self::with_provider(config, Arc::new(SimulatedProvider::new()), tx)
    }

    pub fn with_provider(
        config: SearchConfig,
        provider: Arc<dyn SearchProvider>,
        tx: UnboundedSender<SearchMessage>,
    ) -> Self {
        Self {
            config,
            state: SearchState::new(),
            provider,
            tx,
            scroll_state: ListState::default(),
            next_seq: 0,
            latest_seq: 0,
        }
    }

    pub fn query(&self) -> &str {
        self.state.query()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
        self.sync_selection();
    }

    pub fn add_char(&mut self, c: char) {
        self.state.push_char(c);
        self.sync_selection();
    }

    pub fn delete_char(&mut self) {
        self.state.pop_char();
        self.sync_selection();
    }

    pub fn clear_query(&mut self) {
        self.state.clear_query();
        self.sync_selection();
    }

    pub fn results(&self) -> &[ResultItem] {
        self.state.results()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.scroll_state.selected()
    }

    /// Perform a search for the current query.
    ///
    /// Must be called from within a tokio runtime: the lookup runs as a
    /// spawned task and reports back through the widget's channel.
    pub fn submit(&mut self) {
        let submitted = self.state.submit();
        self.scroll_state.select(None);
        let Some(query) = submitted else {
            debug!("Blank query, nothing to look up");
            return;
        };

        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = seq;
        info!(seq, query = %query, "Starting lookup");

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let results = provider.lookup(query.clone()).await;
            if tx.send(SearchMessage { seq, query, results }).is_err() {
                debug!(seq, "Lookup finished after the receiver closed");
            }
        });
    }

    /// Apply a finished lookup. Every completion overwrites the results,
    /// including ones from searches that have since been superseded.
    pub fn update_results(&mut self, message: SearchMessage) {
        if message.seq < self.latest_seq {
            debug!(
                seq = message.seq,
                latest = self.latest_seq,
                query = %message.query,
                "Superseded lookup resolved; overwriting results"
            );
        } else {
            debug!(seq = message.seq, count = message.results.len(), "Lookup resolved");
        }

        self.state.complete(message.results);
        self.scroll_state.select(None);
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        if self.state.results().is_empty() {
            self.scroll_state.select(None);
        } else if self.scroll_state.selected().is_none() {
            self.scroll_state.select(Some(0));
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < self.state.results().len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    pub fn render_input(&self, frame: &mut Frame, input_area: Rect, button_area: Rect) {
        let block = Block::default()
            .title(" Query ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(input_area);

        let text = if self.query().is_empty() {
            Line::from(Span::styled(
                self.config.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.query())
        };
        frame.render_widget(Paragraph::new(text).block(block), input_area);

        frame.set_cursor_position(Position::new(cursor_column(self.query(), inner), inner.y));

        let button_style = if self.is_loading() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(Line::from(Span::styled(
            self.config.button_label.as_str(),
            button_style,
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(button_style));
        frame.render_widget(button, button_area);
    }

    pub fn render_results(&self, frame: &mut Frame, area: Rect, tick: usize) {
        let title = if self.state.results().is_empty() {
            " Results ".to_string()
        } else {
            format!(" Results ({}) ", self.state.results().len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        if self.is_loading() {
            let spinner = SPINNER[tick % SPINNER.len()];
            let loading_text = List::new(vec![ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", spinner), Style::default().fg(Color::Yellow)),
                Span::raw("Searching..."),
            ]))])
            .block(block);
            frame.render_widget(loading_text, area);
            return;
        }

        if self.state.results().is_empty() {
            let empty_text = List::new(vec![ListItem::new(Span::styled(
                "No results",
                Style::default().fg(Color::DarkGray),
            ))])
            .block(block);
            frame.render_widget(empty_text, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .results()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let title_line = Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        item.title.as_str(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]);
                let description_line = Line::from(vec![
                    Span::raw("   "),
                    Span::styled(item.description.as_str(), Style::default().fg(Color::Gray)),
                ]);
                let link_line = Line::from(vec![
                    Span::raw("   "),
                    Span::styled(item.link.as_str(), Style::default().fg(Color::Cyan)),
                ]);

                ListItem::new(vec![title_line, description_line, link_line])
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Terminal column just past the typed text, clamped to the input's inner area.
fn cursor_column(query: &str, inner: Rect) -> u16 {
    let typed = u16::try_from(Line::from(query).width()).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(typed.min(inner.width.saturating_sub(1)))
}
