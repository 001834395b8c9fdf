use crate::core::controller::{SearchController, SearchMessage};
use crate::core::rows::VISIBLE_LINKS;
use crate::core::{LinkOpener, SearchProvider};
use crate::tui::search::SearchInput;
use crate::tui::ui;
use crate::utils::error::{Result, SearchError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Position of an activatable link inside the drawn list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRef {
    pub row: usize,
    pub link: usize,
}

pub struct App<P: SearchProvider + 'static, O: LinkOpener> {
    pub controller: SearchController<P>,
    pub input: SearchInput,
    pub selected_link: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub status_message: String,
    pub should_quit: bool,
    spinner_frame: usize,
    opener: O,
}

impl<P: SearchProvider + 'static, O: LinkOpener> App<P, O> {
    pub fn new(controller: SearchController<P>, opener: O) -> Self {
        Self {
            controller,
            input: SearchInput::default(),
            selected_link: None,
            scroll_offset: 0,
            visible_rows: 1,
            status_message: String::new(),
            should_quit: false,
            spinner_frame: 0,
            opener,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        self.controller.activate();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| SearchError::TerminalError {
                    message: e.to_string(),
                })?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn process_messages(&mut self) {
        if self.controller.process_messages() > 0 {
            self.reset_list_focus();
        }
    }

    pub fn apply_message(&mut self, message: SearchMessage) {
        if self.controller.apply(message) {
            self.reset_list_focus();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    /// Activatable links in display order. Links beyond the row's visible
    /// lines are clipped along with the row.
    pub fn link_refs(&self) -> Vec<LinkRef> {
        let mut refs = Vec::new();
        for (row_idx, row) in self.controller.rows().iter().enumerate() {
            if let Some(area) = &row.links {
                for (link_idx, link) in area.links.iter().take(VISIBLE_LINKS).enumerate() {
                    if link.is_activatable() {
                        refs.push(LinkRef {
                            row: row_idx,
                            link: link_idx,
                        });
                    }
                }
            }
        }
        refs
    }

    pub fn focused_link(&self) -> Option<LinkRef> {
        let selected = self.selected_link?;
        self.link_refs().get(selected).copied()
    }

    fn reset_list_focus(&mut self) {
        self.selected_link = None;
        self.scroll_offset = 0;
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.controller.dialog().is_some() {
            // Modal: only the acknowledgement goes through.
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.controller.dismiss_error();
            }
            return;
        }

        if self.controller.input_focused() {
            self.handle_search_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_search();
            }
            KeyCode::Char(c) => {
                self.input.insert(c);
                self.controller.on_text_changed(&self.input.query);
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.controller.on_text_changed(&self.input.query);
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.controller.on_text_changed(&self.input.query);
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.clear_search();
                }
            }
            KeyCode::Enter => {
                self.controller.on_submit();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.controller.on_submit();
                self.select_next_link();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Esc => self.controller.focus_input(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.select_next_link(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.select_prev_link(),
            KeyCode::PageDown => self.scroll_by(self.visible_rows as isize),
            KeyCode::PageUp => self.scroll_by(-(self.visible_rows as isize)),
            KeyCode::Enter => self.open_focused_link(),
            _ => {}
        }
    }

    fn clear_search(&mut self) {
        self.input.clear();
        self.controller.on_clear();
    }

    fn select_next_link(&mut self) {
        let total = self.link_refs().len();
        if total == 0 {
            return;
        }
        let next = match self.selected_link {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.select_link(next);
    }

    fn select_prev_link(&mut self) {
        match self.selected_link {
            Some(0) | None => {
                self.selected_link = None;
                self.controller.focus_input();
            }
            Some(i) => self.select_link(i - 1),
        }
    }

    fn select_link(&mut self, index: usize) {
        self.selected_link = Some(index);
        if let Some(link) = self.focused_link() {
            self.ensure_row_visible(link.row);
        }
    }

    fn ensure_row_visible(&mut self, row: usize) {
        let visible = self.visible_rows.max(1);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible {
            self.scroll_offset = row + 1 - visible;
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let total = self.controller.rows().len();
        let max_offset = total.saturating_sub(self.visible_rows.max(1));
        let offset = self.scroll_offset as isize + delta;
        self.scroll_offset = offset.clamp(0, max_offset as isize) as usize;
    }

    fn open_focused_link(&mut self) {
        let Some(link_ref) = self.focused_link() else {
            return;
        };
        let target = self.controller.rows()[link_ref.row]
            .links
            .as_ref()
            .and_then(|area| area.links.get(link_ref.link))
            .and_then(|link| link.target.clone());

        let Some(url) = target else {
            return;
        };

        match self.opener.open(&url) {
            Ok(()) => {
                tracing::info!("Opened {}", url);
                self.status_message = format!("Opened {}", url);
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", url, e);
                self.status_message = format!("Could not open {}: {}", url, e);
            }
        }
    }
}
