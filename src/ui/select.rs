use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::cleaner::FoundDirectory;
use crate::output::format_size;

/// How the selection screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Confirmed,
    Cancelled,
}

/// Checkbox list over found directories. Everything starts checked.
pub struct SelectList {
    items: Vec<FoundDirectory>,
    checked: Vec<bool>,
    pub state: ListState,
}

impl SelectList {
    pub fn new(items: Vec<FoundDirectory>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        let checked = vec![true; items.len()];

        Self { items, checked, state }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) if i >= self.items.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_current(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(flag) = self.checked.get_mut(i) {
                *flag = !*flag;
            }
        }
    }

    /// All checked becomes none checked; anything else becomes all checked.
    pub fn toggle_all(&mut self) {
        let target = !self.checked.iter().all(|c| *c);
        self.checked.iter_mut().for_each(|c| *c = target);
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    pub fn checked_size(&self) -> u64 {
        self.items
            .iter()
            .zip(&self.checked)
            .filter(|(_, c)| **c)
            .map(|(d, _)| d.size)
            .sum()
    }

    /// Consume the list, keeping checked directories in their original order.
    pub fn into_selected(self) -> Vec<FoundDirectory> {
        self.items
            .into_iter()
            .zip(self.checked)
            .filter_map(|(d, c)| c.then_some(d))
            .collect()
    }

    /// Apply one key press. Returns an outcome when the screen should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SelectOutcome> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(SelectOutcome::Cancelled)
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => self.toggle_all(),
            KeyCode::Enter => return Some(SelectOutcome::Confirmed),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
                return Some(SelectOutcome::Cancelled)
            }
            _ => {}
        }
        None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // List
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let path_width = self
            .items
            .iter()
            .map(|d| d.relative_path.len())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .zip(&self.checked)
            .map(|(dir, checked)| {
                let mark = if *checked { "[x] " } else { "[ ] " };
                let mark_style = if *checked {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::raw(format!("{:<width$}  ", dir.relative_path, width = path_width)),
                    Span::styled(
                        format!("({})", format_size(dir.size)),
                        Style::default().fg(Color::Yellow),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Select directories to delete")
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, chunks[0], &mut self.state);

        let status = format!(
            " {} of {} selected, {}",
            self.checked_count(),
            self.items.len(),
            format_size(self.checked_size())
        );
        f.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::Yellow)),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new(" Space: toggle  a: toggle all  Enter: confirm  n/Esc/Ctrl-C: cancel")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}

/// Show the checkbox screen. `None` means the user cancelled.
pub fn run_selector(items: Vec<FoundDirectory>) -> Result<Option<Vec<FoundDirectory>>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut list = SelectList::new(items);
    let res = select_loop(&mut terminal, &mut list);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match res? {
        SelectOutcome::Confirmed => Ok(Some(list.into_selected())),
        SelectOutcome::Cancelled => Ok(None),
    }
}

fn select_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    list: &mut SelectList,
) -> Result<SelectOutcome> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            list.render(f, area);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(outcome) = list.handle_key(key) {
                return Ok(outcome);
            }
        }
    }
}
