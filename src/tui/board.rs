//! Kanban board interface.
//!
//! This module implements the board view: three fixed status columns
//! (Pending, In Progress, Completed) with the visible cards derived
//! through the view filter. Moving the selected card to a neighbouring
//! column is the keyboard rendition of drag-and-drop: capture the source
//! card, the target column, and ask the store for the status change.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::fields::{Priority, Status};
use crate::filter::ViewFilter;
use crate::storage::JsonFileStorage;
use crate::store::{format_priority, format_status, Store};
use crate::task::Task;
use crate::tui::colors::{COMPLETED_GREEN, GOLD, PENDING_RED, PROGRESS_BLUE};
use crate::tui::form::{TaskForm, DESCRIPTION_FIELD, PRIORITY_FIELD, STATUS_FIELD, TITLE_FIELD};

/// Column order across the board, left to right.
const COLUMNS: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

/// Main board application state.
pub struct BoardApp {
    store: Store,
    view: ViewFilter,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    status_message: String,
    show_task_detail: bool,
    search_active: bool,
    form: Option<TaskForm>,
    seen_revision: u64,

    // Visible task ids per column, derived from store + view filter.
    columns: [Vec<u64>; 3],
}

impl BoardApp {
    /// Create a new BoardApp over the board file at the given path.
    pub fn new(db_path: &Path) -> Self {
        let mut store = Store::new(Box::new(JsonFileStorage::new(db_path.to_path_buf())));
        store.load_initial();

        let mut app = BoardApp {
            store,
            view: ViewFilter::default(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            status_message: String::new(),
            show_task_detail: false,
            search_active: false,
            form: None,
            seen_revision: 0,
            columns: Default::default(),
        };

        app.refresh();
        app
    }

    /// Accent color for a column.
    fn column_color(column_index: usize) -> Color {
        match COLUMNS[column_index] {
            Status::Pending => PENDING_RED,
            Status::InProgress => PROGRESS_BLUE,
            Status::Completed => COMPLETED_GREEN,
        }
    }

    /// Column titles, left to right.
    fn column_titles() -> [&'static str; 3] {
        ["Pending", "In Progress", "Completed"]
    }

    /// Rebuild columns when the store has changed since the last look.
    fn refresh(&mut self) {
        if self.seen_revision != self.store.revision() {
            self.seen_revision = self.store.revision();
            self.update_columns();
        }
    }

    /// Rebuild the per-column card lists from the store and view filter.
    fn update_columns(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.clear();
            self.column_scroll_offsets[i] = 0;
        }

        for task in self.view.apply(self.store.tasks()) {
            let column_index = match task.status {
                Status::Pending => 0,
                Status::InProgress => 1,
                Status::Completed => 2,
            };
            self.columns[column_index].push(task.id);
        }

        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid.
    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }

        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    /// ID of the currently selected card, if its column is non-empty.
    fn selected_task_id(&self) -> Option<u64> {
        self.columns[self.selected_column]
            .get(self.selected_card)
            .copied()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Move the selected card one column left or right.
    fn move_card(&mut self, right: bool) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let target_column = if right {
            if self.selected_column >= COLUMNS.len() - 1 {
                return;
            }
            self.selected_column + 1
        } else {
            if self.selected_column == 0 {
                return;
            }
            self.selected_column - 1
        };

        self.store.change_status(task_id, COLUMNS[target_column]);
        self.refresh();
        self.set_status_message(format!(
            "Moved task to {}",
            Self::column_titles()[target_column]
        ));

        // Follow the card into its new column.
        self.selected_column = target_column;
        if let Some(new_position) = self.columns[target_column]
            .iter()
            .position(|&id| id == task_id)
        {
            self.selected_card = new_position;
        } else {
            self.clamp_selection();
        }
    }

    /// Delete the selected card.
    fn delete_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        self.store.delete(task_id);
        self.refresh();
        self.set_status_message(format!("Deleted task {}", task_id));
    }

    /// Cycle the status view filter: all -> pending -> in-progress ->
    /// completed -> all.
    fn cycle_status_filter(&mut self) {
        self.view.status = match self.view.status {
            None => Some(Status::Pending),
            Some(Status::Pending) => Some(Status::InProgress),
            Some(Status::InProgress) => Some(Status::Completed),
            Some(Status::Completed) => None,
        };
        self.update_columns();
        let label = match self.view.status {
            Some(s) => format_status(s),
            None => "All",
        };
        self.set_status_message(format!("Status filter: {}", label));
    }

    /// Cycle the priority view filter: all -> low -> medium -> high -> all.
    fn cycle_priority_filter(&mut self) {
        self.view.priority = match self.view.priority {
            None => Some(Priority::Low),
            Some(Priority::Low) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::High),
            Some(Priority::High) => None,
        };
        self.update_columns();
        let label = match self.view.priority {
            Some(p) => format_priority(p),
            None => "All",
        };
        self.set_status_message(format!("Priority filter: {}", label));
    }

    /// Save the open form through the store. A validation failure keeps
    /// the form open so the input is not lost.
    fn save_form(&mut self) {
        let (draft, editing) = match &self.form {
            Some(form) => (form.draft(), form.editing),
            None => return,
        };
        let result = match editing {
            Some(id) => self.store.update(id, draft).map(|t| ("Updated", t)),
            None => self.store.create(draft).map(|t| ("Added", t)),
        };
        match result {
            Ok((verb, task)) => {
                self.form = None;
                self.refresh();
                self.set_status_message(format!("{} task {}", verb, task.id));
            }
            Err(e) => {
                self.set_status_message(format!("{}", e));
            }
        }
    }

    /// Handle keyboard input while the form dialog is open.
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.form = None;
                self.clear_status_message();
            }
            KeyCode::Enter => self.save_form(),
            _ => {
                let Some(form) = &mut self.form else {
                    return;
                };
                match key {
                    KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                    KeyCode::Left => form.handle_left_right(false),
                    KeyCode::Right => form.handle_left_right(true),
                    KeyCode::Backspace => form.handle_backspace(),
                    KeyCode::Char(c) => form.handle_char(c),
                    _ => {}
                }
            }
        }
    }

    /// Handle keyboard input while incremental search is active.
    fn handle_search_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.search_active = false;
                self.view.search.clear();
                self.update_columns();
                self.clear_status_message();
            }
            KeyCode::Enter => {
                self.search_active = false;
                if self.view.search.is_empty() {
                    self.set_status_message("Search cleared".to_string());
                } else {
                    let total: usize = self.columns.iter().map(|col| col.len()).sum();
                    self.set_status_message(format!(
                        "Search: '{}' ({} tasks shown)",
                        self.view.search, total
                    ));
                }
            }
            KeyCode::Backspace => {
                if !self.view.search.is_empty() {
                    self.view.search.pop();
                    self.update_columns();
                }
            }
            KeyCode::Char(c) => {
                self.view.search.push(c);
                self.update_columns();
            }
            _ => {}
        }
    }

    /// Handle keyboard input. Returns true when the app should exit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if self.form.is_some() {
                    self.handle_form_input(key.code);
                    return Ok(false);
                }
                if self.search_active {
                    self.handle_search_input(key.code);
                    return Ok(false);
                }

                self.clear_status_message();

                match key.code {
                    KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(true)
                    }
                    KeyCode::Esc | KeyCode::Char('q') => return Ok(true),

                    // Task detail popup
                    KeyCode::Enter => {
                        self.show_task_detail = !self.show_task_detail;
                    }

                    // Card movement between columns (check first, before
                    // regular navigation)
                    KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.move_card(false);
                    }
                    KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.move_card(true);
                    }

                    // Column navigation
                    KeyCode::Left => {
                        if self.selected_column > 0 {
                            self.selected_column -= 1;
                            self.clamp_selection();
                        }
                    }
                    KeyCode::Right => {
                        if self.selected_column < self.columns.len() - 1 {
                            self.selected_column += 1;
                            self.clamp_selection();
                        }
                    }

                    // Card navigation within column
                    KeyCode::Up => {
                        if self.selected_card > 0 {
                            self.selected_card -= 1;
                        }
                    }
                    KeyCode::Down => {
                        let column_len = self.columns[self.selected_column].len();
                        if column_len > 0 && self.selected_card < column_len - 1 {
                            self.selected_card += 1;
                        }
                    }

                    // New task in the selected column
                    KeyCode::Char('n') => {
                        self.form = Some(TaskForm::for_column(COLUMNS[self.selected_column]));
                    }

                    // Edit selected task
                    KeyCode::Char('e') => {
                        if let Some(task) = self.selected_task_id().and_then(|id| self.store.get(id))
                        {
                            self.form = Some(TaskForm::from_task(task));
                        }
                    }

                    // Delete selected task
                    KeyCode::Char('d') => {
                        self.delete_selected();
                    }

                    // View filters
                    KeyCode::Char('s') => {
                        self.cycle_status_filter();
                    }
                    KeyCode::Char('p') => {
                        self.cycle_priority_filter();
                    }

                    // Incremental search
                    KeyCode::Char('/') => {
                        self.search_active = true;
                        self.set_status_message(
                            "Search: Type to match title/description, Enter to apply, Esc to cancel"
                                .to_string(),
                        );
                    }

                    // Help
                    KeyCode::Char('h') => {
                        self.set_status_message(
                            "Help: Enter: Details | n: New | e: Edit | d: Delete | Ctrl+←/→: Move card | s/p: Filters | /: Search | Esc: Exit"
                                .to_string(),
                        );
                    }

                    _ => {}
                }
            }
        }
        Ok(false)
    }

    /// Render the board.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
        if self.form.is_some() {
            self.render_form_popup(f);
        }
    }

    /// Render the header with the active view filters.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let status_label = match self.view.status {
            Some(s) => format_status(s),
            None => "All",
        };
        let priority_label = match self.view.priority {
            Some(p) => format_priority(p),
            None => "All",
        };
        let filters = format!(
            "Status: {}  Priority: {}  Search: {}",
            status_label,
            priority_label,
            if self.view.search.is_empty() {
                "-"
            } else {
                self.view.search.as_str()
            }
        );

        let header_text = vec![Line::from(vec![
            Span::styled("KANBAN", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                filters,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    /// Render the three columns.
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        let column_titles = Self::column_titles();

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i, column_titles[i]);
        }
    }

    /// Render a single column.
    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize, title: &str) {
        let is_selected = column_index == self.selected_column;
        let accent = Self::column_color(column_index);

        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", title, self.columns[column_index].len()))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[column_index];
        if cards.is_empty() {
            return;
        }

        let card_height = 5;
        let available_height = inner.height as usize;
        let visible_cards = available_height / card_height;

        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            let end_visible = start_visible + visible_cards;

            if self.selected_card < start_visible {
                self.column_scroll_offsets[column_index] = self.selected_card;
                self.selected_card
            } else if self.selected_card >= end_visible && end_visible > 0 {
                let new_offset = self.selected_card - visible_cards + 1;
                self.column_scroll_offsets[column_index] = new_offset;
                new_offset
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };

        let mut current_y = 0;
        let mut rendered_cards = 0;

        for (card_index, &task_id) in cards.iter().enumerate().skip(scroll_offset) {
            if let Some(task) = self.store.get(task_id) {
                if current_y + card_height > available_height {
                    break;
                }

                let is_this_card_selected = is_selected && card_index == self.selected_card;

                let card_area = Rect {
                    x: inner.x,
                    y: inner.y + current_y as u16,
                    width: inner.width,
                    height: card_height as u16,
                };

                render_card(f, card_area, task, accent, is_this_card_selected);

                current_y += card_height;
                rendered_cards += 1;
            }
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y,
                    width: inner.width,
                    height: 1,
                },
            );
        }

        let remaining = cards.len() - scroll_offset - rendered_cards;
        if remaining > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y + inner.height - 1,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    /// Render the status bar.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if self.search_active {
            format!(
                "Search: {} | Type to match, Enter to apply, Esc to cancel",
                self.view.search
            )
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let total: usize = self.columns.iter().map(|col| col.len()).sum();
            format!(
                "Tasks: {} | n: New | e: Edit | d: Delete | Ctrl+←/→: Move | s/p: Filters | /: Search | h: Help",
                total
            )
        };

        let accent = Self::column_color(self.selected_column);
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(accent).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Render the task detail popup.
    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task_id().and_then(|id| self.store.get(id)) else {
            return;
        };

        let popup_area = centered_rect(f.area(), 70, 60);
        f.render_widget(Clear, popup_area);

        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:    {}", format_status(task.status))),
            Line::from(format!("Priority:  {}", format_priority(task.priority))),
            Line::from(format!(
                "Created:   {}",
                task.created_at.format("%Y-%m-%d %H:%M UTC")
            )),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() {
                "-".to_string()
            } else {
                task.description.clone()
            }),
        ];

        let accent = Self::column_color(self.selected_column);
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));

        let popup_paragraph = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));

        f.render_widget(popup_paragraph, popup_area);
    }

    /// Render the create/edit form dialog.
    fn render_form_popup(&self, f: &mut Frame) {
        let Some(form) = &self.form else {
            return;
        };

        let popup_area = centered_rect(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let dialog_title = if form.editing.is_some() {
            "Edit Task"
        } else {
            "New Task"
        };
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title(dialog_title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(GOLD));
        let inner = popup_block.inner(popup_area);
        f.render_widget(popup_block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Description
                Constraint::Length(3), // Status
                Constraint::Length(3), // Priority
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let field_style = |field: usize| {
            if form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };

        let title_input = Paragraph::new(form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(field_style(TITLE_FIELD)),
        );
        f.render_widget(title_input, chunks[0]);

        let desc_input = Paragraph::new(form.description.value.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Description")
                    .border_style(field_style(DESCRIPTION_FIELD)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(desc_input, chunks[1]);

        let status_selector = Paragraph::new(format!("< {} >", format_status(form.statuses[form.status])))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status")
                    .border_style(field_style(STATUS_FIELD)),
            );
        f.render_widget(status_selector, chunks[2]);

        let priority_selector =
            Paragraph::new(format!("< {} >", format_priority(form.priorities[form.priority])))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Priority")
                        .border_style(field_style(PRIORITY_FIELD)),
                );
        f.render_widget(priority_selector, chunks[3]);

        let instructions = Paragraph::new("Tab: Next field | ←/→: Cursor/Select | Enter: Save | Esc: Cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(instructions, chunks[4]);
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.refresh();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Render a single task card.
fn render_card(f: &mut Frame, area: Rect, task: &Task, accent: Color, is_selected: bool) {
    let style = if is_selected {
        Style::default()
            .bg(accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let mut card_text = vec![Line::from(vec![
        Span::raw(format!("#{} ", task.id)),
        Span::styled(
            format_priority(task.priority),
            match task.priority {
                Priority::High => Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                _ => Style::default(),
            },
        ),
    ])];

    // Wrap the title to fit the card width, two lines at most.
    let available_width = area.width.saturating_sub(2) as usize;
    let mut current_line = String::new();
    let mut lines = Vec::new();

    for word in task.title.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= available_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line.clone());
            current_line = word.to_string();
            if lines.len() >= 2 {
                break;
            }
        }
    }
    if !current_line.is_empty() && lines.len() < 2 {
        lines.push(current_line);
    }

    for line in lines {
        card_text.push(Line::from(line));
    }

    let card_block = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .wrap(Wrap { trim: true });

    f.render_widget(card_block, area);
}

/// Centered popup area taking the given percentages of the frame.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_width = (area.width * percent_x) / 100;
    let popup_height = (area.height * percent_y) / 100;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(x, y, popup_width, popup_height)
}
