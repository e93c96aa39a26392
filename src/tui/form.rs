//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure backing the create/edit
//! dialog: two text fields (title, description) and two selectors (status,
//! priority), with Tab-order field cycling.

use crate::fields::{Priority, Status};
use crate::task::{Task, TaskDraft};

/// A text input field with cursor position and active state management.
/// The cursor counts characters, not bytes.
#[derive(Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            active: false,
        }
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_offset(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset();
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }
}

/// Field order within the dialog.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const STATUS_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;

/// Form state for creating or editing a task.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub status: usize,
    pub priority: usize,
    pub current_field: usize,
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
    /// ID of the task being edited, `None` when creating.
    pub editing: Option<u64>,
}

impl TaskForm {
    /// Create a blank form (new pending task, medium priority).
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            status: 0,
            priority: 1,
            current_field: TITLE_FIELD,
            statuses: vec![Status::Pending, Status::InProgress, Status::Completed],
            priorities: vec![Priority::Low, Priority::Medium, Priority::High],
            editing: None,
        };
        form.update_active_field();
        form
    }

    /// Blank form preset to create a card in the given column.
    pub fn for_column(status: Status) -> Self {
        let mut form = Self::new();
        form.status = form.statuses.iter().position(|&s| s == status).unwrap_or(0);
        form
    }

    /// Form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        form.status = form
            .statuses
            .iter()
            .position(|&s| s == task.status)
            .unwrap_or(0);
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == task.priority)
            .unwrap_or(1);
        form.editing = Some(task.id);
        form.update_active_field();
        form
    }

    /// The draft described by the current form state.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            status: self.statuses[self.status],
            priority: self.priorities[self.priority],
        }
    }

    /// Get the total number of fields (text fields + selectors).
    pub fn field_count(&self) -> usize {
        4
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_FIELD => self.title.handle_char(c),
            DESCRIPTION_FIELD => self.description.handle_char(c),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_FIELD => self.title.handle_backspace(),
            DESCRIPTION_FIELD => self.description.handle_backspace(),
            _ => {}
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector
    /// changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TITLE_FIELD => {
                if right {
                    self.title.move_cursor_right()
                } else {
                    self.title.move_cursor_left()
                }
            }
            DESCRIPTION_FIELD => {
                if right {
                    self.description.move_cursor_right()
                } else {
                    self.description.move_cursor_left()
                }
            }
            STATUS_FIELD => {
                if right {
                    self.status = (self.status + 1) % self.statuses.len();
                } else {
                    self.status = if self.status == 0 {
                        self.statuses.len() - 1
                    } else {
                        self.status - 1
                    };
                }
            }
            PRIORITY_FIELD => {
                if right {
                    self.priority = (self.priority + 1) % self.priorities.len();
                } else {
                    self.priority = if self.priority == 0 {
                        self.priorities.len() - 1
                    } else {
                        self.priority - 1
                    };
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_cycling_wraps_both_ways() {
        let mut form = TaskForm::new();
        assert_eq!(form.current_field, TITLE_FIELD);
        for _ in 0..form.field_count() {
            form.next_field();
        }
        assert_eq!(form.current_field, TITLE_FIELD);
        form.prev_field();
        assert_eq!(form.current_field, PRIORITY_FIELD);
    }

    #[test]
    fn draft_reflects_selector_state() {
        let mut form = TaskForm::for_column(Status::InProgress);
        form.handle_char('x');
        form.current_field = PRIORITY_FIELD;
        form.handle_left_right(true); // Medium -> High
        let draft = form.draft();
        assert_eq!(draft.title, "x");
        assert_eq!(draft.status, Status::InProgress);
        assert_eq!(draft.priority, Priority::High);
    }

    #[test]
    fn input_field_edits_at_char_boundaries() {
        let mut field = InputField::with_value("café");
        field.handle_backspace();
        assert_eq!(field.value, "caf");
        field.move_cursor_left();
        field.handle_char('f');
        assert_eq!(field.value, "caff");
    }
}
