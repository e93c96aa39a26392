//! View filter: pure derivation of the visible subset of the board.
//!
//! Filtering never reorders or mutates anything. The three inputs combine
//! conjunctively; search is a case-insensitive substring match over title
//! and description.

use crate::fields::{Priority, Status};
use crate::task::Task;

/// Display filters for the board. `None` selects every status or
/// priority; an empty search string matches everything.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl ViewFilter {
    /// Whether a single task passes all three filters.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(s) = self.status {
            if task.status != s {
                return false;
            }
        }
        if let Some(p) = self.priority {
            if task.priority != p {
                return false;
            }
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Select the visible subsequence, preserving store order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn task(id: u64, title: &str, desc: &str, status: Status, priority: Priority) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: desc.to_string(),
            status,
            priority,
            created_at: Utc::now(),
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task(1, "Buy milk", "from the corner shop", Status::Pending, Priority::High),
            task(2, "Buy eggs", "free range", Status::Completed, Priority::High),
            task(3, "Water plants", "balcony and kitchen", Status::Pending, Priority::Low),
        ]
    }

    #[test]
    fn default_filter_passes_everything_in_order() {
        let tasks = board();
        let visible = ViewFilter::default().apply(&tasks);
        let ids: Vec<u64> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn status_filter_selects_exact_subset() {
        let tasks = board();
        let view = ViewFilter {
            status: Some(Status::Pending),
            ..Default::default()
        };
        let ids: Vec<u64> = view.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let tasks = board();
        let view = ViewFilter {
            status: Some(Status::Pending),
            priority: Some(Priority::High),
            search: "buy".to_string(),
        };
        let ids: Vec<u64> = view.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_description() {
        let tasks = board();
        let title_hit = ViewFilter {
            search: "BUY".to_string(),
            ..Default::default()
        };
        assert_eq!(title_hit.apply(&tasks).len(), 2);

        let desc_hit = ViewFilter {
            search: "corner SHOP".to_string(),
            ..Default::default()
        };
        let ids: Vec<u64> = desc_hit.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn search_is_substring_not_token_match() {
        let tasks = board();
        let view = ViewFilter {
            search: "alcon".to_string(),
            ..Default::default()
        };
        let ids: Vec<u64> = view.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }
}
