use super::task::Task;
use serde::{Deserialize, Serialize};

/// Which subset of the loaded tasks is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Uncompleted => !task.completed,
        }
    }

    /// Cycle in the order the filter menu lists them
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Uncompleted,
            Self::Uncompleted => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Uncompleted => "Uncompleted",
        }
    }
}

/// Input lifecycle, derived from whether an edit is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Editing,
}

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Browsing,
    Typing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let open = Task::new("1", "a");
        let done = Task::new("2", "b").with_completed(true);

        assert!(Filter::All.matches(&open));
        assert!(Filter::All.matches(&done));
        assert!(Filter::Completed.matches(&done));
        assert!(!Filter::Completed.matches(&open));
        assert!(Filter::Uncompleted.matches(&open));
        assert!(!Filter::Uncompleted.matches(&done));
    }

    #[test]
    fn test_filter_cycle_returns_to_start() {
        let f = Filter::default();
        assert_eq!(f, Filter::All);
        assert_eq!(f.next(), Filter::Uncompleted);
        assert_eq!(f.next().next(), Filter::Completed);
        assert_eq!(f.next().next().next(), Filter::All);
    }
}
