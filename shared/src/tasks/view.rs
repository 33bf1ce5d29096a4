use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::model::{Task, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Completed, TaskFilter::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Completed => "completed",
            TaskFilter::Pending => "pending",
        }
    }

    pub fn admits(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Pending => !task.completed,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TaskFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

/// Filtered, sorted projection of a task list.
///
/// Built on demand from borrowed tasks and never stored; iterate it as
/// often as needed.
#[derive(Debug, Clone)]
pub struct TaskView<'a> {
    tasks: Vec<&'a Task>,
    source_len: usize,
}

impl<'a> TaskView<'a> {
    pub(crate) fn project(source: &'a [Task], filter: TaskFilter, search: &str) -> Self {
        let needle = search.to_lowercase();
        let mut tasks: Vec<&Task> = source
            .iter()
            .filter(|task| task.matches_search(&needle) && filter.admits(task))
            .collect();
        // Stable: tasks without a deadline keep their relative order.
        tasks.sort_by(|a, b| deadline_then_priority(a, b));

        Self {
            tasks,
            source_len: source.len(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.tasks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Empty-state copy: first-run hint or a nudge to loosen the filter.
    pub fn empty_message(&self) -> &'static str {
        if self.source_len == 0 {
            "Add your first task to get started!"
        } else {
            "Try changing your search or filter"
        }
    }
}

impl<'a, 'v> IntoIterator for &'v TaskView<'a> {
    type Item = &'a Task;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Task>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter().copied()
    }
}

/// Deadline ascending with missing deadlines last, then high < medium < low.
///
/// Two tasks without a deadline compare equal regardless of priority.
pub fn deadline_then_priority(a: &Task, b: &Task) -> Ordering {
    match (a.deadline, b.deadline) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.cmp(&right).then(a.priority.cmp(&b.priority)),
    }
}
