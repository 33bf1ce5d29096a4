use serde::Serialize;

use crate::model::Task;

/// Aggregate completion figures for the progress bar and stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// `completed / total * 100` rounded half up; 0 for an empty list.
    pub percent_complete: u8,
}

impl Progress {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (total, completed) = tasks
            .into_iter()
            .fold((0usize, 0usize), |(total, completed), task| {
                (total + 1, completed + usize::from(task.completed))
            });
        Self {
            total,
            completed,
            pending: total - completed,
            percent_complete: percent(completed, total),
        }
    }

    pub fn label(&self) -> String {
        format!("{}% Complete", self.percent_complete)
    }
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // floor((200 * part + total) / (2 * total)) == round_half_up(100 * part / total)
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::percent;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 5, 0)]
    #[case(2, 3, 67)]
    #[case(1, 3, 33)]
    #[case(1, 8, 13)]
    #[case(1, 2, 50)]
    #[case(4, 4, 100)]
    fn rounds_half_up(#[case] part: usize, #[case] total: usize, #[case] expected: u8) {
        assert_eq!(percent(part, total), expected);
    }
}
