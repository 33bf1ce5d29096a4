/// Question/answer pair rendered by the FAQ accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Exclusive-open accordion: at most one answer is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Opens `index` and closes every other item; clicking the open item
    /// closes it. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }
}

pub const FAQ_ENTRIES: [FaqEntry; 4] = [
    FaqEntry {
        question: "Is the tracker free for students?",
        answer: "Yes. The Free plan covers personal task lists; paid plans add collaboration features.",
    },
    FaqEntry {
        question: "Do I need an account to add tasks?",
        answer: "You can browse the sample tasks without one, but adding or editing tasks requires logging in.",
    },
    FaqEntry {
        question: "How are my tasks sorted?",
        answer: "By deadline, soonest first. Tasks due the same day are ordered high, medium, then low priority.",
    },
    FaqEntry {
        question: "Can I switch to a dark theme?",
        answer: "Use the moon button next to Login. Your choice is remembered on this device.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_closes_the_other() {
        let mut accordion = Accordion::new(3);
        accordion.toggle(0);
        accordion.toggle(2);
        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(2));
    }

    #[test]
    fn clicking_open_item_closes_it() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(1);
        accordion.toggle(1);
        assert_eq!(accordion.open_index(), None);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut accordion = Accordion::new(2);
        accordion.toggle(0);
        accordion.toggle(5);
        assert!(accordion.is_open(0));
    }
}
