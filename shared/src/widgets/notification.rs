use std::time::Duration;

pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Single-slot notification banner; a new notice replaces the old one.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    next_id: u64,
    current: Option<Notification>,
}

impl Notifier {
    /// Shows `message` and returns its id for the dismiss timer.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    /// Dismisses notice `id`; a stale timer for a replaced notice is a no-op.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
