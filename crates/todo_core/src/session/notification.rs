//! Single-slot transient notifications.
//!
//! # Invariants
//! - At most one notification is pending.
//! - Showing a new notification supersedes the pending one and invalidates
//!   its dismiss ticket.
//! - A notification expires `DISMISS_AFTER` after it was shown.

use std::time::{Duration, Instant};

/// Delay before a notification dismisses itself.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Handle for the scheduled dismissal of one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTicket {
    generation: u64,
    pub due_at: Instant,
}

#[derive(Debug)]
struct Pending {
    notification: Notification,
    ticket: DismissTicket,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    pending: Option<Pending>,
    generation: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message`, replacing whatever was pending.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> DismissTicket {
        self.generation += 1;
        let ticket = DismissTicket {
            generation: self.generation,
            due_at: now + DISMISS_AFTER,
        };
        self.pending = Some(Pending {
            notification: Notification {
                message: message.into(),
                kind,
            },
            ticket,
        });
        ticket
    }

    /// The pending notification, unless it has expired by `now`.
    pub fn current(&self, now: Instant) -> Option<&Notification> {
        self.pending
            .as_ref()
            .filter(|pending| now < pending.ticket.due_at)
            .map(|pending| &pending.notification)
    }

    /// Runs a scheduled dismissal. Stale tickets are ignored.
    pub fn dismiss(&mut self, ticket: DismissTicket) -> bool {
        match &self.pending {
            Some(pending) if pending.ticket.generation == ticket.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
