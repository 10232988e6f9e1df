use std::time::{Duration, Instant};

use log::{error, info};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const ERROR_LIFETIME: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    pub created: Instant,
}

impl Toast {
    fn lifetime(&self) -> Duration {
        match self.kind {
            ToastKind::Error => ERROR_LIFETIME,
            _ => TOAST_LIFETIME,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.lifetime()
    }
}

/// Short-lived, dismissible messages shown over the editor
#[derive(Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Notifications::default()
    }

    fn push(&mut self, kind: ToastKind, title: &str, message: Option<&str>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            title: String::from(title),
            message: message.map(String::from),
            created: Instant::now(),
        });
        id
    }

    pub fn success(&mut self, title: &str) -> u64 {
        info!("{}", title);
        self.push(ToastKind::Success, title, None)
    }

    pub fn info(&mut self, title: &str) -> u64 {
        info!("{}", title);
        self.push(ToastKind::Info, title, None)
    }

    pub fn error(&mut self, title: &str, message: &str) -> u64 {
        error!("{}: {}", title, message);
        self.push(ToastKind::Error, title, Some(message))
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts and return the ones still showing
    pub fn active(&mut self, now: Instant) -> &[Toast] {
        self.toasts.retain(|t| !t.is_expired(now));
        &self.toasts
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
