//! Transient notification slot.
//!
//! Only one notification is visible at a time. Each new message bumps the
//! slot's generation; an expiry carrying an older generation is ignored, so a
//! displaced message's timer never clears its successor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Success => "SUCCESS",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
    generation: u64,
}

impl NotificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current notification. Returns the new generation.
    pub fn show(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.current = Some(Notification {
            level,
            message: message.into(),
            generation: self.generation,
        });
        self.generation
    }

    /// Clear the slot if `generation` is still the one on display.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(note) if note.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
