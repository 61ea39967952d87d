//! Event types for the TUI event loop.

use crate::commands::Outcome;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    Outcome(Box<Outcome>),
    NotificationExpired(u64),
    /// A call task ended without an outcome.
    TaskFailed { action: &'static str, message: String },
}
