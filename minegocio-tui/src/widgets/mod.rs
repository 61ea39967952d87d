//! Reusable widget components.

pub mod detail;
pub mod input;

pub use detail::DetailPanel;
pub use input::{InputLine, InputList};
