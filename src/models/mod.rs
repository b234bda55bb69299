//! Data models for the learning hub widget.
//!
//! Field names follow the learning backend's JSON contract.

mod content;
mod history;
mod interest;
mod platform;
mod question;
mod skill;

pub use content::*;
pub use history::*;
pub use interest::*;
pub use platform::*;
pub use question::*;
pub use skill::*;
