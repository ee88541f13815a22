//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod export;
pub mod history;
pub mod info;
pub mod predict;

// Re-export all handlers for use in router
pub use export::*;
pub use history::*;
pub use info::*;
pub use predict::*;
