//! Terminal output.
//!
//! ```text
//! commands / core ──Reporter──▶ Output ──UiEvent──▶ actor thread ──▶ stdout
//! ```
//!
//! - [`theme`] - colors and icons
//! - [`actor`] - event loop that owns stdout
//! - [`output`] - cloneable handle commands print through

pub mod actor;
pub mod output;
pub mod theme;

pub use output::Output;
pub use theme::Theme;
