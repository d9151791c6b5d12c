//! Terminal rendering of page content.
//!
//! # Responsibility
//! - Expose the line-oriented markdown renderer and the built-in action
//!   registry it consults for `@macro` lines.
//!
//! # See also
//! - `render::markdown::render` for the side-effect contract.

pub mod actions;
pub mod markdown;
