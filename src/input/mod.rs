//! Input handling
//!
//! Provides an action-based input snapshot. Device polling belongs to the
//! host; the core only sees left/right held state and a jump press edge.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
