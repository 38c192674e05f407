//! A terminal eye movement trainer.
//!
//! A single dot is driven along one of several parametric paths for a timed session while
//! the user follows it with their eyes.

pub mod app;
pub mod color;
pub mod config;
pub mod motion;
pub mod scheduler;
pub mod session;
pub mod terminal;
pub mod viewport;
