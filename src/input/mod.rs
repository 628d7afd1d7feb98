//! Input adapters for the fractal explorer.
//!
//! Adapters here receive input from a source and translate it into
//! [`Explorer`](crate::controllers::interactive::Explorer) calls.

#[cfg(feature = "gui")]
pub mod gui;
