//! Display backends.
//!
//! One backend exists: the crossterm terminal session. It owns the native
//! terminal state and translates native events into the crate's input
//! events; all painting logic stays backend-agnostic in `input`.

mod terminal;

pub use terminal::run;
