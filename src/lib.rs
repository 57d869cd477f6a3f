//! Revealer renders chat messages the way a chat view shows them while a
//! reply streams in.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the message model, `<Thinking>` segment extraction, the
//!   per-message reveal state and the timer-driven [`core::board::RevealBoard`].
//! - [`ui`] turns revealed text into styled lines: the markdown renderer,
//!   span metadata, themes and a plain ANSI writer.
//! - [`utils`] holds the syntax highlighter table.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
