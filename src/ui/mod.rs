//! Presentation layer for revealed messages.
//!
//! - [`markdown`]: renders text into a [`markdown::DisplayTree`].
//! - [`message_view`]: composes label, body, reasoning and toggle for one
//!   message.
//! - [`span`] and [`theme`]: span metadata and style policy.
//! - [`terminal`]: line-oriented ANSI output used by the binary.

pub mod markdown;
pub mod message_view;
pub mod span;
pub mod terminal;
pub mod theme;
