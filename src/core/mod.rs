pub mod board;
pub mod config;
pub mod message;
pub mod reveal;
pub mod segments;
pub mod view;
