mod code;
mod render;
mod tree;

#[cfg(test)]
mod tests;

pub use render::{MessageRenderer, RenderConfig};
pub use tree::DisplayTree;
