//! Rendering of the metadata tree

mod config;
mod tree;

pub use config::DisplayConfig;
pub use tree::{MetaFormatter, RenderContext};
