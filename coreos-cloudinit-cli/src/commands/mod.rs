//! CLI command implementations.
//!
//! - `render`: Render a configuration tree to a cloud-config document
//! - `validate`: Check a configuration tree and report warnings
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod render;
pub mod validate;

pub use completions::CompletionsCommand;
pub use render::{OutputFormat, RenderCommand};
pub use validate::ValidateCommand;
