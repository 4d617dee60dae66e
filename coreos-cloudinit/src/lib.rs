#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # coreos-cloudinit
//!
//! A library for rendering CoreOS cloud-config documents.
//!
//! A caller supplies a [`ConfigTree`] of optional, typed blocks. The
//! renderer checks it against an immutable descriptor catalog ([`Schema`])
//! and emits a deterministic, two-space-indented `#cloud-config` document
//! plus any non-fatal warnings.
//!
//! ## Core Types
//!
//! - [`Schema`]: the field descriptor catalog, built once and shared
//! - [`ConfigTree`], [`Block`], [`ConfigValue`]: the caller's input
//! - [`CloudConfigRenderer`] and [`Rendered`]: the assembler and its output
//! - [`Error`], [`Result`] and [`RenderFailure`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use coreos_cloudinit::{Block, CloudConfigRenderer, ConfigTree, Schema};
//!
//! let schema = Schema::coreos();
//! let tree = ConfigTree::new(
//!     Block::new()
//!         .with("hostname", "core-01")
//!         .with("update_strategy", Block::new().with("reboot_strategy", "etcd-lock")),
//! );
//!
//! let rendered = CloudConfigRenderer::new(&schema).render(&tree).unwrap();
//! assert_eq!(
//!     rendered.text,
//!     "#cloud-config\nhostname: core-01\ncoreos:\n  update:\n    reboot-strategy: \"etcd-lock\"\n"
//! );
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod value;

// Re-export key types at crate root for convenience
pub use error::{Error, RenderFailure, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{Dropin, Unit, User, WriteFile};
pub use render::{render, CloudConfigRenderer, Rendered};
pub use schema::Schema;
pub use value::{Block, ConfigTree, ConfigValue, Scalar};
