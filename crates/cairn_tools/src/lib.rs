//! Tool framework for Cairn agents.
//!
//! This crate provides the infrastructure for defining, registering, and
//! executing tools that LLM agents can call. A tool is an opaque capability:
//! a unique name, a list of description lines shown to the model, and an
//! async call that turns loosely typed arguments into a text result.
//!
//! # Quick Start
//!
//! ```
//! use cairn_tools::{FunctionTool, ToolArgs, ToolError, ToolRegistry};
//!
//! # tokio_test_block_on(async {
//! let mut registry = ToolRegistry::new();
//! registry.register(FunctionTool::new(
//!     "shout",
//!     ["Upper-cases 'text'."],
//!     |args: ToolArgs| async move { Ok::<_, ToolError>(args.required_str("text")?.to_uppercase()) },
//! ));
//!
//! let mut args = ToolArgs::new();
//! args.insert("text", "hi");
//! let observations = registry.dispatch([("shout".to_string(), args)]).await;
//! assert_eq!(observations, ["HI"]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`Tool`]: trait for executable tools
//! - [`ToolArgs`]: argument map with fallible typed accessors
//! - [`ToolRegistry`]: stores tools by unique name and dispatches calls concurrently
//! - [`FunctionTool`]: closure-backed tool
//! - [`builtin`]: local filesystem, clock, and process tools

pub mod args;
pub mod builtin;
pub mod error;
pub mod function;
pub mod registry;
pub mod tool;

// Re-export core types at crate root.
pub use args::ToolArgs;
pub use error::ToolError;
pub use function::FunctionTool;
pub use registry::{NO_SUCH_TOOL, ToolRegistry};
pub use tool::{Tool, ToolFuture};
