//! # ReasonAct Core
//!
//! Domain types, traits, and error definitions for the ReasonAct reasoning loop.
//! This crate has **zero framework dependencies**; it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator of the loop is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping model backends via configuration
//! - Easy testing with scripted mock providers and tools
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ParseError, ProviderError, Result, ToolError};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StreamChunk, Usage};
pub use tool::{Tool, ToolOutput, ToolRegistry};
