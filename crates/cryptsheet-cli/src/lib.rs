//! cryptsheet CLI library.
//!
//! This crate wires the frame pipeline to a content store: configuration,
//! the [`publish::Publisher`] abstraction with its directory and in-memory
//! stores, run orchestration, and the command implementations.

pub mod commands;
pub mod config;
pub mod pipeline;
pub mod publish;

pub use config::RunConfig;
pub use pipeline::{build_variants, run_pipeline, RunError, RunReport};
pub use publish::{BlobProperties, DirectoryStore, MemoryStore, PublishError, Publisher};
