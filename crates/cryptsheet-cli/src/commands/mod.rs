//! CLI command implementations

pub mod plan;
pub mod publish;

mod reporting;

#[cfg(test)]
mod testing;
