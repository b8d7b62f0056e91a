//! CLI command implementations
//!
//! Each submodule implements one binary's behaviour.

pub mod hello;
pub mod sum;
