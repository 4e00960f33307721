//! Core types and utilities for the slime ecosystem simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod random;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use random::{Mulberry32, RandomSource};
