//! Crumble (workspace facade crate).
//!
//! This package keeps the `crumble::{core,types}` public API stable while the
//! implementation lives in dedicated crates under `crates/`.

pub use crumble_core as core;
pub use crumble_types as types;
