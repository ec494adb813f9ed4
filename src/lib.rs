//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the [`app`]
//! controller that ties a session to the on-disk stores.

pub mod app;

pub use blockfall_core as core;
pub use blockfall_store as store;
pub use blockfall_types as types;

pub use app::{App, AppEvent};
