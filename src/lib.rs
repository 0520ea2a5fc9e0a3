//! Flap Combat (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `flap_combat::{core, engine, input, store, term, types}` and hosts the
//! binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use flap_combat_core as core;
pub use flap_combat_engine as engine;
pub use flap_combat_input as input;
pub use flap_combat_store as store;
pub use flap_combat_term as term;
pub use flap_combat_types as types;

pub use config::AppConfig;
