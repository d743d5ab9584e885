//! catalog_core - Data-driven aura definitions
//!
//! Auras are described in TOML, one per file, and loaded into an
//! [`AuraCatalog`]. The catalog builds ready-to-attach [`status_core::Aura`]
//! values, resolving proc references to other catalog entries.
//!
//! [`effect_kinds`] lists every effect a design tool can offer, each with a
//! factory that builds the matching `StatusEffect`.

mod config;
mod definition;
mod kinds;
mod registry;

pub use definition::{AuraDefinition, ProcRef};
pub use kinds::{effect_kinds, kinds_json, ChannelFamily, EffectKind, KeyKind};
pub use registry::AuraCatalog;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading aura definitions
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation {
        message: String,
        path: Option<PathBuf>,
    },
}

/// Error turning a definition into an aura or effect
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Unknown aura: {0}")]
    UnknownAura(String),
    #[error("Cycle detected in proc references: {0}")]
    CycleDetected(String),
    #[error("Invalid effect: {0}")]
    InvalidEffect(String),
    #[error("Invalid aura: {0}")]
    InvalidAura(String),
}
