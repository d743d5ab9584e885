//! Prelude module for convenient imports
//!
//! ```rust
//! use status_core::prelude::*;
//! ```

// Core types
pub use crate::effect::StatusEffect;
pub use crate::status_value::StatusValue;
pub use crate::types::{
    DamageSource, DetachReason, ElementalSchool, ProcTrigger, StatChannel, StatusManipType,
};

// Auras
pub use crate::aura::{Aura, AuraGrant, AuraKind, ProcSpec};

// Entities
pub use crate::statable::{AuraId, DetachedAura, Statable};

// Config
pub use crate::config::{RatingCurve, StatusConstants};

// Persistence
pub use save_core::Persist;
