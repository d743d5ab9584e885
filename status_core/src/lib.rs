//! status_core - Status effects, auras and stat aggregation for game entities
//!
//! This library provides:
//! - StatusValue: One stat as base, fixed, percental and rating parts
//! - StatusEffect: A reversible Fixed / Percental / Rating modifier on a channel
//! - Aura: A named bundle of effects with a Permanent, Timed or Triggered lifecycle
//! - Statable: The per-entity container that owns auras and resolves final values
//! - Binary save layouts for auras and statables (via save_core)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use status_core::prelude::*;
//!
//! let constants = StatusConstants::load_from_path(Path::new("config/status.toml"))?;
//! let mut hero = Statable::from_constants(10, &constants);
//! hero.set_base(StatChannel::Armor, 100.0);
//!
//! let ward = Aura::timed("Iron Skin", 10.0)
//!     .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0))
//!     .with_effect(StatusEffect::percental(StatChannel::Armor, 20.0));
//! let id = hero.attach(ward).expect("fresh aura");
//! assert_eq!(hero.armor(), 180.0);
//!
//! for expired in hero.tick(dt) {
//!     println!("{} wore off", expired.aura.name);
//! }
//!
//! let bytes = save_core::to_bytes(&hero)?;
//! ```

pub mod aura;
pub mod config;
pub mod effect;
pub mod persist;
pub mod prelude;
pub mod statable;
pub mod status_value;
pub mod types;

// Core API - what most users need
pub use aura::{Aura, AuraGrant, AuraKind, AuraState, ProcSpec};
pub use effect::StatusEffect;
pub use statable::{AuraId, DetachedAura, Statable};
pub use status_value::StatusValue;
pub use types::{
    DamageSource, DetachReason, ElementalSchool, ProcTrigger, StatChannel, StatusManipType,
};

// Configuration
pub use config::{ConfigError, RatingCurve, StatusConstants};

// Advanced: direct access to the running sums
pub use statable::{ChannelSums, StatAggregate};
