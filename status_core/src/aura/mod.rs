//! Aura system - bundles of status effects with a lifecycle

mod grant;
mod procs;

pub use grant::AuraGrant;
pub use procs::ProcSpec;

use crate::effect::StatusEffect;
use crate::statable::StatAggregate;
use crate::types::DetachReason;

/// How long an aura stays once attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuraKind {
    /// Active for as long as it is attached
    Permanent,
    /// Expires after `duration` seconds of ticks
    Timed { duration: f64 },
    /// Active until gameplay code removes it
    Triggered,
}

/// Lifecycle state of an aura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuraState {
    #[default]
    Inactive,
    Active,
}

/// A named bundle of status effects
///
/// Effects keep their insertion order, which is what UI and debugging show.
/// The final stat values do not depend on it.
///
/// State machine: `Inactive → Active → (Expired | Removed) → Inactive`.
/// `attach` and `detach` are no-ops when the aura is already in the target state.
#[derive(Debug, Clone, PartialEq)]
pub struct Aura {
    pub name: String,
    /// Icon reference for the buff bar. Never `Some("")`: the save format
    /// stores "no symbol" as the empty string.
    pub symbol: Option<String>,
    pub is_visible: bool,
    pub kind: AuraKind,
    pub effects: Vec<StatusEffect>,
    /// Procs that can fire while this aura is active
    pub procs: Vec<ProcSpec>,
    state: AuraState,
    /// Seconds left; only meaningful for an active timed aura
    remaining: f64,
}

impl Aura {
    pub fn new(name: impl Into<String>, kind: AuraKind) -> Self {
        Aura {
            name: name.into(),
            symbol: None,
            is_visible: true,
            kind,
            effects: Vec::new(),
            procs: Vec::new(),
            state: AuraState::Inactive,
            remaining: 0.0,
        }
    }

    pub fn permanent(name: impl Into<String>) -> Self {
        Self::new(name, AuraKind::Permanent)
    }

    pub fn timed(name: impl Into<String>, duration: f64) -> Self {
        Self::new(name, AuraKind::Timed { duration })
    }

    pub fn triggered(name: impl Into<String>) -> Self {
        Self::new(name, AuraKind::Triggered)
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = StatusEffect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Set the icon; an empty string clears it
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        self.symbol = (!symbol.is_empty()).then_some(symbol);
        self
    }

    pub fn with_proc(mut self, spec: ProcSpec) -> Self {
        self.procs.push(spec);
        self
    }

    /// Hide from the buff bar
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }

    pub fn state(&self) -> AuraState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AuraState::Active
    }

    pub fn is_timed(&self) -> bool {
        matches!(self.kind, AuraKind::Timed { .. })
    }

    /// Same name, kind and effects, whatever the lifecycle state
    pub fn same_definition(&self, other: &Aura) -> bool {
        self.name == other.name && self.kind == other.kind && self.effects == other.effects
    }

    pub fn duration(&self) -> Option<f64> {
        match self.kind {
            AuraKind::Timed { duration } => Some(duration),
            _ => None,
        }
    }

    /// Seconds left for an active timed aura
    pub fn remaining(&self) -> Option<f64> {
        if self.is_active() && self.is_timed() {
            Some(self.remaining)
        } else {
            None
        }
    }

    /// Inactive → Active, applying every effect
    ///
    /// Timed auras start their countdown at the full duration. Returns false
    /// and changes nothing if the aura is already active.
    pub fn attach(&mut self, aggregate: &mut StatAggregate) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining = self.duration().unwrap_or(0.0);
        self.apply_effects(aggregate);
        self.state = AuraState::Active;
        true
    }

    /// Advance a timed aura by `dt` seconds
    ///
    /// Returns true exactly once: on the tick that expires and detaches it.
    pub fn tick(&mut self, dt: f64, aggregate: &mut StatAggregate) -> bool {
        if !self.is_active() || !self.is_timed() || dt.is_nan() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return self.detach(aggregate, DetachReason::Expired);
        }
        false
    }

    /// Active → Inactive, removing every effect. No-op when already inactive.
    pub fn detach(&mut self, aggregate: &mut StatAggregate, reason: DetachReason) -> bool {
        if !self.is_active() {
            return false;
        }
        for effect in &self.effects {
            effect.remove(aggregate);
        }
        self.state = AuraState::Inactive;
        tracing::trace!(aura = %self.name, ?reason, "aura effects removed");
        true
    }

    /// Restart the countdown of an active timed aura
    pub fn refresh(&mut self) {
        if let Some(duration) = self.duration() {
            if self.is_active() {
                self.remaining = duration;
            }
        }
    }

    /// Re-apply the effects of an aura decoded in the Active state
    ///
    /// Keeps the decoded remaining time. An inactive aura is attached normally.
    pub(crate) fn resume(&mut self, aggregate: &mut StatAggregate) -> bool {
        if !self.is_active() {
            return self.attach(aggregate);
        }
        self.apply_effects(aggregate);
        true
    }

    /// Set the lifecycle fields from decoded data without touching any aggregate
    pub(crate) fn restore_state(&mut self, active: bool, remaining: f64) {
        self.state = if active {
            AuraState::Active
        } else {
            AuraState::Inactive
        };
        self.remaining = remaining;
    }

    /// Replace one effect's value, keeping the aggregate consistent if active
    pub(crate) fn set_effect_value(
        &mut self,
        index: usize,
        value: f64,
        aggregate: &mut StatAggregate,
    ) -> bool {
        let active = self.is_active();
        let Some(effect) = self.effects.get_mut(index) else {
            return false;
        };
        if active {
            effect.remove(aggregate);
        }
        effect.value = value;
        if active {
            effect.apply(aggregate);
        }
        true
    }

    fn apply_effects(&self, aggregate: &mut StatAggregate) {
        for effect in &self.effects {
            effect.apply(aggregate);
        }
    }
}
