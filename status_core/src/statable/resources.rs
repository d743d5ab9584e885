//! Life and mana pools

use super::Statable;
use crate::types::{DetachReason, StatChannel};

impl Statable {
    pub fn current_life(&self) -> f64 {
        self.current_life
    }

    pub fn current_mana(&self) -> f64 {
        self.current_mana
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Set both pools to their maximum
    pub fn fill_resources(&mut self) {
        self.current_life = self.max_life().max(0.0);
        self.current_mana = self.max_mana().max(0.0);
    }

    /// Subtract life; returns true if this hit killed the entity
    ///
    /// Death detaches every aura with `OwnerDeath`. Damage to a dead entity,
    /// and non-positive or NaN damage, is ignored.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if self.dead || amount.is_nan() || amount <= 0.0 {
            return false;
        }
        self.current_life -= amount;
        if self.current_life > 0.0 {
            return false;
        }
        self.current_life = 0.0;
        self.dead = true;
        tracing::debug!(level = self.level, "statable died");
        self.clear_auras(DetachReason::OwnerDeath);
        true
    }

    /// Add life up to the maximum; the dead do not heal
    pub fn heal(&mut self, amount: f64) {
        if self.dead || amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current_life = (self.current_life + amount).min(self.max_life().max(0.0));
    }

    /// Spend mana if enough is available
    pub fn spend_mana(&mut self, amount: f64) -> bool {
        if amount.is_nan() || amount < 0.0 || self.current_mana < amount {
            return false;
        }
        self.current_mana -= amount;
        true
    }

    pub fn restore_mana(&mut self, amount: f64) {
        if self.dead || amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current_mana = (self.current_mana + amount).min(self.max_mana().max(0.0));
    }

    /// Bring a dead entity back with full pools
    pub fn revive(&mut self) {
        self.dead = false;
        self.fill_resources();
    }

    /// Per-second regeneration over `dt` seconds
    pub(super) fn regenerate(&mut self, dt: f64) {
        if self.dead || dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.heal(self.value(StatChannel::LifeRegeneration) * dt);
        self.restore_mana(self.value(StatChannel::ManaRegeneration) * dt);
    }

    /// Keep current pools inside `[0, max]` after the maxima moved
    pub(crate) fn clamp_resources(&mut self) {
        let max_life = self.max_life().max(0.0);
        let max_mana = self.max_mana().max(0.0);
        self.current_life = self.current_life.clamp(0.0, max_life);
        self.current_mana = self.current_mana.clamp(0.0, max_mana);
    }

    /// Pools and death flag from decoded data
    pub(crate) fn restore_resources(&mut self, life: f64, mana: f64, dead: bool) {
        self.current_life = life;
        self.current_mana = mana;
        self.dead = dead;
        self.clamp_resources();
    }
}
