//! Proc definitions - chance-based auras fired by gameplay events

use super::Aura;
use crate::types::ProcTrigger;
use rand::Rng;

/// Attach `aura` with `chance` percent whenever `trigger` fires
#[derive(Debug, Clone, PartialEq)]
pub struct ProcSpec {
    pub trigger: ProcTrigger,
    /// Percent chance, 0 to 100
    pub chance: f64,
    pub aura: Aura,
}

impl ProcSpec {
    pub fn new(trigger: ProcTrigger, chance: f64, aura: Aura) -> Self {
        ProcSpec {
            trigger,
            chance,
            aura,
        }
    }

    /// Roll whether this proc fires
    pub fn roll(&self, rng: &mut impl Rng) -> bool {
        if self.chance >= 100.0 {
            return true;
        }
        if self.chance <= 0.0 {
            return false;
        }
        rng.gen::<f64>() * 100.0 < self.chance
    }
}
