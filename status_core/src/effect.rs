//! StatusEffect - a single typed modifier on one stat channel

use crate::statable::StatAggregate;
use crate::types::{StatChannel, StatusManipType};
use serde::{Deserialize, Serialize};

/// A Fixed, Percental or Rating modifier on one channel
///
/// Effects live inside an `Aura` and are applied and removed with it. To change
/// `value` while the aura is attached, go through
/// `Statable::set_effect_value` so the aggregate is kept in step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub channel: StatChannel,
    pub manip: StatusManipType,
    pub value: f64,
}

impl StatusEffect {
    pub fn new(channel: StatChannel, manip: StatusManipType, value: f64) -> Self {
        StatusEffect {
            channel,
            manip,
            value,
        }
    }

    pub fn fixed(channel: StatChannel, value: f64) -> Self {
        Self::new(channel, StatusManipType::Fixed, value)
    }

    /// `value` in whole percent (15.0 = +15%)
    pub fn percental(channel: StatChannel, value: f64) -> Self {
        Self::new(channel, StatusManipType::Percental, value)
    }

    pub fn rating(channel: StatChannel, value: f64) -> Self {
        Self::new(channel, StatusManipType::Rating, value)
    }

    /// Add this effect's contribution to the aggregate
    pub fn apply(&self, aggregate: &mut StatAggregate) {
        if !self.channel.is_recognized() {
            tracing::warn!(channel = %self.channel, "ignoring effect on unrecognized channel");
            return;
        }
        aggregate.add(self.channel, self.manip, self.value);
    }

    /// Exact inverse of `apply`
    pub fn remove(&self, aggregate: &mut StatAggregate) {
        if !self.channel.is_recognized() {
            return;
        }
        aggregate.subtract(self.channel, self.manip, self.value);
    }
}
