//! StatAggregate - running per-channel sums of every applied status effect

use crate::types::{StatChannel, StatusManipType};
use std::collections::HashMap;

/// Summed contributions to one channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelSums {
    pub fixed: f64,
    /// Whole percentage points
    pub percental: f64,
    /// Unconverted rating
    pub rating: f64,
    /// Number of effects currently applied to the channel
    pub count: u32,
}

impl ChannelSums {
    fn bucket(&mut self, manip: StatusManipType) -> &mut f64 {
        match manip {
            StatusManipType::Fixed => &mut self.fixed,
            StatusManipType::Percental => &mut self.percental,
            StatusManipType::Rating => &mut self.rating,
        }
    }
}

/// Accumulates status effect contributions per channel
///
/// Updated incrementally as effects are applied and removed. A channel whose
/// last effect is removed drops its entry, so it reads exactly zero again
/// instead of carrying floating point residue. Owners that need removal to be
/// exact while other effects remain use `reset` and re-add the survivors.
#[derive(Debug, Clone, Default)]
pub struct StatAggregate {
    channels: HashMap<StatChannel, ChannelSums>,
}

impl StatAggregate {
    pub fn new() -> Self {
        StatAggregate::default()
    }

    /// Add a contribution to a channel's bucket
    pub fn add(&mut self, channel: StatChannel, manip: StatusManipType, value: f64) {
        let sums = self.channels.entry(channel).or_default();
        *sums.bucket(manip) += value;
        sums.count += 1;
    }

    /// Remove a contribution previously added with `add`
    pub fn subtract(&mut self, channel: StatChannel, manip: StatusManipType, value: f64) {
        let Some(sums) = self.channels.get_mut(&channel) else {
            debug_assert!(false, "removing {channel} contribution that was never added");
            return;
        };
        *sums.bucket(manip) -= value;
        sums.count = sums.count.saturating_sub(1);
        if sums.count == 0 {
            self.channels.remove(&channel);
        }
    }

    /// Sums for a channel; zero for channels nothing touches
    pub fn sums(&self, channel: StatChannel) -> ChannelSums {
        self.channels.get(&channel).copied().unwrap_or_default()
    }

    /// Drop every contribution to one channel
    pub fn reset(&mut self, channel: StatChannel) {
        self.channels.remove(&channel);
    }

    /// Total number of applied effects
    pub fn effect_count(&self) -> usize {
        self.channels.values().map(|s| s.count as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_into_buckets() {
        let mut agg = StatAggregate::new();
        agg.add(StatChannel::Armor, StatusManipType::Fixed, 50.0);
        agg.add(StatChannel::Armor, StatusManipType::Percental, 20.0);
        agg.add(StatChannel::Armor, StatusManipType::Rating, 100.0);

        let sums = agg.sums(StatChannel::Armor);
        assert!((sums.fixed - 50.0).abs() < f64::EPSILON);
        assert!((sums.percental - 20.0).abs() < f64::EPSILON);
        assert!((sums.rating - 100.0).abs() < f64::EPSILON);
        assert_eq!(sums.count, 3);
        assert_eq!(agg.effect_count(), 3);
    }

    #[test]
    fn test_last_removal_drops_channel() {
        let mut agg = StatAggregate::new();
        agg.add(StatChannel::Life, StatusManipType::Fixed, 0.1);
        agg.add(StatChannel::Life, StatusManipType::Fixed, 0.2);
        agg.subtract(StatChannel::Life, StatusManipType::Fixed, 0.1);
        agg.subtract(StatChannel::Life, StatusManipType::Fixed, 0.2);

        assert!(agg.is_empty());
        assert_eq!(agg.sums(StatChannel::Life), ChannelSums::default());
    }

    #[test]
    fn test_untouched_channel_is_zero() {
        let agg = StatAggregate::new();
        assert_eq!(agg.sums(StatChannel::MovementSpeed), ChannelSums::default());
    }

    #[test]
    fn test_reset_drops_only_that_channel() {
        let mut agg = StatAggregate::new();
        agg.add(StatChannel::Armor, StatusManipType::Fixed, 5.0);
        agg.add(StatChannel::Life, StatusManipType::Fixed, 7.0);

        agg.reset(StatChannel::Armor);
        assert_eq!(agg.sums(StatChannel::Armor), ChannelSums::default());
        assert_eq!(agg.sums(StatChannel::Life).count, 1);

        agg.clear();
        assert!(agg.is_empty());
    }
}
