//! Statable - per-entity base stats, active auras and the resolved values

mod aggregate;
mod resources;

pub use aggregate::{ChannelSums, StatAggregate};

use crate::aura::Aura;
use crate::config::{RatingCurve, StatusConstants};
use crate::status_value::StatusValue;
use crate::types::{DamageSource, DetachReason, ElementalSchool, ProcTrigger, StatChannel};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Handle to an aura attached to a particular Statable
///
/// Ids are never reused, so a handle kept after its aura is gone can never
/// point at a different aura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuraId(u64);

impl AuraId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AuraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aura#{}", self.0)
    }
}

/// An aura that left its Statable, handed back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedAura {
    pub id: AuraId,
    pub reason: DetachReason,
    /// Now inactive with all of its effects removed
    pub aura: Aura,
}

#[derive(Debug, Clone)]
struct ActiveAura {
    id: AuraId,
    aura: Aura,
}

/// Base stats, active auras and resource pools of one entity
///
/// After every mutation, for every channel:
/// `value(C) == (base(C) + Σfixed + rating_to_fixed(level, Σrating)) × (1 + Σpercental / 100)`
#[derive(Debug, Clone)]
pub struct Statable {
    level: u32,
    curve: RatingCurve,
    bases: HashMap<StatChannel, f64>,
    aggregate: StatAggregate,
    /// Attach order
    auras: Vec<ActiveAura>,
    next_aura_id: u64,
    current_life: f64,
    current_mana: f64,
    dead: bool,
}

impl Default for Statable {
    fn default() -> Self {
        Statable::new(1, RatingCurve::default())
    }
}

impl Statable {
    pub fn new(level: u32, curve: RatingCurve) -> Self {
        Statable {
            level,
            curve,
            bases: HashMap::new(),
            aggregate: StatAggregate::new(),
            auras: Vec::new(),
            next_aura_id: 1,
            current_life: 0.0,
            current_mana: 0.0,
            dead: false,
        }
    }

    pub fn from_constants(level: u32, constants: &StatusConstants) -> Self {
        Statable::new(level, constants.rating_curve())
    }

    // === Level and curve ===

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Change level; rating contributions convert at the new level from the next read
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.clamp_resources();
    }

    pub fn rating_curve(&self) -> &RatingCurve {
        &self.curve
    }

    pub fn set_rating_curve(&mut self, curve: RatingCurve) {
        self.curve = curve;
        self.clamp_resources();
    }

    // === Base values ===

    pub fn set_base(&mut self, channel: StatChannel, value: f64) {
        self.bases.insert(channel, value);
        self.clamp_resources();
    }

    /// Base value of a channel; 0.0 when never set
    pub fn base(&self, channel: StatChannel) -> f64 {
        self.bases.get(&channel).copied().unwrap_or(0.0)
    }

    pub fn bases(&self) -> impl Iterator<Item = (StatChannel, f64)> + '_ {
        self.bases.iter().map(|(channel, value)| (*channel, *value))
    }

    // === Resolved values ===

    /// All components of a channel
    pub fn status_value(&self, channel: StatChannel) -> StatusValue {
        let sums = self.aggregate.sums(channel);
        StatusValue {
            base: self.base(channel),
            fixed: sums.fixed,
            percental: sums.percental,
            rating: sums.rating,
        }
    }

    /// Final value of a channel
    ///
    /// A channel nothing touches reads as its base. Unrecognized channels never
    /// receive contributions, so they read as their base too.
    pub fn value(&self, channel: StatChannel) -> f64 {
        self.status_value(channel).compute(&self.curve, self.level)
    }

    pub fn aggregate(&self) -> &StatAggregate {
        &self.aggregate
    }

    pub fn max_life(&self) -> f64 {
        self.value(StatChannel::Life)
    }

    pub fn max_mana(&self) -> f64 {
        self.value(StatChannel::Mana)
    }

    pub fn armor(&self) -> f64 {
        self.value(StatChannel::Armor)
    }

    pub fn movement_speed(&self) -> f64 {
        self.value(StatChannel::MovementSpeed)
    }

    /// Outgoing damage multiplier for a hit of the given school and source
    ///
    /// DamageDone, DamageDoneWithSource and DamageDoneWithSchool are percentage
    /// channels and add up before conversion to a multiplier. Never negative.
    pub fn damage_done_multiplier(
        &self,
        school: Option<ElementalSchool>,
        source: DamageSource,
    ) -> f64 {
        let mut percent = self.value(StatChannel::DamageDone)
            + self.value(StatChannel::DamageDoneWithSource(source));
        if let Some(school) = school {
            percent += self.value(StatChannel::DamageDoneWithSchool(school));
        }
        (1.0 + percent / 100.0).max(0.0)
    }

    /// Incoming damage multiplier, same shape as `damage_done_multiplier`
    pub fn damage_taken_multiplier(
        &self,
        school: Option<ElementalSchool>,
        source: DamageSource,
    ) -> f64 {
        let mut percent = self.value(StatChannel::DamageTaken)
            + self.value(StatChannel::DamageTakenFromSource(source));
        if let Some(school) = school {
            percent += self.value(StatChannel::DamageTakenFromSchool(school));
        }
        (1.0 + percent / 100.0).max(0.0)
    }

    pub fn resistance(&self, school: ElementalSchool) -> f64 {
        self.value(StatChannel::SpellResistance(school))
    }

    // === Aura set ===

    /// Attach an aura and apply its effects
    ///
    /// An aura that is already active is handed back untouched.
    pub fn attach(&mut self, mut aura: Aura) -> Result<AuraId, Aura> {
        if !aura.attach(&mut self.aggregate) {
            return Err(aura);
        }
        let id = self.push_active(aura);
        self.clamp_resources();
        Ok(id)
    }

    /// Detach an aura, removing its effects. `None` if the id is not attached.
    pub fn detach(&mut self, id: AuraId, reason: DetachReason) -> Option<Aura> {
        let index = self.auras.iter().position(|a| a.id == id)?;
        let ActiveAura { id, mut aura } = self.auras.remove(index);
        aura.detach(&mut self.aggregate, reason);
        self.rebuild_channels(aura.effects.iter().map(|e| e.channel));
        tracing::debug!(%id, aura = %aura.name, ?reason, "aura detached");
        self.clamp_resources();
        Some(aura)
    }

    /// Detach every aura with the given name
    pub fn detach_named(&mut self, name: &str, reason: DetachReason) -> Vec<Aura> {
        let ids: Vec<AuraId> = self
            .auras
            .iter()
            .filter(|a| a.aura.name == name)
            .map(|a| a.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.detach(id, reason))
            .collect()
    }

    /// Detach everything, in attach order
    pub fn clear_auras(&mut self, reason: DetachReason) -> Vec<DetachedAura> {
        let auras = std::mem::take(&mut self.auras);
        let detached = auras
            .into_iter()
            .map(|ActiveAura { id, mut aura }| {
                aura.detach(&mut self.aggregate, reason);
                DetachedAura { id, reason, aura }
            })
            .collect();
        self.aggregate.clear();
        tracing::debug!(?reason, "all auras detached");
        self.clamp_resources();
        detached
    }

    pub fn contains(&self, id: AuraId) -> bool {
        self.auras.iter().any(|a| a.id == id)
    }

    pub fn aura(&self, id: AuraId) -> Option<&Aura> {
        self.auras.iter().find(|a| a.id == id).map(|a| &a.aura)
    }

    /// First active aura with this name
    pub fn find_named(&self, name: &str) -> Option<AuraId> {
        self.auras.iter().find(|a| a.aura.name == name).map(|a| a.id)
    }

    /// Active auras in attach order
    pub fn auras(&self) -> impl Iterator<Item = (AuraId, &Aura)> {
        self.auras.iter().map(|a| (a.id, &a.aura))
    }

    /// Active auras the buff bar should show
    pub fn visible_auras(&self) -> impl Iterator<Item = (AuraId, &Aura)> {
        self.auras().filter(|(_, aura)| aura.is_visible)
    }

    pub fn aura_count(&self) -> usize {
        self.auras.len()
    }

    /// Change one effect of an attached aura, re-applying it with the new value
    pub fn set_effect_value(&mut self, id: AuraId, index: usize, value: f64) -> bool {
        let Some(active) = self.auras.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        let Some(channel) = active.aura.effects.get(index).map(|e| e.channel) else {
            return false;
        };
        active.aura.set_effect_value(index, value, &mut self.aggregate);
        self.rebuild_channels([channel]);
        self.clamp_resources();
        true
    }

    /// Advance every timed aura by `dt` seconds and regenerate resources
    ///
    /// Expired auras are removed exactly once and returned.
    pub fn tick(&mut self, dt: f64) -> Vec<DetachedAura> {
        let mut expired = Vec::new();
        let mut index = 0;
        while index < self.auras.len() {
            if self.auras[index].aura.tick(dt, &mut self.aggregate) {
                let ActiveAura { id, aura } = self.auras.remove(index);
                tracing::debug!(%id, aura = %aura.name, "aura expired");
                expired.push(DetachedAura {
                    id,
                    reason: DetachReason::Expired,
                    aura,
                });
            } else {
                index += 1;
            }
        }
        if !expired.is_empty() {
            let touched: Vec<StatChannel> = expired
                .iter()
                .flat_map(|d| d.aura.effects.iter().map(|e| e.channel))
                .collect();
            self.rebuild_channels(touched);
            self.clamp_resources();
        }
        self.regenerate(dt);
        expired
    }

    /// Fire a gameplay event at the procs of every active aura
    ///
    /// A proc whose aura is already active refreshes it instead of stacking a
    /// second copy. "Already active" means an aura with the same name, kind and
    /// effects, so an unrelated aura that only shares the name is left alone.
    /// Returns the ids of the attached or refreshed auras.
    pub fn trigger(&mut self, event: ProcTrigger, rng: &mut impl Rng) -> Vec<AuraId> {
        let fired: Vec<Aura> = self
            .auras
            .iter()
            .flat_map(|a| a.aura.procs.iter())
            .filter(|spec| spec.trigger == event && spec.roll(rng))
            .map(|spec| spec.aura.clone())
            .collect();

        let mut touched = Vec::with_capacity(fired.len());
        for aura in fired {
            let existing = self
                .auras
                .iter_mut()
                .find(|a| a.aura.same_definition(&aura));
            if let Some(existing) = existing {
                existing.aura.refresh();
                tracing::debug!(
                    id = %existing.id,
                    aura = %aura.name,
                    ?event,
                    "proc refreshed aura"
                );
                touched.push(existing.id);
                continue;
            }
            let name = aura.name.clone();
            match self.attach(aura) {
                Ok(id) => {
                    tracing::debug!(%id, aura = %name, ?event, "proc attached aura");
                    touched.push(id);
                }
                Err(aura) => {
                    tracing::warn!(aura = %aura.name, "proc aura template is already active");
                }
            }
        }
        touched
    }

    /// Next id `attach` will hand out
    pub(crate) fn next_aura_id(&self) -> u64 {
        self.next_aura_id
    }

    /// Re-insert an aura decoded from save data under a fresh id,
    /// keeping its remaining time
    pub(crate) fn restore_aura(&mut self, mut aura: Aura) -> AuraId {
        aura.resume(&mut self.aggregate);
        self.push_active(aura)
    }

    /// Re-insert an aura decoded from save data under its saved id
    ///
    /// Hands the aura back if the id is already taken. Later attaches never
    /// reuse the id.
    pub(crate) fn restore_aura_with_id(
        &mut self,
        raw: u64,
        mut aura: Aura,
    ) -> Result<AuraId, Aura> {
        let id = AuraId(raw);
        if self.contains(id) {
            return Err(aura);
        }
        aura.resume(&mut self.aggregate);
        self.next_aura_id = self.next_aura_id.max(raw.saturating_add(1));
        self.auras.push(ActiveAura { id, aura });
        Ok(id)
    }

    /// Raise the id counter to at least `next`
    pub(crate) fn reserve_aura_ids(&mut self, next: u64) {
        self.next_aura_id = self.next_aura_id.max(next);
    }

    fn push_active(&mut self, aura: Aura) -> AuraId {
        let id = AuraId(self.next_aura_id);
        self.next_aura_id += 1;
        tracing::debug!(
            %id,
            aura = %aura.name,
            effects = aura.effects.len(),
            "aura attached"
        );
        self.auras.push(ActiveAura { id, aura });
        id
    }

    /// Recompute the given channels from the active auras in attach order
    ///
    /// Each channel ends up as the sequential sum of its active effects, so
    /// removing an aura gives back the exact value from before it was attached.
    fn rebuild_channels(&mut self, touched: impl IntoIterator<Item = StatChannel>) {
        let mut channels: Vec<StatChannel> = Vec::new();
        for channel in touched {
            if channel.is_recognized() && !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        for channel in &channels {
            self.aggregate.reset(*channel);
        }
        for active in &self.auras {
            for effect in &active.aura.effects {
                if channels.contains(&effect.channel) {
                    self.aggregate.add(effect.channel, effect.manip, effect.value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::StatusEffect;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-9;

    fn armored(base: f64) -> Statable {
        let mut statable = Statable::new(10, RatingCurve::default());
        statable.set_base(StatChannel::Armor, base);
        statable
    }

    #[test]
    fn test_fixed_and_percental_example() {
        let mut statable = armored(100.0);
        let fixed = statable
            .attach(
                Aura::permanent("Plate")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0)),
            )
            .unwrap();
        statable
            .attach(
                Aura::permanent("Fortify")
                    .with_effect(StatusEffect::percental(StatChannel::Armor, 20.0)),
            )
            .unwrap();

        assert!((statable.armor() - 180.0).abs() < EPS);

        statable.detach(fixed, DetachReason::Removed).unwrap();
        assert!((statable.armor() - 120.0).abs() < EPS);
    }

    #[test]
    fn test_detach_restores_exact_value() {
        let mut statable = Statable::new(10, RatingCurve::default());
        statable
            .attach(
                Aura::permanent("Small")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 0.1)),
            )
            .unwrap();
        let before = statable.armor();

        let id = statable
            .attach(
                Aura::permanent("Smaller")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 0.2)),
            )
            .unwrap();
        statable.detach(id, DetachReason::Removed).unwrap();

        // 0.1 + 0.2 - 0.2 is not 0.1 in floating point
        assert_eq!(statable.armor(), before);
    }

    #[test]
    fn test_expiry_and_value_change_restore_exact_value() {
        let mut statable = Statable::new(10, RatingCurve::default());
        statable
            .attach(
                Aura::permanent("Small")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 0.1)),
            )
            .unwrap();
        let before = statable.armor();

        let id = statable
            .attach(
                Aura::permanent("Tuned")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 0.2)),
            )
            .unwrap();
        statable.set_effect_value(id, 0, 0.7);
        statable.set_effect_value(id, 0, 0.0);
        assert_eq!(statable.armor(), before);

        statable
            .attach(
                Aura::timed("Brief", 1.0)
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 0.2)),
            )
            .unwrap();
        statable.tick(2.0);
        assert_eq!(statable.armor(), before);
    }

    #[test]
    fn test_rating_example() {
        let mut statable = Statable::new(10, RatingCurve::default());
        statable.set_base(StatChannel::CritChance, 50.0);
        statable
            .attach(
                Aura::permanent("Keen Eye")
                    .with_effect(StatusEffect::rating(StatChannel::CritChance, 200.0)),
            )
            .unwrap();

        assert!((statable.value(StatChannel::CritChance) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_level_change_reconverts_rating() {
        let mut statable = Statable::new(10, RatingCurve::default());
        statable
            .attach(
                Aura::permanent("Keen Eye")
                    .with_effect(StatusEffect::rating(StatChannel::CritChance, 200.0)),
            )
            .unwrap();
        assert!((statable.value(StatChannel::CritChance) - 40.0).abs() < EPS);

        statable.set_level(20);
        assert!((statable.value(StatChannel::CritChance) - 20.0).abs() < EPS);
    }

    #[test]
    fn test_untouched_and_unrecognized_channels_read_base() {
        let mut statable = armored(100.0);
        assert!((statable.value(StatChannel::MovementSpeed)).abs() < EPS);

        let unknown = StatChannel::Unrecognized { family: 400, key: 2 };
        statable
            .attach(
                Aura::permanent("From The Future")
                    .with_effect(StatusEffect::fixed(unknown, 99.0)),
            )
            .unwrap();
        assert!(statable.value(unknown).abs() < EPS);
        assert!((statable.armor() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_attach_active_aura_is_rejected() {
        let mut statable = armored(100.0);
        let mut aura = Aura::permanent("Plate")
            .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0));
        let mut scratch = StatAggregate::new();
        aura.attach(&mut scratch);

        let rejected = statable.attach(aura).unwrap_err();
        assert!(rejected.is_active());
        assert_eq!(statable.aura_count(), 0);
        assert!((statable.armor() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_double_detach_is_noop() {
        let mut statable = armored(100.0);
        let id = statable
            .attach(
                Aura::permanent("Plate")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0)),
            )
            .unwrap();

        let aura = statable.detach(id, DetachReason::Removed).unwrap();
        assert!(!aura.is_active());
        assert!(statable.detach(id, DetachReason::Removed).is_none());
        assert!((statable.armor() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_timed_aura_expires_exactly_once() {
        let mut statable = armored(100.0);
        let id = statable
            .attach(
                Aura::timed("Iron Skin", 3.0)
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0)),
            )
            .unwrap();

        assert!(statable.tick(1.0).is_empty());
        assert!(statable.tick(1.0).is_empty());
        assert!((statable.armor() - 150.0).abs() < EPS);

        let expired = statable.tick(1.5);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, id);
        assert_eq!(expired[0].reason, DetachReason::Expired);
        assert!(!expired[0].aura.is_active());
        assert!((statable.armor() - 100.0).abs() < EPS);
        assert!(statable.aggregate().is_empty());

        assert!(statable.tick(5.0).is_empty());
        assert!(!statable.contains(id));
        assert!((statable.armor() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_tick_keeps_unexpired_order() {
        let mut statable = armored(0.0);
        statable.attach(Aura::timed("Short", 1.0)).unwrap();
        statable.attach(Aura::permanent("Middle")).unwrap();
        statable.attach(Aura::timed("Long", 10.0)).unwrap();

        statable.tick(2.0);
        let names: Vec<&str> = statable.auras().map(|(_, a)| a.name.as_str()).collect();
        assert_eq!(names, vec!["Middle", "Long"]);
    }

    #[test]
    fn test_set_effect_value_updates_aggregate() {
        let mut statable = armored(100.0);
        let id = statable
            .attach(
                Aura::permanent("Plate")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 50.0)),
            )
            .unwrap();

        assert!(statable.set_effect_value(id, 0, 10.0));
        assert!((statable.armor() - 110.0).abs() < EPS);
        assert!(!statable.set_effect_value(id, 3, 10.0));

        let aura = statable.detach(id, DetachReason::Removed).unwrap();
        assert!((aura.effects[0].value - 10.0).abs() < EPS);
        assert!((statable.armor() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_detach_named_and_find() {
        let mut statable = armored(0.0);
        statable.attach(Aura::permanent("Blessing")).unwrap();
        statable.attach(Aura::permanent("Curse")).unwrap();
        statable.attach(Aura::permanent("Blessing")).unwrap();

        assert!(statable.find_named("Curse").is_some());
        let removed = statable.detach_named("Blessing", DetachReason::Removed);
        assert_eq!(removed.len(), 2);
        assert_eq!(statable.aura_count(), 1);
    }

    #[test]
    fn test_visible_auras() {
        let mut statable = armored(0.0);
        statable.attach(Aura::permanent("Shown")).unwrap();
        statable.attach(Aura::permanent("Passive").hidden()).unwrap();

        let shown: Vec<&str> = statable.visible_auras().map(|(_, a)| a.name.as_str()).collect();
        assert_eq!(shown, vec!["Shown"]);
    }

    #[test]
    fn test_aura_ids_are_not_reused() {
        let mut statable = armored(0.0);
        let first = statable.attach(Aura::permanent("A")).unwrap();
        statable.detach(first, DetachReason::Removed);
        let second = statable.attach(Aura::permanent("A")).unwrap();
        assert_ne!(first, second);
        assert!(!statable.contains(first));
    }

    #[test]
    fn test_damage_multipliers() {
        let mut statable = armored(0.0);
        statable
            .attach(
                Aura::permanent("Pyromancer")
                    .with_effect(StatusEffect::fixed(StatChannel::DamageDone, 10.0))
                    .with_effect(StatusEffect::fixed(
                        StatChannel::DamageDoneWithSchool(ElementalSchool::Fire),
                        15.0,
                    ))
                    .with_effect(StatusEffect::fixed(
                        StatChannel::DamageDoneWithSource(DamageSource::Spell),
                        5.0,
                    ))
                    .with_effect(StatusEffect::fixed(
                        StatChannel::DamageTakenFromSchool(ElementalSchool::Water),
                        -300.0,
                    )),
            )
            .unwrap();

        let fire_spell =
            statable.damage_done_multiplier(Some(ElementalSchool::Fire), DamageSource::Spell);
        assert!((fire_spell - 1.30).abs() < EPS);
        let melee = statable.damage_done_multiplier(None, DamageSource::Melee);
        assert!((melee - 1.10).abs() < EPS);
        // Floored at zero
        let water_taken =
            statable.damage_taken_multiplier(Some(ElementalSchool::Water), DamageSource::Spell);
        assert!(water_taken.abs() < EPS);
    }

    #[test]
    fn test_resistance() {
        let mut statable = armored(0.0);
        statable.set_base(StatChannel::SpellResistance(ElementalSchool::Shadow), 10.0);
        statable
            .attach(Aura::permanent("Ward").with_effect(StatusEffect::fixed(
                StatChannel::SpellResistance(ElementalSchool::Shadow),
                15.0,
            )))
            .unwrap();
        assert!((statable.resistance(ElementalSchool::Shadow) - 25.0).abs() < EPS);
        assert!(statable.resistance(ElementalSchool::Light).abs() < EPS);
    }

    fn frenzy() -> Aura {
        Aura::timed("Frenzy", 5.0)
            .with_effect(StatusEffect::percental(StatChannel::AttackSpeed, 25.0))
    }

    #[test]
    fn test_certain_proc_attaches_then_refreshes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut statable = armored(0.0);
        statable.set_base(StatChannel::AttackSpeed, 100.0);
        statable
            .attach(Aura::permanent("Berserker").with_proc(crate::aura::ProcSpec::new(
                ProcTrigger::OnHit,
                100.0,
                frenzy(),
            )))
            .unwrap();

        let first = statable.trigger(ProcTrigger::OnHit, &mut rng);
        assert_eq!(first.len(), 1);
        assert!((statable.value(StatChannel::AttackSpeed) - 125.0).abs() < EPS);

        statable.tick(3.0);
        let second = statable.trigger(ProcTrigger::OnHit, &mut rng);
        assert_eq!(second, first);
        assert_eq!(statable.aura(first[0]).unwrap().remaining(), Some(5.0));
        assert!((statable.value(StatChannel::AttackSpeed) - 125.0).abs() < EPS);
    }

    #[test]
    fn test_proc_does_not_refresh_unrelated_namesake() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut statable = armored(0.0);
        statable.set_base(StatChannel::AttackSpeed, 100.0);
        let namesake = statable
            .attach(
                Aura::permanent("Frenzy")
                    .with_effect(StatusEffect::fixed(StatChannel::Armor, 5.0)),
            )
            .unwrap();
        statable
            .attach(Aura::permanent("Berserker").with_proc(crate::aura::ProcSpec::new(
                ProcTrigger::OnHit,
                100.0,
                frenzy(),
            )))
            .unwrap();

        let touched = statable.trigger(ProcTrigger::OnHit, &mut rng);
        assert_eq!(touched.len(), 1);
        assert_ne!(touched[0], namesake);
        assert_eq!(statable.aura_count(), 3);
        assert!((statable.value(StatChannel::AttackSpeed) - 125.0).abs() < EPS);
    }

    #[test]
    fn test_proc_ignores_other_events() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut statable = armored(0.0);
        statable
            .attach(Aura::permanent("Berserker").with_proc(crate::aura::ProcSpec::new(
                ProcTrigger::OnHit,
                100.0,
                frenzy(),
            )))
            .unwrap();

        assert!(statable.trigger(ProcTrigger::OnBeingHit, &mut rng).is_empty());
        assert_eq!(statable.aura_count(), 1);
    }

    #[test]
    fn test_proc_stops_after_source_detached() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut statable = armored(0.0);
        let source = statable
            .attach(Aura::permanent("Berserker").with_proc(crate::aura::ProcSpec::new(
                ProcTrigger::OnHit,
                100.0,
                frenzy(),
            )))
            .unwrap();
        statable.detach(source, DetachReason::Unequipped);

        assert!(statable.trigger(ProcTrigger::OnHit, &mut rng).is_empty());
    }

    fn channel_strategy() -> impl Strategy<Value = StatChannel> {
        prop_oneof![
            Just(StatChannel::Armor),
            Just(StatChannel::Life),
            Just(StatChannel::CritChance),
            Just(StatChannel::DamageDoneWithSchool(ElementalSchool::Fire)),
        ]
    }

    fn effect_strategy() -> impl Strategy<Value = StatusEffect> {
        (channel_strategy(), 0..3i32, -50.0..200.0f64).prop_map(|(channel, manip, value)| {
            let manip = crate::types::StatusManipType::from_code(manip).unwrap_or_default();
            StatusEffect::new(channel, manip, value)
        })
    }

    fn aura_strategy() -> impl Strategy<Value = Aura> {
        proptest::collection::vec(effect_strategy(), 0..5)
            .prop_map(|effects| Aura::permanent("Generated").with_effects(effects))
    }

    fn seeded() -> Statable {
        let mut statable = Statable::new(12, RatingCurve::default());
        statable.set_base(StatChannel::Armor, 100.0);
        statable.set_base(StatChannel::Life, 250.0);
        statable.set_base(StatChannel::CritChance, 5.0);
        statable
    }

    fn snapshot(statable: &Statable) -> Vec<f64> {
        [
            StatChannel::Armor,
            StatChannel::Life,
            StatChannel::CritChance,
            StatChannel::DamageDoneWithSchool(ElementalSchool::Fire),
        ]
        .iter()
        .map(|c| statable.value(*c))
        .collect()
    }

    // Float addition is not associative, so different attach orders may
    // differ in the last bits
    fn close(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() <= 1e-6 * (1.0 + x.abs().max(y.abs())))
    }

    proptest! {
        #[test]
        fn prop_attach_order_does_not_matter(
            auras in proptest::collection::vec(aura_strategy(), 1..6),
        ) {
            let mut forward = seeded();
            for aura in auras.iter().cloned() {
                forward.attach(aura).unwrap();
            }
            let mut backward = seeded();
            for aura in auras.iter().rev().cloned() {
                backward.attach(aura).unwrap();
            }
            prop_assert!(close(&snapshot(&forward), &snapshot(&backward)));
        }

        #[test]
        fn prop_attach_then_detach_restores(
            existing in proptest::collection::vec(aura_strategy(), 0..4),
            extra in aura_strategy(),
        ) {
            let mut statable = seeded();
            for aura in existing {
                statable.attach(aura).unwrap();
            }
            let before = snapshot(&statable);

            let id = statable.attach(extra).unwrap();
            statable.detach(id, DetachReason::Removed).unwrap();

            prop_assert_eq!(before, snapshot(&statable));
        }

        #[test]
        fn prop_value_matches_formula(auras in proptest::collection::vec(aura_strategy(), 0..6)) {
            let mut statable = seeded();
            let mut fixed = 0.0;
            let mut percental = 0.0;
            let mut rating = 0.0;
            for aura in &auras {
                for effect in aura.effects.iter().filter(|e| e.channel == StatChannel::Armor) {
                    match effect.manip {
                        crate::types::StatusManipType::Fixed => fixed += effect.value,
                        crate::types::StatusManipType::Percental => percental += effect.value,
                        crate::types::StatusManipType::Rating => rating += effect.value,
                    }
                }
            }
            for aura in auras {
                statable.attach(aura).unwrap();
            }

            let curve = RatingCurve::default();
            let expected =
                (100.0 + fixed + curve.rating_to_fixed(12, rating)) * (1.0 + percental / 100.0);
            prop_assert!(close(&[statable.armor()], &[expected]));
        }
    }
}
