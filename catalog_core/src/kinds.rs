//! Effect kind registry - every effect a design tool can create

use crate::BuildError;
use serde::{Deserialize, Serialize};
use status_core::{DamageSource, ElementalSchool, StatChannel, StatusEffect, StatusManipType};
use std::fmt;

/// What a channel family is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    None,
    School,
    Source,
}

/// A stat channel without its key
///
/// This is the name content files use for `channel`. Keyed families need a
/// `school` or `source` next to it to become a concrete `StatChannel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelFamily {
    Life,
    Mana,
    LifeRegeneration,
    ManaRegeneration,
    LifeLeech,
    Strength,
    Dexterity,
    Agility,
    Vitality,
    Intelligence,
    Wisdom,
    Armor,
    DodgeChance,
    ParryChance,
    BlockChance,
    BlockValue,
    SpellResistance,
    AttackSpeed,
    CastSpeed,
    CritChance,
    CritModifier,
    SpellPenetration,
    DamageDone,
    DamageDoneWithSchool,
    DamageDoneWithSource,
    DamageTaken,
    DamageTakenFromSchool,
    DamageTakenFromSource,
    MovementSpeed,
    ExperienceGained,
}

impl ChannelFamily {
    pub fn all() -> &'static [ChannelFamily] {
        &[
            ChannelFamily::Life,
            ChannelFamily::Mana,
            ChannelFamily::LifeRegeneration,
            ChannelFamily::ManaRegeneration,
            ChannelFamily::LifeLeech,
            ChannelFamily::Strength,
            ChannelFamily::Dexterity,
            ChannelFamily::Agility,
            ChannelFamily::Vitality,
            ChannelFamily::Intelligence,
            ChannelFamily::Wisdom,
            ChannelFamily::Armor,
            ChannelFamily::DodgeChance,
            ChannelFamily::ParryChance,
            ChannelFamily::BlockChance,
            ChannelFamily::BlockValue,
            ChannelFamily::SpellResistance,
            ChannelFamily::AttackSpeed,
            ChannelFamily::CastSpeed,
            ChannelFamily::CritChance,
            ChannelFamily::CritModifier,
            ChannelFamily::SpellPenetration,
            ChannelFamily::DamageDone,
            ChannelFamily::DamageDoneWithSchool,
            ChannelFamily::DamageDoneWithSource,
            ChannelFamily::DamageTaken,
            ChannelFamily::DamageTakenFromSchool,
            ChannelFamily::DamageTakenFromSource,
            ChannelFamily::MovementSpeed,
            ChannelFamily::ExperienceGained,
        ]
    }

    pub fn key_kind(&self) -> KeyKind {
        match self {
            ChannelFamily::SpellResistance
            | ChannelFamily::DamageDoneWithSchool
            | ChannelFamily::DamageTakenFromSchool => KeyKind::School,
            ChannelFamily::DamageDoneWithSource | ChannelFamily::DamageTakenFromSource => {
                KeyKind::Source
            }
            _ => KeyKind::None,
        }
    }

    /// Family of a concrete channel; `None` for unrecognized channels
    pub fn of(channel: StatChannel) -> Option<ChannelFamily> {
        let family = match channel {
            StatChannel::Life => ChannelFamily::Life,
            StatChannel::Mana => ChannelFamily::Mana,
            StatChannel::LifeRegeneration => ChannelFamily::LifeRegeneration,
            StatChannel::ManaRegeneration => ChannelFamily::ManaRegeneration,
            StatChannel::LifeLeech => ChannelFamily::LifeLeech,
            StatChannel::Strength => ChannelFamily::Strength,
            StatChannel::Dexterity => ChannelFamily::Dexterity,
            StatChannel::Agility => ChannelFamily::Agility,
            StatChannel::Vitality => ChannelFamily::Vitality,
            StatChannel::Intelligence => ChannelFamily::Intelligence,
            StatChannel::Wisdom => ChannelFamily::Wisdom,
            StatChannel::Armor => ChannelFamily::Armor,
            StatChannel::DodgeChance => ChannelFamily::DodgeChance,
            StatChannel::ParryChance => ChannelFamily::ParryChance,
            StatChannel::BlockChance => ChannelFamily::BlockChance,
            StatChannel::BlockValue => ChannelFamily::BlockValue,
            StatChannel::SpellResistance(_) => ChannelFamily::SpellResistance,
            StatChannel::AttackSpeed => ChannelFamily::AttackSpeed,
            StatChannel::CastSpeed => ChannelFamily::CastSpeed,
            StatChannel::CritChance => ChannelFamily::CritChance,
            StatChannel::CritModifier => ChannelFamily::CritModifier,
            StatChannel::SpellPenetration => ChannelFamily::SpellPenetration,
            StatChannel::DamageDone => ChannelFamily::DamageDone,
            StatChannel::DamageDoneWithSchool(_) => ChannelFamily::DamageDoneWithSchool,
            StatChannel::DamageDoneWithSource(_) => ChannelFamily::DamageDoneWithSource,
            StatChannel::DamageTaken => ChannelFamily::DamageTaken,
            StatChannel::DamageTakenFromSchool(_) => ChannelFamily::DamageTakenFromSchool,
            StatChannel::DamageTakenFromSource(_) => ChannelFamily::DamageTakenFromSource,
            StatChannel::MovementSpeed => ChannelFamily::MovementSpeed,
            StatChannel::ExperienceGained => ChannelFamily::ExperienceGained,
            StatChannel::Unrecognized { .. } => return None,
        };
        Some(family)
    }

    /// Combine with a key into a concrete channel
    ///
    /// The key must match `key_kind`: a school for school families, a source
    /// for source families, and neither for plain ones.
    pub fn resolve(
        &self,
        school: Option<ElementalSchool>,
        source: Option<DamageSource>,
    ) -> Result<StatChannel, BuildError> {
        let channel = match (self.key_kind(), school, source) {
            (KeyKind::None, None, None) => self.plain_channel(),
            (KeyKind::School, Some(school), None) => match self {
                ChannelFamily::SpellResistance => Some(StatChannel::SpellResistance(school)),
                ChannelFamily::DamageDoneWithSchool => {
                    Some(StatChannel::DamageDoneWithSchool(school))
                }
                ChannelFamily::DamageTakenFromSchool => {
                    Some(StatChannel::DamageTakenFromSchool(school))
                }
                _ => None,
            },
            (KeyKind::Source, None, Some(source)) => match self {
                ChannelFamily::DamageDoneWithSource => {
                    Some(StatChannel::DamageDoneWithSource(source))
                }
                ChannelFamily::DamageTakenFromSource => {
                    Some(StatChannel::DamageTakenFromSource(source))
                }
                _ => None,
            },
            _ => None,
        };

        channel.ok_or_else(|| {
            BuildError::InvalidEffect(format!(
                "{self} expects key {:?}, got school {school:?} and source {source:?}",
                self.key_kind()
            ))
        })
    }

    fn plain_channel(&self) -> Option<StatChannel> {
        StatChannel::plain()
            .iter()
            .copied()
            .find(|channel| ChannelFamily::of(*channel) == Some(*self))
    }
}

impl fmt::Display for ChannelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One creatable effect: a channel family paired with a manipulation type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectKind {
    /// Display name, e.g. "Armor (Percental)"
    pub name: String,
    pub family: ChannelFamily,
    pub manip: StatusManipType,
    pub key_kind: KeyKind,
}

impl EffectKind {
    pub fn new(family: ChannelFamily, manip: StatusManipType) -> Self {
        EffectKind {
            name: format!("{family} ({manip})"),
            family,
            manip,
            key_kind: family.key_kind(),
        }
    }

    /// Build the effect this kind describes
    pub fn create(
        &self,
        value: f64,
        school: Option<ElementalSchool>,
        source: Option<DamageSource>,
    ) -> Result<StatusEffect, BuildError> {
        if !value.is_finite() {
            return Err(BuildError::InvalidEffect(format!(
                "{} value must be finite (got {value})",
                self.name
            )));
        }
        let channel = self.family.resolve(school, source)?;
        Ok(StatusEffect::new(channel, self.manip, value))
    }
}

/// Every channel family crossed with every manipulation type
pub fn effect_kinds() -> Vec<EffectKind> {
    ChannelFamily::all()
        .iter()
        .flat_map(|family| {
            StatusManipType::all()
                .iter()
                .map(move |manip| EffectKind::new(*family, *manip))
        })
        .collect()
}

/// `effect_kinds` as pretty JSON for external editors
pub fn kinds_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&effect_kinds())
}
