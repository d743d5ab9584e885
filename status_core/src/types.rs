//! Core enumerations: manipulation types, schools, damage sources and stat channels

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a status effect's value combines into a stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusManipType {
    /// Added to the base before the percental multiplier
    #[default]
    Fixed,
    /// Whole percentage points, summed into the multiplier (15.0 = +15%)
    Percental,
    /// Level-scaled rating, converted to a fixed amount before summation
    Rating,
}

impl StatusManipType {
    pub fn all() -> &'static [StatusManipType] {
        &[
            StatusManipType::Fixed,
            StatusManipType::Percental,
            StatusManipType::Rating,
        ]
    }

    /// Stable wire code
    pub fn code(&self) -> i32 {
        match self {
            StatusManipType::Fixed => 0,
            StatusManipType::Percental => 1,
            StatusManipType::Rating => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(StatusManipType::Fixed),
            1 => Some(StatusManipType::Percental),
            2 => Some(StatusManipType::Rating),
            _ => None,
        }
    }
}

impl fmt::Display for StatusManipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusManipType::Fixed => write!(f, "Fixed"),
            StatusManipType::Percental => write!(f, "Percental"),
            StatusManipType::Rating => write!(f, "Rating"),
        }
    }
}

/// Magic schools that damage and resistances are keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalSchool {
    Fire,
    Water,
    Nature,
    Light,
    Shadow,
}

impl ElementalSchool {
    pub fn all() -> &'static [ElementalSchool] {
        &[
            ElementalSchool::Fire,
            ElementalSchool::Water,
            ElementalSchool::Nature,
            ElementalSchool::Light,
            ElementalSchool::Shadow,
        ]
    }

    pub fn code(&self) -> i32 {
        match self {
            ElementalSchool::Fire => 1,
            ElementalSchool::Water => 2,
            ElementalSchool::Nature => 3,
            ElementalSchool::Light => 4,
            ElementalSchool::Shadow => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ElementalSchool::Fire),
            2 => Some(ElementalSchool::Water),
            3 => Some(ElementalSchool::Nature),
            4 => Some(ElementalSchool::Light),
            5 => Some(ElementalSchool::Shadow),
            _ => None,
        }
    }
}

impl fmt::Display for ElementalSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementalSchool::Fire => write!(f, "Fire"),
            ElementalSchool::Water => write!(f, "Water"),
            ElementalSchool::Nature => write!(f, "Nature"),
            ElementalSchool::Light => write!(f, "Light"),
            ElementalSchool::Shadow => write!(f, "Shadow"),
        }
    }
}

/// Delivery of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSource {
    Melee,
    Ranged,
    Spell,
}

impl DamageSource {
    pub fn all() -> &'static [DamageSource] {
        &[DamageSource::Melee, DamageSource::Ranged, DamageSource::Spell]
    }

    pub fn code(&self) -> i32 {
        match self {
            DamageSource::Melee => 1,
            DamageSource::Ranged => 2,
            DamageSource::Spell => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(DamageSource::Melee),
            2 => Some(DamageSource::Ranged),
            3 => Some(DamageSource::Spell),
            _ => None,
        }
    }
}

impl fmt::Display for DamageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageSource::Melee => write!(f, "Melee"),
            DamageSource::Ranged => write!(f, "Ranged"),
            DamageSource::Spell => write!(f, "Spell"),
        }
    }
}

/// The stat slot a status effect targets
///
/// Keyed channels carry their school or source, so a malformed key cannot be
/// constructed. `Unrecognized` only comes out of decoding data written by a
/// newer build; it never contributes to any stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatChannel {
    // === Resources ===
    Life,
    Mana,
    LifeRegeneration,
    ManaRegeneration,
    LifeLeech,

    // === Attributes ===
    Strength,
    Dexterity,
    Agility,
    Vitality,
    Intelligence,
    Wisdom,

    // === Defense ===
    Armor,
    DodgeChance,
    ParryChance,
    BlockChance,
    BlockValue,
    SpellResistance(ElementalSchool),

    // === Offense ===
    AttackSpeed,
    CastSpeed,
    CritChance,
    CritModifier,
    SpellPenetration,
    DamageDone,
    DamageDoneWithSchool(ElementalSchool),
    DamageDoneWithSource(DamageSource),

    // === Incoming damage ===
    DamageTaken,
    DamageTakenFromSchool(ElementalSchool),
    DamageTakenFromSource(DamageSource),

    // === Utility ===
    MovementSpeed,
    ExperienceGained,

    Unrecognized { family: i32, key: i32 },
}

impl StatChannel {
    /// Every channel without a sub-key
    pub fn plain() -> &'static [StatChannel] {
        &[
            StatChannel::Life,
            StatChannel::Mana,
            StatChannel::LifeRegeneration,
            StatChannel::ManaRegeneration,
            StatChannel::LifeLeech,
            StatChannel::Strength,
            StatChannel::Dexterity,
            StatChannel::Agility,
            StatChannel::Vitality,
            StatChannel::Intelligence,
            StatChannel::Wisdom,
            StatChannel::Armor,
            StatChannel::DodgeChance,
            StatChannel::ParryChance,
            StatChannel::BlockChance,
            StatChannel::BlockValue,
            StatChannel::AttackSpeed,
            StatChannel::CastSpeed,
            StatChannel::CritChance,
            StatChannel::CritModifier,
            StatChannel::SpellPenetration,
            StatChannel::DamageDone,
            StatChannel::DamageTaken,
            StatChannel::MovementSpeed,
            StatChannel::ExperienceGained,
        ]
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, StatChannel::Unrecognized { .. })
    }

    /// Stable `(family, key)` wire code; key is 0 for plain channels
    pub fn code(&self) -> (i32, i32) {
        match *self {
            StatChannel::Life => (1, 0),
            StatChannel::Mana => (2, 0),
            StatChannel::Strength => (3, 0),
            StatChannel::Dexterity => (4, 0),
            StatChannel::Agility => (5, 0),
            StatChannel::Vitality => (6, 0),
            StatChannel::Intelligence => (7, 0),
            StatChannel::Wisdom => (8, 0),
            StatChannel::Armor => (9, 0),
            StatChannel::MovementSpeed => (10, 0),
            StatChannel::AttackSpeed => (11, 0),
            StatChannel::CastSpeed => (12, 0),
            StatChannel::CritChance => (13, 0),
            StatChannel::CritModifier => (14, 0),
            StatChannel::DodgeChance => (15, 0),
            StatChannel::ParryChance => (16, 0),
            StatChannel::BlockChance => (17, 0),
            StatChannel::BlockValue => (18, 0),
            StatChannel::LifeRegeneration => (19, 0),
            StatChannel::ManaRegeneration => (20, 0),
            StatChannel::LifeLeech => (21, 0),
            StatChannel::SpellPenetration => (22, 0),
            StatChannel::DamageDone => (23, 0),
            StatChannel::DamageDoneWithSchool(school) => (24, school.code()),
            StatChannel::DamageDoneWithSource(source) => (25, source.code()),
            StatChannel::DamageTaken => (26, 0),
            StatChannel::DamageTakenFromSchool(school) => (27, school.code()),
            StatChannel::DamageTakenFromSource(source) => (28, source.code()),
            StatChannel::SpellResistance(school) => (29, school.code()),
            StatChannel::ExperienceGained => (30, 0),
            StatChannel::Unrecognized { family, key } => (family, key),
        }
    }

    /// Decode a wire code; unknown families or keys become `Unrecognized`
    pub fn from_code(family: i32, key: i32) -> StatChannel {
        let unrecognized = StatChannel::Unrecognized { family, key };
        let plain = |channel: StatChannel| if key == 0 { channel } else { unrecognized };
        let school = |f: fn(ElementalSchool) -> StatChannel| {
            ElementalSchool::from_code(key).map(f).unwrap_or(unrecognized)
        };
        let source = |f: fn(DamageSource) -> StatChannel| {
            DamageSource::from_code(key).map(f).unwrap_or(unrecognized)
        };

        match family {
            1 => plain(StatChannel::Life),
            2 => plain(StatChannel::Mana),
            3 => plain(StatChannel::Strength),
            4 => plain(StatChannel::Dexterity),
            5 => plain(StatChannel::Agility),
            6 => plain(StatChannel::Vitality),
            7 => plain(StatChannel::Intelligence),
            8 => plain(StatChannel::Wisdom),
            9 => plain(StatChannel::Armor),
            10 => plain(StatChannel::MovementSpeed),
            11 => plain(StatChannel::AttackSpeed),
            12 => plain(StatChannel::CastSpeed),
            13 => plain(StatChannel::CritChance),
            14 => plain(StatChannel::CritModifier),
            15 => plain(StatChannel::DodgeChance),
            16 => plain(StatChannel::ParryChance),
            17 => plain(StatChannel::BlockChance),
            18 => plain(StatChannel::BlockValue),
            19 => plain(StatChannel::LifeRegeneration),
            20 => plain(StatChannel::ManaRegeneration),
            21 => plain(StatChannel::LifeLeech),
            22 => plain(StatChannel::SpellPenetration),
            23 => plain(StatChannel::DamageDone),
            24 => school(StatChannel::DamageDoneWithSchool),
            25 => source(StatChannel::DamageDoneWithSource),
            26 => plain(StatChannel::DamageTaken),
            27 => school(StatChannel::DamageTakenFromSchool),
            28 => source(StatChannel::DamageTakenFromSource),
            29 => school(StatChannel::SpellResistance),
            30 => plain(StatChannel::ExperienceGained),
            _ => unrecognized,
        }
    }
}

impl fmt::Display for StatChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatChannel::DamageDoneWithSchool(school) => {
                write!(f, "DamageDoneWithSchool[{school}]")
            }
            StatChannel::DamageDoneWithSource(source) => {
                write!(f, "DamageDoneWithSource[{source}]")
            }
            StatChannel::DamageTakenFromSchool(school) => {
                write!(f, "DamageTakenFromSchool[{school}]")
            }
            StatChannel::DamageTakenFromSource(source) => {
                write!(f, "DamageTakenFromSource[{source}]")
            }
            StatChannel::SpellResistance(school) => write!(f, "SpellResistance[{school}]"),
            StatChannel::Unrecognized { family, key } => write!(f, "Unrecognized({family}:{key})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Why an aura left its Statable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetachReason {
    /// Timed aura ran out
    Expired,
    /// Explicit removal by gameplay code
    Removed,
    OwnerDeath,
    /// Granting item was taken off
    Unequipped,
    /// A newer instance took its place
    Replaced,
}

/// Gameplay events that can fire procs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcTrigger {
    OnHit,
    OnCrit,
    OnBeingHit,
    OnKill,
    OnSpellCast,
}

impl ProcTrigger {
    pub fn all() -> &'static [ProcTrigger] {
        &[
            ProcTrigger::OnHit,
            ProcTrigger::OnCrit,
            ProcTrigger::OnBeingHit,
            ProcTrigger::OnKill,
            ProcTrigger::OnSpellCast,
        ]
    }

    pub fn code(&self) -> i32 {
        match self {
            ProcTrigger::OnHit => 0,
            ProcTrigger::OnCrit => 1,
            ProcTrigger::OnBeingHit => 2,
            ProcTrigger::OnKill => 3,
            ProcTrigger::OnSpellCast => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ProcTrigger::OnHit),
            1 => Some(ProcTrigger::OnCrit),
            2 => Some(ProcTrigger::OnBeingHit),
            3 => Some(ProcTrigger::OnKill),
            4 => Some(ProcTrigger::OnSpellCast),
            _ => None,
        }
    }
}
