use crate::kinds::ChannelFamily;
use serde::Deserialize;
use status_core::{DamageSource, ElementalSchool, ProcTrigger, StatusManipType};

/// TOML configuration for an aura file
#[derive(Debug, Deserialize)]
pub struct AuraFileConfig {
    pub aura: AuraConfig,
    #[serde(default)]
    pub effects: Vec<EffectConfig>,
    #[serde(default)]
    pub procs: Vec<ProcConfig>,
}

/// Configuration for the aura itself
#[derive(Debug, Deserialize)]
pub struct AuraConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub kind: KindConfig,
    // Timed only
    #[serde(default)]
    pub duration: Option<f64>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindConfig {
    Permanent,
    Timed,
    Triggered,
}

/// Configuration for a single effect
#[derive(Debug, Deserialize)]
pub struct EffectConfig {
    pub channel: ChannelFamily,
    #[serde(default)]
    pub school: Option<ElementalSchool>,
    #[serde(default)]
    pub source: Option<DamageSource>,
    #[serde(default)]
    pub manip: StatusManipType,
    pub value: f64,
}

/// Proc that attaches another catalog aura
#[derive(Debug, Deserialize)]
pub struct ProcConfig {
    pub trigger: ProcTrigger,
    pub chance: f64,
    pub aura: String,
}
