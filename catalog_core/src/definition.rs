use crate::config::{AuraFileConfig, EffectConfig, KindConfig, ProcConfig};
use crate::kinds::EffectKind;
use crate::registry::AuraCatalog;
use crate::BuildError;
use status_core::{Aura, AuraKind, ProcSpec, ProcTrigger, StatusEffect};

/// Proc nesting deeper than this is treated as a reference cycle
const MAX_DEPTH: u32 = 10;

/// A validated aura definition from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct AuraDefinition {
    pub id: String,
    pub name: String,
    pub symbol: Option<String>,
    pub visible: bool,
    pub kind: AuraKind,
    pub effects: Vec<StatusEffect>,
    pub procs: Vec<ProcRef>,
}

/// A proc that names the catalog aura it attaches
#[derive(Debug, Clone, PartialEq)]
pub struct ProcRef {
    pub trigger: ProcTrigger,
    pub chance: f64,
    pub aura_id: String,
}

impl AuraDefinition {
    /// Parse an aura definition from config
    pub fn from_config(config: AuraFileConfig) -> Result<Self, BuildError> {
        let aura = config.aura;
        if aura.id.is_empty() {
            return Err(BuildError::InvalidAura("aura id must not be empty".to_string()));
        }

        let kind = match (aura.kind, aura.duration) {
            (KindConfig::Timed, Some(duration)) if duration > 0.0 && duration.is_finite() => {
                AuraKind::Timed { duration }
            }
            (KindConfig::Timed, Some(duration)) => {
                return Err(BuildError::InvalidAura(format!(
                    "{}: duration must be positive (got {duration})",
                    aura.id
                )))
            }
            (KindConfig::Timed, None) => {
                return Err(BuildError::InvalidAura(format!(
                    "{}: timed aura needs a duration",
                    aura.id
                )))
            }
            (_, Some(_)) => {
                return Err(BuildError::InvalidAura(format!(
                    "{}: only timed auras take a duration",
                    aura.id
                )))
            }
            (KindConfig::Permanent, None) => AuraKind::Permanent,
            (KindConfig::Triggered, None) => AuraKind::Triggered,
        };

        let effects = config
            .effects
            .into_iter()
            .map(effect_from_config)
            .collect::<Result<Vec<_>, _>>()?;

        let procs = config
            .procs
            .into_iter()
            .map(proc_from_config)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AuraDefinition {
            id: aura.id,
            name: aura.name,
            symbol: aura.symbol.filter(|symbol| !symbol.is_empty()),
            visible: aura.visible,
            kind,
            effects,
            procs,
        })
    }

    /// Build a fresh, inactive aura, resolving proc references through `catalog`
    pub(crate) fn build(&self, catalog: &AuraCatalog, depth: u32) -> Result<Aura, BuildError> {
        if depth > MAX_DEPTH {
            return Err(BuildError::CycleDetected(self.id.clone()));
        }

        let mut aura = Aura::new(self.name.clone(), self.kind)
            .with_effects(self.effects.iter().copied());
        aura.symbol = self.symbol.clone();
        aura.is_visible = self.visible;

        for proc_ref in &self.procs {
            let target = catalog
                .get(&proc_ref.aura_id)
                .ok_or_else(|| BuildError::UnknownAura(proc_ref.aura_id.clone()))?;
            let proc_aura = target.build(catalog, depth + 1)?;
            aura.procs
                .push(ProcSpec::new(proc_ref.trigger, proc_ref.chance, proc_aura));
        }

        Ok(aura)
    }
}

fn effect_from_config(config: EffectConfig) -> Result<StatusEffect, BuildError> {
    EffectKind::new(config.channel, config.manip).create(config.value, config.school, config.source)
}

fn proc_from_config(config: ProcConfig) -> Result<ProcRef, BuildError> {
    if !(0.0..=100.0).contains(&config.chance) {
        return Err(BuildError::InvalidAura(format!(
            "proc chance must be within 0..=100 (got {})",
            config.chance
        )));
    }
    Ok(ProcRef {
        trigger: config.trigger,
        chance: config.chance,
        aura_id: config.aura,
    })
}
