//! AuraGrant - a source (item, skill, talent) that puts an aura on a Statable

use super::Aura;
use crate::statable::{AuraId, Statable};
use crate::types::DetachReason;

/// Keeps the template of the aura a source grants and the id of the copy it
/// attached, if any
///
/// The Statable owns the attached copy. The grant only remembers the id, and
/// checks it against the target before acting, so an aura that expired or was
/// cleared on death is never touched through a stale handle.
#[derive(Debug, Clone, PartialEq)]
pub struct AuraGrant {
    template: Aura,
    attached: Option<AuraId>,
}

impl AuraGrant {
    pub fn new(template: Aura) -> Self {
        AuraGrant {
            template,
            attached: None,
        }
    }

    pub fn template(&self) -> &Aura {
        &self.template
    }

    /// Id of the copy this grant last attached
    pub fn attached_id(&self) -> Option<AuraId> {
        self.attached
    }

    /// Attach a copy of the template to `target`
    ///
    /// Returns the existing id if the copy is still on the target. `None` if
    /// the template itself is in the Active state and cannot be attached.
    pub fn attach(&mut self, target: &mut Statable) -> Option<AuraId> {
        if let Some(id) = self.attached.filter(|id| target.contains(*id)) {
            return Some(id);
        }
        let id = target.attach(self.template.clone()).ok()?;
        self.attached = Some(id);
        Some(id)
    }

    /// Detach the granted copy; false if it is no longer on the target
    pub fn detach(&mut self, target: &mut Statable, reason: DetachReason) -> bool {
        let Some(id) = self.attached.take() else {
            return false;
        };
        target.detach(id, reason).is_some()
    }

    pub fn is_attached(&self, target: &Statable) -> bool {
        self.attached.is_some_and(|id| target.contains(id))
    }

    /// Change one effect value on the template and on the attached copy
    ///
    /// Returns false if `index` is out of range.
    pub fn set_effect_value(&mut self, target: &mut Statable, index: usize, value: f64) -> bool {
        let Some(effect) = self.template.effects.get_mut(index) else {
            return false;
        };
        effect.value = value;
        if let Some(id) = self.attached {
            target.set_effect_value(id, index, value);
        }
        true
    }
}
