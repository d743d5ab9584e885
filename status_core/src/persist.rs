//! Binary save layouts for auras and statables

use crate::aura::{Aura, AuraKind, ProcSpec};
use crate::config::RatingCurve;
use crate::effect::StatusEffect;
use crate::statable::Statable;
use crate::types::{ProcTrigger, StatChannel, StatusManipType};
use save_core::{Persist, SaveError, SaveReader, SaveResult, SaveWriter};
use std::io::{Read, Write};

const KIND_PERMANENT: i32 = 0;
const KIND_TIMED: i32 = 1;
const KIND_TRIGGERED: i32 = 2;

fn write_channel<W: Write>(writer: &mut SaveWriter<W>, channel: StatChannel) -> SaveResult<()> {
    let (family, key) = channel.code();
    writer.write_i32(family)?;
    writer.write_i32(key)
}

fn read_channel<R: Read>(reader: &mut SaveReader<R>) -> SaveResult<StatChannel> {
    let family = reader.read_i32()?;
    let key = reader.read_i32()?;
    Ok(StatChannel::from_code(family, key))
}

/// `[i32 family][i32 key][i32 manip][f64 value]`, inlined in the owner's layout
fn write_effect<W: Write>(writer: &mut SaveWriter<W>, effect: &StatusEffect) -> SaveResult<()> {
    write_channel(writer, effect.channel)?;
    writer.write_i32(effect.manip.code())?;
    writer.write_f64(effect.value)
}

fn read_effect<R: Read>(reader: &mut SaveReader<R>) -> SaveResult<StatusEffect> {
    let channel = read_channel(reader)?;
    let tag = reader.read_i32()?;
    let manip = StatusManipType::from_code(tag).ok_or(SaveError::UnknownTag {
        type_name: "StatusManipType",
        tag,
    })?;
    let value = reader.read_f64()?;
    Ok(StatusEffect::new(channel, manip, value))
}

fn write_kind<W: Write>(writer: &mut SaveWriter<W>, kind: AuraKind) -> SaveResult<()> {
    match kind {
        AuraKind::Permanent => writer.write_i32(KIND_PERMANENT),
        AuraKind::Timed { duration } => {
            writer.write_i32(KIND_TIMED)?;
            writer.write_f64(duration)
        }
        AuraKind::Triggered => writer.write_i32(KIND_TRIGGERED),
    }
}

fn read_kind<R: Read>(reader: &mut SaveReader<R>) -> SaveResult<AuraKind> {
    match reader.read_i32()? {
        KIND_PERMANENT => Ok(AuraKind::Permanent),
        KIND_TIMED => Ok(AuraKind::Timed {
            duration: reader.read_f64()?,
        }),
        KIND_TRIGGERED => Ok(AuraKind::Triggered),
        tag => Err(SaveError::UnknownTag {
            type_name: "AuraKind",
            tag,
        }),
    }
}

/// v1: name, symbol, visibility, kind, lifecycle, effects.
/// v2: appends procs.
impl Persist for Aura {
    const TYPE_NAME: &'static str = "Aura";
    const VERSION: i32 = 2;

    fn write_fields<W: Write>(&self, writer: &mut SaveWriter<W>) -> SaveResult<()> {
        writer.write_str(&self.name)?;
        writer.write_opt_str(self.symbol.as_deref())?;
        writer.write_bool(self.is_visible)?;
        write_kind(writer, self.kind)?;

        writer.write_bool(self.is_active())?;
        if let Some(remaining) = self.remaining() {
            writer.write_f64(remaining)?;
        }

        writer.write_len(self.effects.len())?;
        for effect in &self.effects {
            write_effect(writer, effect)?;
        }

        writer.write_len(self.procs.len())?;
        for spec in &self.procs {
            writer.write_i32(spec.trigger.code())?;
            writer.write_f64(spec.chance)?;
            writer.write(&spec.aura)?;
        }
        Ok(())
    }

    fn read_fields<R: Read>(reader: &mut SaveReader<R>, version: i32) -> SaveResult<Self> {
        let name = reader.read_string()?;
        let symbol = reader.read_opt_string()?;
        let is_visible = reader.read_bool()?;
        let kind = read_kind(reader)?;

        let mut aura = Aura::new(name, kind);
        aura.symbol = symbol;
        aura.is_visible = is_visible;

        let active = reader.read_bool()?;
        let remaining = if active && aura.is_timed() {
            reader.read_f64()?
        } else {
            0.0
        };

        let count = reader.read_len()?;
        for _ in 0..count {
            aura.effects.push(read_effect(reader)?);
        }

        if version >= 2 {
            let count = reader.read_len()?;
            for _ in 0..count {
                let tag = reader.read_i32()?;
                let trigger = ProcTrigger::from_code(tag).ok_or(SaveError::UnknownTag {
                    type_name: "ProcTrigger",
                    tag,
                })?;
                let chance = reader.read_f64()?;
                let proc_aura: Aura = reader.read()?;
                aura.procs.push(ProcSpec::new(trigger, chance, proc_aura));
            }
        }

        aura.restore_state(active, remaining);
        Ok(aura)
    }
}

/// v1: level, bases, pools, death flag, auras.
/// v2: adds the next aura id and stores each aura's id in front of it.
impl Persist for Statable {
    const TYPE_NAME: &'static str = "Statable";
    const VERSION: i32 = 2;

    fn write_fields<W: Write>(&self, writer: &mut SaveWriter<W>) -> SaveResult<()> {
        writer.write_u32(self.level())?;

        let mut bases: Vec<(StatChannel, f64)> = self.bases().collect();
        bases.sort_by_key(|(channel, _)| channel.code());
        writer.write_len(bases.len())?;
        for (channel, value) in bases {
            write_channel(writer, channel)?;
            writer.write_f64(value)?;
        }

        writer.write_f64(self.current_life())?;
        writer.write_f64(self.current_mana())?;
        writer.write_bool(self.is_dead())?;
        writer.write_u64(self.next_aura_id())?;

        writer.write_len(self.aura_count())?;
        for (id, aura) in self.auras() {
            writer.write_u64(id.raw())?;
            writer.write(aura)?;
        }
        Ok(())
    }

    fn read_fields<R: Read>(reader: &mut SaveReader<R>, version: i32) -> SaveResult<Self> {
        let level = reader.read_u32()?;
        let mut statable = Statable::new(level, RatingCurve::default());

        let count = reader.read_len()?;
        for _ in 0..count {
            let channel = read_channel(reader)?;
            let value = reader.read_f64()?;
            statable.set_base(channel, value);
        }

        let life = reader.read_f64()?;
        let mana = reader.read_f64()?;
        let dead = reader.read_bool()?;
        let next_aura_id = if version >= 2 { reader.read_u64()? } else { 1 };

        let count = reader.read_len()?;
        for _ in 0..count {
            if version >= 2 {
                let id = reader.read_u64()?;
                let aura: Aura = reader.read()?;
                statable
                    .restore_aura_with_id(id, aura)
                    .map_err(|_| SaveError::DuplicateId {
                        type_name: "AuraId",
                        id,
                    })?;
            } else {
                let aura: Aura = reader.read()?;
                statable.restore_aura(aura);
            }
        }
        statable.reserve_aura_ids(next_aura_id);

        statable.restore_resources(life, mana, dead);
        Ok(statable)
    }
}
