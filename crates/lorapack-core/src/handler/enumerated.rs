use rand::Rng;

use super::{coerce_override, type_mismatch, FieldHandler};
use crate::codec::Bindings;
use crate::encoding::bits::{be_bytes, be_unsigned, extract_bits, insert_bits, max_for_bits};
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{EnumSpace, FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::{CodecError, EncodeError};

/// Codes looked up in the field's bound [`EnumSpace`].
///
/// Codes the space does not declare decode to its unknown member. Codes too wide
/// for the field are clamped to the largest representable value on encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumHandler;

fn bit_width(field: &FieldDescriptor) -> usize {
    match field.bit_range {
        Some(range) => range.len(),
        None => field.width() * 8,
    }
}

/// Code to write for the unknown member: its own code when that decodes back to
/// it, otherwise the lowest code no regular member claims.
fn unknown_code(space: &EnumSpace, max: u64) -> Option<u64> {
    let own = space.unknown.bit_value;
    if own >= 0 && (own as u64) <= max && space.lookup(own).is_none() {
        return Some(own as u64);
    }
    (0..=max).find(|code| i64::try_from(*code).map_or(true, |c| space.lookup(c).is_none()))
}

fn clamp(field: &FieldDescriptor, space: &EnumSpace, code: i64, max: u64) -> u64 {
    match u64::try_from(code) {
        Ok(code) if code <= max => code,
        _ => {
            log::warn!(
                "enum '{}' code {} does not fit field '{}' ({} bits), writing {}",
                space.name,
                code,
                field.name,
                bit_width(field),
                max
            );
            max
        }
    }
}

impl EnumHandler {
    fn code_for(
        &self,
        field: &FieldDescriptor,
        space: &EnumSpace,
        value: &FieldValue,
    ) -> Result<u64, CodecError> {
        let max = max_for_bits(bit_width(field));
        let member = match value {
            FieldValue::Enum(member) => space.by_name(&member.name).unwrap_or(member),
            FieldValue::Text(name) => {
                space
                    .by_name(name)
                    .ok_or_else(|| EncodeError::UnknownMember {
                        space: space.name.clone(),
                        name: name.clone(),
                    })?
            }
            other => {
                let code = other
                    .as_decimal()
                    .and_then(|d| d.to_integer())
                    .and_then(|c| i64::try_from(c).ok())
                    .ok_or_else(|| type_mismatch(field, other))?;
                return Ok(clamp(field, space, code, max));
            }
        };

        if space.is_unknown(member) {
            if let Some(code) = unknown_code(space, max) {
                return Ok(code);
            }
        }
        Ok(clamp(field, space, member.bit_value, max))
    }
}

impl FieldHandler for EnumHandler {
    fn handles(&self, role: &FieldRole) -> bool {
        matches!(role, FieldRole::Enum { .. })
    }

    fn decode(
        &self,
        field: &FieldDescriptor,
        frame: &Frame<'_>,
        bindings: &Bindings,
    ) -> Result<FieldValue, CodecError> {
        let space = bindings.enum_space(field)?;
        let bytes = frame.field_bytes(field)?;
        let code = match field.bit_range {
            Some(range) => extract_bits(bytes, range.start, range.len())?,
            None => be_unsigned(bytes)?,
        };

        let member = match i64::try_from(code).ok().and_then(|c| space.lookup(c)) {
            Some(member) => member,
            None => {
                if i64::try_from(code).ok() != Some(space.unknown.bit_value) {
                    log::warn!(
                        "field '{}': code {} is not in enum '{}', decoding as {}",
                        field.name,
                        code,
                        space.name,
                        space.unknown.name
                    );
                }
                &space.unknown
            }
        };
        Ok(FieldValue::Enum(member.clone()))
    }

    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        out: &mut FrameWriter<'_>,
        bindings: &Bindings,
    ) -> Result<(), CodecError> {
        let space = bindings.enum_space(field)?;
        let code = self.code_for(field, space, value)?;
        match field.bit_range {
            Some(range) => {
                let bytes = out.field_bytes_mut(field)?;
                insert_bits(bytes, range.start, range.len(), code)?;
            }
            None => out.write_field(field, &be_bytes(code, field.width())?)?,
        }
        Ok(())
    }

    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError> {
        let bindings = ctx.bindings();
        if let Some(provider) = provider {
            let sampled = provider.sample(ctx.rng());
            return coerce_override(self, field, sampled, bindings);
        }

        let space = bindings.enum_space(field)?;
        let max = max_for_bits(bit_width(field));
        // Unknown is only drawn when some code decodes back to it.
        let unknown = unknown_code(space, max).map(|_| &space.unknown);
        let candidates: Vec<_> = space
            .members
            .iter()
            .filter(|m| u64::try_from(m.bit_value).map_or(false, |c| c <= max))
            .chain(unknown)
            .collect();
        let pick = ctx.rng().gen_range(0..candidates.len());
        Ok(FieldValue::Enum(candidates[pick].clone()))
    }
}
