use super::{coerce_override, name_mismatch, FieldHandler};
use crate::codec::Bindings;
use crate::encoding::reader::Frame;
use crate::encoding::writer::FrameWriter;
use crate::random::{RandomContext, RandomProvider};
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::CodecError;

/// Integers, fixed-point decimals and IEEE-754 floats, through the field's converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericHandler;

impl FieldHandler for NumericHandler {
    fn handles(&self, role: &FieldRole) -> bool {
        matches!(
            role,
            FieldRole::RawInteger | FieldRole::SignedInteger | FieldRole::Float32
        )
    }

    fn decode(
        &self,
        field: &FieldDescriptor,
        frame: &Frame<'_>,
        _bindings: &Bindings,
    ) -> Result<FieldValue, CodecError> {
        let bytes = frame.field_bytes(field)?;
        let value = field
            .converter
            .strategy()
            .decode(bytes, field.scale, field.offset)?;
        Ok(value)
    }

    fn encode(
        &self,
        field: &FieldDescriptor,
        value: &FieldValue,
        out: &mut FrameWriter<'_>,
        _bindings: &Bindings,
    ) -> Result<(), CodecError> {
        let bytes = field
            .converter
            .strategy()
            .encode(value, field.width(), field.scale, field.offset)
            .map_err(|err| name_mismatch(field, err))?;
        out.write_field(field, &bytes)?;
        Ok(())
    }

    fn randomize(
        &self,
        field: &FieldDescriptor,
        provider: Option<&dyn RandomProvider>,
        ctx: &mut RandomContext<'_>,
    ) -> Result<FieldValue, CodecError> {
        if let Some(provider) = provider {
            let sampled = provider.sample(ctx.rng());
            return coerce_override(self, field, sampled, ctx.bindings());
        }

        let mut bytes = vec![0u8; field.width()];
        loop {
            ctx.rng().fill_bytes(&mut bytes);
            let value = field
                .converter
                .strategy()
                .decode(&bytes, field.scale, field.offset)?;
            match value {
                FieldValue::Float(v) if !v.is_finite() => continue,
                other => return Ok(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::random::RangeProvider;
    use crate::{EncodeError, SchemaError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn decode(field: &FieldDescriptor, payload: &[u8]) -> Result<FieldValue, CodecError> {
        NumericHandler.decode(field, &Frame::new(payload, &[]), &Bindings::default())
    }

    #[test]
    fn decodes_through_converter() {
        let field = FieldDescriptor::divide("temperature", 1, 2, 1);
        assert_eq!(
            decode(&field, &[0x00, 0x00, 0xCD]).unwrap(),
            FieldValue::Decimal(Decimal::new(205, 1))
        );
    }

    #[test]
    fn short_float_is_a_decode_error() {
        let field = FieldDescriptor::float32("level", 0, 1);
        assert!(matches!(
            decode(&field, &[0x41, 0x20]).unwrap_err(),
            CodecError::Decode(crate::DecodeError::InvalidWidth { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn encode_names_the_field_on_mismatch() {
        let field = FieldDescriptor::raw("kind", 0, 0);
        let mut buf = [0u8; 1];
        let err = NumericHandler
            .encode(
                &field,
                &FieldValue::Text("x".into()),
                &mut FrameWriter::new(&mut buf),
                &Bindings::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::Encode(EncodeError::TypeMismatch {
                field: "kind".into(),
                found: "text"
            })
        );
    }

    #[test]
    fn random_values_respect_width_and_scale() {
        let bindings = Bindings::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = RandomContext::new(&mut rng, &bindings, None);
        let field = FieldDescriptor::divide("humidity", 0, 1, 1);
        for _ in 0..64 {
            let d = match NumericHandler.randomize(&field, None, &mut ctx).unwrap() {
                FieldValue::Decimal(d) => d,
                other => panic!("expected decimal, got {other:?}"),
            };
            assert_eq!(d.scale(), 1);
            assert!(d <= Decimal::new(65535, 1));
            assert!(!d.is_negative());
        }
    }

    #[test]
    fn random_floats_are_finite() {
        let bindings = Bindings::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = RandomContext::new(&mut rng, &bindings, None);
        let field = FieldDescriptor::float32("o2", 0, 3);
        for _ in 0..256 {
            match NumericHandler.randomize(&field, None, &mut ctx).unwrap() {
                FieldValue::Float(v) => assert!(v.is_finite()),
                other => panic!("expected float, got {other:?}"),
            }
        }
    }

    #[test]
    fn override_is_rounded_to_scale() {
        let bindings = Bindings::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut ctx = RandomContext::new(&mut rng, &bindings, None);
        let field = FieldDescriptor::divide("temperature", 0, 1, 1);
        let provider = RangeProvider::new("20.55".parse().unwrap(), "20.55".parse().unwrap()).unwrap();
        let value = NumericHandler
            .randomize(&field, Some(&provider), &mut ctx)
            .unwrap();
        assert_eq!(value, FieldValue::Decimal(Decimal::new(206, 1)));
    }

    #[test]
    fn override_out_of_range_is_rejected() {
        let bindings = Bindings::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut ctx = RandomContext::new(&mut rng, &bindings, None);
        let field = FieldDescriptor::raw("kind", 0, 0);
        let provider = RangeProvider::new(Decimal::from_int(300), Decimal::from_int(300)).unwrap();
        let err = NumericHandler
            .randomize(&field, Some(&provider), &mut ctx)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Schema(SchemaError::InvalidOverride { .. })
        ));
    }
}
