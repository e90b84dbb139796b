//! Random record generation for round-trip tests and fixture synthesis.
//!
//! Every field gets a value from its handler's randomizer unless the caller
//! supplies a [`RandomProvider`] for it in an [`Overrides`] set, either by field
//! name or for every field bound to an enum space or status type.

use std::collections::BTreeMap;
use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::codec::Bindings;
use crate::decimal::Decimal;
use crate::schema::{FieldDescriptor, FieldRole};
use crate::value::FieldValue;
use crate::SchemaError;

/// Source of override values for one field.
pub trait RandomProvider: Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> FieldValue;
}

/// Uniform choice from a fixed list.
#[derive(Debug, Clone)]
pub struct ListProvider {
    values: Vec<FieldValue>,
}

impl ListProvider {
    pub fn new(values: Vec<FieldValue>) -> Result<Self, SchemaError> {
        if values.is_empty() {
            return Err(SchemaError::InvalidProvider("value list is empty"));
        }
        Ok(Self { values })
    }
}

impl RandomProvider for ListProvider {
    fn sample(&self, rng: &mut dyn RngCore) -> FieldValue {
        self.values
            .choose(rng)
            .cloned()
            .unwrap_or(FieldValue::Integer(0))
    }
}

/// Uniform draw from `start..=end`, on multiples of `step` from `start` when a
/// step is set, otherwise on the grid of the finer bound's scale.
#[derive(Debug, Clone)]
pub struct RangeProvider {
    start: i128,
    end: i128,
    step: i128,
    scale: u32,
}

impl RangeProvider {
    pub fn new(start: Decimal, end: Decimal) -> Result<Self, SchemaError> {
        if start > end {
            return Err(SchemaError::InvalidProvider("range start is after its end"));
        }
        let scale = start.scale().max(end.scale());
        Self::on_grid(start, end, Decimal::new(1, scale))
    }

    pub fn with_step(self, step: Decimal) -> Result<Self, SchemaError> {
        if step <= Decimal::ZERO {
            return Err(SchemaError::InvalidProvider("range step must be positive"));
        }
        Self::on_grid(
            Decimal::new(self.start, self.scale),
            Decimal::new(self.end, self.scale),
            step,
        )
    }

    fn on_grid(start: Decimal, end: Decimal, step: Decimal) -> Result<Self, SchemaError> {
        let overflow = || SchemaError::InvalidProvider("range bounds overflow");
        let scale = start.scale().max(end.scale()).max(step.scale());
        Ok(Self {
            start: start.rescale(scale).ok_or_else(overflow)?.mantissa(),
            end: end.rescale(scale).ok_or_else(overflow)?.mantissa(),
            step: step.rescale(scale).ok_or_else(overflow)?.mantissa(),
            scale,
        })
    }

    pub fn start(&self) -> Decimal {
        Decimal::new(self.start, self.scale)
    }

    pub fn end(&self) -> Decimal {
        Decimal::new(self.end, self.scale)
    }
}

impl RandomProvider for RangeProvider {
    fn sample(&self, rng: &mut dyn RngCore) -> FieldValue {
        let steps = (self.end - self.start) / self.step;
        let k = rng.gen_range(0..=steps);
        FieldValue::Decimal(Decimal::new(self.start + k * self.step, self.scale))
    }
}

/// Provider backed by a closure, e.g. a whole random status byte.
pub struct FnProvider<F> {
    sample: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&mut dyn RngCore) -> FieldValue + Send + Sync,
{
    pub fn new(sample: F) -> Self {
        Self { sample }
    }
}

impl<F> RandomProvider for FnProvider<F>
where
    F: Fn(&mut dyn RngCore) -> FieldValue + Send + Sync,
{
    fn sample(&self, rng: &mut dyn RngCore) -> FieldValue {
        (self.sample)(rng)
    }
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnProvider")
    }
}

type ProviderMap = BTreeMap<String, Box<dyn RandomProvider>>;

/// Providers that take precedence over the default randomizers.
///
/// Lookup order for a field: its name, then its enum space or status type.
#[derive(Default)]
pub struct Overrides {
    providers: ProviderMap,
    enum_providers: ProviderMap,
    status_providers: ProviderMap,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, field: &str, provider: impl RandomProvider + 'static) -> Self {
        self.providers.insert(field.to_string(), Box::new(provider));
        self
    }

    pub fn list(self, field: &str, values: Vec<FieldValue>) -> Result<Self, SchemaError> {
        Ok(self.insert(field, ListProvider::new(values)?))
    }

    pub fn range(self, field: &str, start: Decimal, end: Decimal) -> Result<Self, SchemaError> {
        Ok(self.insert(field, RangeProvider::new(start, end)?))
    }

    /// Provider for every field bound to enum space `space`.
    pub fn for_enum(mut self, space: &str, provider: impl RandomProvider + 'static) -> Self {
        self.enum_providers
            .insert(space.to_string(), Box::new(provider));
        self
    }

    /// Provider for every field bound to status type `status`.
    pub fn for_status(mut self, status: &str, provider: impl RandomProvider + 'static) -> Self {
        self.status_providers
            .insert(status.to_string(), Box::new(provider));
        self
    }

    pub fn get(&self, field: &str) -> Option<&dyn RandomProvider> {
        self.providers.get(field).map(|p| &**p)
    }

    /// The provider that applies to `field`, if any.
    pub fn for_field(&self, field: &FieldDescriptor) -> Option<&dyn RandomProvider> {
        self.get(&field.name).or_else(|| {
            let by_type = match &field.role {
                FieldRole::Enum { space } => self.enum_providers.get(space),
                FieldRole::BitfieldStatus { status } => self.status_providers.get(status),
                _ => None,
            };
            by_type.map(|p| &**p)
        })
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn enum_spaces(&self) -> impl Iterator<Item = &str> {
        self.enum_providers.keys().map(String::as_str)
    }

    pub fn status_types(&self) -> impl Iterator<Item = &str> {
        self.status_providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len() + self.enum_providers.len() + self.status_providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("fields", &self.providers.keys().collect::<Vec<_>>())
            .field("enums", &self.enum_providers.keys().collect::<Vec<_>>())
            .field("statuses", &self.status_providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// State threaded through one random record draw.
pub struct RandomContext<'a> {
    rng: &'a mut dyn RngCore,
    bindings: &'a Bindings,
    device_id: Option<&'a str>,
}

impl<'a> RandomContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, bindings: &'a Bindings, device_id: Option<&'a str>) -> Self {
        Self {
            rng,
            bindings,
            device_id,
        }
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn bindings(&self) -> &'a Bindings {
        self.bindings
    }

    /// Identifier requested by the caller, if any.
    pub fn device_id(&self) -> Option<&'a str> {
        self.device_id
    }
}
