//! The bend instance: user inputs, derived outputs, highlight, alert.
//!
//! One `BendModel` is associated with one conduit at a time. Editing an
//! input invalidates every output; `recompute()` re-derives them all from
//! scratch. There is no partial update, so inputs, outputs, and the path
//! built from them can never disagree.

use std::collections::BTreeMap;

use super::EngineConfig;
use super::params::{ParamError, ParamName, Parameter};
use super::variants::BendVariant;
use crate::geom::Rgba;

/// A blocking geometric-validity flag. Not an error: it is state on the
/// instance, so rendering can degrade (hide overlays, drop the mesh) instead
/// of crashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometricAlert {
    message: String,
}

impl GeometricAlert {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for GeometricAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The currently requested highlight, resolved to its stable color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub name: ParamName,
    pub color: Rgba,
    pub enabled: bool,
}

/// Parameter model for one conduit.
#[derive(Debug, Clone)]
pub struct BendModel {
    variant: BendVariant,
    inputs: Vec<Parameter>,
    outputs: BTreeMap<ParamName, Parameter>,
    highlight: Option<ParamName>,
    alert: Option<GeometricAlert>,
    stale: bool,
}

impl BendModel {
    /// Fresh instance with the variant's default inputs. Outputs start
    /// stale; call [`BendModel::recompute`] before reading them.
    #[must_use]
    pub fn new(variant: BendVariant) -> Self {
        Self {
            variant,
            inputs: variant.schema().iter().map(|spec| spec.instantiate()).collect(),
            outputs: BTreeMap::new(),
            highlight: None,
            alert: None,
            stale: true,
        }
    }

    #[must_use]
    pub fn variant(&self) -> BendVariant {
        self.variant
    }

    /// All input parameters, in schema order.
    #[must_use]
    pub fn inputs(&self) -> &[Parameter] {
        &self.inputs
    }

    #[must_use]
    pub fn alert(&self) -> Option<&GeometricAlert> {
        self.alert.as_ref()
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Resolve a user-supplied name against this variant's schema (inputs
    /// and outputs), with a nearest-name hint on failure.
    pub fn resolve_name(&self, name: &str) -> Result<ParamName, ParamError> {
        match ParamName::from_str(name) {
            Some(resolved) if self.is_schema_name(resolved) => Ok(resolved),
            _ => Err(ParamError::unknown(
                name,
                self.variant.name(),
                &self.schema_names(),
            )),
        }
    }

    pub fn input(&self, name: ParamName) -> Result<&Parameter, ParamError> {
        self.inputs
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| self.unknown(name))
    }

    /// Set an input value after validating it against the parameter's
    /// domain. On success all outputs become stale; on failure the prior
    /// value stays in place.
    pub fn set_input(&mut self, name: ParamName, value: f64) -> Result<(), ParamError> {
        let spec = self
            .variant
            .schema()
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| self.unknown(name))?;

        if !spec.domain.validate(value) {
            return Err(ParamError::InvalidValue {
                name: name.as_str(),
                value,
                domain: spec.domain,
            });
        }

        let slot = self
            .inputs
            .iter_mut()
            .find(|p| p.name == name)
            .expect("schema and inputs stay in sync");
        slot.value = value;

        self.outputs.clear();
        self.stale = true;
        Ok(())
    }

    /// Re-derive every output from the current inputs. Sets the alert (and
    /// leaves outputs undefined) when the inputs are geometrically
    /// degenerate for this variant.
    pub fn recompute(&mut self, config: &EngineConfig) {
        match self.variant.derive(&self.inputs, config) {
            Ok(pairs) => {
                self.outputs = pairs
                    .into_iter()
                    .map(|(name, value)| {
                        (
                            name,
                            Parameter {
                                name,
                                value,
                                color: name.color(),
                                enabled: true,
                            },
                        )
                    })
                    .collect();
                self.alert = None;
            }
            Err(alert) => {
                self.outputs.clear();
                self.alert = Some(alert);
            }
        }
        self.stale = false;
    }

    pub fn output(&self, name: ParamName) -> Result<&Parameter, ParamError> {
        if !self.variant.output_names().contains(&name) {
            return Err(self.unknown(name));
        }
        if self.stale {
            return Err(ParamError::StaleOutputs);
        }
        match (self.outputs.get(&name), &self.alert) {
            (Some(parameter), _) => Ok(parameter),
            (None, Some(alert)) => Err(ParamError::OutputsUnavailable {
                alert: alert.message().to_owned(),
            }),
            // recompute() always fills every output when no alert is set.
            (None, None) => Err(ParamError::StaleOutputs),
        }
    }

    /// All derived outputs, in the variant's display order. Empty while
    /// stale or alerted.
    #[must_use]
    pub fn outputs(&self) -> Vec<&Parameter> {
        self.variant
            .output_names()
            .iter()
            .filter_map(|name| self.outputs.get(name))
            .collect()
    }

    /// Request a highlight for one parameter. Pure state; the mesh engine's
    /// `color_range` does the actual recoloring.
    pub fn set_highlight(&mut self, name: ParamName) -> Result<(), ParamError> {
        if !self.is_schema_name(name) {
            return Err(self.unknown(name));
        }
        self.highlight = Some(name);
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// The active highlight, if one is requested.
    #[must_use]
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight.map(|name| Highlight {
            name,
            color: name.color(),
            enabled: true,
        })
    }

    fn is_schema_name(&self, name: ParamName) -> bool {
        self.variant.schema().iter().any(|spec| spec.name == name)
            || self.variant.output_names().contains(&name)
    }

    fn schema_names(&self) -> Vec<ParamName> {
        self.variant
            .schema()
            .iter()
            .map(|spec| spec.name)
            .chain(self.variant.output_names().iter().copied())
            .collect()
    }

    fn unknown(&self, name: ParamName) -> ParamError {
        ParamError::unknown(name.as_str(), self.variant.name(), &self.schema_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bend::params::ParamError;

    #[test]
    fn fresh_model_is_stale_until_recompute() {
        let config = EngineConfig::default();
        let mut model = BendModel::new(BendVariant::Offset);

        assert!(matches!(
            model.output(ParamName::Shrink),
            Err(ParamError::StaleOutputs)
        ));

        model.recompute(&config);
        assert!(model.output(ParamName::Shrink).is_ok());
        assert!(model.alert().is_none());
    }

    #[test]
    fn editing_an_input_invalidates_outputs() {
        let config = EngineConfig::default();
        let mut model = BendModel::new(BendVariant::Offset);
        model.recompute(&config);
        assert!(model.output(ParamName::DistanceBetweenBends).is_ok());

        model.set_input(ParamName::OffsetHeight, 0.2).unwrap();
        assert!(matches!(
            model.output(ParamName::DistanceBetweenBends),
            Err(ParamError::StaleOutputs)
        ));
    }

    #[test]
    fn invalid_value_keeps_the_prior_value() {
        let mut model = BendModel::new(BendVariant::Offset);
        let before = model.input(ParamName::BendAngle).unwrap().value;

        let err = model.set_input(ParamName::BendAngle, 181.0).unwrap_err();
        assert!(matches!(err, ParamError::InvalidValue { .. }));
        assert_eq!(model.input(ParamName::BendAngle).unwrap().value, before);
    }

    #[test]
    fn unknown_names_fail_loudly() {
        let mut model = BendModel::new(BendVariant::StubUp);
        assert!(model.set_input(ParamName::Spacing, 0.1).is_err());
        assert!(model.input(ParamName::Spacing).is_err());
        assert!(model.resolve_name("Spacng").is_err());
        assert!(model.resolve_name("StubHeight").is_ok());
    }

    #[test]
    fn alert_suppresses_outputs_until_inputs_recover() {
        let config = EngineConfig::default();
        let mut model = BendModel::new(BendVariant::StubUp);

        // Below the take-up radius: geometrically impossible stub.
        model.set_input(ParamName::StubHeight, 0.05).unwrap();
        model.recompute(&config);
        assert!(model.alert().is_some());
        assert!(matches!(
            model.output(ParamName::MarkDistance),
            Err(ParamError::OutputsUnavailable { .. })
        ));
        assert!(model.outputs().is_empty());

        model.set_input(ParamName::StubHeight, 0.4).unwrap();
        model.recompute(&config);
        assert!(model.alert().is_none());
        let mark = model.output(ParamName::MarkDistance).unwrap();
        assert!((mark.value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn recompute_is_idempotent() {
        let config = EngineConfig::default();
        let mut model = BendModel::new(BendVariant::ParallelOffset);
        model.recompute(&config);
        let first: Vec<f64> = model.outputs().iter().map(|p| p.value).collect();
        model.recompute(&config);
        let second: Vec<f64> = model.outputs().iter().map(|p| p.value).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn highlight_is_pure_state_with_a_stable_color() {
        let mut model = BendModel::new(BendVariant::Offset);
        assert!(model.highlight().is_none());

        model.set_highlight(ParamName::DistanceBetweenBends).unwrap();
        let highlight = model.highlight().unwrap();
        assert_eq!(highlight.name, ParamName::DistanceBetweenBends);
        assert_eq!(highlight.color, ParamName::DistanceBetweenBends.color());
        assert!(highlight.enabled);

        model.clear_highlight();
        assert!(model.highlight().is_none());

        assert!(model.set_highlight(ParamName::StubHeight).is_err());
    }
}
