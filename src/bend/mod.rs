//! The bend parameter model: schemas, per-variant derivations, and the
//! bridge from a resolved model to the centerline generator.

use crate::geom::{BendMark, PathSample, Rgba, SamplingOptions, generate_path};

pub mod model;
pub mod params;
pub mod variants;

pub use model::{BendModel, GeometricAlert, Highlight};
pub use params::{ParamDomain, ParamError, ParamName, Parameter, palette};
pub use variants::BendVariant;

/// Host-supplied constants (spec'd by the environment, not derived): bender
/// geometry, conduit cross-section, sampling resolution, rendering defaults.
/// Defaults target 1/2" EMT, in meters and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Centerline radius of the bender shoe; consumed as take-up.
    pub bend_radius: f64,
    /// Conduit outer radius for the tube cross-section.
    pub cross_section_radius: f64,
    /// Straight tail length before and after the bend work.
    pub leg_length: f64,
    /// Linear sampling step along straight runs.
    pub run_step: f64,
    /// Angular sampling step along arcs, degrees.
    pub arc_step_degrees: f64,
    /// Segments around the tube cross-section.
    pub radial_segments: usize,
    /// Unhighlighted conduit color.
    pub base_color: Rgba,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bend_radius: 0.1,
            cross_section_radius: 0.0105,
            leg_length: 0.3,
            run_step: 0.025,
            arc_step_degrees: 5.0,
            radial_segments: 16,
            base_color: palette::CONDUIT,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            run_step: self.run_step,
            arc_step_degrees: self.arc_step_degrees,
        }
    }
}

/// Generate the centerline for a resolved bend model.
///
/// Returns the empty pair when the model carries a geometric alert or its
/// outputs are stale — "not yet renderable", by contract not an error.
#[must_use]
pub fn generate_centerline(
    model: &BendModel,
    config: &EngineConfig,
) -> (Vec<PathSample>, Vec<BendMark>) {
    if model.alert().is_some() || model.is_stale() {
        return (Vec::new(), Vec::new());
    }

    match model.variant().plan(model.inputs(), config) {
        Ok(plan) => generate_path(&plan, config.sampling()),
        Err(_) => (Vec::new(), Vec::new()),
    }
}
