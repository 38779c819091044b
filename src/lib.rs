#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bend;
pub mod geom;

use bend::{BendModel, BendVariant, EngineConfig, generate_centerline};
use geom::{
    BendMark, MarkKind, PathSample, Rgba, SectorMesh, TubeMesh, TubeOptions, build_tube,
    color_range, extract_range, generate_sector, region_center_index,
};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct ParameterExport {
    name: &'static str,
    value: f64,
    color: [f32; 4],
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct BendMarkExport {
    index: usize,
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct HighlightExport {
    name: String,
    color: [f32; 4],
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct TubeMeshExport {
    positions: Vec<f64>,
    normals: Vec<f64>,
    colors: Vec<f32>,
    indices: Vec<u32>,
    ring_count: usize,
    radial_segments: usize,
}

impl TubeMeshExport {
    fn from_mesh(mesh: &TubeMesh) -> Self {
        Self {
            positions: mesh.positions_flat().to_vec(),
            normals: mesh.normals_flat().to_vec(),
            colors: mesh.colors_flat().to_vec(),
            indices: mesh.indices.clone(),
            ring_count: mesh.ring_count,
            radial_segments: mesh.radial_segments,
        }
    }
}

#[derive(Debug, Serialize)]
struct SectorMeshExport {
    positions: Vec<f64>,
    normals: Vec<f64>,
    indices: Vec<u32>,
}

/// De volledige pijplijn voor één buis: parametermodel, hartlijn, mesh.
#[derive(Debug)]
struct Conduit {
    model: BendModel,
    samples: Vec<PathSample>,
    marks: Vec<BendMark>,
    tube: Option<TubeMesh>,
}

impl Conduit {
    fn new(variant: BendVariant) -> Self {
        Self {
            model: BendModel::new(variant),
            samples: Vec::new(),
            marks: Vec::new(),
            tube: None,
        }
    }
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    config: EngineConfig,
    conduit: Option<Conduit>,
    result_dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            config: EngineConfig::default(),
            conduit: None,
            result_dirty: false,
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Selecteer het buigtype; het parametermodel start met standaardwaarden.
    #[wasm_bindgen]
    pub fn set_variant(&mut self, name: &str) -> Result<(), JsValue> {
        let Some(variant) = BendVariant::from_str(name) else {
            return Err(js_error(&format!("onbekend buigtype: `{name}`")));
        };

        debug_log!("buigtype gewisseld naar {}", variant.name());
        self.conduit = Some(Conduit::new(variant));
        self.result_dirty = true;
        Ok(())
    }

    /// Actieve buigtype-naam, of `None` wanneer er nog geen is gekozen.
    #[wasm_bindgen]
    #[must_use]
    pub fn variant_name(&self) -> Option<String> {
        self.conduit
            .as_ref()
            .map(|c| c.model.variant().name().to_owned())
    }

    /// Stel een invoerwaarde in; valideert tegen het domein van de parameter.
    #[wasm_bindgen]
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        let conduit = self.conduit_mut()?;
        let resolved = conduit.model.resolve_name(name).map_err(to_js_error)?;
        conduit
            .model
            .set_input(resolved, value)
            .map_err(to_js_error)?;
        self.result_dirty = true;
        Ok(())
    }

    /// Huidige waarde van een invoerparameter.
    #[wasm_bindgen]
    pub fn get_input(&self, name: &str) -> Result<f64, JsValue> {
        let conduit = self.conduit_ref()?;
        let resolved = conduit.model.resolve_name(name).map_err(to_js_error)?;
        conduit
            .model
            .input(resolved)
            .map(|p| p.value)
            .map_err(to_js_error)
    }

    /// Waarde van een afgeleide uitvoerparameter. Vereist een actuele
    /// evaluatie; verouderde waarden worden nooit teruggegeven.
    #[wasm_bindgen]
    pub fn get_output(&self, name: &str) -> Result<f64, JsValue> {
        let conduit = self.conduit_ref()?;
        let resolved = conduit.model.resolve_name(name).map_err(to_js_error)?;
        conduit
            .model
            .output(resolved)
            .map(|p| p.value)
            .map_err(to_js_error)
    }

    /// Markeer één parameter als uitgelicht.
    #[wasm_bindgen]
    pub fn set_highlight(&mut self, name: &str) -> Result<(), JsValue> {
        let conduit = self.conduit_mut()?;
        let resolved = conduit.model.resolve_name(name).map_err(to_js_error)?;
        conduit.model.set_highlight(resolved).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear_highlight(&mut self) -> Result<(), JsValue> {
        self.conduit_mut()?.model.clear_highlight();
        Ok(())
    }

    /// Evalueer het model en herbouw hartlijn en buisgeometrie.
    ///
    /// Bij een geometrische waarschuwing blijft de geometrie leeg zodat de
    /// weergave gecontroleerd kan degraderen.
    #[wasm_bindgen]
    pub fn evaluate(&mut self) -> Result<(), JsValue> {
        let config = self.config;
        let Some(conduit) = self.conduit.as_mut() else {
            return Err(js_error("er is geen buigtype geselecteerd"));
        };
        if !self.result_dirty {
            return Ok(());
        }

        conduit.model.recompute(&config);
        let (samples, marks) = generate_centerline(&conduit.model, &config);
        conduit.samples = samples;
        conduit.marks = marks;

        conduit.tube = if conduit.samples.len() >= 2 {
            let tube = build_tube(
                &conduit.samples,
                config.cross_section_radius,
                config.base_color,
                TubeOptions {
                    radial_segments: config.radial_segments,
                },
            )
            .map_err(to_js_error)?;
            Some(tube)
        } else {
            debug_log!(
                "geen renderbare geometrie: {}",
                conduit
                    .model
                    .alert()
                    .map_or("onbekende reden", |a| a.message())
            );
            None
        };

        self.result_dirty = false;
        Ok(())
    }

    /// Alle invoerparameters met naam, waarde en kleurlabel.
    #[wasm_bindgen]
    pub fn get_inputs(&self) -> Result<JsValue, JsValue> {
        let conduit = self.conduit_ref()?;
        let exports: Vec<ParameterExport> = conduit
            .model
            .inputs()
            .iter()
            .map(|p| ParameterExport {
                name: p.name.as_str(),
                value: p.value,
                color: p.color.to_array(),
                enabled: p.enabled,
            })
            .collect();
        serde_wasm_bindgen::to_value(&exports).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Alle afgeleide uitvoerparameters van de laatste evaluatie.
    #[wasm_bindgen]
    pub fn get_outputs(&self) -> Result<JsValue, JsValue> {
        if self.result_dirty {
            return Err(js_error("model is nog niet geëvalueerd"));
        }
        let conduit = self.conduit_ref()?;
        let exports: Vec<ParameterExport> = conduit
            .model
            .outputs()
            .iter()
            .map(|p| ParameterExport {
                name: p.name.as_str(),
                value: p.value,
                color: p.color.to_array(),
                enabled: p.enabled,
            })
            .collect();
        serde_wasm_bindgen::to_value(&exports).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Actieve geometrische waarschuwing, of `None`.
    #[wasm_bindgen]
    pub fn get_alert(&self) -> Option<String> {
        self.conduit
            .as_ref()
            .and_then(|c| c.model.alert())
            .map(|a| a.message().to_owned())
    }

    /// Uitgelichte parameter als `{name, color, enabled}`.
    #[wasm_bindgen]
    pub fn get_highlight(&self) -> Result<JsValue, JsValue> {
        let conduit = self.conduit_ref()?;
        let export = match conduit.model.highlight() {
            Some(h) => HighlightExport {
                name: h.name.as_str().to_owned(),
                color: h.color.to_array(),
                enabled: h.enabled,
            },
            None => HighlightExport {
                name: String::new(),
                color: [0.0; 4],
                enabled: false,
            },
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Buigmarkeringen van de laatste evaluatie, op volgorde.
    #[wasm_bindgen]
    pub fn get_bend_marks(&self) -> Result<JsValue, JsValue> {
        if self.result_dirty {
            return Err(js_error("model is nog niet geëvalueerd"));
        }
        let conduit = self.conduit_ref()?;
        let exports: Vec<BendMarkExport> = conduit
            .marks
            .iter()
            .map(|m| BendMarkExport {
                index: m.index,
                kind: match m.kind {
                    MarkKind::Start => "Start",
                    MarkKind::End => "End",
                },
            })
            .collect();
        serde_wasm_bindgen::to_value(&exports).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Aantal hartlijnsamples van de laatste evaluatie.
    #[wasm_bindgen]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.conduit.as_ref().map_or(0, |c| c.samples.len())
    }

    /// Middenindex van het `pair`-de Start/End-paar (vloerdeling).
    #[wasm_bindgen]
    #[must_use]
    pub fn center_of_bend_region(&self, pair: usize) -> Option<usize> {
        self.conduit
            .as_ref()
            .and_then(|c| region_center_index(&c.marks, pair))
    }

    /// Hartlijnposities als platte buffer `[x0, y0, z0, x1, ...]`.
    #[wasm_bindgen]
    #[must_use]
    pub fn centerline_positions_flat(&self) -> Vec<f64> {
        self.conduit.as_ref().map_or_else(Vec::new, |c| {
            c.samples
                .iter()
                .flat_map(|s| s.point.to_array())
                .collect()
        })
    }

    /// Hartlijnrichtingen als platte buffer, voor pijl- en vlagoverlays.
    #[wasm_bindgen]
    #[must_use]
    pub fn centerline_forwards_flat(&self) -> Vec<f64> {
        self.conduit.as_ref().map_or_else(Vec::new, |c| {
            c.samples
                .iter()
                .flat_map(|s| s.forward.to_array())
                .collect()
        })
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_ring_count(&self) -> usize {
        self.tube().map_or(0, |t| t.ring_count)
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_radial_segments(&self) -> usize {
        self.tube().map_or(0, |t| t.radial_segments)
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_positions_flat(&self) -> Vec<f64> {
        self.tube()
            .map_or_else(Vec::new, |t| t.positions_flat().to_vec())
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_normals_flat(&self) -> Vec<f64> {
        self.tube()
            .map_or_else(Vec::new, |t| t.normals_flat().to_vec())
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_colors_flat(&self) -> Vec<f32> {
        self.tube()
            .map_or_else(Vec::new, |t| t.colors_flat().to_vec())
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn tube_indices(&self) -> Vec<u32> {
        self.tube().map_or_else(Vec::new, |t| t.indices.clone())
    }

    /// Herkleur de ringen `start..=end` van de buis, bijvoorbeeld om de
    /// lengte van één parameter uit te lichten.
    #[wasm_bindgen]
    pub fn color_range(
        &mut self,
        start: usize,
        end: usize,
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) -> Result<(), JsValue> {
        let conduit = self.conduit_mut()?;
        let Some(tube) = conduit.tube.as_mut() else {
            return Err(js_error("er is geen buisgeometrie om te herkleuren"));
        };
        color_range(tube, Rgba::new(r, g, b, a), start, end).map_err(to_js_error)
    }

    /// Kopieer de ringen `start..=end` naar een onafhankelijke mesh,
    /// bijvoorbeeld om een segment los te kunnen animeren.
    #[wasm_bindgen]
    pub fn extract_range(&self, start: usize, end: usize) -> Result<JsValue, JsValue> {
        let conduit = self.conduit_ref()?;
        let Some(tube) = conduit.tube.as_ref() else {
            return Err(js_error("er is geen buisgeometrie om uit te knippen"));
        };
        let part = extract_range(tube, start, end).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&TubeMeshExport::from_mesh(&part))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Bouw een vlakke sectormesh voor een hoekindicator.
    #[wasm_bindgen]
    pub fn generate_sector(
        &self,
        radius: f64,
        sweep_angle_degrees: f64,
        segment_angle_step_degrees: f64,
    ) -> Result<JsValue, JsValue> {
        let mut mesh = SectorMesh::default();
        generate_sector(
            &mut mesh,
            radius,
            sweep_angle_degrees,
            segment_angle_step_degrees,
        )
        .map_err(to_js_error)?;

        let export = SectorMeshExport {
            positions: mesh.positions.iter().flatten().copied().collect(),
            normals: mesh.normals.iter().flatten().copied().collect(),
            indices: mesh.indices,
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Stel de buigradius van de bender in.
    #[wasm_bindgen]
    pub fn set_bend_radius(&mut self, value: f64) -> Result<(), JsValue> {
        self.set_config_length(value, |config, v| config.bend_radius = v)
    }

    /// Stel de buitenstraal van de buisdoorsnede in.
    #[wasm_bindgen]
    pub fn set_cross_section_radius(&mut self, value: f64) -> Result<(), JsValue> {
        self.set_config_length(value, |config, v| config.cross_section_radius = v)
    }

    /// Stel de lengte van de rechte uiteinden in.
    #[wasm_bindgen]
    pub fn set_leg_length(&mut self, value: f64) -> Result<(), JsValue> {
        self.set_config_length(value, |config, v| config.leg_length = v)
    }

    /// Stel de bemonsteringsresolutie in (lineair en hoekig).
    #[wasm_bindgen]
    pub fn set_sampling(&mut self, run_step: f64, arc_step_degrees: f64) -> Result<(), JsValue> {
        self.set_config_length(run_step, |config, v| config.run_step = v)?;
        self.set_config_length(arc_step_degrees, |config, v| config.arc_step_degrees = v)
    }
}

impl Engine {
    /// Native accessor for embedders and tests; the wasm surface exposes the
    /// same data through the flat buffers.
    #[must_use]
    pub fn bend_marks(&self) -> &[BendMark] {
        match self.conduit.as_ref() {
            Some(conduit) => &conduit.marks,
            None => &[],
        }
    }

    /// Native accessor for the current tube mesh.
    #[must_use]
    pub fn tube(&self) -> Option<&TubeMesh> {
        self.conduit.as_ref().and_then(|c| c.tube.as_ref())
    }

    /// Native accessor for the current configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn conduit_ref(&self) -> Result<&Conduit, JsValue> {
        self.conduit
            .as_ref()
            .ok_or_else(|| js_error("er is geen buigtype geselecteerd"))
    }

    fn conduit_mut(&mut self) -> Result<&mut Conduit, JsValue> {
        self.conduit
            .as_mut()
            .ok_or_else(|| js_error("er is geen buigtype geselecteerd"))
    }

    fn set_config_length(
        &mut self,
        value: f64,
        apply: impl FnOnce(&mut EngineConfig, f64),
    ) -> Result<(), JsValue> {
        if !value.is_finite() || value <= 0.0 {
            return Err(js_error("waarde moet eindig en positief zijn"));
        }
        apply(&mut self.config, value);
        self.result_dirty = true;
        Ok(())
    }
}

fn to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;

    #[test]
    fn engine_initializes() {
        let engine = Engine::new();
        assert!(engine.is_initialized());
        assert!(engine.variant_name().is_none());
    }

    #[test]
    fn inputs_require_a_selected_variant() {
        let mut engine = Engine::new();
        assert!(engine.set_input("OffsetHeight", 0.2).is_err());
        assert!(engine.evaluate().is_err());

        engine.set_variant("Offset").expect("known variant");
        assert!(engine.set_input("OffsetHeight", 0.2).is_ok());
    }

    #[test]
    fn unknown_variants_are_rejected() {
        let mut engine = Engine::new();
        assert!(engine.set_variant("FreeformBend").is_err());
        assert!(engine.variant_name().is_none());
    }

    #[test]
    fn evaluate_builds_tube_and_marks() {
        let mut engine = Engine::new();
        engine.set_variant("StubUp").unwrap();
        engine.evaluate().unwrap();

        assert!(engine.sample_count() > 2);
        assert_eq!(engine.bend_marks().len(), 2);
        assert_eq!(engine.tube_ring_count(), engine.sample_count());
        assert_eq!(
            engine.tube_positions_flat().len(),
            engine.sample_count() * engine.tube_radial_segments() * 3
        );
    }

    #[test]
    fn evaluate_is_a_no_op_when_clean() {
        let mut engine = Engine::new();
        engine.set_variant("Offset").unwrap();
        engine.evaluate().unwrap();
        let positions = engine.tube_positions_flat();

        engine.evaluate().unwrap();
        assert_eq!(engine.tube_positions_flat(), positions);
    }

    #[test]
    fn variant_switch_resets_to_defaults() {
        let mut engine = Engine::new();
        engine.set_variant("Offset").unwrap();
        engine.set_input("OffsetHeight", 0.25).unwrap();
        engine.set_variant("Offset").unwrap();
        assert_eq!(engine.get_input("OffsetHeight").unwrap(), 0.15);
    }
}
