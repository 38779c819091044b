//! Flat circular-sector mesh for angle indicators.
//!
//! Roll and segmented-bend overlays render their sweep angle as a filled
//! fan. The generator rewrites a caller-owned mesh in place; a zero sweep
//! is a legal request that leaves a valid, empty mesh behind.

use super::core::{Point3, Vec3};

#[derive(Debug, thiserror::Error)]
pub enum SectorError {
    #[error("sector radius must be finite and > 0")]
    InvalidRadius,
    #[error("sector sweep must be finite and in [0°, 360°]")]
    InvalidSweep,
    #[error("sector step must be finite and > 0")]
    InvalidStep,
}

/// A flat triangle fan in the XY plane, all normals +Z.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectorMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl SectorMesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Rewrite `mesh` as a flat sector of `sweep_angle_degrees` at `radius`,
/// fanning counter-clockwise from the +X axis in steps of
/// `segment_angle_step_degrees` (the final step is shortened to land exactly
/// on the sweep).
pub fn generate_sector(
    mesh: &mut SectorMesh,
    radius: f64,
    sweep_angle_degrees: f64,
    segment_angle_step_degrees: f64,
) -> Result<(), SectorError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(SectorError::InvalidRadius);
    }
    if !sweep_angle_degrees.is_finite() || !(0.0..=360.0).contains(&sweep_angle_degrees) {
        return Err(SectorError::InvalidSweep);
    }
    if !segment_angle_step_degrees.is_finite() || segment_angle_step_degrees <= 0.0 {
        return Err(SectorError::InvalidStep);
    }

    mesh.positions.clear();
    mesh.normals.clear();
    mesh.indices.clear();

    if sweep_angle_degrees == 0.0 {
        return Ok(());
    }

    let sweep = sweep_angle_degrees.to_radians();
    let step = segment_angle_step_degrees.to_radians();
    let segments = ((sweep / step).ceil() as usize).max(1);

    mesh.positions.push(Point3::ORIGIN.to_array());
    for i in 0..=segments {
        let angle = sweep * (i as f64 / segments as f64);
        mesh.positions
            .push([radius * angle.cos(), radius * angle.sin(), 0.0]);
    }
    mesh.normals
        .extend(std::iter::repeat_n(Vec3::Z.to_array(), mesh.positions.len()));

    for i in 0..segments {
        let a = 1 + i as u32;
        let b = 2 + i as u32;
        mesh.indices.extend_from_slice(&[0, a, b]);
    }

    Ok(())
}
