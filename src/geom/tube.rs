//! Tube mesh generation for the conduit.
//!
//! This module provides:
//! - `build_tube`: constant-radius tube extruded along a sampled centerline
//! - `extract_range`: copy a contiguous ring range into an independent mesh
//! - `color_range`: recolor the vertex rings of a contiguous ring range
//!
//! One vertex ring is emitted per path sample, so ring indices and path
//! sample indices coincide. The range operations rely on that bijection;
//! it is the reason the tube carries no end caps.

use super::centerline::PathSample;
use super::core::Rgba;

/// Options for controlling tube mesh generation.
#[derive(Debug, Clone, Copy)]
pub struct TubeOptions {
    /// Number of segments around the circular cross-section.
    pub radial_segments: usize,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self { radial_segments: 16 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TubeError {
    #[error("centerline requires at least 2 samples")]
    PathTooShort,
    #[error("centerline samples must be finite")]
    NonFinitePath,
    #[error("cross-section radius must be finite and > 0")]
    InvalidRadius,
    #[error("tube requires at least 3 radial segments")]
    NotEnoughRadialSegments,
}

/// Range errors are programmer-contract violations. Ranges are never
/// clamped: a silently clamped range corrupts highlight and segment
/// semantics downstream.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    #[error("ring range {start}..={end} is out of bounds for {ring_count} rings")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        ring_count: usize,
    },
}

/// A tube mesh around a sampled centerline.
///
/// Vertices are grouped in rings of `radial_segments`, one ring per path
/// sample, in sample order: the vertex block of ring `r` starts at
/// `r * radial_segments`. Buffers are owned exclusively by the conduit (or
/// segment) that requested them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TubeMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
    pub ring_count: usize,
    pub radial_segments: usize,
}

impl TubeMesh {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if all vertex indices are within bounds.
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Returns true if all attribute buffers match the vertex count.
    #[must_use]
    pub fn has_valid_attribute_lengths(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n && self.colors.len() == n
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if !self.has_valid_indices() {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if !self.has_valid_attribute_lengths() {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        if self.positions.len() != self.ring_count * self.radial_segments {
            return Err("mesh vertex count does not match ring layout".to_string());
        }
        Ok(())
    }

    /// Position buffer as a flat slice: `[x0, y0, z0, x1, y1, z1, ...]`.
    ///
    /// Zero-copy view over `positions`, useful for wasm/JS adapters that
    /// expect packed numeric buffers.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.positions)
    }

    /// Normal buffer as a flat slice.
    #[must_use]
    pub fn normals_flat(&self) -> &[f64] {
        flatten_f64_array_slice::<3>(&self.normals)
    }

    /// Color buffer as a flat slice: `[r0, g0, b0, a0, r1, ...]`.
    #[must_use]
    pub fn colors_flat(&self) -> &[f32] {
        flatten_f32_array_slice::<4>(&self.colors)
    }
}

fn flatten_f64_array_slice<const N: usize>(data: &[[f64; N]]) -> &[f64] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f64>();
    // SAFETY: `[[f64; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

fn flatten_f32_array_slice<const N: usize>(data: &[[f32; N]]) -> &[f32] {
    let count = data.len().checked_mul(N).unwrap_or(0);
    let ptr = data.as_ptr().cast::<f32>();
    // SAFETY: `[[f32; N]]` is stored contiguously, and we compute the element count as `len * N`.
    unsafe { std::slice::from_raw_parts(ptr, count) }
}

/// Extrude a circular cross-section along the sampled centerline.
///
/// Each ring is oriented by its sample's `forward`/`radial` frame; rings are
/// stitched into a closed tube wall. Every vertex starts out colored
/// `base_color`; highlighting recolors ranges afterwards via [`color_range`].
pub fn build_tube(
    samples: &[PathSample],
    radius: f64,
    base_color: Rgba,
    options: TubeOptions,
) -> Result<TubeMesh, TubeError> {
    if options.radial_segments < 3 {
        return Err(TubeError::NotEnoughRadialSegments);
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(TubeError::InvalidRadius);
    }
    if samples.len() < 2 {
        return Err(TubeError::PathTooShort);
    }
    if samples
        .iter()
        .any(|s| !s.point.is_finite() || !s.forward.is_finite() || !s.radial.is_finite())
    {
        return Err(TubeError::NonFinitePath);
    }

    let ring_count = samples.len();
    let radial_segments = options.radial_segments;

    let mut positions: Vec<[f64; 3]> = Vec::with_capacity(ring_count * radial_segments);
    let mut normals: Vec<[f64; 3]> = Vec::with_capacity(ring_count * radial_segments);

    for sample in samples {
        let side = sample.forward.cross(sample.radial);
        for seg in 0..radial_segments {
            let angle = 2.0 * std::f64::consts::PI * (seg as f64 / radial_segments as f64);
            let offset = sample
                .radial
                .mul_scalar(angle.cos())
                .add(side.mul_scalar(angle.sin()));

            positions.push(sample.point.add_vec(offset.mul_scalar(radius)).to_array());
            normals.push(offset.to_array());
        }
    }

    let colors = vec![base_color.to_array(); positions.len()];
    let indices = stitch_rings(ring_count, radial_segments);

    Ok(TubeMesh {
        positions,
        normals,
        colors,
        indices,
        ring_count,
        radial_segments,
    })
}

fn stitch_rings(ring_count: usize, radial_segments: usize) -> Vec<u32> {
    let mut indices: Vec<u32> = Vec::with_capacity((ring_count - 1) * radial_segments * 6);

    for r in 0..ring_count - 1 {
        for seg in 0..radial_segments {
            let seg_next = (seg + 1) % radial_segments;

            let i0 = (r * radial_segments + seg) as u32;
            let i1 = (r * radial_segments + seg_next) as u32;
            let i2 = ((r + 1) * radial_segments + seg_next) as u32;
            let i3 = ((r + 1) * radial_segments + seg) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i0, i2, i3]);
        }
    }

    indices
}

/// Copy the rings of path samples `start..=end` into a new, independently
/// owned mesh.
///
/// The extract shares no buffers with its source: the caller is free to
/// transform either mesh afterwards without affecting the other. Used when
/// one conduit renders as multiple rigid segments (a kick sliding under a
/// fixed 90, for instance).
pub fn extract_range(source: &TubeMesh, start: usize, end: usize) -> Result<TubeMesh, RangeError> {
    if start > end || end >= source.ring_count {
        return Err(RangeError::RangeOutOfBounds {
            start,
            end,
            ring_count: source.ring_count,
        });
    }

    let n = source.radial_segments;
    let ring_count = end - start + 1;
    let vertex_range = start * n..(end + 1) * n;

    Ok(TubeMesh {
        positions: source.positions[vertex_range.clone()].to_vec(),
        normals: source.normals[vertex_range.clone()].to_vec(),
        colors: source.colors[vertex_range].to_vec(),
        indices: stitch_rings(ring_count, n),
        ring_count,
        radial_segments: n,
    })
}

/// Overwrite the vertex colors of rings `start..=end` with `color`.
///
/// Geometry is untouched and the operation is idempotent: recoloring the
/// same range with the same color leaves the mesh unchanged.
pub fn color_range(
    mesh: &mut TubeMesh,
    color: Rgba,
    start: usize,
    end: usize,
) -> Result<(), RangeError> {
    if start > end || end >= mesh.ring_count {
        return Err(RangeError::RangeOutOfBounds {
            start,
            end,
            ring_count: mesh.ring_count,
        });
    }

    let n = mesh.radial_segments;
    for slot in &mut mesh.colors[start * n..(end + 1) * n] {
        *slot = color.to_array();
    }

    Ok(())
}
