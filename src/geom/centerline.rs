//! Centerline generation for conduit bends.
//!
//! A bend variant describes its path as a short sequence of primitives
//! (straight runs, circular arcs, axial rolls). The walker in this module
//! turns that plan into an ordered sequence of [`PathSample`]s plus the
//! [`BendMark`]s that index the geometrically significant boundaries.
//!
//! Marks are emitted at the exact sample index where a primitive starts or
//! ends — never interpolated — so downstream range operations (vertex
//! coloring, sub-mesh extraction) are exact.

use super::core::{Point3, Tolerance, Vec3};

/// One sample along the conduit centerline.
///
/// `forward` points along the path, `radial` is the frame's up direction
/// (perpendicular to `forward`); both are unit vectors. Together they orient
/// the cross-section ring the mesh engine extrudes at this sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub point: Point3,
    pub forward: Vec3,
    pub radial: Vec3,
}

/// Whether a mark opens or closes a bend region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Start,
    End,
}

/// A named index into the path sample sequence.
///
/// Kept as a plain integer: sample sequences are regenerated wholesale on
/// every input change, and an index survives that where a pointer would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BendMark {
    pub index: usize,
    pub kind: MarkKind,
}

/// Plane an arc bends in, relative to the walking frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcPlane {
    /// Bend toward the radial (up) direction; positive sweep rises.
    Pitch,
    /// Bend sideways about the radial axis; positive sweep turns left.
    Yaw,
}

/// Which marks an arc contributes to the mark sequence.
///
/// `StartOnly` exists for the four-point saddle, whose trailing bends are
/// marked open-ended in the observed layout; every other variant uses
/// `StartEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkEmit {
    None,
    StartEnd,
    StartOnly,
}

/// A single geometric primitive of a centerline plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Straight run along the current forward direction.
    Run { length: f64 },
    /// Circular arc of `sweep_degrees` at `radius` in the given plane.
    Arc {
        plane: ArcPlane,
        sweep_degrees: f64,
        radius: f64,
        marks: MarkEmit,
    },
    /// Rotate the frame's radial direction about the path axis.
    /// Adds no samples and no marks.
    Roll { angle_degrees: f64 },
}

/// Ordered primitive sequence for one bend variant.
#[derive(Debug, Clone, Default)]
pub struct CenterlinePlan {
    pub primitives: Vec<Primitive>,
}

/// Sampling resolution for the walker.
#[derive(Debug, Clone, Copy)]
pub struct SamplingOptions {
    /// Linear step along straight runs, in model units.
    pub run_step: f64,
    /// Angular step along arcs, in degrees.
    pub arc_step_degrees: f64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            run_step: 0.025,
            arc_step_degrees: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    position: Point3,
    forward: Vec3,
    radial: Vec3,
}

impl Frame {
    fn initial() -> Self {
        Self {
            position: Point3::ORIGIN,
            forward: Vec3::X,
            radial: Vec3::Z,
        }
    }

    fn sample(&self) -> PathSample {
        PathSample {
            point: self.position,
            forward: self.forward,
            radial: self.radial,
        }
    }
}

/// Walk `plan` and produce the sampled centerline plus its bend marks.
///
/// The path starts at the origin heading along +X with +Z as the radial
/// direction. Every primitive's boundary falls exactly on a sample, and the
/// sample at a boundary is shared between the adjacent primitives, so mark
/// indices are strictly non-decreasing and always in bounds.
#[must_use]
pub fn generate_path(plan: &CenterlinePlan, options: SamplingOptions) -> (Vec<PathSample>, Vec<BendMark>) {
    let mut frame = Frame::initial();
    let mut samples = vec![frame.sample()];
    let mut marks = Vec::new();

    for primitive in &plan.primitives {
        match *primitive {
            Primitive::Run { length } => {
                debug_assert!(length >= 0.0, "run length must be non-negative");
                walk_run(&mut frame, &mut samples, length, options.run_step);
            }
            Primitive::Arc {
                plane,
                sweep_degrees,
                radius,
                marks: emit,
            } => {
                debug_assert!(radius > 0.0, "arc radius must be positive");
                let start_index = samples.len() - 1;
                walk_arc(
                    &mut frame,
                    &mut samples,
                    plane,
                    sweep_degrees.to_radians(),
                    radius,
                    options.arc_step_degrees.to_radians(),
                );
                let end_index = samples.len() - 1;
                match emit {
                    MarkEmit::None => {}
                    MarkEmit::StartOnly => {
                        marks.push(BendMark { index: start_index, kind: MarkKind::Start });
                    }
                    MarkEmit::StartEnd => {
                        marks.push(BendMark { index: start_index, kind: MarkKind::Start });
                        marks.push(BendMark { index: end_index, kind: MarkKind::End });
                    }
                }
            }
            Primitive::Roll { angle_degrees } => {
                frame.radial = frame
                    .radial
                    .rotated_about(frame.forward, angle_degrees.to_radians());
            }
        }
    }

    (samples, marks)
}

fn walk_run(frame: &mut Frame, samples: &mut Vec<PathSample>, length: f64, step: f64) {
    if !(length > 0.0) {
        return;
    }

    let count = ((length / step.max(f64::MIN_POSITIVE)).ceil() as usize).max(1);
    let start = frame.position;
    for i in 1..=count {
        let t = length * (i as f64 / count as f64);
        frame.position = start.add_vec(frame.forward.mul_scalar(t));
        samples.push(frame.sample());
    }
}

fn walk_arc(
    frame: &mut Frame,
    samples: &mut Vec<PathSample>,
    plane: ArcPlane,
    sweep: f64,
    radius: f64,
    step: f64,
) {
    // Degenerate sweep: no samples, marks stay on the boundary index.
    if Tolerance::ZERO_LENGTH.approx_zero_f64(sweep) {
        return;
    }

    // Rotation axis and curvature-center offset for the requested plane.
    // Pitch: axis = forward × radial (positive sweep rises toward radial).
    // Yaw:   axis = radial           (positive sweep turns toward radial × forward).
    let sign = sweep.signum();
    let (axis, center_dir) = match plane {
        ArcPlane::Pitch => (frame.forward.cross(frame.radial), frame.radial),
        ArcPlane::Yaw => (frame.radial, frame.radial.cross(frame.forward)),
    };

    let center = frame.position.add_vec(center_dir.mul_scalar(radius * sign));
    let spoke = frame.position.sub_point(center);
    let start_forward = frame.forward;
    let start_radial = frame.radial;

    let count = ((sweep.abs() / step.max(f64::MIN_POSITIVE)).ceil() as usize).max(1);
    for i in 1..=count {
        let angle = sweep * (i as f64 / count as f64);
        frame.position = center.add_vec(spoke.rotated_about(axis, angle));
        frame.forward = start_forward.rotated_about(axis, angle);
        frame.radial = start_radial.rotated_about(axis, angle);
        samples.push(frame.sample());
    }
}

/// Floor-midpoint sample index of the `pair`-th Start/End bend region.
///
/// Returns `None` when the pair is absent or not a proper Start/End pair
/// (the four-point saddle's trailing marks, for instance).
#[must_use]
pub fn region_center_index(marks: &[BendMark], pair: usize) -> Option<usize> {
    let start = marks.get(2 * pair)?;
    let end = marks.get(2 * pair + 1)?;
    if start.kind != MarkKind::Start || end.kind != MarkKind::End {
        return None;
    }
    Some((end.index - start.index) / 2 + start.index)
}
