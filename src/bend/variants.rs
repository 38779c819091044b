//! The supported bend variants: input schemas, closed-form output
//! derivations, and centerline plans.
//!
//! Dispatch is a tagged union with one `match` per operation rather than a
//! trait-object hierarchy: each variant's derivation and path layout sit
//! next to each other, testable in isolation.
//!
//! Consistency rule shared by derivations and plans: straight runs between
//! arcs are solved exactly from the requested rise budget after subtracting
//! each arc's own rise contribution `R·(1 − cos θ)`. A negative solution
//! means the requested offset/depth cannot be built at this bend radius and
//! becomes a [`GeometricAlert`] instead of a path.

use std::fmt;

use crate::geom::{ArcPlane, CenterlinePlan, MarkEmit, Primitive};

use super::EngineConfig;
use super::model::GeometricAlert;
use super::params::{ParamDomain, ParamName, ParamSpec, Parameter};

/// A conduit bending technique. Each variant owns its parameter schema and
/// its bend-mark layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BendVariant {
    CompoundRound,
    Offset,
    ParallelKick,
    ParallelOffset,
    RolledOffset,
    Saddle3,
    Saddle4,
    Segmented,
    StubUp,
}

impl BendVariant {
    pub const ALL: &'static [Self] = &[
        Self::CompoundRound,
        Self::Offset,
        Self::ParallelKick,
        Self::ParallelOffset,
        Self::RolledOffset,
        Self::Saddle3,
        Self::Saddle4,
        Self::Segmented,
        Self::StubUp,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompoundRound => "CompoundRound",
            Self::Offset => "Offset",
            Self::ParallelKick => "ParallelKick",
            Self::ParallelOffset => "ParallelOffset",
            Self::RolledOffset => "RolledOffset",
            Self::Saddle3 => "Saddle3",
            Self::Saddle4 => "Saddle4",
            Self::Segmented => "Segmented",
            Self::StubUp => "StubUp",
        }
    }

    #[must_use]
    pub fn from_str(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }

    /// The variant's input schema, in display order.
    #[must_use]
    pub const fn schema(self) -> &'static [ParamSpec] {
        match self {
            Self::CompoundRound => COMPOUND_ROUND_INPUTS,
            Self::Offset => OFFSET_INPUTS,
            Self::ParallelKick => PARALLEL_KICK_INPUTS,
            Self::ParallelOffset => PARALLEL_OFFSET_INPUTS,
            Self::RolledOffset => ROLLED_OFFSET_INPUTS,
            Self::Saddle3 => SADDLE3_INPUTS,
            Self::Saddle4 => SADDLE4_INPUTS,
            Self::Segmented => SEGMENTED_INPUTS,
            Self::StubUp => STUB_UP_INPUTS,
        }
    }

    /// The output names this variant derives, in display order.
    #[must_use]
    pub const fn output_names(self) -> &'static [ParamName] {
        match self {
            Self::CompoundRound => &[ParamName::SecondAngle, ParamName::SpreadRise],
            Self::Offset => &[ParamName::DistanceBetweenBends, ParamName::Shrink],
            Self::ParallelKick => &[ParamName::Shift, ParamName::KickSpread],
            Self::ParallelOffset => &[
                ParamName::DistanceBetweenBends,
                ParamName::Shrink,
                ParamName::MarkOffset,
            ],
            Self::RolledOffset => &[
                ParamName::TotalOffset,
                ParamName::RollAngleDegrees,
                ParamName::DistanceBetweenBends,
                ParamName::Shrink,
            ],
            Self::Saddle3 => &[
                ParamName::DistanceToOuterMarks,
                ParamName::Shrink,
                ParamName::CenterMarkAdjust,
            ],
            Self::Saddle4 => &[ParamName::DistanceBetweenBends, ParamName::Shrink],
            Self::Segmented => &[ParamName::SegmentAngle, ParamName::MarkSpacing],
            Self::StubUp => &[ParamName::TakeUp, ParamName::MarkDistance],
        }
    }

    /// Number of bend marks this variant's centerline carries.
    #[must_use]
    pub const fn mark_count(self) -> usize {
        match self {
            Self::StubUp | Self::Segmented => 2,
            Self::CompoundRound | Self::Offset | Self::ParallelKick | Self::ParallelOffset
            | Self::RolledOffset => 4,
            Self::Saddle3 | Self::Saddle4 => 6,
        }
    }

    /// Derive all outputs from the given inputs. Pure: same inputs, same
    /// outputs, bit for bit.
    pub(crate) fn derive(
        self,
        inputs: &[Parameter],
        config: &EngineConfig,
    ) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
        let v = InputValues(inputs);
        match self {
            Self::CompoundRound => derive_compound_round(&v),
            Self::Offset => derive_offset(&v, config),
            Self::ParallelKick => derive_parallel_kick(&v),
            Self::ParallelOffset => derive_parallel_offset(&v, config),
            Self::RolledOffset => derive_rolled_offset(&v, config),
            Self::Saddle3 => derive_saddle3(&v, config),
            Self::Saddle4 => derive_saddle4(&v, config),
            Self::Segmented => derive_segmented(&v),
            Self::StubUp => derive_stub_up(&v, config),
        }
    }

    /// Build the centerline plan for the given inputs. Fails with the same
    /// alerts as [`BendVariant::derive`] so path and outputs never diverge.
    pub(crate) fn plan(
        self,
        inputs: &[Parameter],
        config: &EngineConfig,
    ) -> Result<CenterlinePlan, GeometricAlert> {
        let v = InputValues(inputs);
        match self {
            Self::CompoundRound => plan_compound_round(&v, config),
            Self::Offset => plan_offset(&v, config),
            Self::ParallelKick => plan_parallel_kick(&v, config),
            Self::ParallelOffset => plan_offset(&v, config),
            Self::RolledOffset => plan_rolled_offset(&v, config),
            Self::Saddle3 => plan_saddle3(&v, config),
            Self::Saddle4 => plan_saddle4(&v, config),
            Self::Segmented => plan_segmented(&v, config),
            Self::StubUp => plan_stub_up(&v, config),
        }
    }
}

impl fmt::Display for BendVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input schemas
// ─────────────────────────────────────────────────────────────────────────────

const BEND_ANGLE: ParamSpec = ParamSpec::new(
    ParamName::BendAngle,
    ParamDomain::Angle { min_deg: 0.0, max_deg: 90.0 },
    30.0,
);

const STUB_UP_INPUTS: &[ParamSpec] = &[ParamSpec::new(
    ParamName::StubHeight,
    ParamDomain::PositiveLength,
    0.3,
)];

const OFFSET_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::OffsetHeight, ParamDomain::PositiveLength, 0.15),
    BEND_ANGLE,
];

const PARALLEL_OFFSET_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::OffsetHeight, ParamDomain::PositiveLength, 0.15),
    BEND_ANGLE,
    ParamSpec::new(ParamName::Spacing, ParamDomain::PositiveLength, 0.1),
];

const PARALLEL_KICK_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::Spacing, ParamDomain::PositiveLength, 0.1),
    ParamSpec::new(
        ParamName::KickAngle,
        ParamDomain::Angle { min_deg: 0.0, max_deg: 60.0 },
        22.5,
    ),
    ParamSpec::new(ParamName::KickTravel, ParamDomain::PositiveLength, 0.2),
];

const ROLLED_OFFSET_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::Rise, ParamDomain::Length, 0.15),
    ParamSpec::new(ParamName::Roll, ParamDomain::Length, 0.1),
    BEND_ANGLE,
];

const SADDLE3_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::SaddleDepth, ParamDomain::PositiveLength, 0.1),
    ParamSpec::new(
        ParamName::CenterAngle,
        ParamDomain::Angle { min_deg: 0.0, max_deg: 90.0 },
        45.0,
    ),
    ParamSpec::new(ParamName::MarkMethod, ParamDomain::Choice { options: 2 }, 0.0),
];

const SADDLE4_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::SaddleDepth, ParamDomain::PositiveLength, 0.1),
    BEND_ANGLE,
    ParamSpec::new(ParamName::ObstacleWidth, ParamDomain::PositiveLength, 0.2),
];

const SEGMENTED_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(ParamName::SweepRadius, ParamDomain::PositiveLength, 0.5),
    ParamSpec::new(
        ParamName::TotalAngle,
        ParamDomain::Angle { min_deg: 0.0, max_deg: 135.0 },
        90.0,
    ),
    ParamSpec::new(ParamName::SegmentCount, ParamDomain::Count { min: 2, max: 36 }, 6.0),
];

const COMPOUND_ROUND_INPUTS: &[ParamSpec] = &[
    ParamSpec::new(
        ParamName::FirstAngle,
        ParamDomain::Angle { min_deg: 0.0, max_deg: 85.0 },
        45.0,
    ),
    ParamSpec::new(ParamName::Spread, ParamDomain::PositiveLength, 0.2),
];

/// Mark method choices for the three-point saddle.
pub const MARK_METHOD_NOTCH: f64 = 0.0;
pub const MARK_METHOD_ARROW: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Derivations
// ─────────────────────────────────────────────────────────────────────────────

struct InputValues<'a>(&'a [Parameter]);

impl InputValues<'_> {
    fn get(&self, name: ParamName) -> f64 {
        self.0
            .iter()
            .find(|p| p.name == name)
            .map_or(0.0, |p| p.value)
    }
}

/// Straight run between the two arcs of an offset so the realized rise
/// equals `offset`. `None` when the offset is too small for the radius.
fn offset_mid_run(offset: f64, angle_deg: f64, radius: f64) -> Option<f64> {
    let theta = angle_deg.to_radians();
    let run = (offset - 2.0 * radius * (1.0 - theta.cos())) / theta.sin();
    (run >= 0.0).then_some(run)
}

fn half_angle_tan(angle_deg: f64) -> f64 {
    (angle_deg.to_radians() / 2.0).tan()
}

fn derive_stub_up(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let stub = v.get(ParamName::StubHeight);
    let take_up = config.bend_radius;
    if stub <= take_up {
        return Err(GeometricAlert::new(
            "stub height does not clear the bender take-up",
        ));
    }
    Ok(vec![
        (ParamName::TakeUp, take_up),
        (ParamName::MarkDistance, stub - take_up),
    ])
}

fn derive_offset(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let offset = v.get(ParamName::OffsetHeight);
    let angle = v.get(ParamName::BendAngle);
    if offset_mid_run(offset, angle, config.bend_radius).is_none() {
        return Err(GeometricAlert::new(
            "offset height is too small for the bend radius",
        ));
    }
    Ok(vec![
        (
            ParamName::DistanceBetweenBends,
            offset / angle.to_radians().sin(),
        ),
        (ParamName::Shrink, offset * half_angle_tan(angle)),
    ])
}

fn derive_parallel_offset(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let mut outputs = derive_offset(v, config)?;
    let spacing = v.get(ParamName::Spacing);
    let angle = v.get(ParamName::BendAngle);
    outputs.push((ParamName::MarkOffset, spacing * half_angle_tan(angle)));
    Ok(outputs)
}

fn derive_parallel_kick(v: &InputValues) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let spacing = v.get(ParamName::Spacing);
    let angle = v.get(ParamName::KickAngle);
    Ok(vec![
        (ParamName::Shift, 2.0 * spacing * half_angle_tan(angle)),
        (
            ParamName::KickSpread,
            spacing / angle.to_radians().cos(),
        ),
    ])
}

fn derive_rolled_offset(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let rise = v.get(ParamName::Rise);
    let roll = v.get(ParamName::Roll);
    let angle = v.get(ParamName::BendAngle);

    let total = rise.hypot(roll);
    if total <= 0.0 {
        return Err(GeometricAlert::new("rise and roll are both zero"));
    }
    if offset_mid_run(total, angle, config.bend_radius).is_none() {
        return Err(GeometricAlert::new(
            "combined offset is too small for the bend radius",
        ));
    }

    Ok(vec![
        (ParamName::TotalOffset, total),
        (ParamName::RollAngleDegrees, roll.atan2(rise).to_degrees()),
        (
            ParamName::DistanceBetweenBends,
            total / angle.to_radians().sin(),
        ),
        (ParamName::Shrink, total * half_angle_tan(angle)),
    ])
}

fn derive_saddle3(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let depth = v.get(ParamName::SaddleDepth);
    let center_angle = v.get(ParamName::CenterAngle);
    let side_angle = center_angle / 2.0;

    if offset_mid_run(depth, side_angle, config.bend_radius).is_none() {
        return Err(GeometricAlert::new(
            "saddle depth is too small for the bend radius",
        ));
    }

    let adjust = if v.get(ParamName::MarkMethod) == MARK_METHOD_ARROW {
        // Arrow-aligned benders put the layout mark half the developed
        // center arc ahead of the notch position.
        config.bend_radius * center_angle.to_radians() / 2.0
    } else {
        0.0
    };

    Ok(vec![
        (
            ParamName::DistanceToOuterMarks,
            depth / side_angle.to_radians().sin(),
        ),
        (ParamName::Shrink, depth * half_angle_tan(side_angle)),
        (ParamName::CenterMarkAdjust, adjust),
    ])
}

fn derive_saddle4(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let depth = v.get(ParamName::SaddleDepth);
    let angle = v.get(ParamName::BendAngle);
    if offset_mid_run(depth, angle, config.bend_radius).is_none() {
        return Err(GeometricAlert::new(
            "saddle depth is too small for the bend radius",
        ));
    }
    Ok(vec![
        (
            ParamName::DistanceBetweenBends,
            depth / angle.to_radians().sin(),
        ),
        (ParamName::Shrink, depth * half_angle_tan(angle)),
    ])
}

fn derive_segmented(v: &InputValues) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let radius = v.get(ParamName::SweepRadius);
    let total = v.get(ParamName::TotalAngle);
    let count = v.get(ParamName::SegmentCount);
    Ok(vec![
        (ParamName::SegmentAngle, total / count),
        (ParamName::MarkSpacing, radius * total.to_radians() / count),
    ])
}

fn derive_compound_round(v: &InputValues) -> Result<Vec<(ParamName, f64)>, GeometricAlert> {
    let first = v.get(ParamName::FirstAngle);
    let spread = v.get(ParamName::Spread);
    Ok(vec![
        (ParamName::SecondAngle, 90.0 - first),
        (ParamName::SpreadRise, spread * first.to_radians().sin()),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Centerline plans
// ─────────────────────────────────────────────────────────────────────────────

fn run(length: f64) -> Primitive {
    Primitive::Run { length }
}

fn pitch_arc(sweep_degrees: f64, radius: f64, marks: MarkEmit) -> Primitive {
    Primitive::Arc {
        plane: ArcPlane::Pitch,
        sweep_degrees,
        radius,
        marks,
    }
}

fn yaw_arc(sweep_degrees: f64, radius: f64, marks: MarkEmit) -> Primitive {
    Primitive::Arc {
        plane: ArcPlane::Yaw,
        sweep_degrees,
        radius,
        marks,
    }
}

fn plan_stub_up(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<CenterlinePlan, GeometricAlert> {
    let stub = v.get(ParamName::StubHeight);
    let radius = config.bend_radius;
    if stub <= radius {
        return Err(GeometricAlert::new(
            "stub height does not clear the bender take-up",
        ));
    }
    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            pitch_arc(90.0, radius, MarkEmit::StartEnd),
            run(stub - radius),
        ],
    })
}

/// Shared by Offset and ParallelOffset: the parallel runs differ only in
/// derived outputs, not in the rendered path.
fn plan_offset(v: &InputValues, config: &EngineConfig) -> Result<CenterlinePlan, GeometricAlert> {
    let offset = v.get(ParamName::OffsetHeight);
    let angle = v.get(ParamName::BendAngle);
    offset_plan_primitives(offset, angle, config, None)
}

fn plan_rolled_offset(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<CenterlinePlan, GeometricAlert> {
    let rise = v.get(ParamName::Rise);
    let roll = v.get(ParamName::Roll);
    let angle = v.get(ParamName::BendAngle);

    let total = rise.hypot(roll);
    if total <= 0.0 {
        return Err(GeometricAlert::new("rise and roll are both zero"));
    }
    let roll_angle = roll.atan2(rise).to_degrees();
    offset_plan_primitives(total, angle, config, Some(roll_angle))
}

fn offset_plan_primitives(
    offset: f64,
    angle: f64,
    config: &EngineConfig,
    roll_degrees: Option<f64>,
) -> Result<CenterlinePlan, GeometricAlert> {
    let radius = config.bend_radius;
    let Some(mid_run) = offset_mid_run(offset, angle, radius) else {
        return Err(GeometricAlert::new(
            "offset height is too small for the bend radius",
        ));
    };

    let mut primitives = Vec::with_capacity(6);
    if let Some(roll) = roll_degrees {
        primitives.push(Primitive::Roll { angle_degrees: roll });
    }
    primitives.extend([
        run(config.leg_length),
        pitch_arc(angle, radius, MarkEmit::StartEnd),
        run(mid_run),
        pitch_arc(-angle, radius, MarkEmit::StartEnd),
        run(config.leg_length),
    ]);
    Ok(CenterlinePlan { primitives })
}

fn plan_parallel_kick(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<CenterlinePlan, GeometricAlert> {
    let kick_angle = v.get(ParamName::KickAngle);
    let travel = v.get(ParamName::KickTravel);
    let radius = config.bend_radius;

    // The kick swings sideways out of the 90's bend plane, so the kicked
    // leg and the stub can slide independently when animated.
    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            yaw_arc(kick_angle, radius, MarkEmit::StartEnd),
            run(travel),
            pitch_arc(90.0, radius, MarkEmit::StartEnd),
            run(config.leg_length),
        ],
    })
}

fn plan_compound_round(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<CenterlinePlan, GeometricAlert> {
    let first = v.get(ParamName::FirstAngle);
    let spread = v.get(ParamName::Spread);
    let radius = config.bend_radius;

    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            pitch_arc(first, radius, MarkEmit::StartEnd),
            run(spread),
            pitch_arc(90.0 - first, radius, MarkEmit::StartEnd),
            run(config.leg_length),
        ],
    })
}

fn plan_saddle3(v: &InputValues, config: &EngineConfig) -> Result<CenterlinePlan, GeometricAlert> {
    let depth = v.get(ParamName::SaddleDepth);
    let center_angle = v.get(ParamName::CenterAngle);
    let side_angle = center_angle / 2.0;
    let radius = config.bend_radius;

    let Some(side_run) = offset_mid_run(depth, side_angle, radius) else {
        return Err(GeometricAlert::new(
            "saddle depth is too small for the bend radius",
        ));
    };

    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            pitch_arc(side_angle, radius, MarkEmit::StartEnd),
            run(side_run),
            pitch_arc(-center_angle, radius, MarkEmit::StartEnd),
            run(side_run),
            pitch_arc(side_angle, radius, MarkEmit::StartEnd),
            run(config.leg_length),
        ],
    })
}

fn plan_saddle4(v: &InputValues, config: &EngineConfig) -> Result<CenterlinePlan, GeometricAlert> {
    let depth = v.get(ParamName::SaddleDepth);
    let angle = v.get(ParamName::BendAngle);
    let width = v.get(ParamName::ObstacleWidth);
    let radius = config.bend_radius;

    let Some(rise_run) = offset_mid_run(depth, angle, radius) else {
        return Err(GeometricAlert::new(
            "saddle depth is too small for the bend radius",
        ));
    };

    // The trailing two bends emit Start marks only: positions 2 and 4 of
    // the mark sequence are both Start. Observed layout, kept as-is.
    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            pitch_arc(angle, radius, MarkEmit::StartEnd),
            run(rise_run),
            pitch_arc(-angle, radius, MarkEmit::StartEnd),
            run(width),
            pitch_arc(-angle, radius, MarkEmit::StartOnly),
            run(rise_run),
            pitch_arc(angle, radius, MarkEmit::StartOnly),
            run(config.leg_length),
        ],
    })
}

fn plan_segmented(
    v: &InputValues,
    config: &EngineConfig,
) -> Result<CenterlinePlan, GeometricAlert> {
    let radius = v.get(ParamName::SweepRadius);
    let total = v.get(ParamName::TotalAngle);

    Ok(CenterlinePlan {
        primitives: vec![
            run(config.leg_length),
            pitch_arc(total, radius, MarkEmit::StartEnd),
            run(config.leg_length),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bend::params::ParamName;

    fn inputs_for(variant: BendVariant) -> Vec<Parameter> {
        variant.schema().iter().map(ParamSpec::instantiate).collect()
    }

    fn set(inputs: &mut [Parameter], name: ParamName, value: f64) {
        inputs
            .iter_mut()
            .find(|p| p.name == name)
            .expect("input present")
            .value = value;
    }

    fn derived(pairs: &[(ParamName, f64)], name: ParamName) -> f64 {
        pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .expect("output present")
    }

    #[test]
    fn variant_names_round_trip() {
        for variant in BendVariant::ALL {
            assert_eq!(BendVariant::from_str(variant.name()), Some(*variant));
        }
        assert_eq!(BendVariant::from_str("FreeformBend"), None);
    }

    #[test]
    fn parallel_kick_uses_half_angle_shift() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::ParallelKick);
        set(&mut inputs, ParamName::Spacing, 0.3);
        set(&mut inputs, ParamName::KickAngle, 30.0);

        let outputs = BendVariant::ParallelKick.derive(&inputs, &config).unwrap();
        let shift = derived(&outputs, ParamName::Shift);
        let expected = 0.3 * (15.0_f64).to_radians().tan() * 2.0;
        assert!((shift - expected).abs() < 1e-12);

        let spread = derived(&outputs, ParamName::KickSpread);
        assert!((spread - 0.3 / (30.0_f64).to_radians().cos()).abs() < 1e-12);
    }

    #[test]
    fn offset_distance_matches_cosecant_rule() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::Offset);
        set(&mut inputs, ParamName::OffsetHeight, 0.2);
        set(&mut inputs, ParamName::BendAngle, 30.0);

        let outputs = BendVariant::Offset.derive(&inputs, &config).unwrap();
        let distance = derived(&outputs, ParamName::DistanceBetweenBends);
        assert!((distance - 0.2 / (30.0_f64).to_radians().sin()).abs() < 1e-12);
        let shrink = derived(&outputs, ParamName::Shrink);
        assert!((shrink - 0.2 * (15.0_f64).to_radians().tan()).abs() < 1e-12);
    }

    #[test]
    fn offset_alerts_when_rise_cannot_clear_the_radius() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::Offset);
        // With R = 0.1 and a 30° bend, each arc rises ~0.0134; a 5 mm
        // offset is unreachable.
        set(&mut inputs, ParamName::OffsetHeight, 0.005);
        set(&mut inputs, ParamName::BendAngle, 30.0);

        assert!(BendVariant::Offset.derive(&inputs, &config).is_err());
        assert!(BendVariant::Offset.plan(&inputs, &config).is_err());
    }

    #[test]
    fn rolled_offset_with_zero_roll_is_not_degenerate() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::RolledOffset);
        set(&mut inputs, ParamName::Rise, 0.15);
        set(&mut inputs, ParamName::Roll, 0.0);

        let outputs = BendVariant::RolledOffset.derive(&inputs, &config).unwrap();
        assert_eq!(derived(&outputs, ParamName::RollAngleDegrees), 0.0);
        assert_eq!(derived(&outputs, ParamName::TotalOffset), 0.15);
    }

    #[test]
    fn rolled_offset_with_zero_rise_and_roll_alerts() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::RolledOffset);
        set(&mut inputs, ParamName::Rise, 0.0);
        set(&mut inputs, ParamName::Roll, 0.0);

        assert!(BendVariant::RolledOffset.derive(&inputs, &config).is_err());
    }

    #[test]
    fn rolled_offset_roll_angle_is_signed_from_components() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::RolledOffset);
        set(&mut inputs, ParamName::Rise, 0.1);
        set(&mut inputs, ParamName::Roll, 0.1);

        let outputs = BendVariant::RolledOffset.derive(&inputs, &config).unwrap();
        assert!((derived(&outputs, ParamName::RollAngleDegrees) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn segmented_splits_the_sweep_evenly() {
        let config = EngineConfig::default();
        let inputs = inputs_for(BendVariant::Segmented);

        let outputs = BendVariant::Segmented.derive(&inputs, &config).unwrap();
        assert_eq!(derived(&outputs, ParamName::SegmentAngle), 15.0);
        let expected = 0.5 * (90.0_f64).to_radians() / 6.0;
        assert!((derived(&outputs, ParamName::MarkSpacing) - expected).abs() < 1e-12);
    }

    #[test]
    fn compound_round_angles_sum_to_ninety() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::CompoundRound);
        set(&mut inputs, ParamName::FirstAngle, 30.0);

        let outputs = BendVariant::CompoundRound.derive(&inputs, &config).unwrap();
        assert_eq!(derived(&outputs, ParamName::SecondAngle), 60.0);
    }

    #[test]
    fn saddle3_arrow_method_shifts_the_center_mark() {
        let config = EngineConfig::default();
        let mut inputs = inputs_for(BendVariant::Saddle3);

        let notch = BendVariant::Saddle3.derive(&inputs, &config).unwrap();
        assert_eq!(derived(&notch, ParamName::CenterMarkAdjust), 0.0);

        set(&mut inputs, ParamName::MarkMethod, MARK_METHOD_ARROW);
        let arrow = BendVariant::Saddle3.derive(&inputs, &config).unwrap();
        let expected = config.bend_radius * (45.0_f64).to_radians() / 2.0;
        assert!((derived(&arrow, ParamName::CenterMarkAdjust) - expected).abs() < 1e-12);
    }

    #[test]
    fn derivation_is_idempotent() {
        let config = EngineConfig::default();
        for variant in BendVariant::ALL {
            let inputs = inputs_for(*variant);
            let first = variant.derive(&inputs, &config).unwrap();
            let second = variant.derive(&inputs, &config).unwrap();
            assert_eq!(first, second, "{variant} derivation must be pure");
        }
    }

    #[test]
    fn every_variant_defaults_derive_cleanly() {
        let config = EngineConfig::default();
        for variant in BendVariant::ALL {
            let inputs = inputs_for(*variant);
            let outputs = variant.derive(&inputs, &config).unwrap();
            let names: Vec<ParamName> = outputs.iter().map(|(n, _)| *n).collect();
            assert_eq!(names, variant.output_names(), "{variant} output order");
            assert!(variant.plan(&inputs, &config).is_ok(), "{variant} plan");
        }
    }
}
