//! Parameter names, domains, and the color palette.
//!
//! Every input and output of every bend variant lives in one closed
//! [`ParamName`] enum; the per-variant schemas in `variants.rs` pick from
//! it. A parameter's color is assigned from the palette once, when the
//! schema instantiates it, and never changes for the life of the instance —
//! it is the stable identity the highlight recoloring keys on.

use std::fmt;

use crate::geom::Rgba;

/// Every parameter name the engine knows, across all bend variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamName {
    // Inputs
    StubHeight,
    OffsetHeight,
    BendAngle,
    Spacing,
    KickAngle,
    KickTravel,
    Rise,
    Roll,
    SaddleDepth,
    CenterAngle,
    MarkMethod,
    ObstacleWidth,
    SweepRadius,
    TotalAngle,
    SegmentCount,
    FirstAngle,
    Spread,
    // Outputs
    TakeUp,
    MarkDistance,
    DistanceBetweenBends,
    Shrink,
    MarkOffset,
    Shift,
    KickSpread,
    TotalOffset,
    RollAngleDegrees,
    DistanceToOuterMarks,
    CenterMarkAdjust,
    SegmentAngle,
    MarkSpacing,
    SecondAngle,
    SpreadRise,
}

impl ParamName {
    pub const ALL: &'static [Self] = &[
        Self::StubHeight,
        Self::OffsetHeight,
        Self::BendAngle,
        Self::Spacing,
        Self::KickAngle,
        Self::KickTravel,
        Self::Rise,
        Self::Roll,
        Self::SaddleDepth,
        Self::CenterAngle,
        Self::MarkMethod,
        Self::ObstacleWidth,
        Self::SweepRadius,
        Self::TotalAngle,
        Self::SegmentCount,
        Self::FirstAngle,
        Self::Spread,
        Self::TakeUp,
        Self::MarkDistance,
        Self::DistanceBetweenBends,
        Self::Shrink,
        Self::MarkOffset,
        Self::Shift,
        Self::KickSpread,
        Self::TotalOffset,
        Self::RollAngleDegrees,
        Self::DistanceToOuterMarks,
        Self::CenterMarkAdjust,
        Self::SegmentAngle,
        Self::MarkSpacing,
        Self::SecondAngle,
        Self::SpreadRise,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StubHeight => "StubHeight",
            Self::OffsetHeight => "OffsetHeight",
            Self::BendAngle => "BendAngle",
            Self::Spacing => "Spacing",
            Self::KickAngle => "KickAngle",
            Self::KickTravel => "KickTravel",
            Self::Rise => "Rise",
            Self::Roll => "Roll",
            Self::SaddleDepth => "SaddleDepth",
            Self::CenterAngle => "CenterAngle",
            Self::MarkMethod => "MarkMethod",
            Self::ObstacleWidth => "ObstacleWidth",
            Self::SweepRadius => "SweepRadius",
            Self::TotalAngle => "TotalAngle",
            Self::SegmentCount => "SegmentCount",
            Self::FirstAngle => "FirstAngle",
            Self::Spread => "Spread",
            Self::TakeUp => "TakeUp",
            Self::MarkDistance => "MarkDistance",
            Self::DistanceBetweenBends => "DistanceBetweenBends",
            Self::Shrink => "Shrink",
            Self::MarkOffset => "MarkOffset",
            Self::Shift => "Shift",
            Self::KickSpread => "KickSpread",
            Self::TotalOffset => "TotalOffset",
            Self::RollAngleDegrees => "RollAngleDegrees",
            Self::DistanceToOuterMarks => "DistanceToOuterMarks",
            Self::CenterMarkAdjust => "CenterMarkAdjust",
            Self::SegmentAngle => "SegmentAngle",
            Self::MarkSpacing => "MarkSpacing",
            Self::SecondAngle => "SecondAngle",
            Self::SpreadRise => "SpreadRise",
        }
    }

    #[must_use]
    pub fn from_str(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }

    /// The parameter's palette color. Stable: the same name always maps to
    /// the same color.
    #[must_use]
    pub const fn color(self) -> Rgba {
        match self {
            // Primary user-driven lengths.
            Self::StubHeight | Self::OffsetHeight | Self::SaddleDepth | Self::Rise => {
                palette::AMBER
            }
            // Angles.
            Self::BendAngle
            | Self::KickAngle
            | Self::CenterAngle
            | Self::TotalAngle
            | Self::FirstAngle => palette::CYAN,
            // Cross-conduit spacing family.
            Self::Spacing | Self::ObstacleWidth | Self::Spread => palette::VIOLET,
            Self::Roll | Self::RollAngleDegrees => palette::MAGENTA,
            Self::KickTravel | Self::SweepRadius => palette::TEAL,
            Self::MarkMethod | Self::SegmentCount => palette::SLATE,
            // Derived distances along the conduit.
            Self::DistanceBetweenBends | Self::DistanceToOuterMarks | Self::MarkSpacing => {
                palette::GREEN
            }
            Self::MarkDistance | Self::MarkOffset | Self::CenterMarkAdjust => palette::LIME,
            Self::Shrink | Self::TakeUp => palette::RED,
            Self::Shift | Self::KickSpread | Self::TotalOffset | Self::SpreadRise => {
                palette::ORANGE
            }
            Self::SegmentAngle | Self::SecondAngle => palette::BLUE,
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed parameter palette.
pub mod palette {
    use crate::geom::Rgba;

    pub const AMBER: Rgba = Rgba::rgb(1.0, 0.76, 0.03);
    pub const CYAN: Rgba = Rgba::rgb(0.0, 0.74, 0.83);
    pub const VIOLET: Rgba = Rgba::rgb(0.48, 0.4, 0.93);
    pub const MAGENTA: Rgba = Rgba::rgb(0.85, 0.11, 0.51);
    pub const TEAL: Rgba = Rgba::rgb(0.0, 0.59, 0.53);
    pub const SLATE: Rgba = Rgba::rgb(0.47, 0.53, 0.6);
    pub const GREEN: Rgba = Rgba::rgb(0.3, 0.69, 0.31);
    pub const LIME: Rgba = Rgba::rgb(0.68, 0.84, 0.28);
    pub const RED: Rgba = Rgba::rgb(0.9, 0.22, 0.21);
    pub const ORANGE: Rgba = Rgba::rgb(0.96, 0.49, 0.0);
    pub const BLUE: Rgba = Rgba::rgb(0.13, 0.59, 0.95);

    /// Default conduit material color (unhighlighted vertices).
    pub const CONDUIT: Rgba = Rgba::rgb(0.62, 0.64, 0.67);
}

/// Validation domain of an input parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDomain {
    /// Length ≥ 0.
    Length,
    /// Length > 0.
    PositiveLength,
    /// Angle in degrees, `min_deg < value <= max_deg` (both below 180°).
    Angle { min_deg: f64, max_deg: f64 },
    /// Integral count, `min <= value <= max`.
    Count { min: u32, max: u32 },
    /// Integral choice among `options` values, `0 <= value < options`.
    Choice { options: u32 },
}

impl ParamDomain {
    #[must_use]
    pub fn validate(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::Length => value >= 0.0,
            Self::PositiveLength => value > 0.0,
            Self::Angle { min_deg, max_deg } => value > min_deg && value <= max_deg,
            Self::Count { min, max } => {
                value.fract() == 0.0 && value >= f64::from(min) && value <= f64::from(max)
            }
            Self::Choice { options } => value.fract() == 0.0 && value >= 0.0 && value < f64::from(options),
        }
    }
}

impl fmt::Display for ParamDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "length >= 0"),
            Self::PositiveLength => write!(f, "length > 0"),
            Self::Angle { min_deg, max_deg } => {
                write!(f, "angle in ({min_deg}°, {max_deg}°]")
            }
            Self::Count { min, max } => write!(f, "integer count in [{min}, {max}]"),
            Self::Choice { options } => write!(f, "choice in [0, {})", options),
        }
    }
}

/// Schema entry: one input parameter of a variant, with its domain and the
/// default value a fresh instance starts from.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: ParamName,
    pub domain: ParamDomain,
    pub default: f64,
}

impl ParamSpec {
    #[must_use]
    pub const fn new(name: ParamName, domain: ParamDomain, default: f64) -> Self {
        Self { name, domain, default }
    }

    /// Instantiate the parameter this spec describes.
    #[must_use]
    pub fn instantiate(&self) -> Parameter {
        Parameter {
            name: self.name,
            value: self.default,
            color: self.name.color(),
            enabled: true,
        }
    }
}

/// A named, colored value on a bend instance. Inputs are set externally;
/// outputs are derived by `recompute()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    pub name: ParamName,
    pub value: f64,
    pub color: Rgba,
    pub enabled: bool,
}

/// Errors surfaced by the parameter model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParamError {
    /// The name is not part of the active variant's schema. Programming
    /// error; fails loudly, optionally with a nearest-name suggestion.
    #[error("parameter `{name}` is not part of the {variant} schema{suggestion}")]
    UnknownParameter {
        name: String,
        variant: &'static str,
        suggestion: String,
    },
    /// The value falls outside the parameter's domain. Recoverable: the
    /// caller rejects the edit and keeps the prior value.
    #[error("value {value} is out of domain for `{name}`: expected {domain}")]
    InvalidValue {
        name: &'static str,
        value: f64,
        domain: ParamDomain,
    },
    /// An output was read after an input edit without `recompute()`.
    #[error("outputs are stale; recompute() must run after an input edit")]
    StaleOutputs,
    /// An output was read while a geometric alert suppresses derivation.
    #[error("outputs are undefined while a geometric alert is active: {alert}")]
    OutputsUnavailable { alert: String },
}

impl ParamError {
    /// Build an `UnknownParameter` with a "did you mean" hint against the
    /// given candidate names.
    #[must_use]
    pub fn unknown(name: &str, variant: &'static str, candidates: &[ParamName]) -> Self {
        let suggestion = nearest_name(name, candidates)
            .map(|best| format!(" (did you mean `{best}`?)"))
            .unwrap_or_default();
        Self::UnknownParameter {
            name: name.to_owned(),
            variant,
            suggestion,
        }
    }
}

/// Closest candidate by edit distance, if any is close enough to be a
/// plausible typo.
fn nearest_name(name: &str, candidates: &[ParamName]) -> Option<&'static str> {
    candidates
        .iter()
        .map(|p| (levenshtein::levenshtein(name, p.as_str()), p.as_str()))
        .min()
        .filter(|(distance, best)| *distance <= best.len() / 2)
        .map(|(_, best)| best)
}
