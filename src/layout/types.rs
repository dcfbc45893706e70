use serde::{Deserialize, Serialize};

use crate::ir::{Orientation, PortEntry};

/// Axis scale for one layout pass: rounded-up ceiling plus interval ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScale {
    pub ceiling: u32,
    pub ticks: Vec<u32>,
}

impl AxisScale {
    /// Normalized position of a value along the axis, in percent.
    pub fn position(&self, value: u32) -> f32 {
        value as f32 / self.ceiling as f32 * 100.0
    }
}

/// A contiguous run of ports published by a single owner, collapsed into one
/// spanning bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: u32,
    pub end: u32,
    pub owner_id: String,
    pub owner_label: String,
    pub owner_image: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorDirection {
    TowardOrigin,
    AwayFromOrigin,
}

/// Placement decision for one singleton: which side of the axis its
/// connector fans out to, and at which stacking tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingletonPlacement {
    pub entry: PortEntry,
    pub position: f32,
    pub direction: ConnectorDirection,
    pub tier: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    AxisMarker,
    RangeBar,
    RangeConnector,
    RangeLabel,
    PortConnector,
    PortDot,
    PortLabel,
}

/// A coordinate or extent, either normalized along the axis or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Unit {
    Pct(f32),
    Px(f32),
}

impl Unit {
    pub fn pct(self) -> Option<f32> {
        match self {
            Unit::Pct(v) => Some(v),
            Unit::Px(_) => None,
        }
    }

    pub fn px(self) -> Option<f32> {
        match self {
            Unit::Px(v) => Some(v),
            Unit::Pct(_) => None,
        }
    }
}

/// Detail payload attached to interactive primitives so the presentation
/// layer can show it on hover without reaching back into the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverPayload {
    pub display_value: String,
    pub owner_label: String,
    pub owner_image: String,
    pub owner_id: String,
}

/// One fully positioned visual primitive. Coordinates are final for the
/// requested orientation: along the active axis they are percentages of the
/// band, across it absolute pixels (negative values sit on the origin side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryInstruction {
    pub kind: PrimitiveKind,
    pub x: Unit,
    pub y: Unit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverPayload>,
}

impl GeometryInstruction {
    /// Position along the active axis, regardless of orientation.
    pub fn along(&self) -> Option<f32> {
        match (self.x, self.y) {
            (Unit::Pct(v), _) => Some(v),
            (_, Unit::Pct(v)) => Some(v),
            _ => None,
        }
    }
}

/// Result of one full layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub orientation: Orientation,
    pub scale: AxisScale,
    pub ranges: Vec<PortRange>,
    pub singletons: Vec<SingletonPlacement>,
    pub instructions: Vec<GeometryInstruction>,
}
