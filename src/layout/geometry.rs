use super::{
    AxisScale, ConnectorDirection, GeometryInstruction, HoverPayload, PortRange, PrimitiveKind,
    SingletonPlacement, Unit,
};
use crate::config::LayoutConfig;
use crate::ir::Orientation;

/// Build one positioned primitive. `along` is the normalized position on the
/// active axis, `cross` the absolute offset across it; `span`/`extent` are
/// the matching sizes. Horizontal layouts map along->x, vertical layouts
/// mirror the roles.
fn place(
    orientation: Orientation,
    kind: PrimitiveKind,
    along: f32,
    cross: f32,
    span: Option<f32>,
    extent: Option<f32>,
    label: Option<String>,
    hover: Option<HoverPayload>,
) -> GeometryInstruction {
    let (x, y) = match orientation {
        Orientation::Horizontal => (Unit::Pct(along), Unit::Px(cross)),
        Orientation::Vertical => (Unit::Px(cross), Unit::Pct(along)),
    };
    let (width, height) = match orientation {
        Orientation::Horizontal => (span.map(Unit::Pct), extent.map(Unit::Px)),
        Orientation::Vertical => (extent.map(Unit::Px), span.map(Unit::Pct)),
    };
    GeometryInstruction {
        kind,
        x,
        y,
        width,
        height,
        label,
        hover,
    }
}

fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn range_hover(range: &PortRange) -> HoverPayload {
    HoverPayload {
        display_value: format!("{}-{} ({} ports)", range.start, range.end, range.count),
        owner_label: range.owner_label.clone(),
        owner_image: range.owner_image.clone(),
        owner_id: range.owner_id.clone(),
    }
}

fn singleton_hover(placement: &SingletonPlacement) -> HoverPayload {
    HoverPayload {
        display_value: placement.entry.port.to_string(),
        owner_label: placement.entry.owner_label.clone(),
        owner_image: placement.entry.owner_image.clone(),
        owner_id: placement.entry.owner_id.clone(),
    }
}

pub(super) fn emit_geometry(
    scale: &AxisScale,
    ranges: &[PortRange],
    singletons: &[SingletonPlacement],
    orientation: Orientation,
    config: &LayoutConfig,
) -> Vec<GeometryInstruction> {
    let mut out = Vec::new();

    out.push(place(
        orientation,
        PrimitiveKind::AxisMarker,
        0.0,
        0.0,
        None,
        None,
        Some("0".to_string()),
        None,
    ));
    for &tick in &scale.ticks {
        out.push(place(
            orientation,
            PrimitiveKind::AxisMarker,
            scale.position(tick),
            0.0,
            None,
            None,
            Some(format_thousands(tick)),
            None,
        ));
    }
    out.push(place(
        orientation,
        PrimitiveKind::AxisMarker,
        100.0,
        0.0,
        None,
        None,
        Some(format_thousands(scale.ceiling)),
        None,
    ));

    for range in ranges {
        let start_pos = scale.position(range.start);
        let end_pos = scale.position(range.end);
        let center_pos = (start_pos + end_pos) / 2.0;
        let hover = range_hover(range);

        for pos in [start_pos, end_pos] {
            out.push(place(
                orientation,
                PrimitiveKind::RangeConnector,
                pos,
                0.0,
                None,
                Some(config.range_connector_length),
                None,
                Some(hover.clone()),
            ));
        }
        out.push(place(
            orientation,
            PrimitiveKind::RangeBar,
            start_pos - config.range_bar_pad,
            config.range_bar_offset,
            Some(end_pos - start_pos + config.range_bar_pad * 2.0),
            Some(config.range_bar_thickness),
            None,
            Some(hover.clone()),
        ));
        out.push(place(
            orientation,
            PrimitiveKind::RangeLabel,
            center_pos,
            config.range_label_offset,
            None,
            None,
            Some(format!("{}-{}", range.start, range.end)),
            None,
        ));
    }

    for placement in singletons {
        let (connector_cross, connector_length, dot_cross, label_cross) =
            match placement.direction {
                ConnectorDirection::TowardOrigin => {
                    // All toward-origin placements share the base tier.
                    let len = config.tier_offsets[0];
                    (-len, len, -len, -(len + config.label_gap))
                }
                ConnectorDirection::AwayFromOrigin => {
                    let len = config
                        .tier_offsets
                        .get(placement.tier as usize)
                        .copied()
                        .unwrap_or_else(|| config.tier_offsets[0]);
                    (0.0, len, len, len + config.label_gap)
                }
            };
        let hover = singleton_hover(placement);

        out.push(place(
            orientation,
            PrimitiveKind::PortConnector,
            placement.position,
            connector_cross,
            None,
            Some(connector_length),
            None,
            Some(hover.clone()),
        ));
        out.push(place(
            orientation,
            PrimitiveKind::PortDot,
            placement.position,
            dot_cross,
            None,
            None,
            None,
            Some(hover),
        ));
        out.push(place(
            orientation,
            PrimitiveKind::PortLabel,
            placement.position,
            label_cross,
            None,
            None,
            Some(placement.entry.port.to_string()),
            None,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PortEntry;

    fn scale() -> AxisScale {
        AxisScale {
            ceiling: 10000,
            ticks: vec![2500, 5000, 7500, 10000],
        }
    }

    fn placement(port: u32, direction: ConnectorDirection, tier: u8) -> SingletonPlacement {
        SingletonPlacement {
            entry: PortEntry {
                port,
                owner_id: "svc".to_string(),
                owner_label: "svc".to_string(),
                owner_image: "svc:latest".to_string(),
            },
            position: port as f32 / 10000.0 * 100.0,
            direction,
            tier,
        }
    }

    fn kinds(instructions: &[GeometryInstruction], kind: PrimitiveKind) -> Vec<&GeometryInstruction> {
        instructions.iter().filter(|i| i.kind == kind).collect()
    }

    fn assert_pct(unit: Unit, expected: f32) {
        let Unit::Pct(value) = unit else {
            panic!("expected percentage, got {unit:?}");
        };
        assert!((value - expected).abs() < 1e-3, "{value} != {expected}");
    }

    #[test]
    fn axis_markers_cover_bounds_and_ticks() {
        let out = emit_geometry(
            &scale(),
            &[],
            &[],
            Orientation::Horizontal,
            &LayoutConfig::default(),
        );
        let markers = kinds(&out, PrimitiveKind::AxisMarker);
        assert_eq!(markers.len(), 6);
        assert_eq!(markers[0].x, Unit::Pct(0.0));
        assert_eq!(markers[0].label.as_deref(), Some("0"));
        assert_eq!(markers[1].label.as_deref(), Some("2,500"));
        assert_eq!(markers[5].x, Unit::Pct(100.0));
        assert_eq!(markers[5].label.as_deref(), Some("10,000"));
    }

    #[test]
    fn range_primitives_use_reference_offsets() {
        let range = PortRange {
            start: 8000,
            end: 8002,
            owner_id: "api".to_string(),
            owner_label: "api".to_string(),
            owner_image: "api:latest".to_string(),
            count: 3,
        };
        let out = emit_geometry(
            &scale(),
            &[range],
            &[],
            Orientation::Horizontal,
            &LayoutConfig::default(),
        );

        let connectors = kinds(&out, PrimitiveKind::RangeConnector);
        assert_eq!(connectors.len(), 2);
        assert_pct(connectors[0].x, 80.0);
        assert_eq!(connectors[0].height, Some(Unit::Px(50.0)));

        let bar = &kinds(&out, PrimitiveKind::RangeBar)[0];
        assert_pct(bar.x, 79.0);
        assert_eq!(bar.y, Unit::Px(58.0));
        assert_pct(bar.width.unwrap(), 2.02);
        assert_eq!(
            bar.hover.as_ref().unwrap().display_value,
            "8000-8002 (3 ports)"
        );

        let label = &kinds(&out, PrimitiveKind::RangeLabel)[0];
        assert_eq!(label.y, Unit::Px(78.0));
        assert_eq!(label.label.as_deref(), Some("8000-8002"));
    }

    #[test]
    fn away_tiers_map_to_offset_table() {
        for (tier, dot, label) in [(0u8, 50.0, 70.0), (1, 90.0, 110.0), (2, 130.0, 150.0)] {
            let out = emit_geometry(
                &scale(),
                &[],
                &[placement(4000, ConnectorDirection::AwayFromOrigin, tier)],
                Orientation::Horizontal,
                &LayoutConfig::default(),
            );
            assert_eq!(kinds(&out, PrimitiveKind::PortConnector)[0].y, Unit::Px(0.0));
            assert_eq!(
                kinds(&out, PrimitiveKind::PortConnector)[0].height,
                Some(Unit::Px(dot))
            );
            assert_eq!(kinds(&out, PrimitiveKind::PortDot)[0].y, Unit::Px(dot));
            assert_eq!(kinds(&out, PrimitiveKind::PortLabel)[0].y, Unit::Px(label));
        }
    }

    #[test]
    fn toward_origin_sits_on_negative_side() {
        let out = emit_geometry(
            &scale(),
            &[],
            &[placement(4000, ConnectorDirection::TowardOrigin, 0)],
            Orientation::Horizontal,
            &LayoutConfig::default(),
        );
        assert_eq!(kinds(&out, PrimitiveKind::PortConnector)[0].y, Unit::Px(-50.0));
        assert_eq!(kinds(&out, PrimitiveKind::PortDot)[0].y, Unit::Px(-50.0));
        assert_eq!(kinds(&out, PrimitiveKind::PortLabel)[0].y, Unit::Px(-70.0));
    }

    #[test]
    fn vertical_mirrors_axis_roles() {
        let out = emit_geometry(
            &scale(),
            &[],
            &[placement(4000, ConnectorDirection::AwayFromOrigin, 1)],
            Orientation::Vertical,
            &LayoutConfig::default(),
        );
        let dot = kinds(&out, PrimitiveKind::PortDot)[0];
        assert_pct(dot.y, 40.0);
        assert_eq!(dot.x, Unit::Px(90.0));
        let connector = kinds(&out, PrimitiveKind::PortConnector)[0];
        assert_eq!(connector.width, Some(Unit::Px(90.0)));
        assert_eq!(connector.height, None);
    }
}
