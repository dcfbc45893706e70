use crate::config::RenderConfig;
use crate::ir::Orientation;
use crate::layout::{GeometryInstruction, Layout, PrimitiveKind, Unit};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const DOT_RADIUS: f32 = 5.0;
const TICK_SIZE: f32 = 6.0;

/// Resolved placement of one instruction on the canvas: position along the
/// axis in pixels, signed offset across it, and optional sizes.
struct Resolved {
    along: f32,
    cross: f32,
    span: Option<f32>,
    extent: Option<f32>,
}

fn resolve(instruction: &GeometryInstruction, axis_len: f32) -> Resolved {
    let along_pct = instruction.along().unwrap_or(0.0);
    let cross = instruction
        .x
        .px()
        .or(instruction.y.px())
        .unwrap_or(0.0);
    let span = instruction
        .width
        .and_then(Unit::pct)
        .or(instruction.height.and_then(Unit::pct))
        .map(|pct| pct / 100.0 * axis_len);
    let extent = instruction
        .width
        .and_then(Unit::px)
        .or(instruction.height.and_then(Unit::px));
    Resolved {
        along: along_pct / 100.0 * axis_len,
        cross,
        span,
        extent,
    }
}

/// Map (along, cross) to canvas (x, y) for the active orientation.
fn to_canvas(orientation: Orientation, margin: f32, along: f32, cross: f32) -> (f32, f32) {
    match orientation {
        Orientation::Horizontal => (margin + along, margin + cross),
        Orientation::Vertical => (margin + cross, margin + along),
    }
}

pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let width = config.width.max(200.0);
    let height = config.height.max(200.0);
    let margin = config.margin;
    let axis_len = match layout.orientation {
        Orientation::Horizontal => width - margin * 2.0,
        Orientation::Vertical => height - margin * 2.0,
    }
    .max(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    // Axis line for the band itself; the instruction list only carries the
    // primitives placed on it.
    let (x1, y1) = to_canvas(layout.orientation, margin, 0.0, 0.0);
    let (x2, y2) = to_canvas(layout.orientation, margin, axis_len, 0.0);
    svg.push_str(&format!(
        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"2\"/>",
        theme.axis_color
    ));

    for instruction in &layout.instructions {
        let resolved = resolve(instruction, axis_len);
        match instruction.kind {
            PrimitiveKind::AxisMarker => {
                svg.push_str(&axis_marker_svg(layout.orientation, margin, &resolved, instruction, theme));
            }
            PrimitiveKind::RangeConnector | PrimitiveKind::PortConnector => {
                let color = match instruction.kind {
                    PrimitiveKind::RangeConnector => &theme.range_bar_color,
                    _ => &theme.connector_color,
                };
                let length = resolved.extent.unwrap_or(0.0);
                let (ax, ay) = to_canvas(layout.orientation, margin, resolved.along, resolved.cross);
                let (bx, by) =
                    to_canvas(layout.orientation, margin, resolved.along, resolved.cross + length);
                svg.push_str(&format!(
                    "<line x1=\"{ax:.2}\" y1=\"{ay:.2}\" x2=\"{bx:.2}\" y2=\"{by:.2}\" stroke=\"{color}\" stroke-width=\"1.5\">",
                ));
                svg.push_str(&hover_title(instruction));
                svg.push_str("</line>");
            }
            PrimitiveKind::RangeBar => {
                let span = resolved.span.unwrap_or(0.0);
                let thickness = resolved.extent.unwrap_or(0.0);
                let (x, y) = to_canvas(layout.orientation, margin, resolved.along, resolved.cross);
                let (w, h) = match layout.orientation {
                    Orientation::Horizontal => (span, thickness),
                    Orientation::Vertical => (thickness, span),
                };
                svg.push_str(&format!(
                    "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\">",
                    theme.range_bar_color
                ));
                svg.push_str(&hover_title(instruction));
                svg.push_str("</rect>");
            }
            PrimitiveKind::PortDot => {
                let (cx, cy) = to_canvas(layout.orientation, margin, resolved.along, resolved.cross);
                svg.push_str(&format!(
                    "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{DOT_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\">",
                    theme.dot_color, theme.dot_border_color
                ));
                svg.push_str(&hover_title(instruction));
                svg.push_str("</circle>");
            }
            PrimitiveKind::RangeLabel | PrimitiveKind::PortLabel => {
                let color = match instruction.kind {
                    PrimitiveKind::RangeLabel => &theme.range_label_color,
                    _ => &theme.label_color,
                };
                if let Some(label) = instruction.label.as_deref() {
                    svg.push_str(&text_svg(
                        layout.orientation,
                        margin,
                        &resolved,
                        label,
                        color,
                        theme,
                    ));
                }
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// SVG-native tooltip carrying the hover payload of an interactive
/// primitive.
fn hover_title(instruction: &GeometryInstruction) -> String {
    let Some(hover) = instruction.hover.as_ref() else {
        return String::new();
    };
    format!(
        "<title>{}: {} ({})</title>",
        escape_xml(&hover.display_value),
        escape_xml(&hover.owner_label),
        escape_xml(&hover.owner_image)
    )
}

fn axis_marker_svg(
    orientation: Orientation,
    margin: f32,
    resolved: &Resolved,
    instruction: &GeometryInstruction,
    theme: &Theme,
) -> String {
    let edge = instruction
        .along()
        .is_some_and(|pct| pct == 0.0 || pct == 100.0);
    let color = if edge {
        &theme.edge_marker_color
    } else {
        &theme.marker_color
    };
    let (ax, ay) = to_canvas(orientation, margin, resolved.along, -TICK_SIZE);
    let (bx, by) = to_canvas(orientation, margin, resolved.along, TICK_SIZE);
    let mut out = format!(
        "<line x1=\"{ax:.2}\" y1=\"{ay:.2}\" x2=\"{bx:.2}\" y2=\"{by:.2}\" stroke=\"{color}\" stroke-width=\"1.5\"/>",
    );
    if let Some(label) = instruction.label.as_deref() {
        let (x, y) = to_canvas(orientation, margin, resolved.along, -TICK_SIZE - 6.0);
        match orientation {
            Orientation::Horizontal => {
                out.push_str(&format!(
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\">{}</text>",
                    theme.font_family,
                    theme.font_size,
                    escape_xml(label)
                ));
            }
            Orientation::Vertical => {
                let y = y + theme.font_size * 0.35;
                out.push_str(&format!(
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\">{}</text>",
                    theme.font_family,
                    theme.font_size,
                    escape_xml(label)
                ));
            }
        }
    }
    out
}

fn text_svg(
    orientation: Orientation,
    margin: f32,
    resolved: &Resolved,
    label: &str,
    color: &str,
    theme: &Theme,
) -> String {
    let (x, y) = to_canvas(orientation, margin, resolved.along, resolved.cross);
    match orientation {
        Orientation::Horizontal => {
            let y = y + theme.font_size * 0.35;
            format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\">{}</text>",
                theme.font_family,
                theme.font_size,
                escape_xml(label)
            )
        }
        Orientation::Vertical => {
            let anchor = if resolved.cross < 0.0 { "end" } else { "start" };
            let y = y + theme.font_size * 0.35;
            format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\">{}</text>",
                theme.font_family,
                theme.font_size,
                escape_xml(label)
            )
        }
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
