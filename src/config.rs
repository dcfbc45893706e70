use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for the layout pipeline. Tests rely on the default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum length of a consecutive same-owner run before it collapses
    /// into a range bar.
    pub min_run_length: u32,
    /// Upper bound on interval tick markers along the axis.
    pub max_ticks: u32,
    /// Axis distance (percent) under which a singleton flips toward the
    /// origin side instead of stacking.
    pub near_threshold: f32,
    /// Axis distance (percent) under which away-side singletons cycle
    /// through stacking tiers.
    pub crowd_threshold: f32,
    /// Connector length / dot offset per stacking tier, in pixels.
    pub tier_offsets: Vec<f32>,
    /// Gap between a dot and its label, in pixels.
    pub label_gap: f32,
    /// Length of range boundary connectors, in pixels.
    pub range_connector_length: f32,
    /// Perpendicular offset of the range bar, in pixels.
    pub range_bar_offset: f32,
    /// Perpendicular offset of the range label, in pixels.
    pub range_label_offset: f32,
    /// How far the range bar extends past its boundary connectors on each
    /// side, in percent of the axis.
    pub range_bar_pad: f32,
    /// Thickness of the range bar, in pixels.
    pub range_bar_thickness: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_run_length: 3,
            max_ticks: 6,
            near_threshold: 1.5,
            crowd_threshold: 3.0,
            tier_offsets: vec![50.0, 90.0, 130.0],
            label_gap: 20.0,
            range_connector_length: 50.0,
            range_bar_offset: 58.0,
            range_label_offset: 78.0,
            range_bar_pad: 1.0,
            range_bar_thickness: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Margin reserved on every side of the axis band so tier-2 labels and
    /// toward-origin placements stay inside the canvas.
    pub margin: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 420.0,
            margin: 170.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    theme: Option<String>,
    layout: Option<LayoutOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Default, Deserialize)]
struct LayoutOverrides {
    min_run_length: Option<u32>,
    max_ticks: Option<u32>,
    near_threshold: Option<f32>,
    crowd_threshold: Option<f32>,
    tier_offsets: Option<Vec<f32>>,
    label_gap: Option<f32>,
    range_connector_length: Option<f32>,
    range_bar_offset: Option<f32>,
    range_label_offset: Option<f32>,
    range_bar_pad: Option<f32>,
    range_bar_thickness: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderOverrides {
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
}

/// Load a config file (json5, so comments and trailing commas are fine) on
/// top of the defaults. `None` returns the defaults untouched.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "light" => config.theme = Theme::light(),
            "dark" => config.theme = Theme::dark(),
            other => anyhow::bail!("unknown theme '{other}' (expected 'light' or 'dark')"),
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.min_run_length {
            target.min_run_length = v;
        }
        if let Some(v) = layout.max_ticks {
            target.max_ticks = v;
        }
        if let Some(v) = layout.near_threshold {
            target.near_threshold = v;
        }
        if let Some(v) = layout.crowd_threshold {
            target.crowd_threshold = v;
        }
        if let Some(v) = layout.tier_offsets {
            if !v.is_empty() {
                target.tier_offsets = v;
            }
        }
        if let Some(v) = layout.label_gap {
            target.label_gap = v;
        }
        if let Some(v) = layout.range_connector_length {
            target.range_connector_length = v;
        }
        if let Some(v) = layout.range_bar_offset {
            target.range_bar_offset = v;
        }
        if let Some(v) = layout.range_label_offset {
            target.range_label_offset = v;
        }
        if let Some(v) = layout.range_bar_pad {
            target.range_bar_pad = v;
        }
        if let Some(v) = layout.range_bar_thickness {
            target.range_bar_thickness = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.margin {
            config.render.margin = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tables() {
        let config = LayoutConfig::default();
        assert_eq!(config.min_run_length, 3);
        assert_eq!(config.tier_offsets, vec![50.0, 90.0, 130.0]);
        assert_eq!(config.near_threshold, 1.5);
        assert_eq!(config.crowd_threshold, 3.0);
    }

    #[test]
    fn overrides_parse_as_json5() {
        let contents = r#"{
            // stack higher before flipping direction
            theme: "light",
            layout: { near_threshold: 2.0, tier_offsets: [40, 80, 120] },
            render: { width: 800 },
        }"#;
        let parsed: ConfigFile = json5::from_str(contents).unwrap();
        assert_eq!(parsed.theme.as_deref(), Some("light"));
        assert_eq!(parsed.layout.unwrap().near_threshold, Some(2.0));
        assert_eq!(parsed.render.unwrap().width, Some(800.0));
    }
}
