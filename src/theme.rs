use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub axis_color: String,
    pub marker_color: String,
    pub edge_marker_color: String,
    pub connector_color: String,
    pub dot_color: String,
    pub dot_border_color: String,
    pub label_color: String,
    pub range_bar_color: String,
    pub range_label_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#0f1419".to_string(),
            axis_color: "#2d3748".to_string(),
            marker_color: "#718096".to_string(),
            edge_marker_color: "#a0aec0".to_string(),
            connector_color: "#4a5568".to_string(),
            dot_color: "#4fd1c5".to_string(),
            dot_border_color: "#0f1419".to_string(),
            label_color: "#e2e8f0".to_string(),
            range_bar_color: "#805ad5".to_string(),
            range_label_color: "#d6bcfa".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#ffffff".to_string(),
            axis_color: "#cbd5e0".to_string(),
            marker_color: "#718096".to_string(),
            edge_marker_color: "#2d3748".to_string(),
            connector_color: "#a0aec0".to_string(),
            dot_color: "#319795".to_string(),
            dot_border_color: "#ffffff".to_string(),
            label_color: "#1a202c".to_string(),
            range_bar_color: "#6b46c1".to_string(),
            range_label_color: "#553c9a".to_string(),
        }
    }
}
