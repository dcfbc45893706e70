mod collision;
mod geometry;
mod range;
mod scale;
pub(crate) mod types;

pub use types::*;

pub use scale::round_up;

use crate::config::LayoutConfig;
use crate::ir::{Dataset, Orientation};

/// Run the full pipeline: scale selection, range detection, collision
/// resolution, geometry emission. Pure function of its arguments; the
/// caller validates the dataset first (`Dataset::validate`).
pub fn compute_layout(
    dataset: &Dataset,
    orientation: Orientation,
    config: &LayoutConfig,
) -> Layout {
    let mut scale = scale::compute_axis_scale(dataset.effective_max(), config.max_ticks);
    if dataset.ports.is_empty() {
        // Empty-state output keeps only the boundary markers.
        scale.ticks.clear();
    }

    let (ranges, singletons) = range::detect_ranges(&dataset.ports, config.min_run_length);
    let placements = collision::resolve_collisions(singletons, &scale, config);
    let instructions = geometry::emit_geometry(&scale, &ranges, &placements, orientation, config);

    Layout {
        orientation,
        scale,
        ranges,
        singletons: placements,
        instructions,
    }
}
