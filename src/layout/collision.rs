use super::{AxisScale, ConnectorDirection, SingletonPlacement};
use crate::config::LayoutConfig;
use crate::ir::PortEntry;

/// Assign each singleton a connector direction and stacking tier from its
/// axis distance to the previous singleton.
///
/// Near-duplicates flip to the origin side of the axis (one shared tier, so
/// the stack never grows unbounded); moderately close neighbors cycle
/// through the away-side tiers; anything further apart sits at the base
/// tier since there is no collision to resolve.
pub(super) fn resolve_collisions(
    singletons: Vec<PortEntry>,
    scale: &AxisScale,
    config: &LayoutConfig,
) -> Vec<SingletonPlacement> {
    let tier_count = config.tier_offsets.len().max(1) as u8;
    let mut placements: Vec<SingletonPlacement> = Vec::with_capacity(singletons.len());

    for entry in singletons {
        let position = scale.position(entry.port);
        let mut direction = ConnectorDirection::AwayFromOrigin;
        let mut tier = 0u8;

        if let Some(prev) = placements.last() {
            let distance = (position - prev.position).abs();
            if distance < config.near_threshold {
                direction = ConnectorDirection::TowardOrigin;
            } else if distance < config.crowd_threshold
                && prev.direction == ConnectorDirection::AwayFromOrigin
            {
                tier = (prev.tier + 1) % tier_count;
            }
        }

        placements.push(SingletonPlacement {
            entry,
            position,
            direction,
            tier,
        });
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(port: u32) -> PortEntry {
        PortEntry {
            port,
            owner_id: "svc".to_string(),
            owner_label: "svc".to_string(),
            owner_image: "svc:latest".to_string(),
        }
    }

    fn resolve(ports: &[u32], ceiling: u32) -> Vec<SingletonPlacement> {
        let scale = AxisScale {
            ceiling,
            ticks: Vec::new(),
        };
        resolve_collisions(
            ports.iter().copied().map(entry).collect(),
            &scale,
            &LayoutConfig::default(),
        )
    }

    #[test]
    fn first_singleton_anchors_away_at_base_tier() {
        let placements = resolve(&[4000], 10000);
        assert_eq!(placements[0].direction, ConnectorDirection::AwayFromOrigin);
        assert_eq!(placements[0].tier, 0);
    }

    #[test]
    fn near_duplicate_flips_toward_origin() {
        // 1000 and 1005 on a 2500 ceiling sit 0.2% apart.
        let placements = resolve(&[1000, 1005], 2500);
        assert_eq!(placements[1].direction, ConnectorDirection::TowardOrigin);
        assert_eq!(placements[1].tier, 0);
    }

    #[test]
    fn crowded_chain_cycles_tiers() {
        // 2% apart each on a 10000 ceiling: tiers cycle 0, 1, 2, then wrap.
        let placements = resolve(&[1000, 1200, 1400, 1600], 10000);
        let tiers: Vec<u8> = placements.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, vec![0, 1, 2, 0]);
        assert!(
            placements
                .iter()
                .all(|p| p.direction == ConnectorDirection::AwayFromOrigin)
        );
    }

    #[test]
    fn tier_resets_after_toward_origin_neighbor() {
        // 0.5% then 2%: the middle placement points toward the origin, so
        // the third starts over at the base tier instead of continuing the
        // cycle.
        let placements = resolve(&[1000, 1050, 1250], 10000);
        assert_eq!(placements[1].direction, ConnectorDirection::TowardOrigin);
        assert_eq!(placements[2].direction, ConnectorDirection::AwayFromOrigin);
        assert_eq!(placements[2].tier, 0);
    }

    #[test]
    fn distant_singletons_stay_at_base_tier() {
        let placements = resolve(&[1000, 2000, 5000], 10000);
        for placement in &placements {
            assert_eq!(placement.direction, ConnectorDirection::AwayFromOrigin);
            assert_eq!(placement.tier, 0);
        }
    }

    #[test]
    fn tiers_stay_in_domain() {
        let ports: Vec<u32> = (0..50).map(|i| 1000 + i * 97).collect();
        let placements = resolve(&ports, 10000);
        for placement in &placements {
            assert!(placement.tier <= 2);
            if placement.direction == ConnectorDirection::TowardOrigin {
                assert_eq!(placement.tier, 0);
            }
        }
    }
}
