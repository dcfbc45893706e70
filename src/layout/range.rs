use super::PortRange;
use crate::ir::PortEntry;

/// Partition sorted entries into collapsed ranges and leftover singletons.
///
/// A range is a run of consecutive port values (gap of exactly 1) published
/// by the same owner, at least `min_run_length` long. Shorter runs stay
/// individual dots. Consumption is tracked per sorted index so the sweep
/// stays a pure function of its input.
pub(super) fn detect_ranges(
    entries: &[PortEntry],
    min_run_length: u32,
) -> (Vec<PortRange>, Vec<PortEntry>) {
    let mut sorted: Vec<PortEntry> = entries.to_vec();
    sorted.sort_by_key(|entry| entry.port);

    let mut consumed = vec![false; sorted.len()];
    let mut ranges = Vec::new();

    let mut i = 0;
    while i < sorted.len() {
        if consumed[i] {
            i += 1;
            continue;
        }
        let start = &sorted[i];
        let mut end_idx = i;
        while end_idx + 1 < sorted.len()
            && sorted[end_idx + 1].owner_id == start.owner_id
            && sorted[end_idx + 1].port == sorted[end_idx].port + 1
        {
            end_idx += 1;
        }

        let run_length = (end_idx - i + 1) as u32;
        if run_length >= min_run_length.max(1) {
            let end = &sorted[end_idx];
            ranges.push(PortRange {
                start: start.port,
                end: end.port,
                owner_id: start.owner_id.clone(),
                owner_label: start.owner_label.clone(),
                owner_image: start.owner_image.clone(),
                count: run_length,
            });
            for flag in consumed.iter_mut().take(end_idx + 1).skip(i) {
                *flag = true;
            }
            i = end_idx + 1;
        } else {
            i += 1;
        }
    }

    let singletons = sorted
        .into_iter()
        .zip(consumed)
        .filter(|(_, used)| !used)
        .map(|(entry, _)| entry)
        .collect();

    (ranges, singletons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(port: u32, owner: &str) -> PortEntry {
        PortEntry {
            port,
            owner_id: owner.to_string(),
            owner_label: owner.to_string(),
            owner_image: format!("{owner}:latest"),
        }
    }

    #[test]
    fn three_consecutive_same_owner_collapse() {
        let entries = vec![entry(80, "web"), entry(81, "web"), entry(82, "web")];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start, 80);
        assert_eq!(ranges[0].end, 82);
        assert_eq!(ranges[0].count, 3);
        assert!(singletons.is_empty());
    }

    #[test]
    fn pair_stays_singletons() {
        let entries = vec![entry(80, "web"), entry(81, "web")];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert!(ranges.is_empty());
        assert_eq!(singletons.len(), 2);
    }

    #[test]
    fn owner_change_splits_consecutive_run() {
        let entries = vec![
            entry(80, "web"),
            entry(81, "web"),
            entry(82, "db"),
            entry(83, "db"),
        ];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert!(ranges.is_empty());
        assert_eq!(singletons.len(), 4);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let entries = vec![
            entry(7002, "cache"),
            entry(7000, "cache"),
            entry(9090, "metrics"),
            entry(7001, "cache"),
        ];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert_eq!(ranges.len(), 1);
        assert_eq!((ranges[0].start, ranges[0].end), (7000, 7002));
        assert_eq!(singletons.len(), 1);
        assert_eq!(singletons[0].port, 9090);
    }

    #[test]
    fn gap_interrupts_run() {
        let entries = vec![
            entry(5000, "app"),
            entry(5001, "app"),
            entry(5003, "app"),
            entry(5004, "app"),
        ];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert!(ranges.is_empty());
        assert_eq!(singletons.len(), 4);
    }

    #[test]
    fn run_after_gap_still_collapses() {
        let entries = vec![
            entry(5000, "app"),
            entry(5002, "app"),
            entry(5003, "app"),
            entry(5004, "app"),
        ];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        assert_eq!(ranges.len(), 1);
        assert_eq!((ranges[0].start, ranges[0].end), (5002, 5004));
        assert_eq!(singletons.len(), 1);
        assert_eq!(singletons[0].port, 5000);
    }

    #[test]
    fn every_entry_lands_in_exactly_one_bucket() {
        let entries = vec![
            entry(80, "web"),
            entry(81, "web"),
            entry(82, "web"),
            entry(443, "web"),
            entry(5432, "db"),
            entry(5433, "db"),
            entry(8000, "api"),
            entry(8001, "api"),
            entry(8002, "api"),
            entry(8003, "api"),
        ];
        let (ranges, singletons) = detect_ranges(&entries, 3);
        let ranged: u32 = ranges.iter().map(|r| r.count).sum();
        assert_eq!(ranged as usize + singletons.len(), entries.len());
        for range in &ranges {
            for port in range.start..=range.end {
                assert!(entries.iter().any(|e| e.port == port));
                assert!(!singletons.iter().any(|s| s.port == port));
            }
        }
    }

    #[test]
    fn singletons_keep_ascending_order() {
        let entries = vec![entry(9000, "a"), entry(80, "b"), entry(443, "c")];
        let (_, singletons) = detect_ranges(&entries, 3);
        let ports: Vec<u32> = singletons.iter().map(|s| s.port).collect();
        assert_eq!(ports, vec![80, 443, 9000]);
    }
}
