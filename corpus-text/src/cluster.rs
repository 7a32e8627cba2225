//! Clustering of intervals by the gap between neighbours.

use std::ops::Range;

/// Group items whose intervals sit close together.
///
/// Items are sorted by start offset. Each item joins the current group when
/// its start minus the previous item's end is below `max_gap`; otherwise it
/// opens a new group. Overlapping intervals count as a gap of zero.
///
/// # Arguments
/// * `items` - Items to cluster, in any order
/// * `max_gap` - Exclusive upper bound on the gap inside a group
/// * `span_of` - Returns the byte range an item covers
///
/// # Returns
/// Groups in ascending start order. Every item appears in exactly one group.
pub fn cluster_by_gap<T, F>(mut items: Vec<T>, max_gap: usize, span_of: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> Range<usize>,
{
    items.sort_by_key(|item| span_of(item).start);

    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut previous_end = 0;

    for item in items {
        let span = span_of(&item);
        if !current.is_empty() && span.start.saturating_sub(previous_end) >= max_gap {
            groups.push(std::mem::take(&mut current));
        }
        previous_end = span.end;
        current.push(item);
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn group_sizes(groups: &[Vec<Range<usize>>]) -> Vec<usize> {
        groups.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_cluster_splits_on_large_gap() {
        let items = vec![0..10, 50..60, 600..610];
        let groups = cluster_by_gap(items, 500, |r| r.clone());
        assert_eq!(group_sizes(&groups), vec![2, 1]);
        assert_eq!(groups[0], vec![0..10, 50..60]);
        assert_eq!(groups[1], vec![600..610]);
    }

    #[test]
    fn test_cluster_sorts_input() {
        let items = vec![600..610, 0..10, 50..60];
        let groups = cluster_by_gap(items, 500, |r| r.clone());
        assert_eq!(groups[0], vec![0..10, 50..60]);
    }

    #[test]
    fn test_cluster_gap_equal_to_threshold_splits() {
        let items = vec![0..10, 510..520];
        let groups = cluster_by_gap(items, 500, |r| r.clone());
        assert_eq!(group_sizes(&groups), vec![1, 1]);
    }

    #[test]
    fn test_cluster_overlap_joins() {
        let items = vec![0..100, 20..30];
        let groups = cluster_by_gap(items, 5, |r| r.clone());
        assert_eq!(group_sizes(&groups), vec![2]);
    }

    #[test]
    fn test_cluster_empty() {
        let groups = cluster_by_gap(Vec::<Range<usize>>::new(), 500, |r| r.clone());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_cluster_zero_gap_isolates_everything() {
        let items = vec![0..1, 1..2, 2..3];
        let groups = cluster_by_gap(items, 0, |r| r.clone());
        assert_eq!(group_sizes(&groups), vec![1, 1, 1]);
    }

    proptest! {
        #[test]
        fn prop_cluster_partitions_items(
            starts in proptest::collection::vec(0usize..5000, 0..40),
            max_gap in 1usize..800,
        ) {
            let items: Vec<Range<usize>> = starts.iter().map(|&s| s..s + 5).collect();
            let groups = cluster_by_gap(items.clone(), max_gap, |r| r.clone());

            let total: usize = groups.iter().map(Vec::len).sum();
            prop_assert_eq!(total, items.len());

            for group in &groups {
                prop_assert!(!group.is_empty());
                for pair in group.windows(2) {
                    prop_assert!(pair[1].start.saturating_sub(pair[0].end) < max_gap);
                }
            }
            for pair in groups.windows(2) {
                let last = pair[0].last().unwrap();
                let first = &pair[1][0];
                prop_assert!(first.start.saturating_sub(last.end) >= max_gap);
            }
        }
    }
}
