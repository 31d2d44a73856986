//! Splits a reading into verse groups that each fit the speech budget.
//!
//! Pure: given verse lengths and a budget, the answer is always the same. Groups are formed by
//! ceiling division, so every group but the last has exactly `group_size` verses.

use crate::domain::{DeliveryBudget, GroupSize, Reading};
use crate::ports::SpeechRenderer;
use tracing::debug;

/// Decide whether a reading fits whole or which group size to deliver it in.
///
/// `verse_lengths` are rendered lengths without the per-verse wrapper; the budget adds it.
/// If even single verses overflow, returns `Chunked(1)` and leaves the oversized unit to the
/// delivery engine's fallback.
pub fn estimate_group_size(verse_lengths: &[usize], budget: &DeliveryBudget) -> GroupSize {
    let verse_count = verse_lengths.len();
    let total = measure(verse_lengths, budget) + budget.preamble + budget.closing;
    if total <= budget.max_length || verse_count == 0 {
        return GroupSize::Whole;
    }

    // Start with a good guess and grow the group count until every group fits.
    let mut group_count = total / budget.max_length.max(1) + 1;
    loop {
        let group_size = verse_count.div_ceil(group_count).max(1);
        if groups_fit(verse_lengths, group_size, budget) {
            debug!(verse_count, group_count, group_size, "group size accepted");
            return GroupSize::Chunked(group_size);
        }
        if group_size == 1 {
            debug!(verse_count, "single verses exceed budget");
            return GroupSize::Chunked(1);
        }
        group_count += 1;
    }
}

/// Convenience wrapper measuring a reading's verses through the renderer.
pub fn estimate_reading(
    reading: &Reading,
    renderer: &dyn SpeechRenderer,
    budget: &DeliveryBudget,
) -> GroupSize {
    let lengths: Vec<usize> = reading
        .verses
        .iter()
        .map(|v| renderer.verse_length(v))
        .collect();
    estimate_group_size(&lengths, budget)
}

/// Payload cost of each group when `verse_lengths` is cut into runs of `group_size`.
pub fn group_costs(
    verse_lengths: &[usize],
    group_size: usize,
    budget: &DeliveryBudget,
) -> Vec<usize> {
    let chunks: Vec<&[usize]> = verse_lengths.chunks(group_size.max(1)).collect();
    let last = chunks.len().saturating_sub(1);
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut cost = measure(chunk, budget);
            if i == 0 {
                cost += budget.preamble;
            }
            if i == last {
                cost += budget.closing;
            } else {
                cost += budget.continuation;
            }
            cost
        })
        .collect()
}

fn groups_fit(verse_lengths: &[usize], group_size: usize, budget: &DeliveryBudget) -> bool {
    group_costs(verse_lengths, group_size, budget)
        .into_iter()
        .all(|cost| cost <= budget.max_length)
}

fn measure(verse_lengths: &[usize], budget: &DeliveryBudget) -> usize {
    verse_lengths
        .iter()
        .map(|len| len + budget.verse_overhead)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_budget() -> DeliveryBudget {
        DeliveryBudget {
            max_length: 8000,
            verse_overhead: 7,
            preamble: 500,
            closing: 300,
            continuation: 400,
        }
    }

    #[test]
    fn test_short_reading_is_whole() {
        let lengths = vec![120; 10];
        assert_eq!(
            estimate_group_size(&lengths, &DeliveryBudget::default()),
            GroupSize::Whole
        );
    }

    #[test]
    fn test_empty_reading_is_whole() {
        assert_eq!(
            estimate_group_size(&[], &DeliveryBudget::default()),
            GroupSize::Whole
        );
    }

    #[test]
    fn test_twelve_verses_split_in_two() {
        // 12 verses costing 700 each with the wrapper: 9200 total > 8000.
        let budget = scenario_budget();
        let lengths = vec![693; 12];
        assert_eq!(estimate_group_size(&lengths, &budget), GroupSize::Chunked(6));
        assert_eq!(group_costs(&lengths, 6, &budget), vec![5100, 4500]);
    }

    #[test]
    fn test_exact_fit_is_whole() {
        let budget = scenario_budget();
        // 10 * 700 + 500 + 300 = 7800; pad one verse to hit 8000 exactly.
        let mut lengths = vec![693; 10];
        lengths[0] += 200;
        assert_eq!(estimate_group_size(&lengths, &budget), GroupSize::Whole);
        lengths[0] += 1;
        assert!(matches!(
            estimate_group_size(&lengths, &budget),
            GroupSize::Chunked(_)
        ));
    }

    #[test]
    fn test_seed_too_small_grows_group_count() {
        // One heavy verse at the front forces more groups than the seed guess.
        let budget = scenario_budget();
        let mut lengths = vec![100; 20];
        lengths[0] = 6500;
        let total: usize = lengths.iter().map(|l| l + 7).sum::<usize>() + 800;
        assert!(total / budget.max_length + 1 == 2);
        let GroupSize::Chunked(size) = estimate_group_size(&lengths, &budget) else {
            panic!("expected chunking");
        };
        assert!(size < 10);
        assert!(
            group_costs(&lengths, size, &budget)
                .iter()
                .all(|c| *c <= budget.max_length)
        );
    }

    #[test]
    fn test_oversized_verse_falls_back_to_single() {
        let budget = scenario_budget();
        let lengths = vec![100, 9000, 100];
        assert_eq!(estimate_group_size(&lengths, &budget), GroupSize::Chunked(1));
    }

    #[test]
    fn test_last_group_may_be_shorter() {
        let budget = scenario_budget();
        let costs = group_costs(&[693; 13], 5, &budget);
        assert_eq!(costs.len(), 3);
        assert_eq!(costs[2], 3 * 700 + 300);
    }

    fn arb_lengths() -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(1usize..1200, 0..150)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn prop_fitting_reading_is_whole(lengths in prop::collection::vec(1usize..200, 0..20)) {
            let budget = DeliveryBudget::default();
            let total: usize = lengths.iter().map(|l| l + budget.verse_overhead).sum::<usize>()
                + budget.preamble + budget.closing;
            prop_assume!(total <= budget.max_length);
            prop_assert_eq!(estimate_group_size(&lengths, &budget), GroupSize::Whole);
        }

        #[test]
        fn prop_every_group_fits(lengths in arb_lengths()) {
            let budget = DeliveryBudget::default();
            match estimate_group_size(&lengths, &budget) {
                GroupSize::Whole => {
                    let total: usize = lengths.iter().map(|l| l + budget.verse_overhead).sum::<usize>()
                        + budget.preamble + budget.closing;
                    prop_assert!(total <= budget.max_length);
                }
                GroupSize::Chunked(size) => {
                    prop_assert!(size >= 1);
                    for cost in group_costs(&lengths, size, &budget) {
                        prop_assert!(cost <= budget.max_length);
                    }
                }
            }
        }

        #[test]
        fn prop_estimate_is_deterministic(lengths in arb_lengths()) {
            let budget = DeliveryBudget::default();
            prop_assert_eq!(
                estimate_group_size(&lengths, &budget),
                estimate_group_size(&lengths, &budget)
            );
        }
    }
}
