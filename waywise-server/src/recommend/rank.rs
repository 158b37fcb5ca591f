//! Ranking travel options by priority.
//!
//! Options are compared on the single cost field bound to the priority.
//! Ties keep catalog order, so the first-listed option wins. `-0.0` and
//! `0.0` compare equal.

use std::cmp::Ordering;

use crate::domain::{Priority, TravelOption};

/// The option with the lowest value on the priority's field.
///
/// Among equal values the earliest option wins. Returns `None` for an
/// empty input.
pub fn best_by<'a>(
    options: impl IntoIterator<Item = &'a TravelOption>,
    priority: Priority,
) -> Option<&'a TravelOption> {
    let mut best: Option<(&TravelOption, f64)> = None;

    for option in options {
        let cost = priority.cost_of(option);
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((option, cost)),
        }
    }

    best.map(|(option, _)| option)
}

/// Sort options best-first by the priority's field.
///
/// The sort is stable: options with equal values keep their relative order.
pub fn rank_by(mut options: Vec<&TravelOption>, priority: Priority) -> Vec<&TravelOption> {
    options.sort_by(|a, b| compare(priority.cost_of(a), priority.cost_of(b)));
    options
}

/// Costs are finite, so `partial_cmp` only fails on values that never occur.
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Costs, Location, TravelMode};
    use proptest::prelude::*;

    fn priority_strategy() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    /// Up to four options on one OD pair, one per mode, with small integer
    /// costs so that ties are common.
    fn options_strategy() -> impl Strategy<Value = Vec<TravelOption>> {
        prop::collection::vec((0u8..6, 0u8..6, 0u8..6, 0u8..6), 0..=4).prop_map(|costs| {
            costs
                .into_iter()
                .zip(TravelMode::ALL)
                .map(|((t, f, c, e), mode)| {
                    TravelOption::new(
                        Location::parse("NYU_Tandon").unwrap(),
                        Location::parse("Brooklyn_Bridge").unwrap(),
                        mode,
                        Costs::new(t as f64, f as f64, c as f64, e as f64).unwrap(),
                    )
                    .unwrap()
                })
                .collect()
        })
    }

    proptest! {
        /// The chosen option is no worse than any other on the bound field
        #[test]
        fn best_is_minimal(options in options_strategy(), priority in priority_strategy()) {
            if let Some(best) = best_by(&options, priority) {
                let best_cost = priority.cost_of(best);
                for other in &options {
                    prop_assert!(best_cost <= priority.cost_of(other));
                }
            } else {
                prop_assert!(options.is_empty());
            }
        }

        /// The chosen option is the earliest among those tied for the minimum
        #[test]
        fn best_is_first_of_ties(options in options_strategy(), priority in priority_strategy()) {
            if let Some(best) = best_by(&options, priority) {
                let best_cost = priority.cost_of(best);
                let first = options
                    .iter()
                    .find(|o| priority.cost_of(o) == best_cost)
                    .unwrap();
                prop_assert_eq!(first.mode(), best.mode());
            }
        }

        /// Ranking sorts ascending, keeps every option, and leads with best_by
        #[test]
        fn rank_is_sorted_permutation(options in options_strategy(), priority in priority_strategy()) {
            let ranked = rank_by(options.iter().collect(), priority);
            prop_assert_eq!(ranked.len(), options.len());

            for window in ranked.windows(2) {
                prop_assert!(priority.cost_of(window[0]) <= priority.cost_of(window[1]));
            }

            let best = best_by(&options, priority).map(TravelOption::mode);
            prop_assert_eq!(ranked.first().map(|o| o.mode()), best);
        }
    }
}
