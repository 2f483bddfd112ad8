//! Action sampling for the policy engine.

use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};

use crate::{tictactoe::Cell, types::SamplingFloor, value_table::ActionValues};

/// Default for [`SamplingFloor`].
pub const DEFAULT_SAMPLING_FLOOR: f64 = 1e-3;

/// Draw one action with probability proportional to its floored value.
///
/// A lone action is returned without consuming randomness. Returns `None`
/// only when there are no actions.
pub fn sample_action<R>(rng: &mut R, actions: &ActionValues, floor: SamplingFloor) -> Option<Cell>
where
    R: Rng + ?Sized,
{
    let cells: Vec<Cell> = actions.keys().copied().collect();
    if let [only] = cells.as_slice() {
        return Some(*only);
    }

    let weights = actions.values().map(|record| floor.weight(record.value));
    let dist = WeightedIndex::new(weights).ok()?;
    cells.get(dist.sample(rng)).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{RngCore, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::value_table::ValueRecord;

    fn actions(values: &[(Cell, f64)]) -> ActionValues {
        values
            .iter()
            .map(|&(cell, value)| (cell, ValueRecord::new(value, Vec::new())))
            .collect()
    }

    fn counts(values: &[(Cell, f64)], floor: SamplingFloor, draws: usize) -> HashMap<Cell, usize> {
        let mut rng = StdRng::seed_from_u64(42);
        let actions = actions(values);
        let mut counts = HashMap::new();
        for _ in 0..draws {
            let cell = sample_action(&mut rng, &actions, floor).unwrap();
            *counts.entry(cell).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_no_actions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_action(&mut rng, &ActionValues::new(), SamplingFloor::DEFAULT),
            None
        );
    }

    #[test]
    fn test_single_action_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut untouched = rng.clone();
        let only = actions(&[(Cell::LowerLeft, -3.0)]);

        assert_eq!(
            sample_action(&mut rng, &only, SamplingFloor::DEFAULT),
            Some(Cell::LowerLeft)
        );
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_equal_values_share_draws_next_to_negative_value() {
        let counts = counts(
            &[
                (Cell::CenterRight, -0.5),
                (Cell::LowerMiddle, 0.3),
                (Cell::LowerRight, 0.3),
            ],
            SamplingFloor::DEFAULT,
            1000,
        );
        let lm = counts.get(&Cell::LowerMiddle).copied().unwrap_or(0);
        let lr = counts.get(&Cell::LowerRight).copied().unwrap_or(0);
        assert!(lm > 350 && lr > 350, "lm {lm}, lr {lr}");
    }

    #[test]
    fn test_floored_actions_stay_reachable() {
        let floor = SamplingFloor::new(0.05).unwrap();
        let counts = counts(&[(Cell::UpperLeft, 0.0), (Cell::CenterMiddle, 0.1)], floor, 2000);

        let dead = counts.get(&Cell::UpperLeft).copied().unwrap_or(0);
        assert!(dead > 0, "floored action should still be sampled");
        assert!(dead < 1000, "floored action should be rarer than the live one");
    }

    #[test]
    fn test_all_degenerate_values_fall_back_to_uniform() {
        let counts = counts(
            &[
                (Cell::UpperLeft, f64::NAN),
                (Cell::UpperMiddle, -1.0),
                (Cell::UpperRight, 0.0),
            ],
            SamplingFloor::DEFAULT,
            900,
        );
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n > 200), "{counts:?}");
    }
}
