//! ε-greedy action selection
//!
//! The selector is stateless: it works on a candidate list, a random source
//! and a closure returning the current value estimate for a candidate. The
//! closure is only called on the exploitation path.

use rand::{Rng, seq::IndexedRandom};

use crate::types::Direction;

/// Legal actions with `Stop` removed, in the engine's order.
pub fn movement_actions(legal: &[Direction]) -> Vec<Direction> {
    legal.iter().copied().filter(|a| !a.is_stop()).collect()
}

/// Maximum value over `candidates`, or 0.0 when there are none.
pub fn best_value<F>(candidates: &[Direction], value_of: F) -> f64
where
    F: Fn(Direction) -> f64,
{
    if candidates.is_empty() {
        return 0.0;
    }
    candidates
        .iter()
        .map(|&action| value_of(action))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Uniformly random candidate, bypassing the value estimates.
pub fn explore<R: Rng>(rng: &mut R, candidates: &[Direction]) -> Option<Direction> {
    candidates.choose(rng).copied()
}

/// Candidate with the highest value, ties broken uniformly at random.
///
/// Ties use exact floating-point equality against the maximum.
pub fn greedy_action<R, F>(rng: &mut R, candidates: &[Direction], value_of: F) -> Option<Direction>
where
    R: Rng,
    F: Fn(Direction) -> f64,
{
    if candidates.is_empty() {
        return None;
    }

    let values: Vec<f64> = candidates.iter().map(|&a| value_of(a)).collect();
    let best = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let tied: Vec<Direction> = candidates
        .iter()
        .zip(&values)
        .filter(|&(_, &value)| value == best)
        .map(|(&action, _)| action)
        .collect();

    // Only empty when every value is NaN.
    if tied.is_empty() {
        return explore(rng, candidates);
    }
    tied.choose(rng).copied()
}

/// ε-greedy choice among `candidates`.
///
/// Draws `u` uniformly from `[0, 1)` and explores when `u <= epsilon`; ε = 1
/// always explores and ε = 0 never does, even on a draw of exactly 0. No draw
/// happens when there are no candidates.
pub fn select_action<R, F>(
    rng: &mut R,
    epsilon: f64,
    candidates: &[Direction],
    value_of: F,
) -> Option<Direction>
where
    R: Rng,
    F: Fn(Direction) -> f64,
{
    if candidates.is_empty() {
        return None;
    }
    let draw = rng.random::<f64>();
    if epsilon > 0.0 && draw <= epsilon {
        explore(rng, candidates)
    } else {
        greedy_action(rng, candidates, value_of)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const THREE: [Direction; 3] = [Direction::North, Direction::East, Direction::West];

    #[test]
    fn test_movement_actions_strip_stop() {
        let legal = [Direction::Stop, Direction::West, Direction::Stop, Direction::North];
        assert_eq!(
            movement_actions(&legal),
            vec![Direction::West, Direction::North]
        );
        assert!(movement_actions(&[Direction::Stop]).is_empty());
    }

    #[test]
    fn test_best_value() {
        let values = |a: Direction| match a {
            Direction::North => -3.0,
            Direction::East => -1.0,
            _ => -2.0,
        };
        assert_eq!(best_value(&THREE, values), -1.0);
        assert_eq!(best_value(&[], values), 0.0);
    }

    #[test]
    fn test_greedy_picks_unique_maximum() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = |a: Direction| if a == Direction::West { 0.4 } else { 0.1 };
        for _ in 0..50 {
            assert_eq!(greedy_action(&mut rng, &THREE, values), Some(Direction::West));
        }
    }

    #[test]
    fn test_greedy_tie_break_is_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 30_000;
        let mut counts: HashMap<Direction, usize> = HashMap::new();
        for _ in 0..trials {
            let action = greedy_action(&mut rng, &THREE, |_| 0.0).unwrap();
            *counts.entry(action).or_default() += 1;
        }

        for action in THREE {
            let freq = counts[&action] as f64 / trials as f64;
            assert!(
                (freq - 1.0 / 3.0).abs() < 0.02,
                "{action} chosen with frequency {freq}"
            );
        }
    }

    #[test]
    fn test_greedy_ties_ignore_non_maximal() {
        let mut rng = StdRng::seed_from_u64(5);
        let values = |a: Direction| if a == Direction::North { -1.0 } else { 2.0 };
        for _ in 0..200 {
            let action = greedy_action(&mut rng, &THREE, values).unwrap();
            assert_ne!(action, Direction::North);
        }
    }

    #[test]
    fn test_full_exploration_never_reads_values() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let action = select_action(&mut rng, 1.0, &THREE, |_| {
                panic!("value lookup on exploration path")
            });
            assert!(THREE.contains(&action.unwrap()));
        }
    }

    #[test]
    fn test_zero_epsilon_always_exploits() {
        let mut rng = StdRng::seed_from_u64(10);
        let values = |a: Direction| if a == Direction::East { 1.0 } else { 0.0 };
        for _ in 0..500 {
            assert_eq!(
                select_action(&mut rng, 0.0, &THREE, values),
                Some(Direction::East)
            );
        }
    }

    #[test]
    fn test_no_candidates_yields_no_action() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(select_action(&mut rng, 1.0, &[], |_| 0.0), None);
        assert_eq!(greedy_action(&mut rng, &[], |_| 0.0), None);
        assert_eq!(explore(&mut rng, &[]), None);
    }

    #[test]
    fn test_all_nan_values_fall_back_to_random_candidate() {
        let mut rng = StdRng::seed_from_u64(12);
        let action = greedy_action(&mut rng, &THREE, |_| f64::NAN);
        assert!(THREE.contains(&action.unwrap()));
    }
}
