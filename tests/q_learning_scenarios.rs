//! End-to-end behaviour of the Q-learning agent

mod common;

use std::collections::HashMap;

use pacman_qlearn::{
    AgentConfig, QLearnAgent,
    q_learning::{EpisodePhase, LearningMode},
    types::{Direction, EpisodeOutcome, FinalObservation, Observation, Position, TableKey},
};
use rand::{SeedableRng, rngs::StdRng};

fn frame(pac: (i32, i32), ghost: (i32, i32), score: f64, legal: &[Direction]) -> Observation {
    Observation::new(pac, score)
        .with_adversary(ghost)
        .with_legal_actions(legal.iter().copied())
}

#[test]
fn test_single_step_episode_scenario() {
    common::init_logging();
    let config = AgentConfig::default()
        .with_alpha(0.2)
        .with_gamma(0.8)
        .with_epsilon(0.0);
    let mut agent = QLearnAgent::with_rng(&config, StdRng::seed_from_u64(1));

    let action = agent.decide(&frame((1, 1), (2, 2), 5.0, &[Direction::East]));
    assert_eq!(action, Some(Direction::East));

    agent.notify_episode_end(&FinalObservation::new(10.0, EpisodeOutcome::Win));

    let q = agent.lookup(Position::new(1, 1), Position::new(2, 2), Direction::East);
    assert!((q - 2.6).abs() < 1e-12, "expected 2.6, got {q}");
}

#[test]
fn test_fresh_agent_reads_zero_everywhere() {
    let agent = QLearnAgent::new(&AgentConfig::default().with_seed(0));
    for x in -2..3 {
        for action in Direction::MOVES {
            assert_eq!(
                agent.lookup(Position::new(x, 0), Position::new(0, x), action),
                0.0
            );
        }
    }
    assert!(agent.q_table().is_empty());
}

#[test]
fn test_repeated_terminal_updates_converge() {
    // With the previous-score reward r fixed and the final score equal to it,
    // Q moves toward r + γ·r.
    let (alpha, gamma, reward) = (0.3, 0.5, 4.0);
    let config = AgentConfig::default()
        .with_alpha(alpha)
        .with_gamma(gamma)
        .with_epsilon(0.0)
        .with_num_training(10_000);
    let mut agent = QLearnAgent::with_rng(&config, StdRng::seed_from_u64(2));

    for _ in 0..200 {
        agent.decide(&frame((0, 0), (1, 1), reward, &[Direction::North]));
        agent.notify_episode_end(&FinalObservation::new(reward, EpisodeOutcome::Loss));
    }

    let q = agent.lookup(Position::new(0, 0), Position::new(1, 1), Direction::North);
    assert!((q - reward * (1.0 + gamma)).abs() < 1e-9, "got {q}");
}

#[test]
fn test_tie_breaking_is_fair_through_agent() {
    let config = AgentConfig::default()
        .with_epsilon(0.0)
        .with_alpha(0.0)
        .with_num_training(1_000_000);
    let mut agent = QLearnAgent::with_rng(&config, StdRng::seed_from_u64(77));
    let legal = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    let trials = 40_000;
    let mut counts: HashMap<Direction, usize> = HashMap::new();
    for _ in 0..trials {
        let action = agent.decide(&frame((2, 2), (5, 5), 0.0, &legal)).unwrap();
        *counts.entry(action).or_default() += 1;
    }

    assert!(!counts.contains_key(&Direction::Stop));
    for action in Direction::MOVES {
        let freq = counts.get(&action).copied().unwrap_or(0) as f64 / trials as f64;
        assert!((freq - 0.25).abs() < 0.02, "{action}: {freq}");
    }
}

#[test]
fn test_cutoff_after_budget_and_stays_frozen() {
    common::init_logging();
    let config = AgentConfig::default().with_num_training(4).with_seed(3);
    let mut agent = QLearnAgent::new(&config);

    for episode in 1..=10 {
        agent.decide(&frame((1, 1), (3, 3), 1.0, &[Direction::East, Direction::West]));
        agent.notify_episode_end(&FinalObservation::new(1.0, EpisodeOutcome::Win));

        if episode < 4 {
            assert_eq!(agent.alpha(), 0.2);
            assert_eq!(agent.epsilon(), 0.025);
            assert_eq!(agent.mode(), LearningMode::Training);
        } else {
            assert_eq!(agent.alpha(), 0.0);
            assert_eq!(agent.epsilon(), 0.0);
            assert_eq!(agent.mode(), LearningMode::Evaluation);
        }
    }
    assert_eq!(agent.episodes_so_far(), 10);
}

#[test]
fn test_sentinel_entry_is_never_reachable_by_lookup() {
    let config = AgentConfig::default().with_epsilon(0.0).with_seed(4);
    let mut agent = QLearnAgent::new(&config);

    agent.decide(&frame((1, 1), (2, 2), 0.0, &[Direction::East]));
    agent.decide(&frame((2, 1), (2, 2), 7.0, &[Direction::East]));
    agent.notify_episode_end(&FinalObservation::new(9.0, EpisodeOutcome::Win));

    // Sentinel from the first decision, plus the two real decision points.
    assert_eq!(agent.q_table().len(), 3);
    assert!(agent.q_table().contains(&TableKey::NoPrevious));
    for (key, _) in agent.q_table().iter() {
        if let TableKey::Decision { action, .. } = key {
            assert_eq!(*action, Some(Direction::East));
        }
    }
}

#[test]
fn test_phase_transitions_across_episodes() {
    let mut agent = QLearnAgent::new(&AgentConfig::default().with_seed(5));
    assert_eq!(agent.phase(), EpisodePhase::AwaitingFirstDecision);

    agent.decide(&frame((1, 1), (2, 2), 0.0, &[Direction::North]));
    assert_eq!(agent.phase(), EpisodePhase::InEpisode);

    agent.notify_episode_end(&FinalObservation::new(0.0, EpisodeOutcome::Loss));
    assert_eq!(agent.phase(), EpisodePhase::EpisodeEnded);
    assert!(agent.memory().is_empty());

    agent.decide(&frame((1, 1), (2, 2), 0.0, &[Direction::North]));
    assert_eq!(agent.phase(), EpisodePhase::InEpisode);
}

#[test]
fn test_independent_instances_do_not_share_state() {
    let config = AgentConfig::default().with_epsilon(0.0).with_seed(6);
    let mut trained = QLearnAgent::new(&config);
    let fresh = QLearnAgent::new(&config);

    trained.decide(&frame((1, 1), (2, 2), 5.0, &[Direction::East]));
    trained.notify_episode_end(&FinalObservation::new(10.0, EpisodeOutcome::Win));

    assert!(trained.lookup(Position::new(1, 1), Position::new(2, 2), Direction::East) > 0.0);
    assert_eq!(
        fresh.lookup(Position::new(1, 1), Position::new(2, 2), Direction::East),
        0.0
    );
    assert_eq!(fresh.episodes_so_far(), 0);
}
