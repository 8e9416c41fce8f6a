// tests/agent_tests.rs

use proptest::prelude::*;
use qsynth::{ActionCatalog, AgentConfig, QLearningAgent, QsynthError};

fn agent_with(config: AgentConfig) -> Result<QLearningAgent, QsynthError> {
    QLearningAgent::new(config, ActionCatalog::standard(2)?)
}

fn greedy_config() -> AgentConfig {
    AgentConfig {
        epsilon: 0.0,
        epsilon_min: 0.0,
        seed: Some(1),
        ..AgentConfig::default()
    }
}

#[test]
fn test_new_agent_starts_at_zero() -> Result<(), QsynthError> {
    let agent = agent_with(AgentConfig::default())?;
    assert_eq!(agent.q_table().states(), 100);
    assert_eq!(agent.q_table().actions(), 14);
    assert_eq!(agent.epsilon(), 0.9);
    for state in 0..agent.q_table().states() {
        assert!(agent.q_table().row(state)?.iter().all(|v| *v == 0.0));
    }
    Ok(())
}

#[test]
fn test_zero_epsilon_exploits() -> Result<(), QsynthError> {
    let mut agent = agent_with(greedy_config())?;

    // all zero: ties go to the first action
    let (action, index) = agent.choose_action(4)?;
    assert_eq!(index, 0);
    assert_eq!(&action, agent.catalog().get(0)?);

    // a positive reward on action 9 makes it the argmax
    agent.update_q_table(4, 9, 10.0, 5)?;
    for _ in 0..20 {
        let (action, index) = agent.choose_action(4)?;
        assert_eq!(index, 9);
        assert_eq!(&action, agent.catalog().get(9)?);
    }
    assert_eq!(agent.greedy_action(4)?.1, 9);
    Ok(())
}

#[test]
fn test_full_epsilon_explores_uniformly() -> Result<(), QsynthError> {
    let mut agent = agent_with(AgentConfig {
        epsilon: 1.0,
        seed: Some(2024),
        ..AgentConfig::default()
    })?;
    // bias the table so exploitation would always pick action 3
    agent.update_q_table(0, 3, 50.0, 1)?;

    let mut counts = [0usize; 14];
    for _ in 0..14_000 {
        let (_, index) = agent.choose_action(0)?;
        counts[index] += 1;
    }
    for (index, count) in counts.iter().enumerate() {
        assert!((800..=1200).contains(count), "action {} drawn {} times", index, count);
    }
    Ok(())
}

#[test]
fn test_single_update_from_zero() -> Result<(), QsynthError> {
    let mut agent = agent_with(greedy_config())?;
    agent.update_q_table(0, 2, 100.0, 1)?;
    // alpha * (r + gamma * 0 - 0)
    assert!((agent.q_table().get(0, 2)? - 5.0).abs() < 1e-12);

    // bootstrap from the updated state
    agent.update_q_table(7, 0, -5.0, 0)?;
    let expected = 0.05 * (-5.0 + 0.95 * 5.0);
    assert!((agent.q_table().get(7, 0)? - expected).abs() < 1e-12);

    // other entries untouched
    assert_eq!(agent.q_table().get(0, 3)?, 0.0);
    Ok(())
}

#[test]
fn test_out_of_range_indices_fail() -> Result<(), QsynthError> {
    let mut agent = agent_with(greedy_config())?;
    assert_eq!(
        agent.choose_action(100).map(|(_, i)| i),
        Err(QsynthError::StateOutOfRange { index: 100, state_size: 100 })
    );
    assert_eq!(
        agent.update_q_table(0, 14, 1.0, 0),
        Err(QsynthError::ActionOutOfRange { index: 14, action_size: 14 })
    );
    assert_eq!(
        agent.update_q_table(0, 0, 1.0, 250),
        Err(QsynthError::StateOutOfRange { index: 250, state_size: 100 })
    );
    assert_eq!(agent.q_table().get(0, 0)?, 0.0, "Failed update must not write");
    Ok(())
}

#[test]
fn test_config_rejects_bad_values() {
    let cases = [
        AgentConfig { state_size: 0, ..AgentConfig::default() },
        AgentConfig { alpha: 1.5, ..AgentConfig::default() },
        AgentConfig { gamma: -0.1, ..AgentConfig::default() },
        AgentConfig { epsilon: 0.005, ..AgentConfig::default() },
        AgentConfig { decay_rate: 2.0, ..AgentConfig::default() },
    ];
    for config in cases {
        assert!(
            matches!(agent_with(config.clone()), Err(QsynthError::InvalidConfig { .. })),
            "accepted {:?}",
            config
        );
    }
}

#[test]
fn test_decay_reaches_floor() -> Result<(), QsynthError> {
    let mut agent = agent_with(AgentConfig { seed: Some(3), ..AgentConfig::default() })?;
    agent.decay_exploration();
    assert!((agent.epsilon() - 0.9 * 0.99).abs() < 1e-12);
    // 0.9 * 0.99^n < 0.01 once n > 447
    for _ in 0..500 {
        agent.decay_exploration();
    }
    assert_eq!(agent.epsilon(), 0.01);
    Ok(())
}

proptest! {
    #[test]
    fn decay_is_monotone_and_floored(
        epsilon in 0.0f64..=1.0,
        floor_fraction in 0.0f64..=1.0,
        decay_rate in 0.0f64..=1.0,
        rounds in 1usize..200,
    ) {
        let epsilon_min = epsilon * floor_fraction;
        let config = AgentConfig { epsilon, epsilon_min, decay_rate, seed: Some(0), ..AgentConfig::default() };
        let catalog = ActionCatalog::standard(2).unwrap();
        let mut agent = QLearningAgent::new(config, catalog).unwrap();

        let mut previous = agent.epsilon();
        for _ in 0..rounds {
            agent.decay_exploration();
            prop_assert!(agent.epsilon() <= previous);
            prop_assert!(agent.epsilon() >= epsilon_min);
            previous = agent.epsilon();
        }
    }
}
