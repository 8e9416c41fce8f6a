// src/main.rs

//! Trains a Q-learning agent to synthesize iSWAP from Clifford+T gates,
//! then evaluates the learned table.

use qsynth::{
    evaluate_agent, train_agent, ActionCatalog, AgentConfig, EnvConfig, QLearningAgent, QsynthError, QuantumEnv,
    TrainingConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), QsynthError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let env_config = EnvConfig::default();
    let agent_config = AgentConfig {
        state_size: env_config.state_capacity,
        ..AgentConfig::default()
    };
    let training = TrainingConfig::default();

    let mut environment = QuantumEnv::new(env_config)?;
    let catalog = ActionCatalog::standard(environment.config().num_qubits)?;
    let mut agent = QLearningAgent::new(agent_config, catalog)?;

    info!(
        target_gate = %environment.config().target,
        episodes = training.episodes,
        max_steps = training.max_steps_per_episode,
        "starting training"
    );
    let trained = train_agent(&mut agent, &mut environment, &training)?;
    if let Some(best) = &trained.best {
        println!("Best circuit found (episode {}, reward {}):", best.episode, best.total_reward);
        println!("{}", best.circuit);
    }

    let evaluated = evaluate_agent(&mut agent, &mut environment, &training)?;
    info!(
        training = %trained,
        evaluation = %evaluated,
        states_seen = environment.state_table().len(),
        "done"
    );
    Ok(())
}
