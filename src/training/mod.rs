// src/training/mod.rs

//! Episode loops driving the agent against the environment.
//!
//! Per step: choose an action, step the environment, add the reward to the
//! episode total, then either truncate (circuit grew past `max_gates`
//! without solving), or update the Q-table (training only) and stop if the
//! target was reached. A truncating transition is never written back: its
//! overflow penalty only lowers the episode's own total.

use crate::agent::QLearningAgent;
use crate::circuits::Circuit;
use crate::core::QsynthResult;
use crate::core::constants::qsynth_constants::{
    EPISODES, MAX_GATES, MAX_STEPS_PER_EPISODE, OVERFLOW_PENALTY, REPORT_EVERY,
};
use crate::environment::QuantumEnv;
use std::fmt;
use tracing::{info, trace};

/// How evaluation episodes pick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationPolicy {
    /// Always the best known action.
    #[default]
    Greedy,
    /// Keep exploring at the agent's current (decayed) epsilon.
    EpsilonGreedy,
}

/// Loop settings. `Default` carries the classroom values.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub episodes: usize,
    pub max_steps_per_episode: usize,
    /// Episodes stop once the circuit holds more gates than this.
    pub max_gates: usize,
    /// Subtracted from the episode reward on truncation.
    pub overflow_penalty: f64,
    /// Log progress every this many episodes; 0 disables periodic reports.
    pub report_every: usize,
    pub evaluation_policy: EvaluationPolicy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: EPISODES,
            max_steps_per_episode: MAX_STEPS_PER_EPISODE,
            max_gates: MAX_GATES,
            overflow_penalty: OVERFLOW_PENALTY,
            report_every: REPORT_EVERY,
            evaluation_policy: EvaluationPolicy::default(),
        }
    }
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// Fidelity crossed the threshold.
    Solved,
    /// The circuit exceeded `max_gates`.
    GateOverflow,
    /// `max_steps_per_episode` ran out.
    StepLimit,
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeOutcome::Solved => write!(f, "solved"),
            EpisodeOutcome::GateOverflow => write!(f, "gate overflow"),
            EpisodeOutcome::StepLimit => write!(f, "step limit"),
        }
    }
}

/// What happened in one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    /// 1-based episode number.
    pub episode: usize,
    pub total_reward: f64,
    pub steps: usize,
    pub outcome: EpisodeOutcome,
    /// Circuit as it stood when the episode ended.
    pub circuit: Circuit,
}

/// Aggregate over a training or evaluation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub episodes: usize,
    pub solved: usize,
    pub overflowed: usize,
    pub step_limited: usize,
    pub total_reward: f64,
    /// Highest-reward solved episode, i.e. the shortest circuit found.
    pub best: Option<EpisodeReport>,
}

impl RunSummary {
    fn record(&mut self, report: EpisodeReport) {
        self.episodes += 1;
        self.total_reward += report.total_reward;
        match report.outcome {
            EpisodeOutcome::Solved => {
                self.solved += 1;
                let better = self
                    .best
                    .as_ref()
                    .is_none_or(|best| report.total_reward > best.total_reward);
                if better {
                    self.best = Some(report);
                }
            }
            EpisodeOutcome::GateOverflow => self.overflowed += 1,
            EpisodeOutcome::StepLimit => self.step_limited += 1,
        }
    }

    /// Mean episode reward, 0 for an empty run.
    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} episodes: {} solved, {} overflowed, {} hit the step limit, mean reward {:.2}",
            self.episodes,
            self.solved,
            self.overflowed,
            self.step_limited,
            self.mean_reward()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Train,
    Evaluate(EvaluationPolicy),
}

/// Trains `agent` for `config.episodes` episodes.
///
/// Solved episodes print the circuit and are logged; every
/// `config.report_every` episodes progress is logged. Exploration decays
/// once per episode whatever the outcome.
pub fn train_agent(agent: &mut QLearningAgent, env: &mut QuantumEnv, config: &TrainingConfig) -> QsynthResult<RunSummary> {
    let mut summary = RunSummary::default();
    for episode in 1..=config.episodes {
        let report = run_episode(agent, env, config, episode, Mode::Train)?;

        if report.outcome == EpisodeOutcome::Solved {
            println!("Generated circuit:");
            env.render();
            info!(episode, total_reward = report.total_reward, gates = report.circuit.size(), "target reached");
        }
        if config.report_every > 0 && episode % config.report_every == 0 {
            info!(episode, total_reward = report.total_reward, epsilon = agent.epsilon(), "training progress");
        }

        summary.record(report);
        agent.decay_exploration();
    }
    info!(%summary, "training finished");
    Ok(summary)
}

/// Runs episodes without learning, rendering the circuit after every step.
pub fn evaluate_agent(agent: &mut QLearningAgent, env: &mut QuantumEnv, config: &TrainingConfig) -> QsynthResult<RunSummary> {
    let mut summary = RunSummary::default();
    for episode in 1..=config.episodes {
        let report = run_episode(agent, env, config, episode, Mode::Evaluate(config.evaluation_policy))?;
        if config.report_every > 0 && episode % config.report_every == 0 {
            info!(episode, total_reward = report.total_reward, outcome = %report.outcome, "evaluation progress");
        }
        summary.record(report);
    }
    info!(%summary, "evaluation finished");
    Ok(summary)
}

fn run_episode(
    agent: &mut QLearningAgent,
    env: &mut QuantumEnv,
    config: &TrainingConfig,
    episode: usize,
    mode: Mode,
) -> QsynthResult<EpisodeReport> {
    let mut state = env.reset()?;
    let mut total_reward = 0.0;
    let mut outcome = EpisodeOutcome::StepLimit;
    let mut steps = 0;

    for _ in 0..config.max_steps_per_episode {
        let (action, action_index) = match mode {
            Mode::Evaluate(EvaluationPolicy::Greedy) => agent.greedy_action(state)?,
            _ => agent.choose_action(state)?,
        };

        let step = env.step(&action)?;
        steps += 1;
        total_reward += step.reward;

        if !step.done && env.circuit_size() > config.max_gates {
            total_reward -= config.overflow_penalty;
            outcome = EpisodeOutcome::GateOverflow;
            trace!(episode, gates = env.circuit_size(), "episode truncated");
            break;
        }

        match mode {
            Mode::Train => agent.update_q_table(state, action_index, step.reward, step.state)?,
            Mode::Evaluate(_) => env.render(),
        }
        state = step.state;

        if step.done {
            outcome = EpisodeOutcome::Solved;
            break;
        }
    }

    Ok(EpisodeReport {
        episode,
        total_reward,
        steps,
        outcome,
        circuit: env.circuit().clone(),
    })
}
