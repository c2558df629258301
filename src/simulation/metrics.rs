//! Headless policy evaluation.
//!
//! Runs whole episodes through [`Simulation::step`] and aggregates
//! per-episode statistics.

use std::fmt;

use super::engine::Simulation;
use super::state::Outcome;
use crate::policy::PolicyKind;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationMetrics {
    pub policy: PolicyKind,
    /// Fraction of episodes that reached the target within the step cap.
    pub success_rate: f64,
    /// Mean number of steps per episode.
    pub mean_steps: f64,
    /// Mean cumulative reward per episode.
    pub mean_return: f64,
    /// Mean number of bumps per episode.
    pub mean_bumps: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

#[derive(Debug, Default)]
struct EpisodeStats {
    reached: bool,
    steps: u32,
    bumps: u32,
    cumulative_reward: f64,
}

impl EvaluationMetrics {
    /// Evaluates `policy` on `sim` over `n_episodes` episodes of at most
    /// `max_steps` steps each.
    ///
    /// Stops any live loop first. The simulation is left reset, with
    /// `policy` selected.
    pub fn evaluate(
        sim: &mut Simulation,
        policy: PolicyKind,
        n_episodes: usize,
        max_steps: u32,
    ) -> Self {
        sim.stop();
        sim.select_policy(policy);
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            sim.reset();
            let mut stats = EpisodeStats::default();

            while sim.steps() < max_steps {
                let Some(t) = sim.step() else { break };
                match t.outcome {
                    Outcome::Bumped => stats.bumps += 1,
                    Outcome::ReachedTarget => {
                        stats.reached = true;
                        break;
                    }
                    Outcome::Moved => {}
                }
            }

            stats.steps = sim.steps();
            stats.cumulative_reward = sim.cumulative_reward();
            all_stats.push(stats);
        }
        sim.reset();

        Self {
            policy,
            success_rate: mean(&all_stats, |s| if s.reached { 1.0 } else { 0.0 }),
            mean_steps: mean(&all_stats, |s| s.steps as f64),
            mean_return: mean(&all_stats, |s| s.cumulative_reward),
            mean_bumps: mean(&all_stats, |s| s.bumps as f64),
            n_episodes,
        }
    }
}

fn mean(stats: &[EpisodeStats], f: impl Fn(&EpisodeStats) -> f64) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    stats.iter().map(f).sum::<f64>() / stats.len() as f64
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation: {} policy ({} episodes) ===",
            self.policy, self.n_episodes
        )?;
        writeln!(f, "  Success rate:   {:.1}%", self.success_rate * 100.0)?;
        writeln!(f, "  Mean steps:     {:.1}", self.mean_steps)?;
        writeln!(f, "  Mean bumps:     {:.1}", self.mean_bumps)?;
        writeln!(f, "  Mean return:    {:.2}", self.mean_return)
    }
}
