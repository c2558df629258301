//! Grid-world simulation loop.
//!
//! Owns the grid, the reward model, the solved value table, and the agent.
//! Every mutator marks the value table stale and re-solves before returning,
//! so a step never reads a table that disagrees with the grid.

use qtty::{Quantity, Second};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::config::SimulationConfig;
use super::state::{Outcome, RunState, Snapshot, Transition};
use super::ticker::Ticker;
use crate::error::ConfigError;
use crate::grid::{CellType, Grid, Position};
use crate::policy::{PolicyContext, PolicyKind};
use crate::reward::{RewardConfig, RewardKind};
use crate::solver::{SolveReport, ValueIteration, ValueTable};
use crate::units::{convert, SameDim};
use crate::{generate_id, Id};

/// A single grid-world widget instance.
///
/// # Lifecycle
///
/// 1. Create with [`Simulation::new`] (or [`Simulation::from_grid`]).
/// 2. Edit the grid and rewards while not running; each edit re-solves.
/// 3. Either call [`Simulation::step`] manually, or [`Simulation::start`] and
///    feed frame time to [`Simulation::advance`].
/// 4. Read state through accessors or [`Simulation::snapshot`].
///
/// No command fails at runtime: commands that do not apply in the current
/// state are ignored and report `false` or `None`.
#[derive(Debug)]
pub struct Simulation {
    id: Id,
    grid: Grid,
    rewards: RewardConfig,
    solver: ValueIteration,
    values: ValueTable,
    report: SolveReport,
    stale: bool,
    policy: PolicyKind,
    agent: Option<Position>,
    steps: u32,
    cumulative_reward: f64,
    run_state: RunState,
    episode_done: bool,
    last_transition: Option<Transition>,
    ticker: Ticker,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation with a fresh grid built from `config`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate_geometry()?;
        let grid = Grid::with_roles(config.size, config.start, config.target)?;
        Self::from_grid(grid, config)
    }

    /// Creates a simulation over an existing grid.
    ///
    /// The geometry fields of `config` (`size`, `start`, `target`) are ignored.
    pub fn from_grid(grid: Grid, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate_dynamics()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let size = grid.size();
        let mut sim = Self {
            id: generate_id(),
            agent: grid.start(),
            grid,
            rewards: config.rewards,
            solver: config.solver,
            values: ValueTable::zeros(size),
            report: SolveReport {
                iterations: 0,
                converged: false,
                max_delta: f64::INFINITY,
            },
            stale: true,
            policy: config.policy,
            steps: 0,
            cumulative_reward: 0.0,
            run_state: RunState::Idle,
            episode_done: false,
            last_transition: None,
            ticker: Ticker::new(config.tick_interval)?,
            rng,
        };
        sim.resolve();
        Ok(sim)
    }

    // --- Accessors ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }

    /// The value table of the current configuration.
    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Report of the most recent solve.
    pub fn solve_report(&self) -> SolveReport {
        self.report
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// Agent position, or `None` when no start cell has been marked.
    pub fn agent(&self) -> Option<Position> {
        self.agent
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// True once the current episode has terminated at the target.
    pub fn episode_done(&self) -> bool {
        self.episode_done
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    pub fn tick_interval(&self) -> Quantity<Second> {
        self.ticker.interval()
    }

    /// Owned copy of everything the display layer reads.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id.clone(),
            grid: self.grid.clone(),
            agent: self.agent,
            start: self.grid.start(),
            target: self.grid.target(),
            values: self.values.clone(),
            solve: self.report,
            rewards: self.rewards,
            policy: self.policy,
            steps: self.steps,
            cumulative_reward: self.cumulative_reward,
            run_state: self.run_state,
            episode_done: self.episode_done,
            last_transition: self.last_transition,
        }
    }

    // --- Value table maintenance ---

    /// Marks the value table as out of date.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Re-solves the value table if it is out of date.
    ///
    /// Returns true if a solve ran.
    pub fn resolve(&mut self) -> bool {
        if !self.stale {
            return false;
        }
        let (values, report) = self.solver.solve(&self.grid, &self.rewards);
        self.values = values;
        self.report = report;
        self.stale = false;
        true
    }

    fn refresh(&mut self) {
        self.invalidate();
        self.resolve();
    }

    fn is_fresh_episode(&self) -> bool {
        self.steps == 0 && !self.episode_done
    }

    // --- Configuration commands ---

    /// Reclassifies a grid cell and re-solves.
    ///
    /// Ignored while running and for out-of-range coordinates. Before the
    /// first step of an episode the agent follows the start cell.
    pub fn set_cell_type(&mut self, row: usize, col: usize, cell_type: CellType) -> bool {
        if self.is_running() {
            debug!(row, col, %cell_type, "grid edit ignored while running");
            return false;
        }
        if !self.grid.set_cell_type(row, col, cell_type) {
            return false;
        }
        self.refresh();
        if self.is_fresh_episode() {
            self.agent = self.grid.start();
        }
        true
    }

    /// Replaces one reward and re-solves.
    ///
    /// Returns `Ok(false)` when ignored because the loop is running, and an
    /// error, with nothing changed, when `value` is not finite.
    pub fn set_reward(&mut self, kind: RewardKind, value: f64) -> Result<bool, ConfigError> {
        if self.is_running() {
            debug!(%kind, value, "reward edit ignored while running");
            return Ok(false);
        }
        self.rewards.set(kind, value)?;
        self.refresh();
        Ok(true)
    }

    /// Replaces the discount factor and re-solves.
    pub fn set_discount(&mut self, gamma: f64) -> Result<bool, ConfigError> {
        if self.is_running() {
            debug!(gamma, "discount edit ignored while running");
            return Ok(false);
        }
        self.rewards.set_gamma(gamma)?;
        self.refresh();
        Ok(true)
    }

    /// Replaces the whole reward model and re-solves.
    pub fn set_rewards(&mut self, rewards: RewardConfig) -> Result<bool, ConfigError> {
        if self.is_running() {
            debug!("reward model edit ignored while running");
            return Ok(false);
        }
        rewards.validate()?;
        self.rewards = rewards;
        self.refresh();
        Ok(true)
    }

    /// Switches the active policy. Allowed at any time.
    pub fn select_policy(&mut self, policy: PolicyKind) {
        if self.policy != policy {
            debug!(from = %self.policy, to = %policy, "policy changed");
        }
        self.policy = policy;
    }

    /// Changes the live-loop period, in any time unit.
    pub fn set_tick_interval<U>(&mut self, interval: Quantity<U>) -> Result<(), ConfigError>
    where
        U: SameDim<Second>,
    {
        self.ticker.set_interval(convert::<U, Second>(interval))
    }

    // --- Loop control ---

    /// Starts the live loop.
    ///
    /// Resets first when the episode already ended or the agent stands on the
    /// target. Declines (returns false) when already running or when no start
    /// cell is defined.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.resolve();
        let on_target = self.agent.is_some_and(|p| self.grid.is_target(p));
        if self.episode_done || on_target {
            self.reset();
        }
        if self.agent.is_none() {
            debug!("no start cell; declining to run");
            return false;
        }
        self.ticker.clear();
        self.run_state = RunState::Running;
        debug!(policy = %self.policy, "simulation started");
        true
    }

    /// Suspends the live loop, keeping the episode intact.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.ticker.clear();
        self.run_state = RunState::Paused;
        debug!(steps = self.steps, "simulation paused");
        true
    }

    /// Stops the live loop, keeping the episode intact.
    pub fn stop(&mut self) -> bool {
        if self.run_state == RunState::Idle {
            return false;
        }
        self.ticker.clear();
        self.run_state = RunState::Idle;
        debug!(steps = self.steps, "simulation stopped");
        true
    }

    /// Stops the loop and starts a new episode from the start cell.
    pub fn reset(&mut self) {
        self.ticker.clear();
        self.run_state = RunState::Idle;
        self.agent = self.grid.start();
        self.steps = 0;
        self.cumulative_reward = 0.0;
        self.episode_done = false;
        self.last_transition = None;
        debug!("simulation reset");
    }

    /// Executes one manual step. Ignored while the loop is running.
    pub fn step(&mut self) -> Option<Transition> {
        if self.is_running() {
            return None;
        }
        self.advance_one()
    }

    /// Feeds elapsed time to the live loop and runs every step that fell due.
    ///
    /// Returns the transitions produced, in order. Does nothing unless running.
    /// A single call runs at most
    /// [`MAX_BACKLOG_TICKS`](super::MAX_BACKLOG_TICKS) steps.
    pub fn advance<U>(&mut self, elapsed: Quantity<U>) -> Vec<Transition>
    where
        U: SameDim<Second>,
    {
        let mut transitions = Vec::new();
        if !self.is_running() {
            return transitions;
        }
        self.ticker.accumulate(elapsed);
        while self.is_running() && self.ticker.fire() {
            match self.advance_one() {
                Some(t) => transitions.push(t),
                None => {
                    self.stop();
                    break;
                }
            }
        }
        transitions
    }

    fn advance_one(&mut self) -> Option<Transition> {
        if self.episode_done {
            return None;
        }
        self.resolve();
        let from = self.agent?;

        if self.grid.is_target(from) {
            let reward = self.rewards.target;
            return Some(self.finish(Transition {
                action: None,
                from,
                to: from,
                outcome: Outcome::ReachedTarget,
                reward,
                step: self.steps,
            }));
        }

        let ctx = PolicyContext {
            grid: &self.grid,
            values: &self.values,
            rewards: &self.rewards,
            position: from,
        };
        let action = self.policy.select_action(&ctx, &mut self.rng);

        let (to, outcome, reward) = match self.grid.destination(from, action) {
            Some(next) if self.grid.is_target(next) => {
                (next, Outcome::ReachedTarget, self.rewards.move_reward(true))
            }
            Some(next) => (next, Outcome::Moved, self.rewards.move_reward(false)),
            None => (from, Outcome::Bumped, self.rewards.wall),
        };

        self.agent = Some(to);
        self.steps += 1;
        let transition = Transition {
            action: Some(action),
            from,
            to,
            outcome,
            reward,
            step: self.steps,
        };
        trace!(%action, %outcome, %to, reward, "step");

        if outcome == Outcome::ReachedTarget {
            return Some(self.finish(transition));
        }
        self.cumulative_reward += reward;
        self.last_transition = Some(transition);
        Some(transition)
    }

    fn finish(&mut self, transition: Transition) -> Transition {
        self.cumulative_reward += transition.reward;
        self.last_transition = Some(transition);
        self.episode_done = true;
        self.ticker.clear();
        self.run_state = RunState::Idle;
        info!(
            steps = self.steps,
            cumulative_reward = self.cumulative_reward,
            "episode reached target"
        );
        transition
    }
}
