//! Cooperative periodic timer.
//!
//! The host feeds elapsed wall time in through [`Ticker::accumulate`] and
//! drains due ticks one at a time with [`Ticker::fire`]. Nothing runs in the
//! background, so a tick always completes before the next one can fire.
//!
//! At most [`MAX_BACKLOG_TICKS`] periods are kept pending. A host that stalls
//! (a suspended window, a debugger break) resumes with a short burst instead
//! of replaying every tick it missed.

use qtty::{Quantity, Second};

use crate::error::ConfigError;
use crate::units::{as_seconds, SameDim};

/// Maximum number of due ticks a single burst of elapsed time can release.
pub const MAX_BACKLOG_TICKS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    interval: Quantity<Second>,
    pending: f64,
}

impl Ticker {
    /// Creates a ticker with the given period.
    pub fn new(interval: Quantity<Second>) -> Result<Self, ConfigError> {
        check_interval(interval)?;
        Ok(Self {
            interval,
            pending: 0.0,
        })
    }

    pub fn interval(&self) -> Quantity<Second> {
        self.interval
    }

    /// Changes the period. Time already accumulated is kept, up to the
    /// backlog cap of the new period.
    pub fn set_interval(&mut self, interval: Quantity<Second>) -> Result<(), ConfigError> {
        check_interval(interval)?;
        self.interval = interval;
        self.cap_backlog();
        Ok(())
    }

    /// Adds elapsed time, in any time unit. Negative or non-finite input is
    /// ignored; time beyond the backlog cap is dropped.
    pub fn accumulate<U>(&mut self, elapsed: Quantity<U>)
    where
        U: SameDim<Second>,
    {
        let dt = as_seconds(elapsed);
        if dt.is_finite() && dt > 0.0 {
            self.pending += dt;
            self.cap_backlog();
        }
    }

    fn cap_backlog(&mut self) {
        let cap = self.interval.value() * f64::from(MAX_BACKLOG_TICKS);
        self.pending = self.pending.min(cap);
    }

    /// Consumes one period if enough time has accumulated.
    pub fn fire(&mut self) -> bool {
        let period = self.interval.value();
        if self.pending >= period {
            self.pending -= period;
            true
        } else {
            false
        }
    }

    /// Seconds accumulated towards the next tick.
    pub fn pending(&self) -> f64 {
        self.pending
    }

    /// Drops accumulated time; cancels any due tick.
    pub fn clear(&mut self) {
        self.pending = 0.0;
    }
}

pub(crate) fn check_interval(interval: Quantity<Second>) -> Result<(), ConfigError> {
    let v = interval.value();
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ZeroTickInterval)
    }
}
