//! Periodic refresh timer with live interval changes.
//!
//! The scheduler owns the only refresh timer. Starting or reconfiguring always
//! cancels the previous timer first, so at most one is ever active. Cycles
//! already running when the interval changes are not affected.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Error;
use crate::result::Result;

/// Refresh cadence; always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RefreshConfig {
    interval_ms: u32,
}

impl RefreshConfig {
    /// Five seconds.
    pub const DEFAULT: Self = Self { interval_ms: 5000 };

    /// # Errors
    ///
    /// Returns an error for a zero interval.
    pub fn new(interval_ms: u32) -> Result<Self> {
        if interval_ms == 0 {
            return Err(Error::invalid_interval(interval_ms));
        }
        Ok(Self { interval_ms })
    }

    /// Interval given in whole seconds, as offered by the settings selector.
    ///
    /// # Errors
    ///
    /// Returns an error for zero or an interval that overflows milliseconds.
    pub fn from_secs(secs: u32) -> Result<Self> {
        secs.checked_mul(1000)
            .ok_or_else(|| Error::invalid_interval(secs))
            .and_then(Self::new)
    }

    /// Parses the raw selector value (seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a positive whole number of seconds.
    pub fn parse_secs(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::invalid_interval(value))
            .and_then(Self::from_secs)
    }

    #[must_use]
    pub const fn interval_ms(self) -> u32 {
        self.interval_ms
    }
}

impl TryFrom<u32> for RefreshConfig {
    type Error = Error;

    fn try_from(interval_ms: u32) -> Result<Self> {
        Self::new(interval_ms)
    }
}

impl From<RefreshConfig> for u32 {
    fn from(config: RefreshConfig) -> Self {
        config.interval_ms
    }
}

/// Cancellation token of a running timer.
pub trait TimerHandle {
    /// Stops the timer; no tick fires after this returns.
    fn cancel(self);
}

/// Source of repeating ticks.
pub trait IntervalTimer {
    type Handle: TimerHandle;

    /// Calls `tick` every `interval_ms`, first after one full interval.
    fn start(&self, interval_ms: u32, tick: Rc<dyn Fn()>) -> Self::Handle;
}

/// Owns the refresh timer and its cadence.
pub struct RefreshScheduler<T: IntervalTimer> {
    timer: T,
    tick: Rc<dyn Fn()>,
    active: Option<(RefreshConfig, T::Handle)>,
}

impl<T: IntervalTimer> RefreshScheduler<T> {
    /// Scheduler that will call `tick` on every timer firing once started.
    pub fn new(timer: T, tick: impl Fn() + 'static) -> Self {
        Self {
            timer,
            tick: Rc::new(tick),
            active: None,
        }
    }

    /// Begins periodic ticks, replacing any running timer.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero interval; a running timer is left as is.
    pub fn start(&mut self, interval_ms: u32) -> Result<()> {
        let config = RefreshConfig::new(interval_ms)?;
        self.stop();
        let handle = self.timer.start(config.interval_ms(), Rc::clone(&self.tick));
        self.active = Some((config, handle));
        debug!(interval_ms, "refresh timer started");
        Ok(())
    }

    /// Switches to a new interval starting with the next tick.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero interval; the current timer keeps running.
    pub fn reconfigure(&mut self, interval_ms: u32) -> Result<()> {
        let previous = self.interval_ms();
        self.start(interval_ms)?;
        info!(?previous, interval_ms, "refresh interval changed");
        Ok(())
    }

    /// Cancels the timer if one is running.
    pub fn stop(&mut self) {
        if let Some((config, handle)) = self.active.take() {
            handle.cancel();
            debug!(interval_ms = config.interval_ms(), "refresh timer cancelled");
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Interval of the running timer.
    #[must_use]
    pub fn interval_ms(&self) -> Option<u32> {
        self.active.as_ref().map(|(config, _)| config.interval_ms())
    }
}

impl<T: IntervalTimer> Drop for RefreshScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
