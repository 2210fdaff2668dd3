//! Refresh ticks from `setInterval`.

use std::rc::Rc;

use cinnamon_core::{IntervalTimer, TimerHandle};
use gloo_timers::callback::Interval;

/// Starts browser intervals.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

/// A running browser interval; cancelling clears it.
#[derive(Debug)]
pub struct IntervalHandle(Interval);

impl TimerHandle for IntervalHandle {
    fn cancel(self) {
        drop(self.0.cancel());
    }
}

impl IntervalTimer for GlooTimer {
    type Handle = IntervalHandle;

    fn start(&self, interval_ms: u32, tick: Rc<dyn Fn()>) -> IntervalHandle {
        IntervalHandle(Interval::new(interval_ms, move || tick()))
    }
}
