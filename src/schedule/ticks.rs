use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::foundation::error::{FlipError, FlipResult};

/// Host refresh timer driving the scheduler.
///
/// Each call waits for the next refresh and returns its timestamp in milliseconds. Timestamps
/// are monotonic and share an arbitrary origin; the refresh rate is independent of the
/// playback rate.
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next refresh and return its timestamp in milliseconds.
    async fn next_tick(&mut self) -> f64;
}

/// Real-time refresh timer backed by a tokio interval.
///
/// Late refreshes are skipped rather than replayed, like a display that drops vsyncs.
#[derive(Debug)]
pub struct IntervalTicks {
    period: Duration,
    timer: Option<(Interval, Instant)>,
}

impl IntervalTicks {
    /// Timer firing `hz` times per second. The interval starts on the first tick, so this may be
    /// built outside a runtime.
    pub fn new(hz: f64) -> FlipResult<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(FlipError::validation(format!(
                "tick rate must be finite and > 0 (got {hz})"
            )));
        }
        Ok(Self {
            period: Duration::from_secs_f64(1.0 / hz),
            timer: None,
        })
    }

    /// Time between two refreshes.
    pub fn period(&self) -> Duration {
        self.period
    }
}

/// A clone keeps the period but starts its own timer on its first tick.
impl Clone for IntervalTicks {
    fn clone(&self) -> Self {
        Self {
            period: self.period,
            timer: None,
        }
    }
}

#[async_trait]
impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> f64 {
        let period = self.period;
        let (interval, origin) = self.timer.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            (interval, Instant::now())
        });
        let at = interval.tick().await;
        at.saturating_duration_since(*origin).as_secs_f64() * 1000.0
    }
}

/// Simulated clock advancing a fixed step per refresh without sleeping.
///
/// Yields to the runtime between refreshes so other tasks keep making progress.
#[derive(Clone, Debug)]
pub struct FixedStepTicks {
    now_ms: f64,
    step_ms: f64,
}

impl FixedStepTicks {
    /// Clock starting at `start_ms` and advancing `step_ms` per refresh.
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }

    /// Clock matching a display refreshing `hz` times per second.
    pub fn from_hz(hz: f64) -> Self {
        Self::new(0.0, 1000.0 / hz)
    }
}

#[async_trait]
impl TickSource for FixedStepTicks {
    async fn next_tick(&mut self) -> f64 {
        tokio::task::yield_now().await;
        let now = self.now_ms;
        self.now_ms += self.step_ms;
        now
    }
}

/// Replays an explicit list of timestamps, then stalls like a host that stopped refreshing.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTicks {
    pending: VecDeque<f64>,
    delivered: usize,
}

impl ScriptedTicks {
    /// Source replaying `timestamps_ms` in order.
    pub fn new(timestamps_ms: impl IntoIterator<Item = f64>) -> Self {
        Self {
            pending: timestamps_ms.into_iter().collect(),
            delivered: 0,
        }
    }

    /// Number of refreshes handed out so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Timestamps not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl TickSource for ScriptedTicks {
    async fn next_tick(&mut self) -> f64 {
        tokio::task::yield_now().await;
        match self.pending.pop_front() {
            Some(t) => {
                self.delivered += 1;
                t
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/ticks.rs"]
mod tests;
