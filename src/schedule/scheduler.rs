use tracing::{debug, info};

use crate::foundation::core::{FrameIndex, FrameRate};
use crate::foundation::error::FlipResult;
use crate::schedule::ticks::TickSource;

/// Mutable state of one scheduler run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    current_frame: u64,
    start_time_ms: Option<f64>,
}

impl PlaybackState {
    /// Fresh state: nothing drawn, clock not started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next frame to draw, which is also the number of frames drawn so far.
    pub fn current_frame(&self) -> FrameIndex {
        FrameIndex(self.current_frame)
    }

    /// Timestamp of the first refresh, once seen.
    pub fn start_time_ms(&self) -> Option<f64> {
        self.start_time_ms
    }
}

/// Outcome of feeding one refresh to [`FrameScheduler::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Frame to draw on this refresh, if one became due.
    pub drawn: Option<FrameIndex>,
    /// No further refresh is needed.
    pub finished: bool,
}

/// Time-driven frame scheduler decoupled from the host refresh rate.
///
/// Elapsed time is floored to whole draw intervals to find the frame that is due. At most one
/// frame is drawn per refresh: when several are due the scheduler falls behind instead of
/// drawing a burst, so frame indices advance by exactly one per draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameScheduler {
    num_frames: u64,
    rate: FrameRate,
}

impl FrameScheduler {
    /// Scheduler drawing `num_frames` frames at `fps` frames per second.
    pub fn new(num_frames: u64, fps: f64) -> FlipResult<Self> {
        Ok(Self {
            num_frames,
            rate: FrameRate::new(fps)?,
        })
    }

    /// Number of frames a complete run needs (a zero-frame run still draws once).
    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    /// Logical frame rate.
    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Frame that is due after `elapsed_ms`, as a whole number of draw intervals.
    pub fn target_frame(&self, elapsed_ms: f64) -> f64 {
        let interval = self.rate.draw_interval_ms();
        let normalized = elapsed_ms - elapsed_ms % interval;
        normalized / interval
    }

    /// Advance `state` for a refresh at `now_ms`.
    pub fn step(&self, state: &mut PlaybackState, now_ms: f64) -> Tick {
        let start = *state.start_time_ms.get_or_insert(now_ms);
        let target = self.target_frame(now_ms - start);

        let mut drawn = None;
        if (state.current_frame as f64) < target + 1.0 {
            drawn = Some(FrameIndex(state.current_frame));
            state.current_frame += 1;
        }

        Tick {
            drawn,
            finished: state.current_frame >= self.num_frames,
        }
    }

    /// Drive a full run from `ticks`.
    ///
    /// `on_frame` receives every frame index in order; `on_done` receives the final counter,
    /// which equals [`FrameScheduler::num_frames`]. The end is only checked after a refresh had
    /// its chance to draw, so a run of zero frames still draws frame 0 and ends on 1. There is
    /// no way to stop a run early, and a tick source that stops refreshing stalls it.
    #[tracing::instrument(skip_all, fields(num_frames = self.num_frames, fps = self.rate.as_f64()))]
    pub async fn run<F, D>(
        &self,
        ticks: &mut dyn TickSource,
        mut on_frame: F,
        on_done: D,
    ) -> FrameIndex
    where
        F: FnMut(FrameIndex),
        D: FnOnce(FrameIndex),
    {
        let mut state = PlaybackState::new();
        loop {
            let now = ticks.next_tick().await;
            let tick = self.step(&mut state, now);
            if let Some(frame) = tick.drawn {
                debug!(frame = frame.0, now_ms = now, "draw");
                on_frame(frame);
            }
            if tick.finished {
                let last = state.current_frame();
                info!(last = last.0, "scheduler finished");
                on_done(last);
                return last;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
