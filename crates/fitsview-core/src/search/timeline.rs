use std::time::{Duration, Instant};

use crate::consts::{MAX_TIMELINE_FPS, MIN_TIMELINE_FPS};

/// Frame playback for the timeline modal.
///
/// The ticker is a deadline rather than a thread: callers feed the current
/// time to [`poll`](Self::poll), which advances one frame per elapsed tick and
/// wraps back to the first frame.
#[derive(Clone, Debug)]
pub struct TimelinePlayer {
    frame_count: usize,
    index: usize,
    fps: f32,
    next_tick: Option<Instant>,
    open: bool,
}

impl TimelinePlayer {
    pub fn new(frame_count: usize, fps: f32) -> Self {
        Self {
            frame_count,
            index: 0,
            fps: clamp_fps(fps),
            next_tick: None,
            open: true,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_playing(&self) -> bool {
        self.next_tick.is_some()
    }

    /// True while a tick is scheduled.
    pub fn is_timer_active(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps)
    }

    /// Start the ticker. No-op with no frames or when closed.
    pub fn play(&mut self, now: Instant) {
        if self.frame_count == 0 || !self.open {
            return;
        }
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.interval());
        }
    }

    pub fn pause(&mut self) {
        self.next_tick = None;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Change the rate. A running ticker restarts from `now` at the new rate.
    pub fn set_fps(&mut self, fps: f32, now: Instant) {
        self.fps = clamp_fps(fps);
        if self.next_tick.is_some() {
            self.next_tick = Some(now + self.interval());
        }
    }

    /// Jump to a frame. Out-of-range indices clamp to the last frame.
    pub fn scrub(&mut self, index: usize) {
        self.index = index.min(self.frame_count.saturating_sub(1));
    }

    /// Dismiss the modal; the ticker is cleared.
    pub fn close(&mut self) {
        self.pause();
        self.open = false;
    }

    /// Advance for every tick due at `now`. Returns the number of advances.
    pub fn poll(&mut self, now: Instant) -> usize {
        let Some(mut deadline) = self.next_tick else {
            return 0;
        };
        let interval = self.interval();
        let mut advances = 0;
        while deadline <= now {
            self.index = (self.index + 1) % self.frame_count;
            deadline += interval;
            advances += 1;
        }
        self.next_tick = Some(deadline);
        advances
    }

    /// Time until the next frame change, for scheduling a repaint.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

fn clamp_fps(fps: f32) -> f32 {
    if fps.is_finite() {
        fps.clamp(MIN_TIMELINE_FPS, MAX_TIMELINE_FPS)
    } else {
        MIN_TIMELINE_FPS
    }
}
