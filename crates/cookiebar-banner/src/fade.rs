//! Opacity steps for fading elements in and out

use std::time::Duration;

pub const STEPS: u32 = 10;

pub const BAR_FADE: Duration = Duration::from_millis(250);
pub const BLOCKING_PROMPT_FADE: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Ten evenly spaced 0.1 opacity steps over `duration`.
#[derive(Clone, Copy, Debug)]
pub struct FadeSchedule {
    pub direction: FadeDirection,
    pub duration: Duration,
}

impl FadeSchedule {
    pub fn fade_in(duration: Duration) -> Self {
        Self { direction: FadeDirection::In, duration }
    }

    pub fn fade_out(duration: Duration) -> Self {
        Self { direction: FadeDirection::Out, duration }
    }

    pub fn step_interval(&self) -> Duration {
        self.duration / STEPS
    }

    /// `(offset from start, opacity)` for every step. The last fade-out step
    /// is fully transparent, which is when the element stops being displayed.
    pub fn steps(&self) -> impl Iterator<Item = (Duration, f32)> + '_ {
        (1..=STEPS).map(move |i| {
            let offset = self.step_interval() * (i - 1);
            let level = i as f32 / STEPS as f32;
            let opacity = match self.direction {
                FadeDirection::In => level,
                FadeDirection::Out => 1.0 - level,
            };
            (offset, opacity)
        })
    }
}
