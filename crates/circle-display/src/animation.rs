use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum Easing {
    #[default]
    AccelerateDecelerate,
    Linear,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Linear => t,
        }
    }
}

/// Token for one animation run. Ticks carrying the token of an older run are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRun {
    generation: u64,
    duration: Duration,
}

impl AnimationRun {
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Idle,
    Running(AnimationRun),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Running(f64),
    Finished,
    Stale,
}

impl TickOutcome {
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Running(_))
    }
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    phase: f64,
    duration: Duration,
    easing: Easing,
    status: AnimationStatus,
    generation: u64,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            phase: 0.0,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            status: AnimationStatus::Idle,
            generation: 0,
        }
    }
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, AnimationStatus::Running(_))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Resets the phase to 0 and begins a new run, superseding any run in flight.
    pub fn start(&mut self) -> AnimationRun {
        self.generation = self.generation.wrapping_add(1);
        let run = AnimationRun {
            generation: self.generation,
            duration: self.duration,
        };
        self.phase = 0.0;
        self.status = AnimationStatus::Running(run);
        run
    }

    pub fn tick(&mut self, run: AnimationRun, elapsed: Duration) -> TickOutcome {
        if !self.is_current(run) {
            return TickOutcome::Stale;
        }

        if run.duration.is_zero() || elapsed >= run.duration {
            self.settle();
            return TickOutcome::Finished;
        }

        let t = elapsed.as_secs_f64() / run.duration.as_secs_f64();
        // never step backwards even if the host clock does
        self.phase = self.easing.apply(t).max(self.phase);
        TickOutcome::Running(self.phase)
    }

    pub fn complete(&mut self, run: AnimationRun) -> TickOutcome {
        if !self.is_current(run) {
            return TickOutcome::Stale;
        }
        self.settle();
        TickOutcome::Finished
    }

    /// Jumps straight to phase 1, invalidating any run in flight.
    pub fn finish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.settle();
    }

    fn is_current(&self, run: AnimationRun) -> bool {
        self.status == AnimationStatus::Running(run)
    }

    fn settle(&mut self) {
        self.phase = 1.0;
        self.status = AnimationStatus::Idle;
    }
}
