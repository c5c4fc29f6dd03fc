//! Two-state blinking indicators

use serde::Serialize;

use super::activity::{Activity, ActivityHandle, HandleAllocator, ScheduledActivity};

/// Which of the two alternating states a blinker is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlinkStep {
    A,
    B,
}

impl BlinkStep {
    fn toggled(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// A repeating toggle between [`BlinkStep::A`] and [`BlinkStep::B`].
///
/// What the steps mean is up to the owner: for the alarm blink `A` is
/// "shown" and `B` "hidden", for the pause blink `A` is the paused colour
/// and `B` the normal background.
#[derive(Debug)]
pub struct Blinker {
    activity: ScheduledActivity,
    step: BlinkStep,
}

impl Blinker {
    pub fn new(kind: Activity) -> Self {
        Self {
            activity: ScheduledActivity::new(kind),
            step: BlinkStep::A,
        }
    }

    /// Start blinking from step `A`, replacing any running registration
    pub fn start(&mut self, handles: &mut HandleAllocator) -> ActivityHandle {
        self.step = BlinkStep::A;
        self.activity.start(handles)
    }

    /// Stop blinking and return to step `A`
    pub fn stop(&mut self) -> bool {
        self.step = BlinkStep::A;
        self.activity.stop()
    }

    /// Advance one period. Returns the new step, or `None` when inactive.
    pub fn step(&mut self) -> Option<BlinkStep> {
        if !self.activity.is_active() {
            return None;
        }
        self.step = self.step.toggled();
        Some(self.step)
    }

    pub fn current(&self) -> BlinkStep {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.activity.is_active()
    }

    pub fn handle(&self) -> Option<ActivityHandle> {
        self.activity.handle()
    }
}
