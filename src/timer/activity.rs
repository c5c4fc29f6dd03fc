//! Scheduled repeating activities
//!
//! The engine never owns a real timer. It records which repeating activities
//! are registered, each identified by a fresh [`ActivityHandle`]; the runtime
//! driver fires the matching callbacks while a handle is present and re-arms
//! its interval whenever the handle changes.

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

/// The three repeating activities the engine can register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Countdown,
    AlarmBlink,
    PauseBlink,
}

impl Activity {
    /// Period between firings
    pub fn period(self) -> Duration {
        match self {
            Self::Countdown => Duration::from_secs(1),
            Self::AlarmBlink | Self::PauseBlink => Duration::from_millis(500),
        }
    }
}

/// Opaque identifier of one registration of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActivityHandle(u64);

/// Hands out unique handles for the lifetime of an engine
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn allocate(&mut self) -> ActivityHandle {
        self.next += 1;
        ActivityHandle(self.next)
    }
}

/// A single repeating activity slot. At most one registration is live.
#[derive(Debug)]
pub struct ScheduledActivity {
    kind: Activity,
    handle: Option<ActivityHandle>,
}

impl ScheduledActivity {
    pub fn new(kind: Activity) -> Self {
        Self { kind, handle: None }
    }

    /// Register the activity, cancelling any prior registration first
    pub fn start(&mut self, handles: &mut HandleAllocator) -> ActivityHandle {
        if let Some(old) = self.handle.take() {
            trace!("Cancelling {:?} registration {:?} before restart", self.kind, old);
        }
        let handle = handles.allocate();
        trace!("Registered {:?} as {:?}", self.kind, handle);
        self.handle = Some(handle);
        handle
    }

    /// Cancel the registration. Returns false if nothing was registered.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                trace!("Cancelled {:?} registration {:?}", self.kind, handle);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<ActivityHandle> {
        self.handle
    }
}
