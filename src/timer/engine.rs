//! Countdown state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    activity::{Activity, ActivityHandle, HandleAllocator, ScheduledActivity},
    blinker::{BlinkStep, Blinker},
    display,
    host::{Frame, GadgetHost},
};
use crate::settings::TimerConfig;

/// Where the countdown is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Loaded or reset, not counting
    Idle,
    Running,
    /// Suspended by the user
    Paused,
    /// Reached zero and sounded the alarm; may still be counting into overtime
    Alarmed,
}

/// Mutable countdown state for one widget session
#[derive(Debug)]
pub struct TimerState {
    pub remaining_seconds: i64,
    pub phase: Phase,
    pub alarm_fired: bool,
    pub visible: bool,
    countdown: ScheduledActivity,
    alarm_blink: Blinker,
    pause_blink: Blinker,
}

impl TimerState {
    pub fn new(remaining_seconds: i64) -> Self {
        Self {
            remaining_seconds,
            phase: Phase::Idle,
            alarm_fired: false,
            visible: true,
            countdown: ScheduledActivity::new(Activity::Countdown),
            alarm_blink: Blinker::new(Activity::AlarmBlink),
            pause_blink: Blinker::new(Activity::PauseBlink),
        }
    }

    pub fn handle(&self, activity: Activity) -> Option<ActivityHandle> {
        match activity {
            Activity::Countdown => self.countdown.handle(),
            Activity::AlarmBlink => self.alarm_blink.handle(),
            Activity::PauseBlink => self.pause_blink.handle(),
        }
    }
}

/// The work timer: owns the configuration snapshot, the countdown state and
/// the host it presents to.
///
/// Every operation is synchronous and infallible. Host failures are logged
/// and the affected frame is skipped.
#[derive(Debug)]
pub struct TimerEngine<H> {
    config: TimerConfig,
    state: TimerState,
    host: H,
    handles: HandleAllocator,
}

impl<H: GadgetHost> TimerEngine<H> {
    pub fn new(config: TimerConfig, host: H) -> Self {
        Self {
            state: TimerState::new(config.duration_seconds),
            config,
            host,
            handles: HandleAllocator::default(),
        }
    }

    /// Show the initial time and start counting if autostart is set
    pub fn load(&mut self) {
        info!(
            "Timer loaded: {}s, autostart={}, negative_count={}",
            self.config.duration_seconds, self.config.autostart, self.config.negative_count_enabled
        );
        self.render();
        if self.config.autostart {
            self.start();
        }
    }

    /// Begin counting down. Ignored unless idle.
    pub fn start(&mut self) {
        if self.state.phase != Phase::Idle {
            debug!("Start ignored while {:?}", self.state.phase);
            return;
        }

        if self.state.remaining_seconds <= 0 {
            info!("Timer started with no time remaining");
            self.fire_alarm();
            if self.config.negative_count_enabled {
                self.state.countdown.start(&mut self.handles);
            }
        } else {
            info!("Timer started with {}s remaining", self.state.remaining_seconds);
            self.state.phase = Phase::Running;
            self.state.countdown.start(&mut self.handles);
        }
        self.render();
    }

    /// One second elapsed. Ignored when no countdown is registered.
    pub fn tick(&mut self) {
        if !self.state.countdown.is_active() {
            debug!("Ignoring stray tick, countdown not registered");
            return;
        }

        self.state.remaining_seconds -= 1;
        debug!("Tick: {}s remaining", self.state.remaining_seconds);

        if self.state.remaining_seconds <= 0 {
            if !self.config.negative_count_enabled {
                self.state.countdown.stop();
            }
            if !self.state.alarm_fired {
                self.fire_alarm();
            }
        }
        self.render();
    }

    /// Pause a running or alarmed timer, resume a paused one, start an idle one
    pub fn pause_toggle(&mut self) {
        match self.state.phase {
            Phase::Idle => self.start(),
            Phase::Running | Phase::Alarmed => self.pause(),
            Phase::Paused => self.resume(),
        }
    }

    /// Stop everything and restore the configured duration
    pub fn reset(&mut self) {
        info!("Timer reset to {}s", self.config.duration_seconds);
        self.cancel_activities();
        self.hide_flyout();
        self.state.alarm_fired = false;
        self.state.remaining_seconds = self.config.duration_seconds;
        self.state.visible = true;
        self.state.phase = Phase::Idle;
        self.render();
    }

    /// Adopt freshly committed settings without touching the remaining time.
    ///
    /// A new duration applies from the next reset.
    pub fn settings_committed(&mut self, config: TimerConfig) {
        info!("Settings committed while {:?}", self.state.phase);
        self.config = config;

        if self.state.phase == Phase::Paused {
            self.state.pause_blink.stop();
            if self.config.paused_flash_enabled {
                self.state.pause_blink.start(&mut self.handles);
            }
        }
        self.render();
    }

    /// Widget is going away: release every registration
    pub fn unload(&mut self) {
        info!("Timer unloading");
        self.cancel_activities();
        self.hide_flyout();
    }

    /// Flip the alarm blink; the display is shown on step `A`
    pub fn alarm_blink_tick(&mut self) {
        if let Some(step) = self.state.alarm_blink.step() {
            self.state.visible = step == BlinkStep::A;
            self.render();
        }
    }

    /// Flip the pause blink between paused and normal background
    pub fn pause_blink_tick(&mut self) {
        if self.state.pause_blink.step().is_some() {
            self.render();
        }
    }

    /// Dispatch one firing of `activity`
    pub fn fire(&mut self, activity: Activity) {
        match activity {
            Activity::Countdown => self.tick(),
            Activity::AlarmBlink => self.alarm_blink_tick(),
            Activity::PauseBlink => self.pause_blink_tick(),
        }
    }

    /// The frame the view should currently show
    pub fn frame(&self) -> Frame {
        let time = display::format(self.state.remaining_seconds, self.config.negative_count_enabled);
        let colors = display::colors_for(self.state.phase, &self.config);

        let background = if self.state.pause_blink.is_active()
            && self.state.pause_blink.current() == BlinkStep::B
        {
            self.config.background_color.clone()
        } else {
            colors.background
        };

        Frame {
            text: time.text,
            is_negative: time.is_negative,
            text_color: colors.text,
            background,
            visible: self.state.visible,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.state.remaining_seconds
    }

    pub fn alarm_fired(&self) -> bool {
        self.state.alarm_fired
    }

    pub fn handle(&self, activity: Activity) -> Option<ActivityHandle> {
        self.state.handle(activity)
    }

    pub fn is_active(&self, activity: Activity) -> bool {
        self.handle(activity).is_some()
    }

    /// Activities that currently hold a registration
    pub fn active_activities(&self) -> Vec<Activity> {
        [Activity::Countdown, Activity::AlarmBlink, Activity::PauseBlink]
            .into_iter()
            .filter(|a| self.is_active(*a))
            .collect()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn pause(&mut self) {
        info!("Timer paused at {}s", self.state.remaining_seconds);
        self.state.countdown.stop();
        if !self.config.negative_count_enabled {
            self.state.visible = true;
        }
        self.hide_flyout();
        self.state.phase = Phase::Paused;
        if self.config.paused_flash_enabled {
            self.state.pause_blink.start(&mut self.handles);
        }
        self.render();
    }

    fn resume(&mut self) {
        info!("Timer resumed at {}s", self.state.remaining_seconds);
        self.state.pause_blink.stop();

        if self.config.negative_count_enabled || self.state.remaining_seconds > 0 {
            self.state.countdown.start(&mut self.handles);
        }

        if self.state.alarm_fired {
            if !self.state.alarm_blink.is_active() {
                self.state.alarm_blink.start(&mut self.handles);
            }
            self.state.phase = Phase::Alarmed;
        } else {
            self.state.phase = Phase::Running;
        }
        self.render();
    }

    fn fire_alarm(&mut self) {
        info!("Countdown expired, sounding alarm {}", self.config.alarm_sound_id);
        self.host.play_sound(&self.config.alarm_sound_path());
        self.state.alarm_blink.start(&mut self.handles);
        if let Err(e) = self.host.show_flyout(&self.config.message) {
            warn!("Could not show flyout: {}", e);
        }
        self.state.alarm_fired = true;
        self.state.phase = Phase::Alarmed;
    }

    fn hide_flyout(&mut self) {
        if let Err(e) = self.host.hide_flyout() {
            warn!("Could not hide flyout: {}", e);
        }
    }

    fn cancel_activities(&mut self) {
        self.state.countdown.stop();
        self.state.alarm_blink.stop();
        self.state.pause_blink.stop();
    }

    fn render(&mut self) {
        let frame = self.frame();
        if let Err(e) = self.host.render(&frame) {
            warn!("Skipping frame {}: {}", frame.text, e);
        }
    }
}
