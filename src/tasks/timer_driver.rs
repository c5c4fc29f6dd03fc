//! Timer driver background task
//!
//! Owns the timer engine and the settings store, feeds it ticks from tokio
//! intervals and commands from the HTTP layer, and publishes a snapshot after
//! every event.

use std::future::pending;
use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, Instant, Interval},
};
use tracing::{debug, info, warn};

use crate::{
    settings::{CloseAction, SettingsError, SettingsForm, SettingsStore, TimerConfig},
    state::{ControlAction, SettingsClosed, TimerCommand, TimerSnapshot},
    timer::{Activity, ActivityHandle, TimerEngine, ViewState},
};

const COMMAND_BUFFER: usize = 32;

/// An interval that follows one activity's registration.
///
/// It exists only while the activity holds a handle and is re-created with
/// a full first period whenever the handle changes.
struct ActivityInterval {
    activity: Activity,
    handle: Option<ActivityHandle>,
    interval: Option<Interval>,
}

impl ActivityInterval {
    fn new(activity: Activity) -> Self {
        Self {
            activity,
            handle: None,
            interval: None,
        }
    }

    fn sync(&mut self, handle: Option<ActivityHandle>) {
        if handle == self.handle {
            return;
        }
        debug!("{:?} registration changed: {:?} -> {:?}", self.activity, self.handle, handle);
        self.handle = handle;
        self.interval = handle.map(|_| {
            let period = self.activity.period();
            interval_at(Instant::now() + period, period)
        });
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => pending::<()>().await,
        }
    }
}

/// Single owner of the timer engine
pub struct TimerDriver {
    engine: TimerEngine<ViewState>,
    store: Box<dyn SettingsStore>,
    commands: mpsc::Receiver<TimerCommand>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl TimerDriver {
    /// Load settings, create and load the engine, and open the channels the
    /// rest of the application uses to reach it.
    pub fn new(
        mut store: Box<dyn SettingsStore>,
    ) -> Result<(Self, mpsc::Sender<TimerCommand>, watch::Receiver<TimerSnapshot>), SettingsError> {
        let config = TimerConfig::load(store.as_mut())?;
        let mut engine = TimerEngine::new(config, ViewState::default());
        engine.load();

        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::capture(&engine));

        Ok((
            Self {
                engine,
                store,
                commands,
                snapshot_tx,
            },
            command_tx,
            snapshot_rx,
        ))
    }

    pub fn engine(&self) -> &TimerEngine<ViewState> {
        &self.engine
    }

    /// Run until a shutdown command arrives or every sender is dropped
    pub async fn run(mut self) {
        info!("Starting timer driver");

        let mut countdown = ActivityInterval::new(Activity::Countdown);
        let mut alarm_blink = ActivityInterval::new(Activity::AlarmBlink);
        let mut pause_blink = ActivityInterval::new(Activity::PauseBlink);

        loop {
            countdown.sync(self.engine.handle(Activity::Countdown));
            alarm_blink.sync(self.engine.handle(Activity::AlarmBlink));
            pause_blink.sync(self.engine.handle(Activity::PauseBlink));

            let countdown_armed = countdown.is_armed();
            let alarm_blink_armed = alarm_blink.is_armed();
            let pause_blink_armed = pause_blink.is_armed();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(TimerCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                _ = countdown.tick(), if countdown_armed => self.engine.fire(Activity::Countdown),
                _ = alarm_blink.tick(), if alarm_blink_armed => self.engine.fire(Activity::AlarmBlink),
                _ = pause_blink.tick(), if pause_blink_armed => self.engine.fire(Activity::PauseBlink),
            }

            self.publish();
        }

        self.engine.unload();
        self.publish();
        info!("Timer driver stopped");
    }

    fn handle_command(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Control { action, reply } => {
                match action {
                    ControlAction::Start => self.engine.start(),
                    ControlAction::PauseToggle => self.engine.pause_toggle(),
                    ControlAction::Reset => self.engine.reset(),
                }
                if reply.send(TimerSnapshot::capture(&self.engine)).is_err() {
                    debug!("Control caller went away before reply");
                }
            }
            TimerCommand::ReadSettings { reply } => {
                if reply.send(SettingsForm::from_store(self.store.as_ref())).is_err() {
                    debug!("Settings caller went away before reply");
                }
            }
            TimerCommand::CloseSettings { action, form, reply } => {
                let result = self.close_settings(action, form);
                if let Err(e) = &result {
                    warn!("Settings rejected: {}", e);
                }
                if reply.send(result).is_err() {
                    debug!("Settings caller went away before reply");
                }
            }
            TimerCommand::Shutdown => {}
        }
    }

    fn close_settings(
        &mut self,
        action: CloseAction,
        form: SettingsForm,
    ) -> Result<SettingsClosed, SettingsError> {
        let committed = form.close(action, self.store.as_mut())?;
        if committed {
            let config = TimerConfig::read_from(self.store.as_ref());
            self.engine.settings_committed(config);
        }

        Ok(SettingsClosed {
            committed,
            snapshot: TimerSnapshot::capture(&self.engine),
        })
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(TimerSnapshot::capture(&self.engine));
    }
}

/// Background task: run the timer driver until shutdown
pub async fn timer_driver_task(driver: TimerDriver) {
    driver.run().await;
}
