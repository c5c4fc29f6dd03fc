use work_timer::{
    settings::{MemoryStore, TimerConfig},
    timer::{Activity, Phase, TimerEngine, ViewState},
};

fn engine_with(duration_seconds: i64, negative: bool, autostart: bool) -> TimerEngine<ViewState> {
    let config = TimerConfig {
        duration_seconds,
        negative_count_enabled: negative,
        autostart,
        ..TimerConfig::read_from(&MemoryStore::new())
    };
    let mut engine = TimerEngine::new(config, ViewState::default());
    engine.load();
    engine
}

fn shown(engine: &TimerEngine<ViewState>) -> String {
    engine
        .host()
        .frame
        .as_ref()
        .map(|f| f.text.clone())
        .expect("a frame has been rendered")
}

#[test]
fn overtime_scenario_counts_past_zero() {
    let mut engine = engine_with(3, true, true);
    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(shown(&engine), "00:00:03");

    engine.tick();
    assert_eq!(shown(&engine), "00:00:02");
    engine.tick();
    assert_eq!(shown(&engine), "00:00:01");
    assert_eq!(engine.host().sounds_played, 0);

    engine.tick();
    assert_eq!(shown(&engine), "00:00:00");
    assert_eq!(engine.phase(), Phase::Alarmed);
    assert_eq!(engine.host().sounds_played, 1);
    assert_eq!(engine.host().last_sound.as_deref(), Some("audio/alarm_clock_bell.wav"));
    assert!(engine.host().flyout_visible);
    assert_eq!(engine.host().flyout_message.as_deref(), Some("Take a break!"));

    engine.tick();
    assert_eq!(shown(&engine), "-00:00:01");
    assert!(engine.host().frame.as_ref().unwrap().is_negative);
    assert!(engine.is_active(Activity::AlarmBlink));
    assert!(engine.is_active(Activity::Countdown));
    assert_eq!(engine.host().sounds_played, 1);
}

#[test]
fn without_overtime_the_countdown_freezes_at_zero() {
    let mut engine = engine_with(3, false, true);
    engine.tick();
    engine.tick();
    engine.tick();

    assert_eq!(engine.phase(), Phase::Alarmed);
    assert_eq!(engine.remaining_seconds(), 0);
    assert!(!engine.is_active(Activity::Countdown));
    assert!(engine.is_active(Activity::AlarmBlink));
    assert_eq!(engine.host().sounds_played, 1);

    // A stray timer firing after deregistration
    engine.tick();
    engine.tick();
    assert_eq!(engine.remaining_seconds(), 0);
    assert_eq!(shown(&engine), "00:00:00");
    assert_eq!(engine.host().sounds_played, 1);
}

#[test]
fn zero_duration_alarms_immediately_without_a_tick() {
    let mut engine = engine_with(0, false, false);
    engine.start();

    assert_eq!(engine.phase(), Phase::Alarmed);
    assert!(engine.alarm_fired());
    assert_eq!(engine.host().sounds_played, 1);
    assert_eq!(engine.handle(Activity::Countdown), None);

    engine.start();
    engine.tick();
    assert_eq!(engine.host().sounds_played, 1);
    assert_eq!(engine.handle(Activity::Countdown), None);
}

#[test]
fn zero_duration_with_autostart() {
    let engine = engine_with(0, false, true);
    assert_eq!(engine.phase(), Phase::Alarmed);
    assert_eq!(engine.host().sounds_played, 1);
    assert_eq!(engine.active_activities(), vec![Activity::AlarmBlink]);
}

#[test]
fn double_pause_toggle_leaves_time_untouched() {
    let mut engine = engine_with(600, true, true);
    engine.tick();
    engine.tick();

    engine.pause_toggle();
    assert_eq!(engine.phase(), Phase::Paused);
    assert!(!engine.is_active(Activity::Countdown));
    engine.pause_toggle();

    assert_eq!(engine.phase(), Phase::Running);
    assert_eq!(engine.remaining_seconds(), 598);
    assert!(engine.is_active(Activity::Countdown));
    assert!(!engine.is_active(Activity::PauseBlink));

    engine.tick();
    assert_eq!(engine.remaining_seconds(), 597);
}

#[test]
fn reset_from_every_phase_restores_idle() {
    let drive_to: [fn(&mut TimerEngine<ViewState>); 4] = [
        |_| {},
        |e| e.start(),
        |e| {
            e.start();
            e.pause_toggle();
        },
        |e| {
            e.start();
            for _ in 0..5 {
                e.tick();
            }
            e.alarm_blink_tick();
        },
    ];

    for (i, drive) in drive_to.iter().enumerate() {
        let mut engine = engine_with(3, true, false);
        drive(&mut engine);
        engine.reset();

        assert_eq!(engine.phase(), Phase::Idle, "case {i}");
        assert_eq!(engine.remaining_seconds(), 3, "case {i}");
        assert!(!engine.alarm_fired(), "case {i}");
        assert!(engine.active_activities().is_empty(), "case {i}");
        for activity in [Activity::Countdown, Activity::AlarmBlink, Activity::PauseBlink] {
            assert_eq!(engine.handle(activity), None, "case {i}");
        }
        assert!(!engine.host().flyout_visible, "case {i}");
        let frame = engine.host().frame.as_ref().unwrap();
        assert!(frame.visible, "case {i}");
        assert_eq!(frame.text, "00:00:03", "case {i}");
    }
}

#[test]
fn alarm_fires_once_per_cycle_and_again_after_reset() {
    let mut engine = engine_with(1, true, true);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.host().sounds_played, 1);
    assert_eq!(engine.remaining_seconds(), -9);

    engine.reset();
    engine.start();
    engine.tick();
    assert_eq!(engine.host().sounds_played, 2);
}

#[test]
fn alarm_blink_hides_and_shows_the_display() {
    let mut engine = engine_with(1, true, true);
    engine.tick();

    let visibility: Vec<bool> = (0..4)
        .map(|_| {
            engine.alarm_blink_tick();
            engine.host().frame.as_ref().unwrap().visible
        })
        .collect();
    assert_eq!(visibility, vec![false, true, false, true]);
}
