//! End-to-end alarm flows: sensors → AlarmSystem → outputs and event log.

use gasalarm::alarm::{DisarmSource, SirenMode};
use gasalarm::app::events::AppEvent;
use gasalarm::console;

use super::mock_hw::{make_system, press_keys, run_ticks};

#[test]
fn gas_raises_alarm_with_one_second_blink() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.gas_present = true;
    run_ticks(&mut system, &mut board, 15);

    assert!(system.alarm().is_active());
    assert!(system.alarm().gas_detected());
    assert!(!system.alarm().over_temp_detected());
    assert_eq!(board.hw.siren, Some(SirenMode::Sounding));

    // The alarm latches after the gas clears.
    board.hw.inputs.gas_present = false;
    run_ticks(&mut system, &mut board, 335);

    assert!(system.alarm().is_active());
    assert_eq!(board.hw.alarm_led_toggles(), vec![100, 200, 300]);
    assert_eq!(board.sink.count("ALARM_ON"), 1);
    assert_eq!(board.sink.count("GAS_DET_ON"), 1);
    assert_eq!(board.sink.count("GAS_DET_OFF"), 1);
    assert_eq!(
        board
            .sink
            .events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmRaised { .. }))
            .count(),
        1
    );
    assert!(board.console.output.starts_with("ALARM_ON\r\nGAS_DET_ON\r\n"));
}

#[test]
fn over_temperature_needs_the_average_to_cross() {
    let (mut system, mut board) = make_system();

    // 0.5 of full scale is 165 °C; each sample lifts the 100-sample mean
    // by 1.65 °C, so the 31st sample is the first above 50 °C.
    board.hw.inputs.lm35_reading = 0.5;
    run_ticks(&mut system, &mut board, 30);
    assert!(!system.alarm().is_active());

    system.tick(&mut board);
    assert!(system.alarm().is_active());
    assert!(system.alarm().over_temp_detected());
    assert!(!system.alarm().gas_detected());

    run_ticks(&mut system, &mut board, 60);
    assert_eq!(board.hw.alarm_led_toggles(), vec![80]);
    assert_eq!(board.sink.count("OVER_TEMP_ON"), 1);
}

#[test]
fn test_button_raises_both_sub_alarms() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.test_button_pressed = true;
    system.tick(&mut board);
    board.hw.inputs.test_button_pressed = false;
    run_ticks(&mut system, &mut board, 29);

    assert!(system.alarm().gas_detected());
    assert!(system.alarm().over_temp_detected());
    assert_eq!(board.hw.alarm_led_toggles(), vec![10, 20, 30]);
    // The detectors themselves never saw anything.
    assert_eq!(board.sink.count("GAS_DET_ON"), 0);
    assert_eq!(board.sink.count("ALARM_ON"), 1);
    assert!(board.sink.events.contains(&AppEvent::AlarmRaised {
        gas: true,
        over_temp: true,
    }));
}

#[test]
fn keypad_code_disarms() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;

    press_keys(&mut system, &mut board, "1805#");
    assert!(!system.alarm().is_active());
    assert!(
        board
            .sink
            .events
            .contains(&AppEvent::AlarmCleared(DisarmSource::Keypad))
    );

    system.tick(&mut board);
    assert_eq!(board.hw.siren, Some(SirenMode::Released));
    assert!(!board.hw.alarm_led());
    assert_eq!(board.sink.count("ALARM_OFF"), 1);
}

#[test]
fn keypad_success_keeps_incorrect_code_led() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;

    press_keys(&mut system, &mut board, "0000#");
    assert!(system.alarm().is_active());
    assert!(board.hw.incorrect_code_led);
    assert!(board.sink.events.contains(&AppEvent::IncorrectCode {
        source: DisarmSource::Keypad,
        attempts: 1,
    }));

    press_keys(&mut system, &mut board, "1805#");
    assert!(!system.alarm().is_active());
    assert_eq!(system.alarm().guard().incorrect_attempts(), 0);
    assert!(board.hw.incorrect_code_led);
}

#[test]
fn submit_without_alarm_is_ignored() {
    let (mut system, mut board) = make_system();

    press_keys(&mut system, &mut board, "0000#");

    assert!(!system.alarm().is_active());
    assert_eq!(system.alarm().guard().incorrect_attempts(), 0);
    assert_eq!(system.alarm().guard().submit_presses(), 1);
    assert!(!board.hw.incorrect_code_led);
}

#[test]
fn fifth_wrong_code_locks_the_keypad() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;

    for _ in 0..4 {
        press_keys(&mut system, &mut board, "0000#");
    }
    assert!(!system.alarm().guard().is_locked_out());
    assert!(!board.hw.system_blocked_led);

    press_keys(&mut system, &mut board, "0000#");
    assert!(system.alarm().guard().is_locked_out());
    assert!(board.sink.events.contains(&AppEvent::LockedOut { attempts: 5 }));

    // The blocked indicator follows on the next tick.
    system.tick(&mut board);
    assert!(board.hw.system_blocked_led);
    assert_eq!(board.sink.count("LED_SB_ON"), 1);

    // A locked keypad is not even scanned.
    let scans = board.hw.scans;
    press_keys(&mut system, &mut board, "1805#");
    assert_eq!(board.hw.scans, scans);
    assert!(system.alarm().is_active());

    // The console still disarms, but the lockout stays.
    board.console.type_bytes(b"41805");
    system.tick(&mut board);
    assert!(!system.alarm().is_active());
    assert!(board.console.output.contains(console::CODE_CORRECT));
    assert!(!board.hw.incorrect_code_led);
    assert!(board.hw.system_blocked_led);
}

#[test]
fn reset_clears_lockout() {
    let (mut system, mut board) = make_system();

    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;
    for _ in 0..5 {
        press_keys(&mut system, &mut board, "0000#");
    }
    assert!(system.alarm().guard().is_locked_out());

    system.reset();
    assert!(!system.alarm().guard().is_locked_out());
    assert!(!system.alarm().is_active());
    assert_eq!(system.tick_count(), 0);
    assert!(system.event_log().is_empty());
}
