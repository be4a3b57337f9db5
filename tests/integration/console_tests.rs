//! Serial console commands driven through `AlarmSystem::tick`.

use gasalarm::alarm::DisarmSource;
use gasalarm::app::events::AppEvent;
use gasalarm::console;
use gasalarm::keypad::KeypadState;

use super::mock_hw::{make_system, run_ticks};

#[test]
fn unknown_byte_prints_help() {
    let (mut system, mut board) = make_system();
    board.console.type_bytes(b"x");
    system.tick(&mut board);
    assert_eq!(board.console.take_output(), console::HELP_MENU);
}

#[test]
fn state_queries() {
    let (mut system, mut board) = make_system();

    board.console.type_bytes(b"123");
    run_ticks(&mut system, &mut board, 3);
    assert_eq!(
        board.console.take_output(),
        "The alarm is not activated\r\n\
         Gas is not being detected\r\n\
         Temperature is below the maximum level\r\n"
    );

    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.console.take_output();
    board.hw.inputs.gas_present = false;

    board.console.type_bytes(b"12");
    run_ticks(&mut system, &mut board, 2);
    // The gas reply reflects the current reading, not the latched flag.
    // Event echoes come after the console reply within a tick.
    assert_eq!(
        board.console.take_output(),
        "The alarm is activated\r\nGAS_DET_OFF\r\nGas is not being detected\r\n"
    );
}

#[test]
fn temperature_in_both_units() {
    let (mut system, mut board) = make_system();
    board.hw.inputs.lm35_reading = 0.25;
    run_ticks(&mut system, &mut board, 100);
    board.console.take_output();

    board.console.type_bytes(b"cF");
    run_ticks(&mut system, &mut board, 2);
    assert_eq!(
        board.console.take_output(),
        "Temperature: 82.50 \u{00b0} C\r\nTemperature: 180.50 \u{00b0} F\r\n"
    );
}

#[test]
fn console_code_is_masked_and_disarms() {
    let (mut system, mut board) = make_system();
    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;
    board.console.take_output();

    board.console.type_bytes(b"41234");
    system.tick(&mut board);
    let out = board.console.take_output();
    assert!(out.starts_with(console::ENTER_CODE_PROMPT));
    assert!(out.contains("****"));
    assert!(!out.contains("1234"));
    assert!(out.contains(console::CODE_INCORRECT));
    assert!(system.alarm().is_active());
    assert!(board.sink.events.contains(&AppEvent::IncorrectCode {
        source: DisarmSource::Console,
        attempts: 1,
    }));

    board.console.type_bytes(b"41805");
    system.tick(&mut board);
    assert!(board.console.take_output().contains(console::CODE_CORRECT));
    assert!(!system.alarm().is_active());
    assert!(!board.hw.incorrect_code_led);
}

#[test]
fn new_code_is_not_stored() {
    let (mut system, mut board) = make_system();
    board.console.type_bytes(b"59999");
    system.tick(&mut board);

    let out = board.console.take_output();
    assert!(out.starts_with(console::NEW_CODE_PROMPT));
    assert!(out.ends_with(console::NEW_CODE_GENERATED));
    assert!(board.sink.events.contains(&AppEvent::CodeChangeDiscarded));

    // The compiled-in code still works.
    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.hw.inputs.gas_present = false;
    board.console.type_bytes(b"41805");
    system.tick(&mut board);
    assert!(!system.alarm().is_active());
}

#[test]
fn set_then_show_date_time() {
    let (mut system, mut board) = make_system();
    board.console.type_bytes(b"s20240229235958");
    system.tick(&mut board);

    let out = board.console.take_output();
    assert!(out.contains("(YYYY): 2024\r\n"));
    assert!(out.contains("(00-59): 58\r\n"));
    assert!(out.ends_with(console::DATE_TIME_SET));
    assert_eq!(board.clock.now, 1_709_251_198);
    assert!(board.sink.events.contains(&AppEvent::ClockSet(1_709_251_198)));

    board.console.type_bytes(b"t");
    system.tick(&mut board);
    assert_eq!(
        board.console.take_output(),
        "Date and Time = Thu Feb 29 23:59:58 2024\r\n"
    );
}

#[test]
fn blocking_entry_counts_as_one_tick() {
    let (mut system, mut board) = make_system();
    board.hw.inputs.gas_present = true;
    run_ticks(&mut system, &mut board, 3);
    board.hw.inputs.gas_present = false;

    // A key goes down just before the operator starts typing.
    board.hw.held_key = Some('1');
    system.tick(&mut board);
    assert_eq!(system.keypad().state(), KeypadState::Debouncing { key: '1' });
    assert_eq!(system.alarm().blink().accumulated_ms(), 40);
    let scans = board.hw.scans;

    board.console.type_bytes(b"41234");
    system.tick(&mut board);
    assert!(board.console.input.is_empty());
    assert_eq!(system.alarm().blink().accumulated_ms(), 50);
    assert_eq!(system.keypad().state(), KeypadState::Debouncing { key: '1' });
    assert_eq!(system.keypad().debounce_ms(), 10);
    assert_eq!(board.hw.scans, scans);

    board.console.type_bytes(b"s20240229235958");
    system.tick(&mut board);
    assert!(board.console.input.is_empty());
    assert_eq!(system.alarm().blink().accumulated_ms(), 60);
    assert_eq!(system.keypad().debounce_ms(), 20);
    assert_eq!(system.tick_count(), 6);
    assert_eq!(board.hw.alarm_led_history.len(), 6);
}

#[test]
fn invalid_date_leaves_clock_alone() {
    let (mut system, mut board) = make_system();
    board.clock.now = 42;
    board.console.type_bytes(b"S20231301000000");
    system.tick(&mut board);

    assert!(board.console.take_output().ends_with(console::DATE_TIME_INVALID));
    assert_eq!(board.clock.now, 42);
    assert!(board.sink.events.contains(&AppEvent::ClockEntryRejected));
}

#[test]
fn event_dump_lists_records_oldest_first() {
    let (mut system, mut board) = make_system();
    board.hw.inputs.gas_present = true;
    system.tick(&mut board);
    board.clock.now = 60;
    board.hw.inputs.gas_present = false;
    system.tick(&mut board);
    board.console.take_output();

    board.console.type_bytes(b"e");
    system.tick(&mut board);
    assert_eq!(
        board.console.take_output(),
        "Event = ALARM_ON\r\nDate and Time = Thu Jan  1 00:00:00 1970\r\n\r\n\
         Event = GAS_DET_ON\r\nDate and Time = Thu Jan  1 00:00:00 1970\r\n\r\n\
         Event = GAS_DET_OFF\r\nDate and Time = Thu Jan  1 00:01:00 1970\r\n\r\n"
    );
}

#[test]
fn keypad_diagnostics_report() {
    let (mut system, mut board) = make_system();
    board.console.type_bytes(b"q");
    system.tick(&mut board);
    let out = board.console.take_output();
    assert!(out.starts_with("Keypad state: MATRIX_KEYPAD_SCANNING\n"));
    assert!(out.contains("Current row: -"));
}
