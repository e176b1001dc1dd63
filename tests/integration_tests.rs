//! Integration tests for stepper-encoder-core.
//!
//! These tests drive the decoder, ramp and reporter together through one shared
//! motion state, the way the interrupt and the main loop do on the board.

use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use stepper_encoder_core::config::{parse_config, DriveConfig};
use stepper_encoder_core::encoder::QuadratureDecoder;
use stepper_encoder_core::error::{ConfigError, Error, TransportError};
use stepper_encoder_core::telemetry::{RecordQueue, ReportStatus, TelemetryRecord, TelemetrySink};
use stepper_encoder_core::{
    Direction, DriveLoop, MotionState, QuadratureState, StepsPerSec, StepsPerSecSquared, Ticks,
    Transition, VelocityRamp, UART_UPDATE_INTERVAL,
};

// =============================================================================
// Helpers
// =============================================================================

const S00: QuadratureState = QuadratureState::S00;
const S01: QuadratureState = QuadratureState::S01;
const S11: QuadratureState = QuadratureState::S11;
const S10: QuadratureState = QuadratureState::S10;

/// Differential pin mocks replaying `states`, complements driven correctly.
fn encoder_pins(states: &[QuadratureState]) -> (PinMock, PinMock, PinMock, PinMock) {
    let level = |high: bool| PinTransaction::get(if high { PinState::High } else { PinState::Low });

    let a: Vec<_> = states.iter().map(|s| level(s.levels().0)).collect();
    let na: Vec<_> = states.iter().map(|s| level(!s.levels().0)).collect();
    let b: Vec<_> = states.iter().map(|s| level(s.levels().1)).collect();
    let nb: Vec<_> = states.iter().map(|s| level(!s.levels().1)).collect();

    (
        PinMock::new(&a),
        PinMock::new(&na),
        PinMock::new(&b),
        PinMock::new(&nb),
    )
}

fn finish(decoder: QuadratureDecoder<PinMock, PinMock, PinMock, PinMock>) {
    let (mut a, mut na, mut b, mut nb) = decoder.release();
    a.done();
    na.done();
    b.done();
    nb.done();
}

/// Transport that accepts a fixed number of records, then reports a full buffer.
struct FlakyUart {
    accepted: Vec<TelemetryRecord>,
    capacity: usize,
}

impl TelemetrySink for FlakyUart {
    fn try_send(&mut self, record: &TelemetryRecord) -> Result<(), TransportError> {
        if self.accepted.len() >= self.capacity {
            return Err(TransportError::BufferFull);
        }
        self.accepted.push(*record);
        Ok(())
    }
}

// =============================================================================
// Quadrature decoding
// =============================================================================

#[test]
fn full_clockwise_cycle_from_pins() {
    let (a, na, b, nb) = encoder_pins(&[S00, S01, S11, S10, S00]);
    let state = MotionState::new();
    let mut decoder = QuadratureDecoder::new(a, na, b, nb).expect("pins readable");

    for _ in 0..4 {
        assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Clockwise);
    }

    assert_eq!(state.direction(), Some(Direction::Clockwise));
    assert_eq!(state.ticks(), Ticks(4));
    assert!(!state.direction_changed());
    finish(decoder);
}

#[test]
fn clockwise_cycle_after_counter_clockwise_latches_change() {
    let (a, na, b, nb) = encoder_pins(&[S00, S10, S00, S01, S11, S10, S00]);
    let state = MotionState::new();
    let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();

    // One counter-clockwise step first: direction becomes -1
    decoder.on_edge(&state).unwrap();
    assert_eq!(state.direction(), Some(Direction::CounterClockwise));
    let before = state.ticks();

    // 10 -> 00 reverses, then three more clockwise steps
    for _ in 0..5 {
        decoder.on_edge(&state).unwrap();
    }

    assert_eq!(state.direction(), Some(Direction::Clockwise));
    assert_eq!(state.ticks().0 - before.0, 5);
    assert!(state.direction_changed());
    assert!(state.acknowledge_direction_change());
    assert!(!state.acknowledge_direction_change());
    finish(decoder);
}

#[test]
fn illegal_jump_is_counted_not_guessed() {
    let (a, na, b, nb) = encoder_pins(&[S00, S01, S10, S00]);
    let state = MotionState::new();
    let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();

    assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Clockwise);
    assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Invalid);
    // Decoder follows the pins after the jump: 10 -> 00 is a clean clockwise step
    assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Clockwise);

    assert_eq!(state.ticks(), Ticks(2));
    assert_eq!(state.invalid_transitions(), 1);
    assert_eq!(state.direction(), Some(Direction::Clockwise));
    assert!(!state.direction_changed());
    finish(decoder);
}

// =============================================================================
// Velocity ramp
// =============================================================================

#[test]
fn ramp_reaches_target_linearly() {
    let mut ramp = VelocityRamp::new(1.0);
    let target = StepsPerSec(100.0);
    let accel = StepsPerSecSquared(10.0);

    let velocities: Vec<f32> = (0..12).map(|_| ramp.update(target, accel).velocity.0).collect();
    assert_eq!(&velocities[..5], &[10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(velocities[8], 90.0);
    assert_eq!(velocities[9], 100.0);
    assert_eq!(velocities[11], 100.0);
}

// =============================================================================
// Telemetry
// =============================================================================

#[test]
fn two_reports_in_twenty_five_thousand_iterations() {
    let state = MotionState::new();
    let config = DriveConfig::default();
    let mut drive = DriveLoop::from_config(&state, &config);
    let mut uart: RecordQueue<4> = RecordQueue::new();

    let mut report_iterations = Vec::new();
    for i in 1..=25_000u32 {
        if drive.iterate(&mut uart).report.is_report() {
            report_iterations.push(i);
        }
    }

    assert_eq!(u32::from(UART_UPDATE_INTERVAL), 10_000);
    assert_eq!(report_iterations, [10_000, 20_000]);
    assert_eq!(drive.reporter().iterations(), 5_000);

    let first = uart.pop().unwrap();
    let second = uart.pop().unwrap();
    assert_eq!((first.sequence, second.sequence), (0, 1));
    assert_eq!(first.window_iterations, 10_000);
    assert_eq!(second.window_iterations, 10_000);
    assert!((first.window_secs - 1.0).abs() < 1e-4);
}

#[test]
fn report_carries_window_ticks_and_reversal() {
    let state = MotionState::new();
    let mut config = DriveConfig::default();
    config.telemetry.update_interval = 100;
    let mut drive = DriveLoop::from_config(&state, &config);
    let mut uart: RecordQueue<4> = RecordQueue::new();

    // Interrupt activity interleaved with the main loop
    for i in 0..100 {
        let direction = if i < 60 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        state.record_transition(direction);
        drive.iterate(&mut uart);
    }

    let record = uart.pop().expect("one report");
    assert_eq!(record.ticks, Ticks(100));
    assert_eq!(record.direction, Some(Direction::CounterClockwise));
    assert!(record.direction_changed);
    assert_eq!(record.window_iterations, 100);
    // 100 ticks over 100 × 100 us
    assert!((record.tick_rate() - 10_000.0).abs() < 1.0);

    // Next window starts clean
    for _ in 0..100 {
        drive.iterate(&mut uart);
    }
    let record = uart.pop().unwrap();
    assert_eq!(record.ticks, Ticks(0));
    assert!(!record.direction_changed);
}

#[test]
fn full_transport_drops_window_and_restarts() {
    let state = MotionState::new();
    let mut config = DriveConfig::default();
    config.telemetry.update_interval = 10;
    let mut drive = DriveLoop::from_config(&state, &config);
    let mut uart = FlakyUart {
        accepted: Vec::new(),
        capacity: 1,
    };

    let mut statuses = Vec::new();
    for i in 0..30 {
        if i < 15 {
            state.record_transition(Direction::Clockwise);
        }
        let output = drive.iterate(&mut uart);
        if output.report.is_report() {
            statuses.push(output.report);
        }
    }

    assert_eq!(statuses.len(), 3);
    assert!(matches!(statuses[0], ReportStatus::Sent(_)));
    assert!(matches!(
        statuses[1],
        ReportStatus::Dropped {
            error: TransportError::BufferFull,
            ..
        }
    ));
    assert_eq!(drive.reporter().sent(), 1);
    assert_eq!(drive.reporter().dropped(), 2);

    // The dropped window's ticks are not folded into the next one
    let third = statuses[2].record().unwrap();
    assert_eq!(third.ticks, Ticks(0));
    assert_eq!(uart.accepted[0].ticks, Ticks(10));
}

// =============================================================================
// Control loop with sensed feedback
// =============================================================================

#[test]
fn ramp_follows_command_handler_targets() {
    static MOTION: MotionState = MotionState::new();
    MOTION.reset();

    let mut config = DriveConfig::default();
    config.control.period = stepper_encoder_core::Micros(1_000);
    config.control.initial_acceleration = StepsPerSecSquared(2_000.0);
    let mut drive = DriveLoop::from_config(&MOTION, &config);
    let mut uart: RecordQueue<2> = RecordQueue::new();

    MOTION.set_target_velocity(StepsPerSec(-100.0));
    let mut last = 0.0f32;
    for _ in 0..100 {
        let command = drive.iterate(&mut uart).command;
        assert!(command.velocity.0 <= last);
        assert!(command.velocity.0 >= -100.0);
        last = command.velocity.0;
    }

    assert_eq!(drive.ramp().current(), StepsPerSec(-100.0));
    let command = drive.ramp().command();
    assert_eq!(command.direction(), Some(Direction::CounterClockwise));
    assert_eq!(command.interval_ns(), 10_000_000);

    // Dropping the acceleration to zero freezes the output where it is
    MOTION.set_target_acceleration(StepsPerSecSquared(0.0));
    MOTION.set_target_velocity(StepsPerSec(50.0));
    for _ in 0..10 {
        assert_eq!(drive.iterate(&mut uart).command.velocity, StepsPerSec(-100.0));
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_round_trip_through_toml() {
    let config = parse_config(
        r#"
[encoder]
pin_a = 4
pin_na = 5
pin_b = 6
pin_nb = 7

[control]
period_us = 50

[telemetry]
update_interval = 2000
"#,
    )
    .expect("valid config");

    let state = MotionState::new();
    let drive = DriveLoop::from_config(&state, &config);
    assert_eq!(drive.reporter().interval(), 2000);
    assert!((drive.ramp().dt_secs() - 0.000_05).abs() < 1e-9);
    // No initial acceleration configured: targets untouched
    assert_eq!(state.target_acceleration(), StepsPerSecSquared(0.0));
}

#[test]
fn config_rejects_shared_pins() {
    let result = parse_config(
        r#"
[encoder]
pin_a = 4
pin_na = 4
"#,
    );

    assert_eq!(result.unwrap_err(), Error::Config(ConfigError::DuplicatePin(4)));
}

#[test]
fn shaft_speed_from_configured_resolution() {
    let config = parse_config(
        r#"
[encoder]
ticks_per_revolution = 400

[control]
period_us = 1000

[telemetry]
update_interval = 1000
"#,
    )
    .expect("valid config");

    let state = MotionState::new();
    let mut drive = DriveLoop::from_config(&state, &config);
    let mut uart: RecordQueue<2> = RecordQueue::new();

    // 800 edges spread over a one-second window
    for i in 0..1000 {
        if i % 5 != 0 {
            state.record_transition(Direction::Clockwise);
        }
        drive.iterate(&mut uart);
    }

    let record = uart.pop().expect("one report");
    assert_eq!(record.ticks, Ticks(800));
    let rps = record.revolutions_per_sec(config.encoder.ticks_per_revolution);
    assert!((rps - 2.0).abs() < 1e-3);
}

#[test]
fn drive_reset_mid_window_restarts_telemetry() {
    let state = MotionState::new();
    let mut config = DriveConfig::default();
    config.telemetry.update_interval = 10;
    let mut drive = DriveLoop::from_config(&state, &config);
    let mut uart: RecordQueue<4> = RecordQueue::new();

    for _ in 0..15 {
        state.record_transition(Direction::Clockwise);
        drive.iterate(&mut uart);
    }
    drive.reset();
    for _ in 0..10 {
        drive.iterate(&mut uart);
    }

    let windows: Vec<(u32, Ticks)> = uart.iter().map(|r| (r.window_iterations, r.ticks)).collect();
    assert_eq!(windows, [(10, Ticks(10)), (10, Ticks(0))]);
}
