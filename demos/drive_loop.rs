//! Drive loop example.
//!
//! Wires a quadrature decoder, the shared motion state and the main loop together
//! the way firmware does: the "interrupt" decodes encoder edges into `MOTION`, the
//! main loop ramps toward the commanded velocity and emits telemetry lines.
//!
//! This example uses embedded-hal-mock for the encoder pins, so it runs on a host.

use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use stepper_encoder_core::{
    config::parse_config,
    encoder::QuadratureDecoder,
    telemetry::RecordQueue,
    Direction, DriveLoop, MotionState, QuadratureState, StepsPerSec, StepsPerSecSquared,
};

/// Shared between the encoder interrupt and the main loop.
static MOTION: MotionState = MotionState::new();

/// Mock differential encoder replaying `states`, complements driven correctly.
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

fn main() {
    println!("=== Drive Loop Example ===\n");

    let toml_content = r#"
[encoder]
ticks_per_revolution = 800

[control]
period_us = 100
initial_acceleration_steps_per_sec2 = 20000.0

[telemetry]
update_interval = 2000
"#;

    let config = parse_config(toml_content).expect("Configuration validation failed");
    println!(
        "Loop period: {} us, telemetry every {} iterations",
        config.control.period.0, config.telemetry.update_interval
    );

    // Encoder turning clockwise for 300 edges, then counter-clockwise
    let mut states = vec![QuadratureState::S00];
    let mut current = QuadratureState::S00;
    for edge in 0..600 {
        let direction = if edge < 300 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        current = current.step(direction);
        states.push(current);
    }
    let edges = states.len() - 1;

    let (a, na, b, nb) = encoder_pins(&states);
    let mut decoder = QuadratureDecoder::builder()
        .pin_a(a)
        .pin_na(na)
        .pin_b(b)
        .pin_nb(nb)
        .from_encoder_config(&config.encoder)
        .build()
        .expect("Failed to build decoder");

    let mut drive = DriveLoop::from_config(&MOTION, &config);
    let mut uart: RecordQueue<4> = RecordQueue::new();

    // Command handler: run at 1000 steps/s
    MOTION.set_target_velocity(StepsPerSec(1000.0));
    println!(
        "Ramp needs {:?} iterations to reach the target",
        drive
            .ramp()
            .steps_to_converge(StepsPerSec(1000.0), StepsPerSecSquared(20000.0))
    );

    println!("\n=== Running ===");
    let mut fed = 0;
    for iteration in 0..6000 {
        // One encoder edge every 10 iterations stands in for the pin-change interrupt
        if iteration % 10 == 0 && fed < edges {
            decoder.on_edge(&MOTION).expect("encoder read failed");
            fed += 1;
        }

        let output = drive.iterate(&mut uart);
        if iteration == 49 {
            println!(
                "Step command after 50 iterations: {} steps/s ({} ns per step)",
                output.command.velocity.0,
                output.command.interval_ns()
            );
        }

        while let Some(record) = uart.pop() {
            let line = record.to_line().expect("line fits");
            print!("{}", line);
            println!(
                "  -> {:.1} ticks/s, {:.3} rev/s",
                record.tick_rate(),
                record.revolutions_per_sec(config.encoder.ticks_per_revolution)
            );
        }
    }

    println!("\nUnsettled reads: {}", decoder.unsettled_reads());
    println!("Reports sent: {}, dropped: {}", drive.reporter().sent(), drive.reporter().dropped());

    let (mut a, mut na, mut b, mut nb) = decoder.release();
    a.done();
    na.done();
    b.done();
    nb.done();

    println!("\n=== Example Complete ===");
}
