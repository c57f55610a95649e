//! Command line words → register traffic on the accessory controller.

use crate::mock_hw::{FakeDelay, RecordingBus};

use cubenano::app::commands::{FanCommand, LightCommand};
use cubenano::drivers::actuator::ActuatorDriver;
use cubenano::drivers::register_channel::{DEFAULT_PACING_MS, RegisterChannel};
use cubenano::registers::{
    ACCESSORY_ADDRESS, REG_COLOR, REG_EFFECT, REG_FAN, REG_LED_BLUE, REG_LED_GREEN,
    REG_LED_INDEX, REG_LED_RED, REG_SPEED,
};

fn driver() -> ActuatorDriver<RecordingBus, FakeDelay> {
    ActuatorDriver::new(RegisterChannel::new(
        RecordingBus::default(),
        FakeDelay::default(),
        ACCESSORY_ADDRESS,
    ))
}

fn traffic(d: ActuatorDriver<RecordingBus, FakeDelay>) -> (RecordingBus, FakeDelay) {
    d.into_channel().release()
}

#[test]
fn fan_on_writes_fan_register() {
    let mut d = driver();
    let cmd = FanCommand::parse("on").unwrap();
    assert!(cmd.apply(&mut d));
    assert_eq!(cmd.describe(), "Fan: ON");
    let (bus, _) = traffic(d);
    assert_eq!(bus.writes, vec![(REG_FAN, 1)]);
    assert_eq!(bus.addresses, vec![ACCESSORY_ADDRESS]);
}

#[test]
fn breathing_blue_fast_writes_effect_speed_colour_in_order() {
    let mut d = driver();
    let cmd = LightCommand::parse("breathing", ["blue", "fast"]).unwrap();
    assert!(cmd.apply(&mut d));
    assert_eq!(cmd.describe(), "RGB: breathing (blue) @ fast speed");
    let (bus, _) = traffic(d);
    assert_eq!(
        bus.writes,
        vec![(REG_EFFECT, 1), (REG_SPEED, 3), (REG_COLOR, 2)]
    );
}

#[test]
fn off_writes_only_effect() {
    let mut d = driver();
    let cmd = LightCommand::parse("OFF", ["red", "fast"]).unwrap();
    cmd.apply(&mut d);
    let (bus, _) = traffic(d);
    assert_eq!(bus.writes, vec![(REG_EFFECT, 0)]);
}

#[test]
fn rainbow_with_colour_word_never_writes_colour() {
    let mut d = driver();
    let cmd = LightCommand::parse("rainbow", ["green"]).unwrap();
    cmd.apply(&mut d);
    let (bus, _) = traffic(d);
    assert_eq!(bus.writes, vec![(REG_EFFECT, 3), (REG_SPEED, 2)]);
}

#[test]
fn dazzle_takes_a_colour() {
    let mut d = driver();
    LightCommand::parse("dazzle", ["purple", "slow"])
        .unwrap()
        .apply(&mut d);
    let (bus, _) = traffic(d);
    assert_eq!(
        bus.writes,
        vec![(REG_EFFECT, 4), (REG_SPEED, 1), (REG_COLOR, 4)]
    );
}

#[test]
fn every_write_is_paced() {
    let mut d = driver();
    d.set_all_leds(255, 128, 0);
    let (bus, delay) = traffic(d);
    assert_eq!(
        bus.writes,
        vec![
            (REG_EFFECT, 0),
            (REG_LED_INDEX, 255),
            (REG_LED_RED, 255),
            (REG_LED_GREEN, 128),
            (REG_LED_BLUE, 0),
        ]
    );
    assert_eq!(delay.total_ns, 5 * u64::from(DEFAULT_PACING_MS) * 1_000_000);
}

#[test]
fn nacked_register_is_reported_and_rest_still_written() {
    let mut d = ActuatorDriver::new(RegisterChannel::new(
        RecordingBus {
            nack_registers: vec![REG_SPEED],
            ..RecordingBus::default()
        },
        FakeDelay::default(),
        ACCESSORY_ADDRESS,
    ));
    let cmd = LightCommand::parse("waterfall", ["white"]).unwrap();
    assert!(!cmd.apply(&mut d));
    let (bus, delay) = traffic(d);
    assert_eq!(bus.writes, vec![(REG_EFFECT, 5), (REG_COLOR, 6)]);
    // The failed write is not followed by a pacing delay.
    assert_eq!(delay.total_ns, 2 * u64::from(DEFAULT_PACING_MS) * 1_000_000);
}
