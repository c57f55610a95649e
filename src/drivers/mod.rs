//! Accessory controller drivers: paced register access and fan/RGB encoding.

pub mod actuator;
pub mod register_channel;
