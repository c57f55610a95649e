//! CubeNano accessory library.
//!
//! Fan and RGB control for the case's accessory controller, plus the
//! OLED status daemon's discovery session and phased refresh loop.
//! Everything that touches the host lives in [`adapters`]; the rest is
//! plain logic behind the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod registers;
pub mod scheduler;
pub mod sensors;
pub mod session;
pub mod shutdown;

pub mod adapters;
pub mod drivers;

pub use error::{Error, Result};
