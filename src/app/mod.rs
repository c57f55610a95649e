//! Application core: session supervision and accessory commands.
//!
//! Everything here talks to the host through the **port traits** in
//! [`ports`], so the refresh loop and the command layer run unchanged
//! against the Linux adapters or the test mocks.

pub mod commands;
pub mod events;
pub mod ports;
pub mod refresh;
