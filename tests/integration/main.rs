//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one subsystem against
//! the mock host in [`mock_hw`].  Nothing here needs an I2C adapter.

mod accessory_tests;
mod refresh_tests;
mod session_tests;
