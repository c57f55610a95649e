//! Frame composition for the 128×32 status screen.
//!
//! | Row | y  | Content                           |
//! |-----|----|-----------------------------------|
//! | 1   | 0  | CPU label at x=0, clock at x=50   |
//! | 2   | 8  | RAM label (or welcome message)    |
//! | 3   | 16 | Disk label                        |
//! | 4   | 24 | `IPA:` + address                  |

pub mod frame;

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X8;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::{Baseline, Text};

pub use frame::FrameBuffer;

/// Text row pitch in pixels.
pub const ROW_HEIGHT: i32 = 8;
/// x position of the clock on row 1.
pub const TIME_COLUMN: i32 = 50;

/// Labels for one dashboard frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub cpu: String,
    pub time: String,
    pub ram: String,
    pub disk: String,
    pub ip: String,
}

/// Draw `text` with its top-left corner at (`x`, `y`).
pub fn draw_text(frame: &mut FrameBuffer, x: i32, y: i32, text: &str) {
    let style = MonoTextStyle::new(&FONT_6X8, BinaryColor::On);
    // FrameBuffer drawing cannot fail.
    let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(frame);
}

/// Draw `text` at the left edge of row 1–4.
pub fn draw_line(frame: &mut FrameBuffer, row: u8, text: &str) {
    draw_text(frame, 0, row_y(row), text);
}

pub fn row_y(row: u8) -> i32 {
    ROW_HEIGHT * (i32::from(row.max(1)) - 1)
}

/// Clear `frame` and lay out the full status screen.
pub fn compose_dashboard(frame: &mut FrameBuffer, d: &Dashboard) {
    frame.clear();
    draw_text(frame, 0, 0, &d.cpu);
    draw_text(frame, TIME_COLUMN, 0, &d.time);
    draw_line(frame, 2, &d.ram);
    draw_line(frame, 3, &d.disk);
    draw_line(frame, 4, &d.ip);
}

/// Clear `frame` and show a single message on row 2.
pub fn compose_message(frame: &mut FrameBuffer, message: &str) {
    frame.clear();
    draw_line(frame, 2, message);
}
