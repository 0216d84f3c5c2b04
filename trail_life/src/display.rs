// display.rs - The seam between the engine and whatever shows the pixels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Receives one colour per cell every cycle, in any order, and a `show`
/// once the frame is complete. Implementations reconcile writes on `show`.
pub trait DisplaySink {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);
    fn show(&mut self);
}

/// Discards everything. Used by headless runs and benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DisplaySink for NullSink {
    #[inline]
    fn set_pixel(&mut self, _x: usize, _y: usize, _color: Rgb) {}

    #[inline]
    fn show(&mut self) {}
}
