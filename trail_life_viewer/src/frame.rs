// frame.rs - Double-buffered pixel frame the viewer paints from

use egui::Color32;
use trail_life::{DisplaySink, Rgb};

/// Writes land in a back buffer and become visible on `show`.
pub struct PixelFrame {
    width: usize,
    height: usize,
    back: Vec<Color32>,
    front: Vec<Color32>,
}

impl PixelFrame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            back: vec![Color32::BLACK; width * height],
            front: vec![Color32::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour currently on screen at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.front[y * self.width + x]
    }
}

impl DisplaySink for PixelFrame {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.back[y * self.width + x] = Color32::from_rgb(color.r, color.g, color.b);
    }

    fn show(&mut self) {
        self.front.copy_from_slice(&self.back);
    }
}
