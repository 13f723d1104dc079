use egui::Rgba;

use crate::Grid;

#[derive(Clone, Copy)]
pub struct Settings {
    pub dead_rgba: Rgba,
    pub alive_rgba: Rgba,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dead_rgba: Rgba::WHITE,
            alive_rgba: Rgba::BLACK,
        }
    }
}

impl Grid {
    /// One pixel per cell, row by row, `width * height` pixels in total.
    pub fn render(&self, settings: Settings) -> Vec<Rgba> {
        let mut pixels = Vec::with_capacity(self.width() * self.height());
        for row in self.rows() {
            pixels.extend(row.iter().map(|&alive| match alive {
                true => settings.alive_rgba,
                false => settings.dead_rgba,
            }));
        }
        pixels
    }
}
