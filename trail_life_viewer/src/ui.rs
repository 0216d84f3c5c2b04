// ui.rs - Desktop viewer: the display sink and wall-clock pacer for the panel

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Rect, Vec2};
use trail_life::shapes::SHAPES;
use trail_life::{GameOfLife, HEIGHT, WIDTH};

use crate::frame::PixelFrame;
use crate::pacer::Pacer;

const BOX_SIZE: f32 = 7.0;

pub struct TrailLifeApp {
    life: GameOfLife,
    frame: PixelFrame,
    pacer: Pacer,
    max_fps: f64,
    pub is_running: bool,
    pub selected_shape: usize,
    reseeds: u64,
}

impl TrailLifeApp {
    pub fn new(life: GameOfLife, max_fps: f64) -> Self {
        let mut frame = PixelFrame::new(WIDTH, HEIGHT);
        life.render(&mut frame);
        Self {
            life,
            frame,
            pacer: Pacer::new(max_fps),
            max_fps,
            is_running: true,
            selected_shape: 0,
            reseeds: 0,
        }
    }

    fn advance(&mut self) {
        let report = self.life.step(&mut self.frame);
        if let Some(reseed) = report.reseed {
            self.reseeds += 1;
            tracing::debug!(
                generation = report.generation,
                reason = ?reseed.reason,
                "viewer reseed"
            );
        }
    }

    /// Re-renders after an edit made while paused.
    fn refresh(&mut self) {
        self.life.render(&mut self.frame);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.is_running = !self.is_running;
                if self.is_running {
                    self.pacer.last_update = Instant::now();
                }
            }

            if ui.button("⏹ Clear").clicked() {
                self.is_running = false;
                self.life.clear_grid();
                self.refresh();
            }

            if ui.button("🎲 Reseed").clicked() {
                self.life.reseed_now();
                self.reseeds += 1;
                self.refresh();
            }

            ui.separator();

            ui.label("Shape:");
            egui::ComboBox::from_id_source("shape_selector")
                .selected_text(SHAPES[self.selected_shape].name)
                .show_ui(ui, |ui| {
                    for (i, shape) in SHAPES.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_shape, i, shape.name);
                    }
                });

            if ui.button("Stamp").clicked() {
                match self.life.stamp_centered(SHAPES[self.selected_shape]) {
                    Ok(placement) => tracing::info!(
                        shape = placement.shape.name,
                        x = placement.x,
                        y = placement.y,
                        "stamped"
                    ),
                    Err(e) => tracing::warn!(error = %e, "stamp rejected"),
                }
                self.refresh();
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.life.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut fps = self.pacer.fps();
            if ui
                .add(egui::Slider::new(&mut fps, 0.5..=self.max_fps).suffix(" fps"))
                .changed()
            {
                self.pacer.set_fps(fps);
            }

            ui.separator();
            ui.label(format!("Rules: {}", self.life.rules().name()));
            ui.label(format!("Reseeds: {}", self.reseeds));
        });
    }

    fn panel(&mut self, ui: &mut egui::Ui) {
        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            BOX_SIZE * self.frame.width() as f32,
            BOX_SIZE * self.frame.height() as f32,
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        painter.rect_filled(
            Rect::from_min_size(start_pos, total_size),
            0.0,
            Color32::BLACK,
        );

        for y in 0..self.frame.height() {
            for x in 0..self.frame.width() {
                let color = self.frame.pixel(x, y);
                if color == Color32::BLACK {
                    continue;
                }
                let rect = Rect::from_min_size(
                    egui::pos2(
                        start_pos.x + x as f32 * BOX_SIZE,
                        start_pos.y + y as f32 * BOX_SIZE,
                    ),
                    Vec2::splat(BOX_SIZE),
                );
                painter.rect_filled(rect, 0.0, color);
            }
        }

        // Editing only while paused
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - start_pos;
                let x = (offset.x / BOX_SIZE).floor();
                let y = (offset.y / BOX_SIZE).floor();
                if x >= 0.0 && y >= 0.0 {
                    self.life.toggle_cell(x as usize, y as usize);
                    self.refresh();
                }
            }
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let cells = (WIDTH * HEIGHT) as f32;
        let census = self.life.census();

        ui.horizontal(|ui| {
            for (rule, count) in self.life.rules().rules().iter().zip(&census) {
                ui.label(format!("{}: {}", rule.name, count));
            }
        });
        ui.horizontal(|ui| {
            ui.label(format!("Activity: {}", self.life.activity()));
            ui.label(format!(
                "Population: {:.1}%",
                self.life.live_count() as f32 / cells * 100.0
            ));
            ui.label(format!("Reseed below: {}", self.life.threshold()));
        });
    }
}

impl eframe::App for TrailLifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.is_running && self.pacer.ready(Instant::now()) {
            self.advance();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Trail Life");
            self.controls(ui);
            ui.separator();
            ui.label("Click cells to toggle them while paused. Activity below the threshold reseeds the panel.");
            ui.separator();
            self.panel(ui);
            ui.separator();
            self.statistics(ui);
        });

        if self.is_running {
            ctx.request_repaint_after(self.pacer.remaining(Instant::now()));
        }
    }
}
