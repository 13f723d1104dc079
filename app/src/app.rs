use std::time::{Duration, Instant};

use eframe::{CreationContext, Frame};
use egui::{
    Button, Color32, ColorImage, ComboBox, Context, Image, Sense, Slider, TextureHandle,
    TextureOptions, Ui, load::SizedTexture,
};
use life::{Pattern, Simulation, patterns, render};

const WIDTH: usize = 96;
const HEIGHT: usize = 64;

pub struct App {
    simulation: Simulation,
    texture: Option<TextureHandle>,
    settings: render::Settings,
    playing: bool,
    last_step: Instant,
    delay_ms: u64,
    density: f64,
    pattern: &'static Pattern,
    error: Option<String>,
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let mut simulation = Simulation::new();
        let mut error = None;
        if let Err(err) = simulation
            .reset(WIDTH, HEIGHT)
            .and_then(|()| simulation.load_pattern("glider-gun", 2, 2))
        {
            error = Some(err.to_string());
        }
        Self {
            simulation,
            texture: None,
            settings: render::Settings::default(),
            playing: false,
            last_step: Instant::now(),
            delay_ms: 100,
            density: 0.3,
            pattern: &patterns::all()[0],
            error,
        }
    }
}

impl App {
    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Runs an edit, keeping its error for the status line.
    fn apply<T>(&mut self, edit: impl FnOnce(&mut Simulation) -> Result<T, life::Error>) {
        self.error = edit(&mut self.simulation).err().map(|err| {
            log::warn!("{err}");
            err.to_string()
        });
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let label = if self.playing { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                self.playing = !self.playing;
                self.last_step = Instant::now();
                if self.playing {
                    self.apply(Simulation::resume);
                }
            }
            if ui.add_enabled(!self.playing, Button::new("Step")).clicked() {
                self.apply(Simulation::step);
            }
            if ui.button("Clear").clicked() {
                self.playing = false;
                self.apply(Simulation::clear);
            }
            ui.separator();
            ui.add(Slider::new(&mut self.density, 0.0..=1.0).text("density"));
            if ui.button("Randomize").clicked() {
                let density = self.density;
                self.apply(|sim| sim.randomize(density));
            }
            ui.separator();
            ComboBox::from_label("pattern")
                .selected_text(self.pattern.name)
                .show_ui(ui, |ui| {
                    for pattern in patterns::all() {
                        let text = format!("{} ({})", pattern.name, pattern.category);
                        ui.selectable_value(&mut self.pattern, pattern, text);
                    }
                });
            if ui.button("Place").clicked() {
                self.place_pattern();
            }
            ui.separator();
            ui.add(Slider::new(&mut self.delay_ms, 0..=1000).text("delay (ms)"));
        });
    }

    fn place_pattern(&mut self) {
        let Some(grid) = self.simulation.grid() else {
            return;
        };
        let pattern = self.pattern;
        let x = (grid.width() as isize - pattern.width() as isize) / 2;
        let y = (grid.height() as isize - pattern.height() as isize) / 2;
        self.apply(|sim| sim.load_pattern(pattern.name, x, y));
    }

    fn status(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let snapshot = self.simulation.snapshot();
            ui.label(format!("Generation: {}", snapshot.generation));
            ui.separator();
            ui.label(format!("Living cells: {}", snapshot.live_cells));
            if let Some(err) = &self.error {
                ui.separator();
                ui.colored_label(Color32::RED, err);
            }
        });
    }

    fn board(&mut self, ctx: &Context, ui: &mut Ui) {
        let Some(grid) = self.simulation.grid() else {
            return;
        };
        let (width, height) = (grid.width(), grid.height());
        let pixels: Vec<Color32> = grid
            .render(self.settings)
            .into_iter()
            .map(From::from)
            .collect();
        let image = ColorImage::new([width, height], pixels);
        let options = TextureOptions::NEAREST;
        let texture = match self.texture.take() {
            Some(mut t) if t.size() == image.size => {
                t.set(image, options);
                t
            }
            _ => ctx.load_texture("life", image, options),
        };
        let available = ui.available_size();
        let scale = f32::max(
            1.0,
            f32::min(available.x / width as f32, available.y / height as f32),
        );
        let size = egui::vec2(width as f32 * scale, height as f32 * scale);
        let sized_texture = SizedTexture::new(&texture, size);
        let response = ui.add(
            Image::new(sized_texture)
                .fit_to_exact_size(size)
                .sense(Sense::click()),
        );
        self.texture = Some(texture);
        // Cells can only be edited between generations.
        if response.clicked() && !self.playing {
            if let Some(pos) = response.interact_pointer_pos() {
                let cell = (pos - response.rect.min) / scale;
                self.apply(|sim| sim.toggle(cell.x as isize, cell.y as isize));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        if self.playing && self.last_step.elapsed() >= self.delay() {
            self.apply(Simulation::step);
            self.last_step = Instant::now();
        }
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.board(ctx, ui));
        if self.playing {
            ctx.request_repaint_after(self.delay());
        }
    }
}
