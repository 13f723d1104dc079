mod app;

fn main() -> eframe::Result {
    env_logger::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Game of Life")
            .with_inner_size([960.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "game-of-life",
        options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
