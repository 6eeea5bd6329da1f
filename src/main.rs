use eframe::egui;

use galaxy_tree::scene::SceneConfig;

mod app;

use app::GalaxyApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Any arguments replace the default photo set (URLs or file paths).
    let refs: Vec<String> = std::env::args().skip(1).collect();
    let mut config = SceneConfig::default();
    if !refs.is_empty() {
        log::info!("using {} photos from the command line", refs.len());
        config = config.with_photos(refs);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Galaxy Tree"),
        ..Default::default()
    };

    eframe::run_native(
        "Galaxy Tree",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GalaxyApp::new(config)))
        }),
    )
}
