#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    pretty_env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "KiddoPrep — AIIMS CRE Radiology",
        options,
        Box::new(|cc| Ok(Box::new(kiddoprep::PrepApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");
        let canvas = document
            .get_element_by_id("kiddoprep_canvas")
            .expect("canvas with id kiddoprep_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("kiddoprep_canvas is not a canvas element");

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(kiddoprep::PrepApp::new(cc)))),
            )
            .await
            .expect("failed to start the web app");
    });
}
