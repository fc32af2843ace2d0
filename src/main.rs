use voice_analyzer::{app, Config};

fn main() {
    let config = Config::from_build_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));

    if let Err(e) = app::start(config) {
        log::error!("Failed to start application: {}", e);
    }
}
