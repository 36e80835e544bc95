#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    // RUST_LOG overrides the default level
    builder.parse_default_env();
    builder.init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

fn main() {
    init_logging();
    if let Err(e) = game_core::run() {
        log::error!("game error: {}", e);
        std::process::exit(1);
    }
}
