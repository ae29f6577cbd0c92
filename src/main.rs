/// Replay a scripted scrollbar session and print the renderer calls
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use slidebar::{AppConfig, Session};

    let mut args = std::env::args().skip(1);
    let Some(session_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: slidebar-replay <session.json> [config.json]");
        std::process::exit(2);
    };

    // The logger level comes from the config, so config problems go to stderr
    let (config, source) = match args.next().map(PathBuf::from) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                eprintln!("Failed to load config {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => match AppConfig::default_path().filter(|path| path.exists()) {
            Some(path) => match AppConfig::load(&path) {
                Ok(config) => (config, Some(path)),
                Err(e) => {
                    eprintln!("Ignoring config file {:?}: {}", path, e);
                    (AppConfig::default(), None)
                }
            },
            None => (AppConfig::default(), None),
        },
    };

    // RUST_LOG overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match source {
        Some(path) => log::info!("Loaded configuration from {:?}", path),
        None => log::debug!("Using default configuration"),
    }

    let commands = match Session::load(&session_path).and_then(|s| s.replay(&config.scrollbar)) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("Replay error: {}", e);
            std::process::exit(1);
        }
    };

    for command in commands {
        println!("{command}");
    }
}

// WASM hosts embed slidebar_ui directly; there is no replay binary there
#[cfg(target_arch = "wasm32")]
fn main() {}
