use runclean_core::{config, log, log_error, log_info};
use runclean_windows::RegistryStore;

/// Opens the history window and blocks until it is closed.
pub fn execute() {
    let config = config::load();
    log::init(&config.logging);
    log_info!("runclean {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = runclean_windows::ui::run(&config.window, RegistryStore::run_mru()) {
        log_error!("window failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
