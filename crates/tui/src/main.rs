mod app;
mod config;
mod error;
mod logging;
mod quick_add;
mod ui;

use engine::{FileStore, Ledger};

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let store = FileStore::new(&config.data_dir);
    tracing::debug!(dir = %store.dir().display(), "using file store");
    let storage_label = store
        .path_for(&config.storage_key)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| format!("{} (invalid key)", config.storage_key));
    let ledger = Ledger::open_with_key(store, &config.storage_key);
    tracing::info!(
        entries = ledger.len(),
        store = %storage_label,
        "expense tracker starting"
    );

    let mut app = app::App::new(ledger, storage_label);
    app.run()?;
    Ok(())
}
