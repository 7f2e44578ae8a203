// bin/esp32guide.rs

#![warn(clippy::large_futures)]

use esp32guide::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = AppSettings::from_env();
    info!("esp32guide v{FW_VERSION} starting up");
    info!("My settings:\n{settings:#?}");

    let store = FsStorage::new(&settings.data_dir)?;

    #[cfg(feature = "reset_settings")]
    {
        error!("reset_settings: wiping saved workshop state");
        store.put(CONFIG_KEY, &serde_json::to_string(&WorkshopConfig::default())?)?;
        store.put(CHECKLIST_KEY, &serde_json::to_string(&default_checklist())?)?;
        store.put(CODE_CARDS_KEY, &serde_json::to_string(&default_code_cards())?)?;
    }

    let state = Arc::new(WorkshopState::new(settings, Box::new(store)));

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(Box::pin(async move {
            if let Err(e) = Box::pin(run_api_server(state)).await {
                error!("run_api_server() ended: {e:?}");
            }
        }));

    info!("main() finished.");
    Ok(())
}

// EOF
