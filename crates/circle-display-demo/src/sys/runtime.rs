use crate::events::AppEvent;
use crate::sys::{server, watcher};
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Runs the control socket and the config watcher on their own thread, so
/// socket reads and config parsing never block the GTK main loop.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("circle-display-services".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                let control = async {
                    if let Err(e) = server::run_server(tx.clone()).await {
                        log::error!("Control server stopped: {}", e);
                    }
                };
                let reload = async {
                    if let Err(e) = watcher::watch_config(tx.clone()).await {
                        log::error!("Config watcher stopped: {}", e);
                    }
                };
                tokio::join!(control, reload);
            });
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
