use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use circle_display::config;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;

/// Editors save in several writes; events closer together than this reload once.
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Loads the config file on a blocking thread. A broken file leaves the
/// running gauge untouched.
pub async fn reload_config() -> Option<AppEvent> {
    match tokio::task::spawn_blocking(config::load_config).await {
        Ok(Ok(config)) => {
            log::info!("Configuration loaded");
            Some(AppEvent::ConfigLoaded(Box::new(config)))
        }
        Ok(Err(e)) => {
            log::error!("Failed to reload config, keeping the current one: {}", e);
            None
        }
        Err(e) => {
            log::error!("Config loader task failed: {}", e);
            None
        }
    }
}

fn touches_config(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

fn watch_dir(dir: &Path) -> notify::Result<(RecommendedWatcher, Receiver<notify::Result<Event>>)> {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

/// Sends a freshly parsed config whenever the config file changes.
pub async fn watch_config(tx: Sender<AppEvent>) -> anyhow::Result<()> {
    let config_path = config::get_config_path()?;
    let dir = config_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", config_path.display()))?;
    fs_err::create_dir_all(dir)?;

    let (_watcher, events) = watch_dir(dir)?;
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                tokio::time::sleep(SETTLE_DELAY).await;
                while events.try_recv().is_ok() {}

                if let Some(loaded) = reload_config().await
                    && tx.send(loaded).await.is_err()
                {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, ModifyKind};
    use std::path::PathBuf;

    #[test]
    fn test_only_changes_to_the_config_file_count() {
        let path = PathBuf::from("/home/u/.config/circle-display/config.toml");
        let other = PathBuf::from("/home/u/.config/circle-display/config.toml~");

        let modified = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.clone());
        assert!(touches_config(&modified, &path));

        let backup = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(other);
        assert!(!touches_config(&backup, &path));

        let read = Event::new(EventKind::Access(AccessKind::Any)).add_path(path.clone());
        assert!(!touches_config(&read, &path));
    }
}
