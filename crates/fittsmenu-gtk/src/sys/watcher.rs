use crate::events::AppEvent;
use async_channel::Sender;
use fittsmenu::config::get_config_path;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Creates the directory holding `config_path` so it can be watched before the
/// file exists.
pub fn prepare_watch_dir(config_path: &Path) -> std::io::Result<Option<PathBuf>> {
    let Some(config_dir) = config_path.parent() else {
        return Ok(None);
    };
    fs_err::create_dir_all(config_dir)?;
    Ok(Some(config_dir.to_path_buf()))
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match prepare_watch_dir(&config_path) {
        Ok(Some(dir)) => dir,
        Ok(None) => return,
        Err(e) => {
            log::error!("Failed to create config directory for watching: {}", e);
            return;
        }
    };

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    // the file itself may be replaced on save, so watch its directory
    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let relevant = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if relevant && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fittsmenu-{}-{}", name, std::process::id()));
        let _ = fs_err::remove_dir_all(&dir);
        fs_err::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_prepare_watch_dir_creates_parent() {
        let root = scratch("watch-ok");
        let config = root.join("nested").join("config.toml");

        let dir = prepare_watch_dir(&config).unwrap();
        assert_eq!(dir.as_deref(), Some(root.join("nested").as_path()));
        assert!(root.join("nested").is_dir());

        fs_err::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_prepare_watch_dir_error_names_directory() {
        let root = scratch("watch-err");
        let blocker = root.join("blocker");
        fs_err::write(&blocker, "").unwrap();
        let config = blocker.join("config.toml");

        let err = prepare_watch_dir(&config).unwrap_err();
        assert!(
            err.to_string().contains(&blocker.display().to_string()),
            "{err}"
        );

        fs_err::remove_dir_all(&root).unwrap();
    }
}
