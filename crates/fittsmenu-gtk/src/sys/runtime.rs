use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config watcher on a background Tokio runtime.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    thread::spawn(move || {
        rt.block_on(async {
            tokio::spawn(super::server::run_server(tx.clone()));
            tokio::spawn(super::watcher::run_async_watcher(tx));

            std::future::pending::<()>().await;
        });
    });
    Ok(())
}
