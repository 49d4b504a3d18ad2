use super::SOCKET_PATH;
use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // stale socket from a previous run
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let event = match line.trim() {
                            "show" => AppEvent::Show,
                            "hide" => AppEvent::Hide,
                            other => {
                                log::warn!("Unknown control command '{}'", other);
                                continue;
                            }
                        };
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
