use crate::events::AppEvent;
use crate::sys::watcher;
use async_channel::Sender;
use circle_display::protocol::{ControlCommand, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) -> anyhow::Result<()> {
    // stale socket from a previous run
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        fs_err::remove_file(SOCKET_PATH)?;
    }

    let listener = UnixListener::bind(SOCKET_PATH)?;
    log::info!("Listening for commands on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, tx).await {
                        log::error!("Control connection failed: {}", e);
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_connection(mut stream: UnixStream, tx: Sender<AppEvent>) -> anyhow::Result<()> {
    let reader = BufReader::new(&mut stream);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let event = match parse_line(&line) {
            Some(ControlCommand::Reload) => watcher::reload_config().await,
            Some(cmd) => Some(AppEvent::Command(cmd)),
            None => None,
        };
        if let Some(event) = event {
            tx.send(event).await?;
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> Option<ControlCommand> {
    line.parse::<ControlCommand>()
        .inspect_err(|e| log::warn!("Ignoring command {:?}: {}", line.trim(), e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("reload"), Some(ControlCommand::Reload));
        assert_eq!(parse_line("refresh\n"), Some(ControlCommand::Refresh));
        assert_eq!(
            parse_line("show 30 60 instant"),
            Some(ControlCommand::Show {
                value: 30.0,
                total: 60.0,
                animated: false,
            })
        );
        assert_eq!(parse_line("hide"), None);
        assert_eq!(parse_line("show 30"), None);
    }
}
