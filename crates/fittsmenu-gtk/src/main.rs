use clap::{Parser, Subcommand};
use fittsmenu::config;
use fittsmenu_gtk::gui::app::AppModel;
use fittsmenu_gtk::sys::{SOCKET_PATH, runtime};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "fittsmenu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Pop the menu up at the pointer of a running daemon.
    Show,
    /// Pop the menu down without a selection.
    Hide,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => send_command("show"),
        Some(Commands::Hide) => send_command("hide"),
        None => run_daemon(),
    }
}

fn run_daemon() -> anyhow::Result<()> {
    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx)?;

    let app = RelmApp::new("org.libsexier.fittsmenu");
    app.run::<AppModel>((config, rx));
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to fittsmenu daemon at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
