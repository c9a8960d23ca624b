use circle_display::config;
use circle_display::protocol::{ControlCommand, SOCKET_PATH};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "circle-display", version, about = "Control a running circle-display gauge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show a value out of a total.
    Show {
        value: f64,

        /// The maximum value the full circle represents
        #[arg(short = 't', long, default_value_t = 100.0)]
        total: f64,

        /// Jump to the value without animating the arc
        #[arg(short = 'i', long)]
        instant: bool,
    },
    /// Replay the draw animation.
    Replay,
    /// Show a random value out of 1000.
    Refresh,
    /// Reload the configuration file.
    Reload,
    /// Write the default configuration file if none exists and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            value,
            total,
            instant,
        } => {
            if total <= 0.0 {
                anyhow::bail!("Total must be greater than 0, got {}", total);
            }
            send_command(ControlCommand::Show {
                value,
                total,
                animated: !instant,
            })
        }
        Commands::Replay => send_command(ControlCommand::Replay),
        Commands::Refresh => send_command(ControlCommand::Refresh),
        Commands::Reload => send_command(ControlCommand::Reload),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn send_command(cmd: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to circle-display-demo at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
