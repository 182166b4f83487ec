use clap::Parser;
use cmd_handler::CommandHandler;
use log::{error, info};
use std::path::PathBuf;
use steward_client_lib::StewardConnection;
use utils::read_command_line;

mod cmd_handler;
mod cmd_parser;
mod commands;
mod utils;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[arg(short, long)]
    unix_socket_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    info!("Starting Steward cmd client! Press Ctrl^C to exit.");
    let cli_args = Args::parse();
    let connection = StewardConnection::connect(cli_args.unix_socket_path).await?;
    let mut handler = CommandHandler::new(connection);
    loop {
        let cmd = match read_command_line() {
            Ok(cmd) => cmd,
            Err(err) => {
                error!("Can't parse the command: {:#}!", err);
                continue;
            }
        };
        match handler.handle_command(cmd.command).await {
            Err(err) => error!("Error occured while handling command: {:#?}!", err),
            Ok(_) => info!("Command handled successfully."),
        }
    }
}
