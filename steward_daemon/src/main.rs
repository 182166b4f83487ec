use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use clap::Parser;
use log::{debug, error, info};
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use backend::directory::SocketDirectoryClient;
use backend::images::SocketImageRegistryClient;
use backend::provisioner::SocketWorkloadProvisioner;
use client_handler::client_command_handler::ClientHandler;
use registry::api::Registry;
use registry::policy::FixedPlacementPolicy;
use registry::registry_manager::RegistryManager;
use socket::unix_socket_server::{UnixSocketServer, UnixSocketServerError};
use storage::fs_kv_store::FsKvStore;
use storage::kv_store::{initialize_buckets, KvStore};

mod backend;
mod client_handler;
mod registry;
mod socket;
mod storage;
#[cfg(test)]
mod test_utilities;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[arg(short, long)]
    unix_sock_path: PathBuf,
    #[arg(short, long)]
    storage_dir_path: PathBuf,
    #[arg(short, long)]
    directory_sock_path: PathBuf,
    #[arg(short, long)]
    images_sock_path: PathBuf,
    #[arg(short, long)]
    provisioner_sock_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    info!("Starting steward daemon.");
    let cancel_token = Arc::new(CancellationToken::new());

    let storage: Arc<dyn KvStore + Send + Sync> =
        Arc::new(FsKvStore::new(cli.storage_dir_path).await?);
    initialize_buckets(storage.as_ref()).await?;

    let registry: Arc<dyn Registry + Send + Sync> = Arc::new(RegistryManager::new(
        storage,
        Arc::new(SocketDirectoryClient::new(cli.directory_sock_path)),
        Arc::new(SocketImageRegistryClient::new(cli.images_sock_path)),
        Arc::new(SocketWorkloadProvisioner::new(cli.provisioner_sock_path)),
        Arc::new(FixedPlacementPolicy),
    ));

    let mut server_thread =
        spawn_unix_socket_server_thread(registry, cancel_token.clone(), cli.unix_sock_path);
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    select! {
        _ = sigint.recv() => {
            info!("SIGINT received shutting down");
            cancel_token.cancel();
        }

        _ = sigterm.recv() => {
            info!("SIGTERM received shutting down");
            cancel_token.cancel();
        }

        v = &mut server_thread => {
            error!("Error while listening on unixsocket: {:?}", v);
            cancel_token.cancel();
        }
    }

    info!("Shutting down steward daemon.");

    if !server_thread.is_finished() {
        debug!("UnixSocketServer result: {:#?}", server_thread.await);
    }

    info!("Steward daemon succesfully shutdown.");
    Ok(())
}

fn spawn_unix_socket_server_thread(
    registry: Arc<dyn Registry + Send + Sync>,
    token: Arc<CancellationToken>,
    socket_path: PathBuf,
) -> JoinHandle<Result<(), UnixSocketServerError>> {
    tokio::spawn(async move {
        UnixSocketServer::listen::<ClientHandler>(registry, token, socket_path).await
    })
}
