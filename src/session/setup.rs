//! Session setup and initialization

use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::graphql::{GraphqlClient, StatsSource};
use crate::loader::{LoaderMessage, spawn_loader};
use std::error::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for the TUI
#[derive(Debug)]
pub struct SessionData {
    /// Messages from the loader task
    pub loader_receiver: mpsc::Receiver<LoaderMessage>,
    /// Join handle for the loader task
    pub join_handle: JoinHandle<()>,
    /// Shutdown sender to stop the loader
    pub shutdown_sender: broadcast::Sender<()>,
    /// Where the stats come from
    pub source_name: String,
}

/// Sets up a dashboard session
///
/// Builds the GraphQL client from `config` and starts the loader task, which
/// performs the one fetch for this session.
pub fn setup_session(config: &Config) -> Result<SessionData, Box<dyn Error>> {
    let client = GraphqlClient::new(config)?;
    let source_name = client.describe();

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);
    let (loader_sender, loader_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);

    let join_handle = spawn_loader(
        Box::new(client),
        loader_sender,
        shutdown_sender.subscribe(),
    );

    Ok(SessionData {
        loader_receiver,
        join_handle,
        shutdown_sender,
        source_name,
    })
}
