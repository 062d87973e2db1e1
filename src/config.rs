use clap::{Parser, ValueEnum};
use std::env;

/// Startup configuration of the game store service.
#[derive(Parser, Clone, Debug)]
pub struct Config {
    /// Port number to use for listening to HTTP requests. The PORT env var
    /// takes precedence when set.
    #[clap(short, long, default_value = "7000")]
    pub port: u16,

    /// GCP project hosting the Firestore database.
    #[clap(long, default_value = "game-collection")]
    pub project_id: String,

    /// Firestore collection holding the game documents.
    #[clap(long, default_value = "games")]
    pub collection: String,

    /// Backing store for the collection.
    #[clap(long, value_enum, default_value_t = StoreKind::Firestore)]
    pub store: StoreKind,

    #[clap(long)]
    pub prod_tracing: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Firestore,

    /// Keeps the collection in process memory. Nothing survives a restart.
    Memory,
}

impl Config {
    /// Returns the port to listen on, letting the PORT env var override the
    /// flag.
    pub fn listen_port(&self) -> u16 {
        port_override(env::var("PORT").ok(), self.port)
    }
}

fn port_override(env_port: Option<String>, flag_port: u16) -> u16 {
    match env_port {
        Some(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => flag_port,
        },
        None => flag_port,
    }
}
