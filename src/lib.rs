// lib.rs
#![warn(clippy::large_futures)]

pub use std::{
    net,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

pub use anyhow::bail;
pub use chrono::*;
pub use serde::{Deserialize, Serialize};
pub use tokio::sync::RwLock;
pub use tracing::*;

mod artifacts;
pub use artifacts::*;

mod config;
pub use config::*;

mod content;
pub use content::*;

mod nav;
pub use nav::*;

mod state;
pub use state::*;

mod store;
pub use store::*;

mod thermistor;
pub use thermistor::*;

mod apiserver;
pub use apiserver::*;

pub const FW_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, Serialize)]
pub struct ProgressView {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub cards_completed: usize,
    pub cards_total: usize,
    pub cards_percent: u32,
    pub last_update: String,
}

// EOF
