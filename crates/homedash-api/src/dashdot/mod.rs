//! dash. integration: proxied status requests and their wire types.

mod client;
mod models;

pub use client::{DashDotClient, INFO_PATH, MODULE_ENDPOINT};
pub use models::{DashDotInfo, NetworkInfo, StorageInfo, StorageVolume};
