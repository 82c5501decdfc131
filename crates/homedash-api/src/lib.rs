// homedash-api: Async client for the homedash module proxy.
//
// The browser-side dashboard never talks to monitored services directly;
// every request goes through the local proxy (`/api/modules/<module>`),
// which forwards it to the configured target. This crate owns that hop.

pub mod dashdot;
pub mod error;
pub mod transport;

pub use dashdot::{DashDotClient, DashDotInfo, NetworkInfo, StorageInfo, StorageVolume};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
