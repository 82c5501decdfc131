// ── Domain model ──
//
// Operator-authored dashboard configuration. Tiles only ever read these;
// the editing workflow owns mutation and persistence.

pub mod dashdot;
pub mod service;
pub mod tile;

pub use dashdot::{DashDotModule, GraphId};
pub use service::{Service, ServiceAppearance, ServiceBehaviour};
pub use tile::{Dashboard, Tile};
