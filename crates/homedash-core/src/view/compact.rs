use homedash_api::DashDotInfo;

/// Totals shown in the compact storage strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorageSummary {
    pub total_bytes: u64,
    pub volumes: usize,
}

impl StorageSummary {
    pub fn from_info(info: &DashDotInfo) -> Self {
        let layout = &info.storage.layout;
        Self {
            total_bytes: layout.iter().map(|v| v.size).fold(0, u64::saturating_add),
            volumes: layout.len(),
        }
    }
}

/// Link speeds shown in the compact network strip, in bits per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetworkSummary {
    pub up_bps: f64,
    pub down_bps: f64,
}

impl NetworkSummary {
    pub fn from_info(info: &DashDotInfo) -> Self {
        Self {
            up_bps: info.network.speed_up,
            down_bps: info.network.speed_down,
        }
    }
}
