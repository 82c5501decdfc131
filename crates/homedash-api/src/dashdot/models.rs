// Wire types for the dash. `/info` payload as forwarded by the proxy.
//
// Only the fields the dashboard reads are modelled; dash. sends a lot more
// (OS, CPU brand, RAM layout...) and serde silently skips it.

use serde::{Deserialize, Serialize};

/// Static host information reported by a dash. instance.
///
/// `Default` is the empty placeholder handed to unconfigured tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashDotInfo {
    pub storage: StorageInfo,
    pub network: NetworkInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageInfo {
    /// One entry per detected volume, in the order dash. reports them.
    pub layout: Vec<StorageVolume>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageVolume {
    /// Volume size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Link speed of the monitored host, in bits per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkInfo {
    pub speed_up: f64,
    pub speed_down: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashdot_info_and_ignores_extra_fields() {
        let body = r#"{
            "os": { "distro": "Debian" },
            "storage": { "layout": [ { "size": 500107862016, "type": "SSD" }, { "size": 4000787030016 } ] },
            "network": { "speedUp": 1000000000, "speedDown": 1000000000, "interfaceSpeed": 1000 }
        }"#;

        let info: DashDotInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.storage.layout.len(), 2);
        assert_eq!(info.storage.layout[0].size, 500_107_862_016);
        assert!((info.network.speed_up - 1e9).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_object_is_the_placeholder() {
        let info: DashDotInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info, DashDotInfo::default());
    }
}
