//! Human-readable size, rate, and age formatting helpers.

use std::time::Duration;

use bytesize::ByteSize;

/// Format a byte count, e.g. "1.8 TiB".
pub fn fmt_bytes(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format a link speed given in bits per second, e.g. "940.0 Mbit/s".
pub fn fmt_bits_rate(bits_per_sec: f64) -> String {
    let bits = bits_per_sec.max(0.0);
    if bits >= 1_000_000_000.0 {
        format!("{:.1} Gbit/s", bits / 1_000_000_000.0)
    } else if bits >= 1_000_000.0 {
        format!("{:.1} Mbit/s", bits / 1_000_000.0)
    } else if bits >= 1_000.0 {
        format!("{:.1} kbit/s", bits / 1_000.0)
    } else {
        format!("{bits:.0} bit/s")
    }
}

/// Format an elapsed time at whole-second precision, e.g. "1m 5s".
pub fn fmt_age(elapsed: Duration) -> String {
    humantime::format_duration(Duration::from_secs(elapsed.as_secs())).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_pick_a_unit() {
        assert_eq!(fmt_bits_rate(940_000_000.0), "940.0 Mbit/s");
        assert_eq!(fmt_bits_rate(2_500_000_000.0), "2.5 Gbit/s");
        assert_eq!(fmt_bits_rate(512.0), "512 bit/s");
        assert_eq!(fmt_bits_rate(-3.0), "0 bit/s");
    }

    #[test]
    fn small_sizes_are_plain_bytes() {
        assert_eq!(fmt_bytes(0), "0 B");
        assert!(fmt_bytes(2_000_000_000_000).ends_with('B'));
    }

    #[test]
    fn ages_drop_subsecond_noise() {
        assert_eq!(fmt_age(Duration::from_millis(65_400)), "1m 5s");
        assert_eq!(fmt_age(Duration::from_millis(300)), "0s");
    }
}
