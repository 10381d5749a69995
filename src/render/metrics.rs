//! Decorative metrics overlay.
//!
//! The numbers are synthetic. Apart from the live packet count they are
//! drawn at random every frame and must not be read as telemetry.

use crate::simulation::rng::RandomSource;

/// One frame's worth of made-up figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorativeMetrics {
    pub messages_per_sec: u32,
    /// Live packet count
    pub active_streams: usize,
    pub throughput_mb_s: f64,
    pub latency_ms: f64,
}

impl DecorativeMetrics {
    /// Draw fresh values. Order: messages, throughput, latency.
    pub fn sample(rng: &mut dyn RandomSource, active_streams: usize) -> Self {
        let messages_per_sec = rng.range(5000.0, 6000.0).floor() as u32;
        let throughput_mb_s = rng.range(150.0, 200.0);
        let latency_ms = rng.range(10.0, 15.0);
        Self {
            messages_per_sec,
            active_streams,
            throughput_mb_s,
            latency_ms,
        }
    }

    pub const TITLE: &'static str = "STREAMING METRICS";

    /// Overlay text lines below the title
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Messages/sec: {}", self.messages_per_sec),
            format!("Active Streams: {}", self.active_streams),
            format!("Throughput: {:.1} MB/s", self.throughput_mb_s),
            format!("Latency: {:.1} ms", self.latency_ms),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rng::SequenceRandom;

    #[test]
    fn test_sample_ranges() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 0.999]);
        let m = DecorativeMetrics::sample(&mut rng, 7);
        assert_eq!(m.messages_per_sec, 5000);
        assert_eq!(m.throughput_mb_s, 175.0);
        assert!(m.latency_ms < 15.0 && m.latency_ms > 14.9);
        assert_eq!(m.active_streams, 7);
    }

    #[test]
    fn test_lines_format() {
        let m = DecorativeMetrics {
            messages_per_sec: 5432,
            active_streams: 3,
            throughput_mb_s: 172.345,
            latency_ms: 12.04,
        };
        assert_eq!(
            m.lines(),
            [
                "Messages/sec: 5432".to_string(),
                "Active Streams: 3".to_string(),
                "Throughput: 172.3 MB/s".to_string(),
                "Latency: 12.0 ms".to_string(),
            ]
        );
    }
}
