//! Fuzz target: `ShakeDetector`
//!
//! Interprets the input as a stream of 14-byte records
//! `[x: f32][y: f32][z: f32][gap_ms: u16]` and verifies:
//! - No panics, including NaN and infinite axes
//! - Accepted shakes are at least one cooldown apart
//! - Accepted shakes always exceed the threshold
//!
//! cargo fuzz run fuzz_detector

#![no_main]

use libfuzzer_sys::fuzz_target;
use shakealert::config::{THRESHOLD, TIMEOUT_MS};
use shakealert::detector::{ShakeDecision, ShakeDetector};
use shakealert::sampler::AccelSample;

fn f32_at(chunk: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([chunk[at], chunk[at + 1], chunk[at + 2], chunk[at + 3]])
}

fuzz_target!(|data: &[u8]| {
    let mut det = ShakeDetector::with_limits(THRESHOLD, TIMEOUT_MS);
    let mut now = 0u64;
    let mut last: Option<u64> = None;

    for chunk in data.chunks_exact(14) {
        let sample = AccelSample::new(f32_at(chunk, 0), f32_at(chunk, 4), f32_at(chunk, 8));
        now += u64::from(u16::from_le_bytes([chunk[12], chunk[13]]));

        if let ShakeDecision::Shake(ev) = det.process(sample, now) {
            assert!(ev.force_g > THRESHOLD, "accepted weak shake {}", ev.force_g);
            if let Some(prev) = last {
                assert!(
                    ev.at_ms - prev >= TIMEOUT_MS,
                    "shakes {} ms apart",
                    ev.at_ms - prev
                );
            }
            last = Some(ev.at_ms);
        }
    }
});
