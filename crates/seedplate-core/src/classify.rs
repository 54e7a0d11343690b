use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-tile seed counts returned by a classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCounts {
    pub total: u32,
    pub viable: u32,
    pub inviable: u32,
}

impl SeedCounts {
    pub fn new(viable: u32, inviable: u32) -> Self {
        Self {
            total: viable + inviable,
            viable,
            inviable,
        }
    }

    pub fn viability_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.viable as f64 / self.total as f64 * 100.0
        }
    }

    pub fn accumulate(&mut self, other: &SeedCounts) {
        self.total += other.total;
        self.viable += other.viable;
        self.inviable += other.inviable;
    }
}

/// External seed-detection capability behind a narrow seam.
///
/// The real detection model lives outside this crate; implementations receive
/// one tile crop and return counts. Implementors must be thread-safe so the
/// batch pass can classify tiles in parallel.
pub trait SeedClassifier: Send + Sync {
    fn classify(&self, tile: &DynamicImage) -> Result<SeedCounts>;
}

/// Deterministic stand-in classifier. Derives counts from a sparse FNV-1a
/// hash of the tile's pixels, so identical tiles always produce identical
/// counts and tests need no model weights.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubClassifier;

impl SeedClassifier for StubClassifier {
    fn classify(&self, tile: &DynamicImage) -> Result<SeedCounts> {
        let rgb = tile.to_rgb8();
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in rgb.as_raw().iter().step_by(251) {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        let total = (hash % 91 + 10) as u32;
        let viable = ((hash >> 8) % u64::from(total + 1)) as u32;
        Ok(SeedCounts {
            total,
            viable,
            inviable: total - viable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn tile(seed: u8) -> DynamicImage {
        let img = RgbImage::from_fn(32, 32, |x, y| {
            image::Rgb([seed, (x % 256) as u8, (y % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn stub_is_deterministic() {
        let a = StubClassifier.classify(&tile(7)).unwrap();
        let b = StubClassifier.classify(&tile(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stub_counts_are_consistent() {
        for seed in [0u8, 7, 42, 255] {
            let counts = StubClassifier.classify(&tile(seed)).unwrap();
            assert_eq!(counts.total, counts.viable + counts.inviable);
            assert!(counts.total >= 10 && counts.total <= 100);
        }
    }

    #[test]
    fn viability_percent_handles_zero_total() {
        assert_eq!(SeedCounts::default().viability_percent(), 0.0);
        assert_eq!(SeedCounts::new(3, 1).viability_percent(), 75.0);
    }
}
