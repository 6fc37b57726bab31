//! Random sources for garden generation.
//!
//! [`DailyRng`] is the "garden of the day" generator: a sine hash over an
//! integer seed derived from the date and layout style, so every viewer sees
//! the same garden on the same day. Its output sequence is part of the layout
//! contract and must stay bit-stable.
//!
//! [`SimpleRng`] is a fast PCG-style generator for everything that does not
//! need to match across viewers (sown flower color, scale and yaw).

use crate::garden::GardenStyle;

/// Sine-hash generator: `frac(sin(seed) * 10000)`, seed advanced by one per draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRng {
    seed: i64,
}

impl DailyRng {
    pub fn from_seed(seed: i64) -> Self {
        Self { seed }
    }

    /// Seed from the sum of the character codes of `date` followed by the
    /// style tag, e.g. `"2024-05-01" + "zen"`.
    pub fn for_day(date: &str, style: GardenStyle) -> Self {
        Self::from_seed(day_seed(date, style))
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        let x = (self.seed as f64).sin() * 10000.0;
        self.seed += 1;
        x - x.floor()
    }

    pub fn next_f32(&mut self) -> f32 {
        // Rounding to f32 can land on 1.0; keep the half-open range
        (self.next_f64() as f32).min(1.0 - f32::EPSILON)
    }

    /// `min + U * span`
    pub fn range(&mut self, min: f32, span: f32) -> f32 {
        min + self.next_f32() * span
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }

    /// True when the draw exceeds `p`.
    pub fn chance_above(&mut self, p: f64) -> bool {
        self.next_f64() > p
    }
}

/// Sum of UTF-16 code units of `date + style tag`.
pub fn day_seed(date: &str, style: GardenStyle) -> i64 {
    date.encode_utf16()
        .chain(style.tag().encode_utf16())
        .map(i64::from)
        .sum()
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// PCG-like generator for non-shared randomness.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Seed from the wall clock.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9_7f4a_7c15);
        Self::new(nanos)
    }

    /// Advance state and return next u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let mut h = (self.state >> 32) as u32;
        h = h.wrapping_mul(0x45d9f3b);
        h ^= h >> 16;
        h = h.wrapping_mul(0x45d9f3b);
        h ^= h >> 16;
        h
    }

    /// Generate f32 in range [0, 1)
    pub fn next_float(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Generate f32 in range [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_float() * (max - min)
    }
}
