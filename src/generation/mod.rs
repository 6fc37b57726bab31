//! Garden generation: the seeded daily RNG and the three layout styles.
//!
//! A garden of the day is a pure function of (date, style, theme, layout
//! config). The same inputs produce bit-identical instance lists for every
//! viewer.

pub mod config;
pub mod rng;
pub mod layout;

pub use config::{LayoutConfig, OrderedLayout, WildLayout, ZenLayout};
pub use rng::{day_seed, today, DailyRng, SimpleRng};
pub use layout::{generate, generate_for_day};
