//! Environment defaults for image processing.
//!
//! `THERMAL_*` variables (optionally from a `.env` file) supply defaults;
//! command-line flags override them.

use thermal_image::{Algorithm, DEFAULT_THRESHOLD, ImageOptions};

use crate::args::Args;

pub const ENV_ALGORITHM: &str = "THERMAL_ALGORITHM";
pub const ENV_THRESHOLD: &str = "THERMAL_THRESHOLD";
pub const ENV_WIDTH: &str = "THERMAL_WIDTH";
pub const ENV_INVERT: &str = "THERMAL_INVERT";

/// Defaults read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDefaults {
    pub algorithm: Algorithm,
    pub threshold: u8,
    pub width: u32,
    pub invert: bool,
}

impl Default for EnvDefaults {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threshold: DEFAULT_THRESHOLD,
            width: 0,
            invert: false,
        }
    }
}

impl EnvDefaults {
    /// Load from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let g = |key: &str| get(key).unwrap_or_default();
        Self {
            algorithm: parse_or(ENV_ALGORITHM, &g(ENV_ALGORITHM), d.algorithm),
            threshold: parse_or(ENV_THRESHOLD, &g(ENV_THRESHOLD), d.threshold),
            width: parse_or(ENV_WIDTH, &g(ENV_WIDTH), d.width),
            invert: parse_bool(ENV_INVERT, &g(ENV_INVERT), d.invert),
        }
    }

    /// Combine with command-line flags into processing options.
    pub fn merge(&self, args: &Args) -> ImageOptions {
        let mut opts = ImageOptions::new()
            .with_algorithm(args.algorithm.unwrap_or(self.algorithm))
            .with_threshold(args.threshold.unwrap_or(self.threshold))
            .with_maintain_aspect_ratio(!args.stretch)
            .with_invert(invert_flag(args).unwrap_or(self.invert));
        match (args.width, args.height) {
            (None, None) => opts = opts.with_width(self.width),
            (w, h) => {
                opts = opts
                    .with_width(w.unwrap_or(0))
                    .with_height(h.unwrap_or(0))
            }
        }
        opts
    }
}

/// Explicit `--invert`/`--no-invert`, if either was given.
fn invert_flag(args: &Args) -> Option<bool> {
    match (args.invert, args.no_invert) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, s: &str, default: T) -> T {
    let s = s.trim();
    if s.is_empty() {
        return default;
    }
    match s.parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value = s, "Ignoring unparsable setting");
            default
        }
    }
}

fn parse_bool(key: &str, s: &str, default: bool) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            tracing::warn!(key, value = other, "Ignoring unparsable setting");
            default
        }
    }
}
