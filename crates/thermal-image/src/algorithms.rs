//! Named dithering algorithms and their diffusion tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dither::{DitherMatrix, Ditherer};
use crate::{ImagingError, Result};

/// Available dithering algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    JarvisJudiceNinke,
    #[default]
    FloydSteinberg,
    Atkinson,
    Stucki,
    /// Plain thresholding, no error diffusion.
    None,
    FloydSteinbergFalse,
    Sierra,
    #[serde(rename = "sierra-2")]
    Sierra2,
    SierraLite,
    Burkes,
}

/// Diffusion table for one algorithm.
struct Kernel {
    rows: &'static [&'static [u8]],
    divisor: u32,
    shift: bool,
}

#[rustfmt::skip]
const ATKINSON: Kernel = Kernel {
    rows: &[
        &[0, 0, 1, 1],
        &[1, 1, 1, 0],
        &[0, 1, 0, 0],
    ],
    divisor: 3,
    shift: true,
};

#[rustfmt::skip]
const BURKES: Kernel = Kernel {
    rows: &[
        &[0, 0, 0, 8, 4],
        &[2, 4, 8, 4, 2],
    ],
    divisor: 5,
    shift: true,
};

#[rustfmt::skip]
const FLOYD_STEINBERG: Kernel = Kernel {
    rows: &[
        &[0, 0, 7],
        &[3, 5, 1],
    ],
    divisor: 4,
    shift: true,
};

#[rustfmt::skip]
const FLOYD_STEINBERG_FALSE: Kernel = Kernel {
    rows: &[
        &[0, 3],
        &[3, 2],
    ],
    divisor: 3,
    shift: true,
};

#[rustfmt::skip]
const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    rows: &[
        &[0, 0, 0, 7, 5],
        &[3, 5, 7, 5, 3],
        &[1, 3, 5, 3, 1],
    ],
    divisor: 48,
    shift: false,
};

#[rustfmt::skip]
const SIERRA: Kernel = Kernel {
    rows: &[
        &[0, 0, 0, 5, 3],
        &[2, 4, 5, 4, 2],
        &[0, 2, 3, 2, 0],
    ],
    divisor: 5,
    shift: true,
};

#[rustfmt::skip]
const SIERRA_2: Kernel = Kernel {
    rows: &[
        &[0, 0, 0, 4, 3],
        &[1, 2, 3, 2, 1],
    ],
    divisor: 4,
    shift: true,
};

#[rustfmt::skip]
const SIERRA_LITE: Kernel = Kernel {
    rows: &[
        &[0, 0, 2],
        &[1, 1, 0],
    ],
    divisor: 2,
    shift: true,
};

#[rustfmt::skip]
const STUCKI: Kernel = Kernel {
    rows: &[
        &[0, 0, 0, 8, 4],
        &[2, 4, 8, 4, 2],
        &[1, 2, 4, 2, 1],
    ],
    divisor: 42,
    shift: false,
};

const THRESHOLD_ONLY: Kernel = Kernel {
    rows: &[&[0]],
    divisor: 1,
    shift: false,
};

impl Algorithm {
    /// Every registered algorithm.
    pub const ALL: [Algorithm; 10] = [
        Algorithm::JarvisJudiceNinke,
        Algorithm::FloydSteinberg,
        Algorithm::Atkinson,
        Algorithm::Stucki,
        Algorithm::None,
        Algorithm::FloydSteinbergFalse,
        Algorithm::Sierra,
        Algorithm::Sierra2,
        Algorithm::SierraLite,
        Algorithm::Burkes,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::JarvisJudiceNinke => "jarvis-judice-ninke",
            Algorithm::FloydSteinberg => "floyd-steinberg",
            Algorithm::Atkinson => "atkinson",
            Algorithm::Stucki => "stucki",
            Algorithm::None => "none",
            Algorithm::FloydSteinbergFalse => "floyd-steinberg-false",
            Algorithm::Sierra => "sierra",
            Algorithm::Sierra2 => "sierra-2",
            Algorithm::SierraLite => "sierra-lite",
            Algorithm::Burkes => "burkes",
        }
    }

    fn kernel(self) -> &'static Kernel {
        match self {
            Algorithm::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            Algorithm::FloydSteinberg => &FLOYD_STEINBERG,
            Algorithm::Atkinson => &ATKINSON,
            Algorithm::Stucki => &STUCKI,
            Algorithm::None => &THRESHOLD_ONLY,
            Algorithm::FloydSteinbergFalse => &FLOYD_STEINBERG_FALSE,
            Algorithm::Sierra => &SIERRA,
            Algorithm::Sierra2 => &SIERRA_2,
            Algorithm::SierraLite => &SIERRA_LITE,
            Algorithm::Burkes => &BURKES,
        }
    }

    /// Diffusion matrix for this algorithm.
    pub fn matrix(self) -> Result<DitherMatrix> {
        let k = self.kernel();
        DitherMatrix::new(k.rows, k.divisor, k.shift)
    }

    /// Ditherer for this algorithm at the given threshold.
    pub fn ditherer(self, threshold: u8) -> Result<Ditherer> {
        Ok(Ditherer::new(self.matrix()?, threshold))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ImagingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| ImagingError::Configuration(format!("unknown algorithm '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_algorithm_builds() {
        for algo in Algorithm::ALL {
            let m = algo.matrix().unwrap();
            assert!(m.divisor() > 0, "{algo} has a zero divisor");
        }
    }

    #[test]
    fn test_shift_modes_match_table() {
        let shifting: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.matrix().unwrap().is_shift())
            .collect();
        assert_eq!(
            shifting,
            vec![
                Algorithm::FloydSteinberg,
                Algorithm::Atkinson,
                Algorithm::FloydSteinbergFalse,
                Algorithm::Sierra,
                Algorithm::Sierra2,
                Algorithm::SierraLite,
                Algorithm::Burkes,
            ]
        );
    }

    #[test]
    fn test_divisors() {
        assert_eq!(Algorithm::JarvisJudiceNinke.matrix().unwrap().divisor(), 48);
        assert_eq!(Algorithm::Stucki.matrix().unwrap().divisor(), 42);
        assert_eq!(Algorithm::Atkinson.matrix().unwrap().divisor(), 3);
        assert_eq!(Algorithm::None.matrix().unwrap().divisor(), 1);
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(Algorithm::FloydSteinberg.matrix().unwrap().anchor(), 1);
        assert_eq!(Algorithm::Atkinson.matrix().unwrap().anchor(), 1);
        assert_eq!(Algorithm::Burkes.matrix().unwrap().anchor(), 2);
        assert_eq!(Algorithm::FloydSteinbergFalse.matrix().unwrap().anchor(), 0);
        assert!(Algorithm::None.matrix().unwrap().is_degenerate());
    }

    #[test]
    fn test_names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_underscores() {
        assert_eq!(
            "Floyd_Steinberg".parse::<Algorithm>().unwrap(),
            Algorithm::FloydSteinberg
        );
        assert_eq!(" SIERRA-2 ".parse::<Algorithm>().unwrap(), Algorithm::Sierra2);
    }

    #[test]
    fn test_parse_unknown_is_configuration_error() {
        let err = "bayer".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, ImagingError::Configuration(_)));
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Algorithm::Sierra2).unwrap();
        assert_eq!(json, "\"sierra-2\"");
        let back: Algorithm = serde_json::from_str("\"jarvis-judice-ninke\"").unwrap();
        assert_eq!(back, Algorithm::JarvisJudiceNinke);
    }
}
