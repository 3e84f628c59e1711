use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Formula version used to assemble composite scores.
///
/// All versions share the same factor calculators and differ only in which
/// terms they include:
/// - **v1.2**: grit from persistence and time bonus only; productivity
///   without efficiency; execution without momentum.
/// - **v1.5c**: every factor, no synergy multiplier.
/// - **v1.7c** (canonical): v1.5c plus the capped synergy multiplier on grit.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Formula {
    #[serde(rename = "v1.2")]
    V1_2,
    #[serde(rename = "v1.5c")]
    V1_5c,
    #[default]
    #[serde(rename = "v1.7c")]
    V1_7c,
}

impl Formula {
    pub const CANONICAL: Formula = Formula::V1_7c;
    pub const ALL: [Formula; 3] = [Formula::V1_2, Formula::V1_5c, Formula::V1_7c];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_2 => "v1.2",
            Self::V1_5c => "v1.5c",
            Self::V1_7c => "v1.7c",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::V1_2 => "grit from persistence and time bonus; no efficiency or momentum",
            Self::V1_5c => "full factor set without the synergy multiplier",
            Self::V1_7c => "full factor set with capped synergy, load and spike bonuses",
        }
    }

    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }

    pub(crate) fn uses_bonus(self) -> bool {
        matches!(self, Self::V1_7c)
    }

    pub(crate) fn uses_efficiency(self) -> bool {
        !matches!(self, Self::V1_2)
    }

    pub(crate) fn uses_momentum(self) -> bool {
        !matches!(self, Self::V1_2)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix('v').unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|f| &f.as_str()[1..] == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown formula '{s}' (expected one of {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_canonical() {
        assert_eq!(Formula::ALL.iter().filter(|f| f.is_canonical()).count(), 1);
        assert_eq!(Formula::default(), Formula::CANONICAL);
    }

    #[test]
    fn parses_with_or_without_prefix() {
        assert_eq!("v1.7c".parse::<Formula>(), Ok(Formula::V1_7c));
        assert_eq!("1.5C".parse::<Formula>(), Ok(Formula::V1_5c));
        assert_eq!(" v1.2 ".parse::<Formula>(), Ok(Formula::V1_2));
        assert!("v2".parse::<Formula>().is_err());
    }

    #[test]
    fn serde_names_match_display() {
        for f in Formula::ALL {
            assert_eq!(serde_json::to_string(&f).unwrap(), format!("\"{f}\""));
        }
    }
}
