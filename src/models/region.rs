//! Region bias input model.

use serde::{Deserialize, Serialize};

/// Default region names and short codes, in declaration order.
pub const REGION_THEMES: [(&str, &str); 6] = [
    ("Orion", "ORI"),
    ("Andromeda", "AND"),
    ("Cygnus", "CYG"),
    ("Lyra", "LYR"),
    ("Draco", "DRC"),
    ("Phoenix", "PHX"),
];

/// Relative weight of one region's share of the supernet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegionBias {
    /// Display name of the region.
    pub name: String,
    /// Relative weight, normalized against the sum of all ratios.
    pub ratio: f64,
    /// Optional short code used in site identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RegionBias {
    pub fn new(name: &str, ratio: f64) -> RegionBias {
        RegionBias {
            name: name.to_string(),
            ratio,
            code: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> RegionBias {
        self.code = Some(code.to_string());
        self
    }

    /// `count` regions with ratio 1, named from [`REGION_THEMES`].
    pub fn themed(count: usize) -> Vec<RegionBias> {
        (0..count)
            .map(|i| match REGION_THEMES.get(i) {
                Some((name, code)) => RegionBias::new(name, 1.0).with_code(code),
                None => RegionBias::new(&format!("Region {}", i + 1), 1.0),
            })
            .collect()
    }

    /// The explicit code, or the first three letters of the name upper-cased.
    pub fn short_code(&self) -> String {
        match &self.code {
            Some(code) => code.clone(),
            None => self
                .name
                .chars()
                .filter(|c| !c.is_whitespace())
                .take(3)
                .collect::<String>()
                .to_uppercase(),
        }
    }
}
