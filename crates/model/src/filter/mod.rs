use crate::core::utils::normalize_city;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// Aliases the filter has historically matched in addition to the configured
/// cities. Opt in through [`FilterConfig::with_default_aliases`].
pub const DEFAULT_CITY_ALIASES: [&str; 2] = ["bangalore", "bengaluru"];

/// Which orders a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportVariant {
    /// Every non-cancelled order in the allowed cities.
    #[serde(rename = "all", alias = "allorders")]
    AllOrders,
    /// Only orders that still have units to ship.
    #[default]
    Unfulfilled,
}

impl ReportVariant {
    pub fn checks_fulfillment(&self) -> bool {
        matches!(self, ReportVariant::Unfulfilled)
    }
}

impl FromStr for ReportVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "allorders" | "all-orders" => Ok(ReportVariant::AllOrders),
            "unfulfilled" => Ok(ReportVariant::Unfulfilled),
            other => Err(format!(
                "unknown report variant '{other}' (expected 'unfulfilled' or 'all')"
            )),
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportVariant::AllOrders => write!(f, "all"),
            ReportVariant::Unfulfilled => write!(f, "unfulfilled"),
        }
    }
}

/// A city name after [`normalize_city`]. Only constructible through
/// normalization, so set membership is always a normalized comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NormalizedCity(String);

impl NormalizedCity {
    pub fn new(name: &str) -> Self {
        NormalizedCity(normalize_city(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    allowed_cities: BTreeSet<NormalizedCity>,
    variant: ReportVariant,
}

impl FilterConfig {
    /// Exact configuration: only the given cities (normalized) are allowed.
    /// Blank names are ignored.
    pub fn new<I, S>(cities: I, variant: ReportVariant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_cities = cities
            .into_iter()
            .map(|c| NormalizedCity::new(c.as_ref()))
            .filter(|c| !c.is_empty())
            .collect();

        FilterConfig {
            allowed_cities,
            variant,
        }
    }

    /// Adds [`DEFAULT_CITY_ALIASES`] to the allowed set.
    pub fn with_default_aliases(mut self) -> Self {
        self.allowed_cities
            .extend(DEFAULT_CITY_ALIASES.iter().map(|c| NormalizedCity::new(c)));
        self
    }

    pub fn allows_city(&self, city: &str) -> bool {
        self.allowed_cities.contains(&NormalizedCity::new(city))
    }

    pub fn allowed_cities(&self) -> impl Iterator<Item = &str> {
        self.allowed_cities.iter().map(NormalizedCity::as_str)
    }

    pub fn variant(&self) -> ReportVariant {
        self.variant
    }
}
