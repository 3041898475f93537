pub mod error;
pub mod keys;

use crate::settings::error::SettingsError;
use connectors::rest::{
    ApiCredential, Url,
    request::{MAX_PAGE_SIZE, parse_endpoint},
};
use engine_core::retry::RetryPolicy;
use model::filter::{FilterConfig, ReportVariant};
use std::{collections::HashMap, str::FromStr, time::Duration};

/// Everything one run needs, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub filter: FilterSettings,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: Url,
    pub credential: ApiCredential,
    pub page_size: u16,
    pub status: String,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
    /// `None` when the overall budget is disabled (`FETCH_DEADLINE_SECS=0`).
    pub overall_timeout: Option<Duration>,
    pub max_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub cities: Vec<String>,
    pub variant: ReportVariant,
    /// When set, the default city aliases are not added.
    pub strict_cities: bool,
}

impl FilterSettings {
    pub fn filter_config(&self) -> FilterConfig {
        let config = FilterConfig::new(&self.cities, self.variant);
        if self.strict_cities {
            config
        } else {
            config.with_default_aliases()
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub cities: Vec<String>,
    pub variant: Option<ReportVariant>,
    pub strict_cities: bool,
}

impl Settings {
    pub fn from_env(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        Self::from_env_with(vars, SettingsOverrides::default())
    }

    pub fn from_env_with(
        vars: &HashMap<String, String>,
        overrides: SettingsOverrides,
    ) -> Result<Self, SettingsError> {
        let env = EnvReader { vars };
        let fetch = FetchSettings::read(&env)?;
        let filter = FilterSettings::read(&env, overrides)?;
        Ok(Settings { fetch, filter })
    }
}

impl FetchSettings {
    fn read(env: &EnvReader<'_>) -> Result<Self, SettingsError> {
        let endpoint = parse_endpoint(env.required(keys::API_ENDPOINT)?)?;
        let token = env.required(keys::API_TOKEN)?.to_string();
        let credential = match env.optional(keys::API_AUTH_HEADER) {
            Some(name) => ApiCredential::Header {
                name: name.to_string(),
                token,
            },
            None => ApiCredential::Bearer(token),
        };

        let page_size = env.parse_or(keys::PAGE_SIZE, MAX_PAGE_SIZE)?;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(env.invalid(
                keys::PAGE_SIZE,
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        let max_attempts: usize = env.parse_or(keys::MAX_ATTEMPTS, 5)?;
        if max_attempts == 0 {
            return Err(env.invalid(keys::MAX_ATTEMPTS, "must be at least 1".into()));
        }

        let retry = RetryPolicy::new(
            max_attempts,
            Duration::from_millis(env.parse_or(keys::BACKOFF_BASE_MS, 1_000)?),
            Duration::from_millis(env.parse_or(keys::BACKOFF_MAX_MS, 30_000)?),
        );

        let deadline_secs: u64 = env.parse_or(keys::DEADLINE_SECS, 600)?;
        let max_pages: usize = env.parse_or(keys::MAX_PAGES, 10_000)?;
        if max_pages == 0 {
            return Err(env.invalid(keys::MAX_PAGES, "must be at least 1".into()));
        }

        Ok(FetchSettings {
            endpoint,
            credential,
            page_size,
            status: env
                .optional(keys::STATUS_FILTER)
                .unwrap_or("any")
                .to_string(),
            retry,
            request_timeout: Duration::from_secs(env.parse_or(keys::REQUEST_TIMEOUT_SECS, 30)?),
            overall_timeout: (deadline_secs > 0).then(|| Duration::from_secs(deadline_secs)),
            max_pages,
        })
    }
}

impl FilterSettings {
    fn read(env: &EnvReader<'_>, overrides: SettingsOverrides) -> Result<Self, SettingsError> {
        let cities = if overrides.cities.is_empty() {
            env.optional(keys::CITIES)
                .map(split_list)
                .unwrap_or_default()
        } else {
            overrides.cities
        };
        if cities.iter().all(|c| c.trim().is_empty()) {
            return Err(SettingsError::Missing(keys::CITIES));
        }

        let variant = match overrides.variant {
            Some(variant) => variant,
            None => env.parse_or(keys::VARIANT, ReportVariant::default())?,
        };
        let strict_cities = overrides.strict_cities || env.parse_or(keys::STRICT_CITIES, false)?;

        Ok(FilterSettings {
            cities,
            variant,
            strict_cities,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

struct EnvReader<'a> {
    vars: &'a HashMap<String, String>,
}

impl EnvReader<'_> {
    fn optional(&self, key: &'static str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<&str, SettingsError> {
        self.optional(key).ok_or(SettingsError::Missing(key))
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, SettingsError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| self.invalid(key, e.to_string())),
        }
    }

    fn invalid(&self, key: &'static str, reason: String) -> SettingsError {
        SettingsError::Invalid {
            key,
            value: self.vars.get(key).cloned().unwrap_or_default(),
            reason,
        }
    }
}
