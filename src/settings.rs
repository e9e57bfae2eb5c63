//! Settings snapshot: the externally editable knobs of the funding floor.
//!
//! The snapshot is read-only to the controller and replaced wholesale when
//! the host applies new settings. Range checks live here, at the store
//! boundary, along with the UI step sizes; the formulas in
//! [`crate::mechanics`] tolerate any values.

use std::ops::RangeInclusive;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_FUNDING_RANGE: RangeInclusive<i64> = 10_000..=100_000;
pub const MAX_FUNDING_RANGE: RangeInclusive<i64> = 500_000..=10_000_000;
pub const FUNDING_PER_SCIENCE_RANGE: RangeInclusive<i64> = 0..=100;
pub const PERCENT_RANGE: RangeInclusive<f64> = 0.0..=0.1;

pub const MIN_FUNDING_STEP: i64 = 1000;
pub const MAX_FUNDING_STEP: i64 = 10_000;
pub const FUNDING_PER_SCIENCE_STEP: i64 = 5;

/// Minimum spread between `min_funding` and `max_funding`.
pub const MIN_SPREAD: i64 = 1000;

/// Environment prefix for overrides, e.g. `FUNDING_FLOOR_MAX_FUNDING=3000000`.
pub const ENV_PREFIX: &str = "FUNDING_FLOOR_";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid min_funding: {0}. Must be between 10000 and 100000")]
    InvalidMinFunding(i64),

    #[error("Invalid max_funding: {0}. Must be between 500000 and 10000000")]
    InvalidMaxFunding(i64),

    #[error("Invalid {field}: {value}. Must be between 0 and 100")]
    InvalidFundingPerScience { field: &'static str, value: i64 },

    #[error("Invalid {field}: {value}. Must be between 0 and 0.1")]
    InvalidPercent { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value}. Must be a multiple of {step}")]
    OffStep { field: &'static str, value: i64, step: i64 },

    #[error("max_funding ({max}) must exceed min_funding ({min}) by more than 1000")]
    SpreadTooNarrow { min: i64, max: i64 },

    #[error("Failed to load settings: {0}")]
    Load(#[source] Box<figment::Error>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What you can spend at 0 (or less) reputation.
    pub min_funding: i64,
    /// What you can spend at 1000 reputation.
    pub max_funding: i64,
    /// Floor increase per point of science spent on R&D unlocks.
    pub funding_per_science: i64,
    /// Legacy per-tier rate. Parsed and validated, not used by the budget.
    pub min_funding_per_science: i64,
    /// Legacy per-tier rate. Parsed and validated, not used by the budget.
    pub max_funding_per_science: i64,
    /// Reputation lost per fund spent below the budget, scaled by funds/rep.
    pub funding_penalty_percent: f64,
    /// Reputation gained per surplus fund, scaled by funds/rep.
    pub funding_bonus_percent: f64,
    /// Science gained per surplus fund, scaled by the 10k exchange rate.
    pub science_bonus_percent: f64,
    /// Deprecated: keep surplus funds instead of converting them.
    #[cfg(feature = "legacy-keep-excess")]
    pub keep_excess_funding: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_funding: 10_000,
            max_funding: 2_000_000,
            funding_per_science: 50,
            min_funding_per_science: 0,
            max_funding_per_science: 0,
            funding_penalty_percent: 0.0,
            funding_bonus_percent: 0.0,
            science_bonus_percent: 0.0,
            #[cfg(feature = "legacy-keep-excess")]
            keep_excess_funding: false,
        }
    }
}

impl Settings {
    /// Load with layered merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. The YAML file at `path` (optional; a missing file is skipped)
    /// 3. `FUNDING_FLOOR_*` environment variables
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let figment = Self::layered(path);
        let settings: Settings = figment
            .extract()
            .map_err(|e| SettingsError::Load(Box::new(e)))?;

        settings.validate()?;
        settings.warn_legacy();
        if !cfg!(feature = "legacy-keep-excess") && requests_keep_excess(&figment) {
            tracing::warn!(
                "keep_excess_funding is set but this build lacks the legacy-keep-excess \
                 feature; the setting is ignored"
            );
        }
        Ok(settings)
    }

    fn layered(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Range checks as the settings UI enforces them.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !MIN_FUNDING_RANGE.contains(&self.min_funding) {
            return Err(SettingsError::InvalidMinFunding(self.min_funding));
        }
        if !MAX_FUNDING_RANGE.contains(&self.max_funding) {
            return Err(SettingsError::InvalidMaxFunding(self.max_funding));
        }
        if self.max_funding <= self.min_funding.saturating_add(MIN_SPREAD) {
            return Err(SettingsError::SpreadTooNarrow {
                min: self.min_funding,
                max: self.max_funding,
            });
        }

        for (field, value, step) in [
            ("min_funding", self.min_funding, MIN_FUNDING_STEP),
            ("max_funding", self.max_funding, MAX_FUNDING_STEP),
            ("funding_per_science", self.funding_per_science, FUNDING_PER_SCIENCE_STEP),
            ("min_funding_per_science", self.min_funding_per_science, FUNDING_PER_SCIENCE_STEP),
            ("max_funding_per_science", self.max_funding_per_science, FUNDING_PER_SCIENCE_STEP),
        ] {
            if value % step != 0 {
                return Err(SettingsError::OffStep { field, value, step });
            }
        }

        for (field, value) in [
            ("funding_per_science", self.funding_per_science),
            ("min_funding_per_science", self.min_funding_per_science),
            ("max_funding_per_science", self.max_funding_per_science),
        ] {
            if !FUNDING_PER_SCIENCE_RANGE.contains(&value) {
                return Err(SettingsError::InvalidFundingPerScience { field, value });
            }
        }

        for (field, value) in [
            ("funding_penalty_percent", self.funding_penalty_percent),
            ("funding_bonus_percent", self.funding_bonus_percent),
            ("science_bonus_percent", self.science_bonus_percent),
        ] {
            // NaN fails `contains` as well.
            if !PERCENT_RANGE.contains(&value) {
                return Err(SettingsError::InvalidPercent { field, value });
            }
        }

        Ok(())
    }

    /// Whether the deprecated keep-excess mode is on.
    #[inline]
    pub fn keeps_excess(&self) -> bool {
        #[cfg(feature = "legacy-keep-excess")]
        {
            self.keep_excess_funding
        }
        #[cfg(not(feature = "legacy-keep-excess"))]
        {
            false
        }
    }

    fn warn_legacy(&self) {
        if self.min_funding_per_science != 0 || self.max_funding_per_science != 0 {
            tracing::warn!(
                min_funding_per_science = self.min_funding_per_science,
                max_funding_per_science = self.max_funding_per_science,
                "per-tier science rates are deprecated and ignored; use funding_per_science"
            );
        }
        if self.keeps_excess() {
            tracing::warn!("keep_excess_funding is deprecated; surplus funds will not be converted");
        }
    }
}

/// Whether the merged sources ask for the keep-excess mode, whatever the
/// build supports.
fn requests_keep_excess(figment: &Figment) -> bool {
    figment.extract_inner::<bool>("keep_excess_funding").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let s = Settings { min_funding: 5_000, ..Settings::default() };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidMinFunding(5_000))));

        let s = Settings { max_funding: 20_000_000, ..Settings::default() };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidMaxFunding(_))));

        let s = Settings { funding_per_science: 101, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::InvalidFundingPerScience { field: "funding_per_science", value: 101 })
        ));

        let s = Settings { science_bonus_percent: 0.2, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::InvalidPercent { field: "science_bonus_percent", .. })
        ));

        let s = Settings { funding_bonus_percent: f64::NAN, ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_values_off_the_ui_steps() {
        let s = Settings { min_funding: 10_500, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::OffStep { field: "min_funding", value: 10_500, step: 1000 })
        ));

        let s = Settings { max_funding: 2_005_000, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::OffStep { field: "max_funding", step: 10_000, .. })
        ));

        let s = Settings { funding_per_science: 52, ..Settings::default() };
        assert!(matches!(
            s.validate(),
            Err(SettingsError::OffStep { field: "funding_per_science", value: 52, step: 5 })
        ));
    }

    #[test]
    fn loads_yaml_over_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.yaml",
                "max_funding: 3000000\nfunding_penalty_percent: 0.02\n",
            )?;

            let s = Settings::load("settings.yaml").map_err(|e| e.to_string())?;
            assert_eq!(s.max_funding, 3_000_000);
            assert_eq!(s.funding_penalty_percent, 0.02);
            assert_eq!(s.min_funding, 10_000);
            assert_eq!(s.funding_per_science, 50);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml_and_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "max_funding: 3000000\nmin_funding: 20000\n")?;
            jail.set_env("FUNDING_FLOOR_MAX_FUNDING", 4_000_000);
            jail.set_env("FUNDING_FLOOR_FUNDING_BONUS_PERCENT", 0.05);

            let s = Settings::load("settings.yaml").map_err(|e| e.to_string())?;
            // env beats the file
            assert_eq!(s.max_funding, 4_000_000);
            assert_eq!(s.funding_bonus_percent, 0.05);
            // file beats the defaults
            assert_eq!(s.min_funding, 20_000);
            // untouched fields keep their defaults
            assert_eq!(s.funding_per_science, 50);
            Ok(())
        });
    }

    #[test]
    fn env_alone_applies_without_a_file() {
        Jail::expect_with(|jail| {
            jail.set_env("FUNDING_FLOOR_MIN_FUNDING", 50_000);
            let s = Settings::load("absent.yaml").map_err(|e| e.to_string())?;
            assert_eq!(s.min_funding, 50_000);
            assert_eq!(s.max_funding, Settings::default().max_funding);
            Ok(())
        });
    }

    #[test]
    fn invalid_env_override_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("FUNDING_FLOOR_FUNDING_PER_SCIENCE", 7);
            assert!(matches!(
                Settings::load("absent.yaml"),
                Err(SettingsError::OffStep { field: "funding_per_science", value: 7, .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn load_rejects_invalid_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "min_funding: 1\n")?;
            assert!(matches!(
                Settings::load("settings.yaml"),
                Err(SettingsError::InvalidMinFunding(1))
            ));
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let s = Settings::load("absent.yaml").map_err(|e| e.to_string())?;
            assert_eq!(s, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn keep_excess_request_is_seen_in_any_build() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.yaml", "keep_excess_funding: true\n")?;
            assert!(requests_keep_excess(&Settings::layered("settings.yaml")));
            let s = Settings::load("settings.yaml").map_err(|e| e.to_string())?;
            assert_eq!(s.keeps_excess(), cfg!(feature = "legacy-keep-excess"));

            jail.create_file("other.yaml", "max_funding: 3000000\n")?;
            assert!(!requests_keep_excess(&Settings::layered("other.yaml")));
            Ok(())
        });
    }
}
