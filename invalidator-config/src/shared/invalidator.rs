use serde::{Deserialize, Serialize};

use crate::Config;
use crate::shared::{AwsConfig, ValidationError};

/// Unprefixed variable naming the CloudFront distribution to invalidate.
pub const DISTRIBUTION_ID_ENV_NAME: &str = "DISTRIBUTION_ID";

/// Complete configuration of the invalidation function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InvalidatorConfig {
    /// Distribution whose cache is invalidated.
    ///
    /// Deliberately optional: a missing id must not stop the function from starting, since the
    /// pipeline job still has to be told that the invalidation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<String>,
    /// Sends a success report to the pipeline even after a failure report was sent.
    ///
    /// Off by default, which makes the two reports mutually exclusive.
    #[serde(default)]
    pub always_report_success: bool,
    #[serde(default)]
    pub aws: AwsConfig,
}

impl InvalidatorConfig {
    /// Returns the distribution id, treating a blank value as missing.
    pub fn distribution_id(&self) -> Option<&str> {
        self.distribution_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.aws.validate()
    }
}

impl Config for InvalidatorConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];

    const UNPREFIXED_ENV_KEYS: &'static [(&'static str, &'static str)] =
        &[(DISTRIBUTION_ID_ENV_NAME, "distribution_id")];
}

#[cfg(test)]
mod tests {
    use std::fs;

    use config::Map;

    use super::*;
    use crate::{Environment, load_config_from};

    fn env(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn loads_distribution_id_from_unprefixed_variable() {
        let dir = tempfile::tempdir().unwrap();

        let config: InvalidatorConfig = load_config_from(
            dir.path(),
            Environment::Prod,
            env(&[("DISTRIBUTION_ID", "DIST1")]),
        )
        .unwrap();

        assert_eq!(config.distribution_id(), Some("DIST1"));
        assert!(!config.always_report_success);
        assert_eq!(config.aws, AwsConfig::default());
    }

    #[test]
    fn missing_distribution_id_still_loads() {
        let dir = tempfile::tempdir().unwrap();

        let config: InvalidatorConfig =
            load_config_from(dir.path(), Environment::Prod, env(&[])).unwrap();

        assert_eq!(config.distribution_id(), None);
        config.validate().unwrap();
    }

    #[test]
    fn empty_distribution_id_variable_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.yaml"), "distribution_id: FROMFILE\n").unwrap();

        let config: InvalidatorConfig = load_config_from(
            dir.path(),
            Environment::Prod,
            env(&[("DISTRIBUTION_ID", "")]),
        )
        .unwrap();

        assert_eq!(config.distribution_id(), Some("FROMFILE"));
    }

    #[test]
    fn sources_are_layered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.yaml"),
            "distribution_id: BASE\naws:\n  region: eu-west-1\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("dev.yaml"),
            "distribution_id: DEV\nalways_report_success: true\n",
        )
        .unwrap();

        let config: InvalidatorConfig = load_config_from(
            dir.path(),
            Environment::Dev,
            env(&[("APP_AWS__ENDPOINT_URL", "http://localhost:4566")]),
        )
        .unwrap();
        assert_eq!(config.distribution_id(), Some("DEV"));
        assert!(config.always_report_success);
        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            config.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );

        let config: InvalidatorConfig = load_config_from(
            dir.path(),
            Environment::Dev,
            env(&[
                ("APP_DISTRIBUTION_ID", "PREFIXED"),
                ("DISTRIBUTION_ID", "UNPREFIXED"),
            ]),
        )
        .unwrap();
        assert_eq!(config.distribution_id(), Some("UNPREFIXED"));
    }

    #[test]
    fn blank_distribution_id_counts_as_missing() {
        let config = InvalidatorConfig {
            distribution_id: Some("   ".to_string()),
            ..Default::default()
        };

        assert_eq!(config.distribution_id(), None);
    }

    #[test]
    fn blank_aws_overrides_are_rejected() {
        let config = InvalidatorConfig {
            aws: AwsConfig {
                region: Some(" ".to_string()),
                endpoint_url: None,
            },
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyField("aws.region"))
        );
    }
}
