use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Overrides for the AWS SDK configuration.
///
/// Everything left unset falls through to the SDK's default provider chains, which is what a
/// deployed function relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AwsConfig {
    /// Region used for both clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint replacing the public AWS endpoints, e.g. a local emulator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(self.region.as_deref()) {
            return Err(ValidationError::EmptyField("aws.region"));
        }

        if is_blank(self.endpoint_url.as_deref()) {
            return Err(ValidationError::EmptyField("aws.endpoint_url"));
        }

        Ok(())
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    matches!(value, Some(value) if value.trim().is_empty())
}
