use std::path::Path;

use config::{ConfigError, Map};
use serde::de::DeserializeOwned;

use crate::environment::Environment;

/// Directory containing configuration files relative to the working directory.
const CONFIGURATION_DIR: &str = "configuration";

/// Base configuration file loaded for all environments.
const BASE_CONFIG_FILE: &str = "base.yaml";

/// Prefix for environment variable configuration overrides.
const ENV_PREFIX: &str = "APP";

/// Separator between environment variable prefix and key segments.
const ENV_PREFIX_SEPARATOR: &str = "_";

/// Separator for nested configuration keys in environment variables.
///
/// Example: `APP_AWS__REGION` sets the `aws.region` field.
const ENV_SEPARATOR: &str = "__";

/// Separator for list elements in environment variables.
const LIST_SEPARATOR: &str = ",";

/// Describes how a configuration type is fed from environment variables.
pub trait Config {
    /// Keys that should be parsed as lists when read from `APP_` variables.
    const LIST_PARSE_KEYS: &'static [&'static str];

    /// Pairs of `(variable, key)` for variables read without the `APP_` prefix.
    ///
    /// These take precedence over every other source.
    const UNPREFIXED_ENV_KEYS: &'static [(&'static str, &'static str)];
}

/// Loads configuration from the working directory and the process environment.
///
/// Sources are layered in this order, later ones winning:
/// 1. `configuration/base.yaml`, if present
/// 2. `configuration/{environment}.yaml`, if present
/// 3. `APP_`-prefixed variables, with `__` separating nested keys
/// 4. the unprefixed variables listed in [`Config::UNPREFIXED_ENV_KEYS`]
///
/// Both files are optional because a Lambda deployment package usually ships none.
pub fn load_config<T>() -> Result<T, ConfigError>
where
    T: Config + DeserializeOwned,
{
    let base_path = std::env::current_dir().map_err(|err| ConfigError::Foreign(Box::new(err)))?;
    let environment = Environment::load().map_err(|err| ConfigError::Message(err.to_string()))?;
    let env_vars = std::env::vars().collect::<Map<String, String>>();

    load_config_from(&base_path.join(CONFIGURATION_DIR), environment, env_vars)
}

/// Loads configuration from an explicit directory and variable set.
///
/// This is the body of [`load_config`] without any access to process-global state.
pub fn load_config_from<T>(
    configuration_directory: &Path,
    environment: Environment,
    env_vars: Map<String, String>,
) -> Result<T, ConfigError>
where
    T: Config + DeserializeOwned,
{
    let environment_filename = format!("{environment}.yaml");

    let mut environment_source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_PREFIX_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .source(Some(env_vars.clone()));

    if !<T as Config>::LIST_PARSE_KEYS.is_empty() {
        environment_source = environment_source
            .try_parsing(true)
            .list_separator(LIST_SEPARATOR);

        for key in <T as Config>::LIST_PARSE_KEYS {
            environment_source = environment_source.with_list_parse_key(key);
        }
    }

    let mut builder = config::Config::builder()
        .add_source(
            config::File::from(configuration_directory.join(BASE_CONFIG_FILE)).required(false),
        )
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(environment_source);

    for (variable, key) in <T as Config>::UNPREFIXED_ENV_KEYS {
        let value = env_vars
            .get(*variable)
            .filter(|value| !value.is_empty())
            .cloned();
        builder = builder.set_override_option(*key, value)?;
    }

    builder.build()?.try_deserialize::<T>()
}
