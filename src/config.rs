use std::env;

use thiserror::Error;

use crate::location::{LocationPolicy, ParsePolicyError};

#[derive(Debug)]
pub struct Config {
    pub bot_token: String,
    pub sentry_url: Option<String>,
    pub location_input: LocationPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Can't read {0} from env")]
    Missing(&'static str),
    #[error("Invalid LOCATION_INPUT: {0}")]
    LocationInput(#[from] ParsePolicyError),
}

impl Config {
    pub fn init() -> Self {
        match Config::from_lookup(|name| env::var(name).ok()) {
            Ok(config) => config,
            Err(err) => panic!("{}", err),
        }
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bot_token = read("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let sentry_url = read("SENTRY_URL");
        let location_input = match read("LOCATION_INPUT") {
            Some(value) => value.parse::<LocationPolicy>()?,
            None => LocationPolicy::default(),
        };

        Ok(Config {
            bot_token,
            sentry_url,
            location_input,
        })
    }
}
