use std::env;

use crate::error::{Error, Result};

pub const NACL_ID_VAR: &str = "nacl_id";
pub const SNS_TOPIC_ARN_VAR: &str = "sns_topic_arn";

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The only network ACL this handler is allowed to modify.
    pub nacl_id: String,
    /// SNS topic that receives the status messages.
    pub sns_topic_arn: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let nacl_id = lookup(NACL_ID_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::Config("NACL ID not found".to_string()))?;

        let sns_topic_arn = lookup(SNS_TOPIC_ARN_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} not set", SNS_TOPIC_ARN_VAR)))?;

        Ok(Config { nacl_id, sns_topic_arn })
    }
}
