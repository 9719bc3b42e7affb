//! Load test configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};

/// Load test defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Concurrent users used when a caller does not specify any
    #[serde(default = "default_concurrent_users")]
    pub default_concurrent_users: usize,

    /// Requests per user used when a caller does not specify any
    #[serde(default = "default_requests_per_user")]
    pub default_requests_per_user: usize,

    /// Upper bound on the worker pool width of a single load test
    #[serde(default = "default_max_concurrent_users")]
    pub max_concurrent_users: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            default_concurrent_users: default_concurrent_users(),
            default_requests_per_user: default_requests_per_user(),
            max_concurrent_users: default_max_concurrent_users(),
        }
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.default_concurrent_users,
            "default_concurrent_users",
            self.domain_name(),
        )?;
        validate_positive(
            self.default_requests_per_user,
            "default_requests_per_user",
            self.domain_name(),
        )?;
        validate_positive(
            self.max_concurrent_users,
            "max_concurrent_users",
            self.domain_name(),
        )?;

        if self.default_concurrent_users > self.max_concurrent_users {
            return Err(self.validation_error(format!(
                "default_concurrent_users ({}) exceeds max_concurrent_users ({})",
                self.default_concurrent_users, self.max_concurrent_users
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

// Default value functions
fn default_concurrent_users() -> usize {
    5
}

fn default_requests_per_user() -> usize {
    2
}

fn default_max_concurrent_users() -> usize {
    200
}
