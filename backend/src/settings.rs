//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MATCHWORK_*` environment variables and
//! configuration files, in increasing order of precedence for the later
//! layers as OrthoConfig defines them.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{JobCompletionPolicy, UnknownPolicyError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration problems detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required value was not supplied.
    #[error("missing required setting `{key}`")]
    Missing {
        /// Setting name.
        key: &'static str,
    },
    /// The bind address does not parse.
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr {
        /// Raw value.
        value: String,
    },
    /// The completion policy is not recognised.
    #[error(transparent)]
    InvalidPolicy(#[from] UnknownPolicyError),
}

/// Runtime settings for the matchwork service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MATCHWORK")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Shared secret used to verify HS256 bearer tokens.
    pub jwt_secret: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// `first_match` or `all_matches`.
    pub job_completion_policy: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Return the database URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_deref(), "database_url")
    }

    /// Return the token secret.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Missing`] when unset or blank.
    pub fn jwt_secret(&self) -> Result<&str, SettingsError> {
        required(self.jwt_secret.as_deref(), "jwt_secret")
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Return the pool size, falling back to 10.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return the completion policy, falling back to `first_match`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidPolicy`] for unknown values.
    pub fn job_completion_policy(&self) -> Result<JobCompletionPolicy, SettingsError> {
        self.job_completion_policy
            .as_deref()
            .map_or(Ok(JobCompletionPolicy::default()), str::parse)
            .map_err(SettingsError::from)
    }
}

fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, SettingsError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(SettingsError::Missing { key })
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "MATCHWORK_DATABASE_URL",
        "MATCHWORK_BIND_ADDR",
        "MATCHWORK_JWT_SECRET",
        "MATCHWORK_POOL_MAX_SIZE",
        "MATCHWORK_JOB_COMPLETION_POLICY",
        "MATCHWORK_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("matchwork")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert!(!settings.run_migrations);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.job_completion_policy(),
            Ok(JobCompletionPolicy::FirstMatch)
        );
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::Missing {
                key: "database_url"
            })
        );
        assert_eq!(
            settings.jwt_secret(),
            Err(SettingsError::Missing { key: "jwt_secret" })
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "MATCHWORK_DATABASE_URL",
                Some("postgres://matchwork@db/matchwork".to_owned()),
            ),
            ("MATCHWORK_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("MATCHWORK_JWT_SECRET", Some("s3cret".to_owned())),
            ("MATCHWORK_POOL_MAX_SIZE", Some("4".to_owned())),
            (
                "MATCHWORK_JOB_COMPLETION_POLICY",
                Some("all-matches".to_owned()),
            ),
            ("MATCHWORK_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Ok("postgres://matchwork@db/matchwork")
        );
        assert_eq!(settings.jwt_secret(), Ok("s3cret"));
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9090
        );
        assert_eq!(
            settings.job_completion_policy(),
            Ok(JobCompletionPolicy::AllMatches)
        );
        assert!(settings.run_migrations);
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(None)]
    fn blank_values_count_as_missing(#[case] raw: Option<&str>) {
        assert_eq!(
            required(raw, "jwt_secret"),
            Err(SettingsError::Missing { key: "jwt_secret" })
        );
    }

    #[rstest]
    fn unknown_policy_is_rejected() {
        let settings = AppSettings {
            database_url: None,
            bind_addr: Some("not an address".to_owned()),
            jwt_secret: None,
            pool_max_size: None,
            job_completion_policy: Some("whenever".to_owned()),
            run_migrations: false,
        };
        assert!(matches!(
            settings.job_completion_policy(),
            Err(SettingsError::InvalidPolicy(_))
        ));
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
