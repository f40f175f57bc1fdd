use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::awards::cutoff::Threshold;
use crate::awards::evaluation::{AwardRules, EligibilityConfig};
use crate::awards::grade::PartitionPolicy;
use crate::awards::program::ProgramCategory;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub program: ProgramCategory,
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let program = match env::var("APP_PROGRAM") {
            Ok(value) => ProgramCategory::parse(&value)
                .ok_or(ConfigError::InvalidProgram { value })?,
            Err(_) => ProgramCategory::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            program,
            eligibility: load_eligibility()?,
        })
    }
}

fn load_eligibility() -> Result<EligibilityConfig, ConfigError> {
    let defaults = EligibilityConfig::default();

    let partition_policy = match env::var("AWARDS_GRADE_PARTITION") {
        Ok(value) => PartitionPolicy::parse(&value)
            .ok_or(ConfigError::InvalidPartition { value })?,
        Err(_) => defaults.partition_policy,
    };

    Ok(EligibilityConfig {
        all_around: AwardRules {
            threshold: threshold_var(
                "AWARDS_ALL_AROUND_THRESHOLD",
                defaults.all_around.threshold,
            )?,
            require_driver_score: flag_var(
                "AWARDS_ALL_AROUND_REQUIRES_DRIVER",
                defaults.all_around.require_driver_score,
            )?,
        },
        excellence: AwardRules {
            threshold: threshold_var(
                "AWARDS_EXCELLENCE_THRESHOLD",
                defaults.excellence.threshold,
            )?,
            require_driver_score: flag_var(
                "AWARDS_EXCELLENCE_REQUIRES_DRIVER",
                defaults.excellence.require_driver_score,
            )?,
        },
        partition_policy,
    })
}

/// Accepts either a fraction (`0.4`) or a whole percentage (`40`).
fn threshold_var(var: &'static str, default: Threshold) -> Result<Threshold, ConfigError> {
    let Ok(value) = env::var(var) else {
        return Ok(default);
    };

    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidThreshold {
            var,
            value: value.clone(),
        })?;
    let fraction = if parsed > 1.0 { parsed / 100.0 } else { parsed };

    Threshold::from_fraction(fraction).map_err(|_| ConfigError::InvalidThreshold { var, value })
}

fn flag_var(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(var) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidProgram { value: String },
    InvalidThreshold { var: &'static str, value: String },
    InvalidFlag { var: &'static str, value: String },
    InvalidPartition { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidProgram { value } => {
                write!(f, "APP_PROGRAM '{value}' is not a known program")
            }
            ConfigError::InvalidThreshold { var, value } => {
                write!(f, "{var} '{value}' must be a share strictly between 0 and 1")
            }
            ConfigError::InvalidFlag { var, value } => {
                write!(f, "{var} '{value}' must be true or false")
            }
            ConfigError::InvalidPartition { value } => {
                write!(
                    f,
                    "AWARDS_GRADE_PARTITION '{value}' must be 'binary' or 'per-band'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_PROGRAM",
            "AWARDS_ALL_AROUND_THRESHOLD",
            "AWARDS_EXCELLENCE_THRESHOLD",
            "AWARDS_ALL_AROUND_REQUIRES_DRIVER",
            "AWARDS_EXCELLENCE_REQUIRES_DRIVER",
            "AWARDS_GRADE_PARTITION",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.program, ProgramCategory::V5rc);
        assert_eq!(config.eligibility, EligibilityConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn award_rules_follow_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AWARDS_EXCELLENCE_THRESHOLD", "35");
        env::set_var("AWARDS_ALL_AROUND_THRESHOLD", "0.6");
        env::set_var("AWARDS_EXCELLENCE_REQUIRES_DRIVER", "yes");
        env::set_var("AWARDS_GRADE_PARTITION", "per-band");
        env::set_var("APP_PROGRAM", "viqrc");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.eligibility.excellence.threshold.basis_points(), 3_500);
        assert_eq!(config.eligibility.all_around.threshold.basis_points(), 6_000);
        assert!(config.eligibility.excellence.require_driver_score);
        assert!(config.eligibility.all_around.require_driver_score);
        assert_eq!(config.eligibility.partition_policy, PartitionPolicy::PerBand);
        assert_eq!(config.program, ProgramCategory::Viqrc);
        reset_env();
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AWARDS_EXCELLENCE_THRESHOLD", "150");

        let err = AppConfig::load().expect_err("threshold above 100% is rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold {
                var: "AWARDS_EXCELLENCE_THRESHOLD",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_unknown_flag_value() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AWARDS_ALL_AROUND_REQUIRES_DRIVER", "sometimes");

        let err = AppConfig::load().expect_err("flag must be boolean");
        assert_eq!(
            err.to_string(),
            "AWARDS_ALL_AROUND_REQUIRES_DRIVER 'sometimes' must be true or false"
        );
        reset_env();
    }
}
