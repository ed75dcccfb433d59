use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::workflows::policy::PolicyThresholds;

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

const DEFAULT_REFERENCE_DIR: &str = "crates/kmb-filtering/data";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration for the filtering core and its command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub reference: ReferenceConfig,
    pub upstream: UpstreamConfig,
    pub policy: PolicyThresholds,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_dir = env::var("KMB_REFERENCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_REFERENCE_DIR));

        let timeout_ms = match env::var("KMB_UPSTREAM_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "KMB_UPSTREAM_TIMEOUT_MS",
                })?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_MS,
        };

        let mut policy = PolicyThresholds::default();
        override_f64("KMB_OVD_LAST_12_LIMIT", &mut policy.ovd_last_12_limit)?;
        override_f64("KMB_OVD_CURRENT_LIMIT", &mut policy.ovd_current_limit)?;
        override_f64("KMB_BAKI_DEBET_LIMIT", &mut policy.baki_debet_limit)?;
        override_f64("KMB_BAKI_DEBET_SMALL_TIER", &mut policy.baki_debet_small_tier)?;
        override_f64(
            "KMB_CLUSTER_EF_BAKI_DEBET_LIMIT",
            &mut policy.cluster_ef_baki_debet_limit,
        )?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            reference: ReferenceConfig { dir: reference_dir },
            upstream: UpstreamConfig {
                timeout: Duration::from_millis(timeout_ms),
            },
            policy,
        })
    }
}

fn override_f64(var: &'static str, target: &mut f64) -> Result<(), ConfigError> {
    if let Ok(raw) = env::var(var) {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidNumber { var })?;
        *target = value;
    }
    Ok(())
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the mapping tables loaded at start-up.
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    pub dir: PathBuf,
}

/// Deadline handed to the dupcheck and bureau collaborators.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
