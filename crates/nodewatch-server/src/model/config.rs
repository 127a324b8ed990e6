//! Configuration management for Nodewatch
//!
//! Values are layered, lowest precedence first:
//! 1. built-in defaults
//! 2. the YAML file (`conf/nodewatch.yml`, optional)
//! 3. `NODEWATCH_*` environment variables (`__` separates nesting, e.g. `NODEWATCH_REGISTRY__URL`)
//! 4. command line flags

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::{Config, Environment, File};
use nodewatch_client::{HttpClientConfig, ParticipantClientConfig, RegistryClientConfig};
use nodewatch_common::{
    DEFAULT_CLIENT_APP, DEFAULT_FLUSH_THRESHOLD, DEFAULT_SERVICE_TYPE, DEFAULT_TRANSPORT_TYPE,
    MonitorIdentity, NodewatchError,
};
use nodewatch_monitor::{MonitorConfig, ProbeConfig};

use super::constants::*;
use crate::startup::LoggingConfig;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "nodewatch", version, about = "Deregisters unreachable nodes from a mesh service registry")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Address the health endpoint listens on
    #[arg(short = 'a', long = "addr")]
    pub addr: Option<String>,
    /// Log level
    #[arg(short = 'l', long = "loglvl")]
    pub log_level: Option<String>,
    /// Service registry base URL
    #[arg(long = "registry-url")]
    pub registry_url: Option<String>,
    /// Minutes to sleep between deregistration passes
    #[arg(long = "sleep-deregistration")]
    pub sleep_deregistration: Option<u64>,
    /// Local mesh participant control API base URL
    #[arg(long = "participant-url")]
    pub participant_url: Option<String>,
}

/// Application configuration loaded from config files, environment and flags
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration from the process arguments
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::from(args.config.as_path()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        if let Some(v) = args.addr {
            builder = builder.set_override(SERVER_ADDR, v)?;
        }
        if let Some(v) = args.log_level {
            builder = builder.set_override(LOG_LEVEL, v)?;
        }
        if let Some(v) = args.registry_url {
            builder = builder.set_override(REGISTRY_URL, v)?;
        }
        if let Some(v) = args.sleep_deregistration {
            builder = builder.set_override(MONITOR_SLEEP_DEREGISTRATION_MINUTES, v)?;
        }
        if let Some(v) = args.participant_url {
            builder = builder.set_override(PARTICIPANT_URL, v)?;
        }

        let config = builder.build().with_context(|| {
            format!(
                "Failed to build configuration - check {}",
                args.config.display()
            )
        })?;

        Ok(Configuration { config })
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_addr(&self) -> String {
        self.config
            .get_string(SERVER_ADDR)
            .unwrap_or(DEFAULT_SERVER_ADDR.to_string())
    }

    /// Bindable form of the server address; a bare ":port" listens on all interfaces
    pub fn bind_address(&self) -> String {
        let addr = self.server_addr();
        match addr.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None => addr,
        }
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL)
            .unwrap_or(DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string(LOG_DIR).ok()
    }

    pub fn log_console(&self) -> bool {
        self.config.get_bool(LOG_CONSOLE).unwrap_or(true)
    }

    pub fn log_file(&self) -> bool {
        self.config.get_bool(LOG_FILE).unwrap_or(false)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.log_dir(),
            self.log_console(),
            self.log_file(),
            self.log_level(),
        )
    }

    // ========================================================================
    // Registry Configuration
    // ========================================================================

    pub fn registry_url(&self) -> anyhow::Result<String> {
        self.config
            .get_string(REGISTRY_URL)
            .map_err(|_| NodewatchError::ConfigError(format!("{} is required", REGISTRY_URL)).into())
    }

    pub fn registry_service_type(&self) -> String {
        self.config
            .get_string(REGISTRY_SERVICE_TYPE)
            .unwrap_or(DEFAULT_SERVICE_TYPE.to_string())
    }

    pub fn registry_client_config(&self) -> anyhow::Result<RegistryClientConfig> {
        let defaults = HttpClientConfig::default();
        let http = HttpClientConfig::new(&self.registry_url()?).with_timeouts(
            self.get_u64(REGISTRY_CONNECT_TIMEOUT_MS, defaults.connect_timeout_ms)?,
            self.get_u64(REGISTRY_READ_TIMEOUT_MS, defaults.read_timeout_ms)?,
        );
        Ok(RegistryClientConfig {
            http,
            service_type: self.registry_service_type(),
        })
    }

    // ========================================================================
    // Participant Configuration
    // ========================================================================

    pub fn participant_url(&self) -> String {
        self.config
            .get_string(PARTICIPANT_URL)
            .unwrap_or(DEFAULT_PARTICIPANT_URL.to_string())
    }

    pub fn participant_client_config(&self) -> ParticipantClientConfig {
        ParticipantClientConfig::new(&self.participant_url())
    }

    // ========================================================================
    // Monitor Configuration
    // ========================================================================

    pub fn identity(&self) -> anyhow::Result<MonitorIdentity> {
        let required = |key: &str| {
            self.config
                .get_string(key)
                .map_err(|_| NodewatchError::ConfigError(format!("{} is required", key)))
        };

        let identity = MonitorIdentity::from_hex(
            &required(IDENTITY_PUBLIC_KEY)?,
            &required(IDENTITY_SECRET_KEY)?,
            &required(IDENTITY_SIGNATURE)?,
        )
        .context("Invalid monitor identity")?;

        Ok(identity)
    }

    pub fn sleep_deregistration(&self) -> anyhow::Result<Duration> {
        let minutes = self.get_u64(
            MONITOR_SLEEP_DEREGISTRATION_MINUTES,
            DEFAULT_SLEEP_DEREGISTRATION_MINUTES as u64,
        )?;
        Ok(Duration::from_secs(minutes * 60))
    }

    pub fn flush_threshold(&self) -> anyhow::Result<usize> {
        let threshold = self.get_u64(MONITOR_FLUSH_THRESHOLD, DEFAULT_FLUSH_THRESHOLD as u64)?;
        if threshold == 0 {
            return Err(NodewatchError::ConfigError(format!(
                "{} must be greater than zero",
                MONITOR_FLUSH_THRESHOLD
            ))
            .into());
        }
        Ok(threshold as usize)
    }

    pub fn abort_pass_on_shutdown(&self) -> bool {
        self.config
            .get_bool(MONITOR_ABORT_PASS_ON_SHUTDOWN)
            .unwrap_or(false)
    }

    pub fn probe_config(&self) -> anyhow::Result<ProbeConfig> {
        let defaults = ProbeConfig::default();
        let secs = |key: &str, default: Duration| -> anyhow::Result<Duration> {
            Ok(Duration::from_secs(self.get_u64(key, default.as_secs())?))
        };

        Ok(ProbeConfig {
            transport_type: self
                .config
                .get_string(PROBE_TRANSPORT_TYPE)
                .unwrap_or(DEFAULT_TRANSPORT_TYPE.to_string()),
            client_app: self
                .config
                .get_string(PROBE_CLIENT_APP)
                .unwrap_or(DEFAULT_CLIENT_APP.to_string()),
            setup_timeout: secs(PROBE_SETUP_TIMEOUT_SECS, defaults.setup_timeout)?,
            setup_grace: secs(PROBE_SETUP_GRACE_SECS, defaults.setup_grace)?,
            settle_interval: secs(PROBE_SETTLE_SECS, defaults.settle_interval)?,
            drain_interval: secs(PROBE_DRAIN_SECS, defaults.drain_interval)?,
            post_settle_delay: secs(PROBE_POST_SETTLE_SECS, defaults.post_settle_delay)?,
        })
    }

    /// Typed monitor configuration, validated
    pub fn monitor_config(&self) -> anyhow::Result<MonitorConfig> {
        Ok(MonitorConfig {
            identity: self.identity()?,
            cycle_interval: self.sleep_deregistration()?,
            flush_threshold: self.flush_threshold()?,
            abort_pass_on_shutdown: self.abort_pass_on_shutdown(),
            probe: self.probe_config()?,
        })
    }

    /// Read a non-negative integer, falling back to `default` when unset
    fn get_u64(&self, key: &str, default: u64) -> anyhow::Result<u64> {
        match self.config.get_int(key) {
            Ok(v) if v >= 0 => Ok(v as u64),
            Ok(v) => Err(NodewatchError::ConfigError(format!("{} must not be negative, got {}", key, v)).into()),
            Err(config::ConfigError::NotFound(_)) => Ok(default),
            Err(e) => Err(NodewatchError::ConfigError(format!("{}: {}", key, e)).into()),
        }
    }
}
