// Configuration keys and defaults

pub const DEFAULT_CONFIG_FILE: &str = "conf/nodewatch.yml";
pub const ENV_PREFIX: &str = "NODEWATCH";

pub const SERVER_ADDR: &str = "server.addr";
pub const DEFAULT_SERVER_ADDR: &str = ":9081";

pub const LOG_LEVEL: &str = "log.level";
pub const LOG_DIR: &str = "log.dir";
pub const LOG_CONSOLE: &str = "log.console";
pub const LOG_FILE: &str = "log.file";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const REGISTRY_URL: &str = "registry.url";
pub const REGISTRY_SERVICE_TYPE: &str = "registry.service_type";
pub const REGISTRY_CONNECT_TIMEOUT_MS: &str = "registry.connect_timeout_ms";
pub const REGISTRY_READ_TIMEOUT_MS: &str = "registry.read_timeout_ms";

pub const IDENTITY_PUBLIC_KEY: &str = "identity.public_key";
pub const IDENTITY_SECRET_KEY: &str = "identity.secret_key";
pub const IDENTITY_SIGNATURE: &str = "identity.signature";

pub const PARTICIPANT_URL: &str = "participant.url";
pub const DEFAULT_PARTICIPANT_URL: &str = "http://127.0.0.1:8000";

pub const MONITOR_SLEEP_DEREGISTRATION_MINUTES: &str = "monitor.sleep_deregistration_minutes";
pub const DEFAULT_SLEEP_DEREGISTRATION_MINUTES: i64 = 10;
pub const MONITOR_FLUSH_THRESHOLD: &str = "monitor.flush_threshold";
pub const MONITOR_ABORT_PASS_ON_SHUTDOWN: &str = "monitor.abort_pass_on_shutdown";

pub const PROBE_TRANSPORT_TYPE: &str = "probe.transport_type";
pub const PROBE_CLIENT_APP: &str = "probe.client_app";
pub const PROBE_SETUP_TIMEOUT_SECS: &str = "probe.setup_timeout_secs";
pub const PROBE_SETUP_GRACE_SECS: &str = "probe.setup_grace_secs";
pub const PROBE_SETTLE_SECS: &str = "probe.settle_secs";
pub const PROBE_DRAIN_SECS: &str = "probe.drain_secs";
pub const PROBE_POST_SETTLE_SECS: &str = "probe.post_settle_secs";
