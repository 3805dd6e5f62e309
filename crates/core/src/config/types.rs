use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub acquirer: AcquirerConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

/// Where submissions are materialized on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory holding one subdirectory per category.
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,
    /// Largest accepted multipart upload, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            input_root: default_input_root(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_input_root() -> PathBuf {
    PathBuf::from("input")
}

fn default_max_upload_bytes() -> u64 {
    500 * 1024 * 1024
}

/// Remote URL acquisition settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcquirerConfig {
    /// Maximum number of redirect hops followed before giving up (default: 5)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
    /// Deadline for a single download attempt in seconds, re-armed on every hop (default: 300)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl AcquirerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_redirects() -> u32 {
    5
}

fn default_timeout() -> u64 {
    300
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("vidhook/{}", env!("CARGO_PKG_VERSION"))
}

/// External transcoder invocation.
///
/// The process is started as `<program> <args...> --input <path>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscoderConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Arguments placed before `--input <path>`.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Working directory for the child process (default: inherited)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("python3")
}

fn default_args() -> Vec<String> {
    vec!["main.py".to_string()]
}
