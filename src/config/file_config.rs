use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConsumerError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ORCH_URI: &str = "http://localhost:8440/orchestrator/orchestration";
pub const DEFAULT_CONFIG_PATH: &str = "config/consumer.toml";

/// Consumer configuration, loaded once at process start and borrowed by
/// whichever component needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_orch_uri")]
    pub orch_uri: String,
    #[serde(default)]
    pub requester: RequesterConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub flags: FlagsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequesterConfig {
    #[serde(default = "default_system_name")]
    pub system_name: String,
    #[serde(default = "default_system_address")]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_definition")]
    pub definition: String,
    #[serde(default = "default_interfaces")]
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagsConfig {
    #[serde(default = "default_true")]
    pub override_store: bool,
    #[serde(default = "default_true")]
    pub matchmaking: bool,
}

fn default_orch_uri() -> String {
    DEFAULT_ORCH_URI.to_string()
}

fn default_system_name() -> String {
    "client1".to_string()
}

fn default_system_address() -> String {
    "localhost".to_string()
}

fn default_service_definition() -> String {
    "IndoorTemperature".to_string()
}

fn default_interfaces() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self {
            system_name: default_system_name(),
            address: default_system_address(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            definition: default_service_definition(),
            interfaces: default_interfaces(),
        }
    }
}

impl Default for FlagsConfig {
    fn default() -> Self {
        Self {
            override_store: true,
            matchmaking: true,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            orch_uri: default_orch_uri(),
            requester: RequesterConfig::default(),
            service: ServiceConfig::default(),
            flags: FlagsConfig::default(),
        }
    }
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConsumerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConsumerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Load the configuration file, falling back to the built-in defaults
    /// when the file is missing or malformed. The failure is logged, not
    /// propagated.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Could not read config file '{}': {}. Using defaults",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Substitute `${VAR_NAME}` references with environment variable values.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("orch_uri", &self.orch_uri)?;
        validate_non_empty_string("requester.system_name", &self.requester.system_name)?;
        validate_non_empty_string("requester.address", &self.requester.address)?;
        validate_non_empty_string("service.definition", &self.service.definition)?;
        validate_non_empty_list("service.interfaces", &self.service.interfaces)?;
        Ok(())
    }
}

impl ConfigProvider for FileConfig {
    fn orch_uri(&self) -> &str {
        &self.orch_uri
    }

    fn system_name(&self) -> &str {
        &self.requester.system_name
    }

    fn system_address(&self) -> &str {
        &self.requester.address
    }

    fn service_definition(&self) -> &str {
        &self.service.definition
    }

    fn interfaces(&self) -> &[String] {
        &self.service.interfaces
    }

    fn override_store(&self) -> bool {
        self.flags.override_store
    }

    fn matchmaking(&self) -> bool {
        self.flags.matchmaking
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
