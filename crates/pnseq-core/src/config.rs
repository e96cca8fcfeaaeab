//! # Configuration System
//!
//! YAML configuration describing a PN generator and logging setup.
//!
//! ## Configuration Search Path
//!
//! [`PnConfig::load`] reads the first file found:
//! 1. Path specified via `PNSEQ_CONFIG` environment variable
//! 2. `./pnseq.yaml` (current directory)
//! 3. `~/.config/pnseq/config.yaml` (user config)
//! 4. `/etc/pnseq/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! # One of polynomial / taps / order selects the feedback polynomial.
//! polynomial: 13        # x^3 + x^2 + 1
//! # taps: [3, 2, 0]
//! # order: 3            # tabulated maximal-length polynomial
//! shift: 0
//! initial_value: 1
//! require_maximal_length: false
//!
//! logging:
//!   level: info
//!   format: compact
//! ```
//!
//! ```rust
//! use pnseq_core::config::PnConfig;
//!
//! let config = PnConfig::parse("order: 5\ninitial_value: 3\n").unwrap();
//! let mut pn = config.build().unwrap();
//! assert_eq!(pn.order(), 5);
//! assert_eq!(pn.generate_bits(31).len(), 31);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::PnError;
use crate::lfsr::PnSequence;
use crate::logging::LogConfig;
use crate::maximal::maximal_length_polynomial;
use crate::polynomial::Polynomial;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PNSEQ_CONFIG";

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("failed to access config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Structurally valid but unusable configuration
    #[error("invalid config: {0}")]
    Validation(String),

    /// Generator rejected the configured parameters
    #[error(transparent)]
    Sequence(#[from] PnError),
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PnConfig {
    /// Explicit polynomial mask
    pub polynomial: Option<Polynomial>,
    /// Tap exponents, used when `polynomial` is absent
    pub taps: Option<Vec<u32>>,
    /// Register order for a tabulated maximal-length polynomial
    pub order: Option<u32>,
    /// Steps advanced before the start state is captured
    pub shift: u32,
    /// Raw initial register value
    pub initial_value: u32,
    /// Reject polynomials that are not maximal-length
    pub require_maximal_length: bool,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Default for PnConfig {
    fn default() -> Self {
        Self {
            polynomial: None,
            taps: None,
            order: None,
            shift: 0,
            initial_value: 1,
            require_maximal_length: false,
            logging: LogConfig::default(),
        }
    }
}

impl PnConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the default config if no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        match Self::config_search_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading PN config");
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./pnseq.yaml")];
        if let Some(dirs) = directories::ProjectDirs::from("", "", "pnseq") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }
        paths.push(PathBuf::from("/etc/pnseq/config.yaml"));
        paths
    }

    /// Resolve the feedback polynomial: `polynomial`, then `taps`, then `order`.
    pub fn resolve_polynomial(&self) -> Result<Polynomial, ConfigError> {
        if let Some(poly) = self.polynomial {
            return Ok(poly);
        }
        if let Some(taps) = &self.taps {
            return Ok(Polynomial::from_taps(taps)?);
        }
        if let Some(order) = self.order {
            return maximal_length_polynomial(order)
                .ok_or(ConfigError::Sequence(PnError::OrderOutOfRange { order }));
        }
        Err(ConfigError::Validation(
            "one of polynomial, taps or order must be set".to_string(),
        ))
    }

    /// Validate the configuration without building a generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let poly = self.resolve_polynomial()?;
        if self.initial_value == 0 {
            return Err(PnError::ZeroInitialValue.into());
        }
        if self.initial_value & poly.register_mask() == 0 {
            return Err(PnError::ZeroRegister {
                initial: self.initial_value,
                order: poly.order(),
            }
            .into());
        }
        if !poly.is_maximal_length() {
            if self.require_maximal_length {
                return Err(PnError::NotMaximalLength {
                    polynomial: poly.mask(),
                }
                .into());
            }
            warn!(polynomial = %poly, "polynomial is not maximal-length");
        }
        Ok(())
    }

    /// Validate and construct the generator.
    pub fn build(&self) -> Result<PnSequence, ConfigError> {
        self.validate()?;
        let poly = self.resolve_polynomial()?;
        debug!(
            polynomial = %poly,
            shift = self.shift,
            initial_value = self.initial_value,
            "building PN generator from config"
        );
        Ok(PnSequence::new(poly, self.shift, self.initial_value)?)
    }
}
