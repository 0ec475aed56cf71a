//! textsift Configuration Management
//!
//! Handles configuration from environment variables and config files
//! with sensible defaults for a single-analyst deployment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Extraction configuration
    pub extraction: ExtractionConfig,

    /// Insight configuration
    pub insight: InsightConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("TEXTSIFT_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("TEXTSIFT_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TEXTSIFT_PORT".to_string(),
                value: port,
            })?;
        }
        if let Ok(size) = std::env::var("TEXTSIFT_MAX_UPLOAD_BYTES") {
            config.server.max_upload_bytes =
                size.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TEXTSIFT_MAX_UPLOAD_BYTES".to_string(),
                    value: size,
                })?;
        }

        // CORS origins (comma-separated)
        if let Ok(origins) = std::env::var("TEXTSIFT_CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Extraction
        if let Ok(distance) = std::env::var("TEXTSIFT_RELATION_MAX_DISTANCE") {
            config.extraction.relation_max_distance =
                distance.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TEXTSIFT_RELATION_MAX_DISTANCE".to_string(),
                    value: distance,
                })?;
        }

        // Insight
        if let Ok(topics) = std::env::var("TEXTSIFT_NUM_TOPICS") {
            config.insight.num_topics =
                topics.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TEXTSIFT_NUM_TOPICS".to_string(),
                    value: topics,
                })?;
        }
        if let Ok(seed) = std::env::var("TEXTSIFT_TOPIC_SEED") {
            config.insight.topic_seed =
                seed.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TEXTSIFT_TOPIC_SEED".to_string(),
                    value: seed,
                })?;
        }

        // Logging
        if let Ok(level) = std::env::var("TEXTSIFT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum upload size in bytes
    pub max_upload_bytes: usize,

    /// Allowed origins for CORS (empty = same-origin only)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024, // 10MB
            cors_origins: vec![],
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum character distance between subject and object entities
    pub relation_max_distance: usize,

    /// Minimum confidence for an extraction to be kept
    pub min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            relation_max_distance: 150,
            min_confidence: 0.5,
        }
    }
}

/// Insight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Default number of LDA topics
    pub num_topics: usize,

    /// Gibbs sampling iterations
    pub topic_iterations: usize,

    /// RNG seed for deterministic topic assignments
    pub topic_seed: u64,

    /// Default number of entries in top-N listings
    pub top_n: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            topic_iterations: 100,
            topic_seed: 42,
            top_n: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,

    /// Emit JSON-formatted logs
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {path}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

impl From<ConfigError> for crate::SiftError {
    fn from(err: ConfigError) -> Self {
        crate::SiftError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.insight.num_topics, 5);
        assert_eq!(config.insight.topic_seed, 42);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            max_upload_bytes = 1024
            cors_origins = ["http://localhost:5173"]

            [extraction]
            relation_max_distance = 80
            min_confidence = 0.7

            [insight]
            num_topics = 3
            topic_iterations = 50
            topic_seed = 7
            top_n = 5

            [logging]
            level = "debug"
            json = true
        "#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.extraction.relation_max_distance, 80);
        assert_eq!(config.insight.num_topics, 3);
        assert!(config.logging.json);
    }
}
