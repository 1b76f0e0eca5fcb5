//! Logging configuration for decoded transactions.

use std::sync::Arc;

use crate::{DecoderRegistry, InstructionDecoder};

/// Environment variable selecting the log level: `off`, `brief`, `standard`,
/// `detailed` (alias `debug`).
pub const LOG_ENV_VAR: &str = "SERUM_DECODER_LOG";
/// When set (to any value), disables ANSI colors.
pub const NO_COLOR_ENV_VAR: &str = "SERUM_DECODER_NO_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogVerbosity {
    /// Program and instruction name only.
    Brief,
    /// Decoded fields and the account role table.
    #[default]
    Standard,
    /// Everything in `Standard` plus raw instruction data.
    Detailed,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Print every logged transaction to stderr, not only the log file.
    pub log_events: bool,
    pub verbosity: LogVerbosity,
    pub use_colors: bool,
    pub show_account_roles: bool,
    pub decode_instructions: bool,
    decoder_registry: Option<Arc<DecoderRegistry>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_events: false,
            verbosity: LogVerbosity::Standard,
            use_colors: true,
            show_account_roles: true,
            decode_instructions: true,
            decoder_registry: Some(Arc::new(DecoderRegistry::default())),
        }
    }
}

impl LoggingConfig {
    /// Detailed output, printed to stderr for every transaction.
    pub fn debug() -> Self {
        Self {
            log_events: true,
            verbosity: LogVerbosity::Detailed,
            ..Self::default()
        }
    }

    /// Logging disabled, decoding still available.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Build from [`LOG_ENV_VAR`] and [`NO_COLOR_ENV_VAR`]. Unset or
    /// unrecognized values give the default config.
    pub fn from_env() -> Self {
        let level = std::env::var(LOG_ENV_VAR).unwrap_or_default();
        let mut config = Self::from_level(&level);
        if std::env::var_os(NO_COLOR_ENV_VAR).is_some() {
            config.use_colors = false;
        }
        config
    }

    fn from_level(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "off" | "0" | "false" => Self::disabled(),
            "brief" => Self::default().with_verbosity(LogVerbosity::Brief),
            "detailed" | "debug" => Self::debug(),
            "standard" | "" => Self::default(),
            other => {
                tracing::warn!("{LOG_ENV_VAR}={other} is not a known level, using standard");
                Self::default()
            }
        }
    }

    /// Replace the registry with the built-in decoders plus `decoders`.
    /// A decoder for an already registered program id replaces the built-in one.
    pub fn with_decoders(mut self, decoders: Vec<Box<dyn InstructionDecoder>>) -> Self {
        let mut registry = DecoderRegistry::default();
        registry.register_all(decoders);
        self.decoder_registry = Some(Arc::new(registry));
        self
    }

    pub fn without_decoders(mut self) -> Self {
        self.decoder_registry = None;
        self
    }

    pub fn with_verbosity(mut self, verbosity: LogVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    pub fn decoder_registry(&self) -> Option<&DecoderRegistry> {
        self.decoder_registry.as_deref()
    }
}
