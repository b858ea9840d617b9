//! Structured logging for the graphseg binary.
//!
//! Diagnostics always go to stderr so stdout carries nothing but the command
//! summary. `GRAPHSEG_LOG_FORMAT` picks human or JSON output and `RUST_LOG`
//! holds the filter directives, defaulting to `info`. Records emitted through
//! the `log` facade are forwarded into `tracing`.

use std::{env, io, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing::{debug, warn};
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter,
    filter::ParseError,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "GRAPHSEG_LOG_FORMAT";

const DEFAULT_DIRECTIVES: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, with the enclosing spans attached.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while configuring structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// An environment variable held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Offending variable.
        name: &'static str,
        /// Lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `GRAPHSEG_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// `RUST_LOG` could not be parsed as filter directives.
    #[error("invalid log filter `{directives}`: {source}")]
    InvalidFilter {
        /// Directives as supplied.
        directives: String,
        /// Parse failure.
        #[source]
        source: ParseError,
    },
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: TryInitError,
    },
}

/// Logging settings resolved from the environment.
///
/// # Examples
/// ```
/// use std::env::VarError;
/// use graphseg_cli::logging::{LogFormat, LogSettings};
///
/// let settings = LogSettings::from_lookup(|key| match key {
///     "GRAPHSEG_LOG_FORMAT" => Ok("json".to_owned()),
///     _ => Err(VarError::NotPresent),
/// })?;
/// assert_eq!(settings.format(), LogFormat::Json);
/// assert_eq!(settings.directives(), "info");
/// # Ok::<(), graphseg_cli::logging::LoggingError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    format: LogFormat,
    directives: String,
}

impl LogSettings {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    /// See [`LogSettings::from_lookup`].
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Resolves the settings through `lookup`, which behaves like
    /// [`env::var`].
    ///
    /// A missing or blank `RUST_LOG` falls back to `info`.
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidUnicode`] for non-UTF-8 values and
    /// [`LoggingError::UnsupportedFormat`] for an unknown format.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let format = match read_var(&lookup, LOG_FORMAT_ENV)? {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        let directives = read_var(&lookup, EnvFilter::DEFAULT_ENV)?
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_owned());
        Ok(Self { format, directives })
    }

    /// Returns the selected output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns the filter directives.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }

    /// Parses the directives into a filter.
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidFilter`] when a directive is malformed.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.directives).map_err(|source| LoggingError::InvalidFilter {
            directives: self.directives.clone(),
            source,
        })
    }

    /// Installs a global subscriber built from these settings.
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidFilter`] for malformed directives and
    /// [`LoggingError::InstallFailed`] when a global subscriber already
    /// exists.
    pub fn install(&self) -> Result<(), LoggingError> {
        let filter = self.filter()?;
        let (human, json) = match self.format {
            LogFormat::Human => (
                Some(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_span_events(FmtSpan::CLOSE),
                ),
                None,
            ),
            LogFormat::Json => (
                None,
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_current_span(true)
                        .with_span_list(true),
                ),
            ),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(human)
            .with(json)
            .try_init()
            .map_err(|source| LoggingError::InstallFailed { source })?;

        if LogTracer::init().is_err() {
            debug!("log facade already bridged; keeping the existing logger");
        }
        Ok(())
    }
}

fn read_var<F>(lookup: &F, name: &'static str) -> Result<Option<String>, LoggingError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source @ env::VarError::NotUnicode(_)) => {
            Err(LoggingError::InvalidUnicode { name, source })
        }
    }
}

/// Installs global structured logging once per process.
///
/// If another global subscriber is already in place it is kept, and a
/// warning is emitted through it.
///
/// # Errors
/// Returns [`LoggingError`] when the environment holds invalid settings.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    match LogSettings::from_env()?.install() {
        Ok(()) => {}
        Err(LoggingError::InstallFailed { source }) => {
            warn!(error = %source, "keeping the existing tracing subscriber");
        }
        Err(err) => return Err(err),
    }
    let _ = INSTALLED.set(());
    Ok(())
}
