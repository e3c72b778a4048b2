use std::{error::Error as StdError, fmt, io, path::PathBuf, result::Result as StdResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoTabs,
    DuplicateTab(String),
    UnknownInitial(String),
    InitialOverrides(String),
    InvalidStiffness(f64),
    ZeroFrameInterval,
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTabs => write!(f, "at least one tab must be configured"),
            Self::DuplicateTab(id) => write!(f, "tab id `{id}` is configured more than once"),
            Self::UnknownInitial(id) => write!(f, "initial tab `{id}` is not a configured tab"),
            Self::InitialOverrides(id) => {
                writeln!(f, "initial tab `{id}` overrides selection and can never be active.")?;
                write!(f, "Pick a regular tab as `initial`.")
            }
            Self::InvalidStiffness(k) => write!(f, "spring stiffness must be positive, got {k}"),
            Self::ZeroFrameInterval => write!(f, "frame_interval_ms must be at least 1"),
            Self::Unreadable { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            }
        }
    }
}

impl StdError for ConfigError {}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
