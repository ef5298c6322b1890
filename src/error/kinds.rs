use std::{fmt, io};

/// Crate-wide `Result` type using [`PipelineError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Top-level error type for pipeline-complete operations.
///
/// Completion itself never fails; these errors come from start-up work such as
/// loading configuration, reading a metadata catalog or assembling the
/// strategy registry.
#[derive(Debug)]
pub enum PipelineError {
    /// Configuration errors.
    Config(ConfigError),

    /// Metadata catalog errors.
    Catalog(CatalogError),

    /// Malformed recovery strategy registration.
    Registration(RegistrationError),

    /// I/O errors.
    Io(io::Error),

    /// Output serialization errors.
    Serialization(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Any other configuration problem.
    Generic(String),
}

/// Metadata catalog errors.
#[derive(Debug)]
pub enum CatalogError {
    /// Catalog file not found.
    FileNotFound(String),

    /// Catalog is not valid TOML or does not match the catalog layout.
    InvalidFormat(String),

    /// The same name is registered twice for one category.
    DuplicateComponent { name: String, category: String },

    /// Component name or option id is empty.
    EmptyIdentifier { component: String },
}

/// Strategy registration errors, raised once while the registry is built.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistrationError {
    /// Strategy declares no shapes and could never fire.
    NoShapes { strategy: String },

    /// Fingerprint contains the end-of-input kind, which is never matched.
    EndInFingerprint { strategy: String },

    /// Fingerprint cannot match the token that always ends this fault.
    UnreachableShape {
        strategy: String,
        fault: String,
        expected: String,
    },

    /// Two strategies share a name.
    DuplicateStrategy(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "Configuration error: {e}"),
            PipelineError::Catalog(e) => write!(f, "Catalog error: {e}"),
            PipelineError::Registration(e) => write!(f, "Strategy registration error: {e}"),
            PipelineError::Io(e) => write!(f, "I/O error: {e}"),
            PipelineError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            PipelineError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::FileNotFound(path) => write!(f, "Catalog file not found: {path}"),
            CatalogError::InvalidFormat(msg) => write!(f, "Invalid catalog format: {msg}"),
            CatalogError::DuplicateComponent { name, category } => {
                write!(f, "Component '{name}' is registered twice as {category}")
            }
            CatalogError::EmptyIdentifier { component } if component.is_empty() => {
                write!(f, "Component name must not be empty")
            }
            CatalogError::EmptyIdentifier { component } => {
                write!(f, "Option id of component '{component}' must not be empty")
            }
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::NoShapes { strategy } => {
                write!(f, "Strategy '{strategy}' declares no shapes")
            }
            RegistrationError::EndInFingerprint { strategy } => {
                write!(f, "Strategy '{strategy}' uses end of input in a fingerprint")
            }
            RegistrationError::UnreachableShape {
                strategy,
                fault,
                expected,
            } => write!(
                f,
                "Strategy '{strategy}' can never match {fault}: fingerprint must end with {expected}"
            ),
            RegistrationError::DuplicateStrategy(name) => {
                write!(f, "Strategy '{name}' is registered twice")
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for CatalogError {}
impl std::error::Error for RegistrationError {}

/* ========================= Conversions to PipelineError ========================= */

impl From<io::Error> for PipelineError {
    fn from(err: io::Error) -> Self {
        PipelineError::Io(err)
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err)
    }
}

impl From<CatalogError> for PipelineError {
    fn from(err: CatalogError) -> Self {
        PipelineError::Catalog(err)
    }
}

impl From<RegistrationError> for PipelineError {
    fn from(err: RegistrationError) -> Self {
        PipelineError::Registration(err)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

impl From<reedline::ReedlineError> for PipelineError {
    fn from(err: reedline::ReedlineError) -> Self {
        PipelineError::Generic(format!("Line editor error: {err}"))
    }
}

impl From<String> for PipelineError {
    fn from(msg: String) -> Self {
        PipelineError::Generic(msg)
    }
}

impl From<&str> for PipelineError {
    fn from(msg: &str) -> Self {
        PipelineError::Generic(msg.to_owned())
    }
}
