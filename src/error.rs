use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Unified error type for the generation/compilation/loading pipeline.
///
/// One variant per failure class; every stage reports its own variant and
/// failures are terminal for the current run.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// Invalid descriptor state, rejected before any I/O.
    Descriptor { message: String },
    /// The rendered source text could not be written to the work directory.
    SourceWrite { path: PathBuf, source: io::Error },
    /// The external compiler binary is absent from the environment.
    ToolchainMissing { program: String },
    /// The external compiler exited with a non-zero status. Its own
    /// diagnostics have already been relayed to the host streams.
    Compile { program: String, status: ExitStatus },
    /// No unit with the given name could be materialized; a mapped file
    /// that cannot be read reports the same way.
    UnitNotFound { name: String },
    /// The host JVM could not be started or attached to.
    HostStart { message: String },
    /// The loaded unit could not be constructed through its zero-argument
    /// constructor.
    Instantiation { name: String, message: String },
    /// The constructed object does not implement the agreed capability.
    CapabilityMismatch { name: String, capability: String },
    /// The capability method raised an error when invoked.
    Invocation {
        name: String,
        method: String,
        message: String,
    },
}

/// Convenience result alias used across the pipeline.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Construct a descriptor-model rejection.
    pub fn descriptor(message: impl Into<String>) -> Self {
        Self::Descriptor {
            message: message.into(),
        }
    }

    /// Construct a load failure for the given unit name.
    pub fn unit_not_found(name: impl Into<String>) -> Self {
        Self::UnitNotFound { name: name.into() }
    }

    /// Construct a host start/attach failure.
    pub fn host_start(message: impl Into<String>) -> Self {
        Self::HostStart {
            message: message.into(),
        }
    }

    /// Construct an instantiation failure for the given unit name.
    pub fn instantiation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Instantiation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Construct an invocation failure for the given unit and method.
    pub fn invocation(
        name: impl Into<String>,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Invocation {
            name: name.into(),
            method: method.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Descriptor { message } => write!(f, "descriptor error: {message}"),
            Error::SourceWrite { path, source } => {
                write!(f, "failed to write source file {}: {source}", path.display())
            }
            Error::ToolchainMissing { program } => {
                write!(f, "compiler `{program}` was not found in the environment")
            }
            Error::Compile { program, status } => {
                write!(f, "`{program}` exited with status {status}")
            }
            Error::UnitNotFound { name } => write!(f, "unit `{name}` could not be loaded"),
            Error::HostStart { message } => write!(f, "failed to start host JVM: {message}"),
            Error::Instantiation { name, message } => {
                write!(f, "failed to instantiate `{name}`: {message}")
            }
            Error::CapabilityMismatch { name, capability } => {
                write!(f, "unit `{name}` does not implement capability `{capability}`")
            }
            Error::Invocation {
                name,
                method,
                message,
            } => {
                write!(f, "invoking `{method}` on `{name}` failed: {message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::SourceWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}
