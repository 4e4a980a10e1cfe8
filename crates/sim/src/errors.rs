use std::error;
use std::fmt;
use std::io;

/// Errors from constructing or applying a mutation strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Spacing between mutation sites is below the strategy's minimum.
    InvalidDistance { distance: usize, minimum: usize },

    /// A length parameter that must be at least one base was zero.
    InvalidLength(&'static str, usize),

    /// A cluster window cannot hold the configured number of events.
    ClusterTooSmall { window: usize, requested: usize },
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDistance { distance, minimum } => {
                write!(
                    f,
                    "Invalid distance between mutations: {distance} (must be at least {minimum})"
                )
            }
            Self::InvalidLength(name, value) => {
                write!(f, "Invalid {name}: {value} (must be at least 1)")
            }
            Self::ClusterTooSmall { window, requested } => {
                write!(
                    f,
                    "Cluster window of {window} bases cannot hold {requested} variant events"
                )
            }
        }
    }
}

impl error::Error for MutationError {}

/// Errors from emitting the mutated FASTA and the two VCF tables.
#[derive(Debug)]
pub enum EmitError {
    /// Reading the input or writing an output failed.
    Io(io::Error),

    /// The mutation engine rejected the run.
    Mutation(MutationError),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Mutation(e) => write!(f, "Mutation error: {e}"),
        }
    }
}

impl error::Error for EmitError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Mutation(e) => Some(e),
        }
    }
}

impl From<io::Error> for EmitError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MutationError> for EmitError {
    fn from(e: MutationError) -> Self {
        Self::Mutation(e)
    }
}

/// Errors from parsing batch options or running the batch driver.
#[derive(Debug)]
pub enum BatchError {
    /// A parameter group string failed to parse. Carries the option name
    /// and the full option value, not just the offending group.
    BadOption { option: &'static str, value: String },

    /// No mutation options were supplied at all.
    NoMutationsRequested,

    /// A strategy rejected its parameters.
    Mutation(MutationError),

    /// Producing one of the output files failed.
    Emit(EmitError),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadOption { option, value } => {
                write!(f, "Cannot parse {option} option: '{value}'")
            }
            Self::NoMutationsRequested => {
                write!(
                    f,
                    "Must use at least one of the options --snps, --dels, --ins, --complex"
                )
            }
            Self::Mutation(e) => write!(f, "Mutation error: {e}"),
            Self::Emit(e) => write!(f, "Output error: {e}"),
        }
    }
}

impl error::Error for BatchError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Mutation(e) => Some(e),
            Self::Emit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MutationError> for BatchError {
    fn from(e: MutationError) -> Self {
        Self::Mutation(e)
    }
}

impl From<EmitError> for BatchError {
    fn from(e: EmitError) -> Self {
        Self::Emit(e)
    }
}

/// Errors from driving the external read simulator.
#[derive(Debug)]
pub enum ReadSimError {
    /// The required executable was not found on PATH.
    ExecutableNotFound(String),

    /// The simulator exited with a nonzero status.
    CommandFailed {
        command: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Filesystem trouble around the simulator run.
    Io(io::Error),
}

impl fmt::Display for ReadSimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutableNotFound(name) => {
                write!(f, "{name} not found in PATH. Cannot continue")
            }
            Self::CommandFailed {
                command,
                status,
                stdout,
                stderr,
            } => {
                write!(
                    f,
                    "Error running command: {command} (return code {status:?})\nstdout:\n{stdout}\nstderr:\n{stderr}"
                )
            }
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl error::Error for ReadSimError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadSimError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_error_display() {
        let err = MutationError::InvalidDistance {
            distance: 1,
            minimum: 2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("Invalid distance"));
        assert!(msg.contains('1'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_cluster_too_small_display() {
        let err = MutationError::ClusterTooSmall {
            window: 4,
            requested: 6,
        };
        let msg = format!("{err}");
        assert!(msg.contains('4'));
        assert!(msg.contains('6'));
    }

    #[test]
    fn test_batch_error_display() {
        let err = BatchError::BadOption {
            option: "--snps",
            value: "abc".to_string(),
        };
        assert_eq!(format!("{err}"), "Cannot parse --snps option: 'abc'");

        let err = BatchError::NoMutationsRequested;
        assert!(format!("{err}").contains("--complex"));
    }

    #[test]
    fn test_read_sim_error_display() {
        let err = ReadSimError::ExecutableNotFound("art_illumina".to_string());
        assert!(format!("{err}").contains("art_illumina not found in PATH"));
    }
}
