use gasfeed_core::PipelineError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::Pipeline(error) => error.exit_code(),
        }
    }
}
