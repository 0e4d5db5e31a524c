use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for process: {0}")]
    Wait(#[source] io::Error),

    #[error("Segment {segment} expanded to an empty command")]
    EmptyCommand { segment: usize },

    #[error("Pipeline contains no commands")]
    NoCommands,
}

impl PipeError {
    /// Classify a spawn failure, splitting out missing executables.
    pub fn spawn(program: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            PipeError::CommandNotFound(program.to_string())
        } else {
            PipeError::Spawn { program: program.to_string(), source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PipeError::CommandNotFound(_))
    }
}
