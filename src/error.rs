use std::io;

use thiserror::Error;

/// Failures that abort an `open` invocation and are reported to the user.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("No workspace folder is open.")]
    NoWorkspace,

    #[error("Failed to launch Qt Creator (`{program}`)")]
    LaunchFailure {
        program: String,
        source: io::Error,
    },
}
