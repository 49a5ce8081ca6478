//! Error taxonomy for a fetch run and its mapping to process exit codes.

use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can abort a run.
///
/// None of these are retried. The only recoverable condition, an invalid
/// choice typed at a prompt, never reaches this type.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout on any HTTP call.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the JSON shape we expect.
    #[error("unexpected response from {url}: {reason}")]
    Parse { url: String, reason: String },

    /// The server does not know this version.
    #[error("{project} version {version} does not exist")]
    UnknownVersion { project: String, version: String },

    /// The server does not know this build (or its download).
    #[error("{project} {version} build {build} does not exist")]
    UnknownBuild {
        project: String,
        version: String,
        build: String,
    },

    /// Any other non-success status.
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// Destination file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Console input/output failed, including end of input at a prompt.
    #[error("console error: {0}")]
    Input(#[from] io::Error),
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        FetchError::Transport {
            url: url.to_owned(),
            source,
        }
    }

    pub(crate) fn parse(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Parse {
            url: url.to_owned(),
            reason: reason.into(),
        }
    }

    /// Map error to a process exit code (sysexits.h).
    pub fn exit_code(&self) -> u8 {
        match self {
            FetchError::Transport { .. } => 69, // EX_UNAVAILABLE
            FetchError::Status { .. } => 69,
            FetchError::Parse { .. } => 76, // EX_PROTOCOL
            FetchError::UnknownVersion { .. } | FetchError::UnknownBuild { .. } => 65, // EX_DATAERR
            FetchError::FileIo { .. } | FetchError::Input(_) => 74, // EX_IOERR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero_and_distinct_per_category() {
        let parse = FetchError::parse("http://x", "missing field `versions`");
        let unknown = FetchError::UnknownVersion {
            project: "paper".into(),
            version: "0.0".into(),
        };
        let file = FetchError::FileIo {
            path: PathBuf::from("paper.jar"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let input = FetchError::from(io::Error::from(io::ErrorKind::UnexpectedEof));

        assert_eq!(parse.exit_code(), 76);
        assert_eq!(unknown.exit_code(), 65);
        assert_eq!(file.exit_code(), 74);
        assert_eq!(input.exit_code(), 74);
    }

    #[test]
    fn test_messages_name_the_failing_thing() {
        let err = FetchError::UnknownBuild {
            project: "paper".into(),
            version: "1.20.2".into(),
            build: "999".into(),
        };
        assert_eq!(err.to_string(), "paper 1.20.2 build 999 does not exist");

        let err = FetchError::Status {
            url: "http://x/projects/paper".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(err.to_string().contains("500"));
    }
}
