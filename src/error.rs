use std::path::PathBuf;

/// Fatal errors: the run cannot produce its artifacts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("svg parsing failed: {0}")]
    Svg(String),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a single data point could not be collected.
///
/// Collection never aborts: each of these collapses one value to "no data".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unavailable {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("statistics are still being computed")]
    Pending,

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("value not present: {0}")]
    NotFound(&'static str),
}

impl From<reqwest::Error> for Unavailable {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for Unavailable {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_messages() {
        assert_eq!(
            Unavailable::Status(500).to_string(),
            "unexpected HTTP status 500"
        );
        assert_eq!(
            Unavailable::Pending.to_string(),
            "statistics are still being computed"
        );
        assert_eq!(
            Unavailable::NotFound("contribution count").to_string(),
            "value not present: contribution count"
        );
    }

    #[test]
    fn decode_from_serde_error() {
        let err = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        assert!(matches!(Unavailable::from(err), Unavailable::Decode(_)));
    }

    #[test]
    fn output_dir_error_names_path() {
        let err = Error::OutputDir {
            path: PathBuf::from("/nope/assets"),
            source: std::io::Error::other("denied"),
        };
        assert!(err.to_string().contains("/nope/assets"));
    }
}
