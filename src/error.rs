use std::path::PathBuf;

/// Errors raised while building a collection. None of them are recovered from.
#[derive(thiserror::Error, Debug)]
pub(crate) enum BuildError {
    #[error("{file} is missing its YAML front matter section")]
    MissingFrontMatter { file: String },

    #[error("{file} has invalid front matter: {source}")]
    InvalidFrontMatter {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("front matter of {file} must be a mapping")]
    FrontMatterNotMapping { file: String },

    #[error("malformed date: {value}")]
    MalformedDate { value: String },

    #[error("{file} missing required front matter field: {field}")]
    MissingRequiredField { file: String, field: &'static str },

    #[error("{file:?} missing AUTO markers. Expected to find '<!-- AUTO:START -->' and '<!-- AUTO:END -->'.")]
    MissingMarkers { file: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
