use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("File already exists: {0}")]
    DuplicateName(String),

    #[error("Unsupported file type: {0} (use .html, .css, .js, .txt or .json)")]
    UnsupportedExtension(String),

    #[error("No such file: {0}")]
    NotFound(String),

    #[error("Can't close the last file")]
    LastFile,

    #[error("Missing {0}; the preview needs index.html, style.css and script.js")]
    MissingConventionalFile(&'static str),

    #[error("Archive generation failed: {0}")]
    ArchiveGeneration(String),

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("Import of {0} is already in progress")]
    ImportPending(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for PlaygroundError {
    fn from(err: zip::result::ZipError) -> Self {
        PlaygroundError::ArchiveGeneration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
