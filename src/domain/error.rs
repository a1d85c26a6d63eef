use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("File {path} {reason}. Please ensure the file exists.")]
    SourceList { path: String, reason: String },

    #[error("No magnet link found for the selected game.")]
    NoMagnetLink,

    #[error("Failed to open link: {0}")]
    Launch(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("UI error: {0}")]
    Ui(String),
}
