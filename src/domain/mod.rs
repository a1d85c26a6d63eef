pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{CoverArt, DownloadEntry, LoadReport, SourceFailure};
