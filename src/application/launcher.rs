use tracing::info;

use crate::domain::{AppError, DownloadEntry};

/// Hands a URI to whatever the platform registered for its scheme.
pub trait Launcher {
    fn open(&self, uri: &str) -> Result<(), AppError>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn open(&self, uri: &str) -> Result<(), AppError> {
        (**self).open(uri)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, uri: &str) -> Result<(), AppError> {
        open::that(uri).map_err(|e| AppError::Launch(e.to_string()))
    }
}

/// Open the entry's magnet link and return it.
pub fn launch_entry(launcher: &impl Launcher, entry: &DownloadEntry) -> Result<String, AppError> {
    let magnet = entry.magnet_link().ok_or(AppError::NoMagnetLink)?;
    info!(title = entry.display_title(), "opening magnet link");
    launcher.open(magnet)?;
    Ok(magnet.to_string())
}
