use std::io::ErrorKind;
use std::path::Path;

use futures::StreamExt;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::{
    api::SourceClient,
    domain::{AppError, DownloadEntry, LoadReport, SourceFailure},
};

/// Trimmed, non-blank lines of a source list.
pub fn parse_source_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_source_list(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|e| AppError::SourceList {
        path: path.display().to_string(),
        reason: match e.kind() {
            ErrorKind::NotFound => "not found".to_string(),
            _ => format!("could not be read ({})", e),
        },
    })?;
    Ok(parse_source_list(&contents))
}

/// Fetch every source in order, one request at a time.
///
/// A failing source is recorded and skipped; entries gathered from the
/// other sources are kept.
pub async fn load_catalog(client: &SourceClient, urls: Vec<String>) -> LoadReport {
    let outcomes: Vec<_> = futures::stream::iter(urls)
        .then(|url| async move {
            let result = client.fetch_downloads(&url).await;
            (url, result)
        })
        .collect()
        .await;

    let mut report = LoadReport::default();
    for (url, result) in outcomes {
        match result {
            Ok(downloads) => {
                info!(%url, count = downloads.len(), "loaded source");
                report
                    .entries
                    .extend(downloads.into_iter().map(DownloadEntry::from));
            }
            Err(e) => {
                warn!(%url, error = %e, "failed to fetch source");
                report.failures.push(SourceFailure {
                    url,
                    reason: e.to_string(),
                });
            }
        }
    }
    report
}

/// Read the source list at `path` and fetch all of it.
pub async fn load_from_file(client: &SourceClient, path: &Path) -> Result<LoadReport, AppError> {
    let urls = read_source_list(path)?;
    info!(sources = urls.len(), path = %path.display(), "loading catalog");
    Ok(load_catalog(client, urls).await)
}

/// Case-insensitive substring match against the clean title.
pub fn filter_entries(entries: &[DownloadEntry], query: &str) -> Vec<DownloadEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.clean_title().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn pick_random(entries: &[DownloadEntry]) -> Option<&DownloadEntry> {
    entries.choose(&mut rand::thread_rng())
}
