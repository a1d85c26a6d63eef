use bytes::Bytes;

use crate::utils::clean_title;

pub const NO_TITLE: &str = "No Title";
pub const NO_SIZE: &str = "No Size";

/// One record of the aggregated `downloads` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry {
    pub title: Option<String>,
    pub file_size: Option<String>,
    pub uris: Vec<String>,
}

impl DownloadEntry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn display_size(&self) -> &str {
        self.file_size.as_deref().unwrap_or(NO_SIZE)
    }

    /// `"{title} | {fileSize}"` with placeholders for missing fields.
    pub fn display_line(&self) -> String {
        format!("{} | {}", self.display_title(), self.display_size())
    }

    /// Title with bracketed qualifiers stripped; empty when the title is absent.
    pub fn clean_title(&self) -> &str {
        self.title.as_deref().map(clean_title).unwrap_or("")
    }

    /// First URI of the entry; an empty string does not count.
    pub fn magnet_link(&self) -> Option<&str> {
        self.uris
            .first()
            .map(String::as_str)
            .filter(|uri| !uri.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub url: String,
    pub reason: String,
}

impl SourceFailure {
    pub fn describe(&self) -> String {
        format!("Failed to fetch data from {}. {}", self.url, self.reason)
    }
}

/// Result of fetching every configured source.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub entries: Vec<DownloadEntry>,
    pub failures: Vec<SourceFailure>,
}

#[derive(Debug, Clone)]
pub struct CoverArt {
    pub title: String,
    pub url: String,
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
}
