pub mod simple;

use iced::widget::image::Handle;
use iced::{window, Size, Task};
use tracing::{debug, warn};

use crate::api::{CoverArtClient, SourceClient};
use crate::application::{catalog, launch_entry, CoverCache, SystemLauncher};
use crate::config::Settings;
use crate::domain::{AppError, CoverArt, DownloadEntry, LoadReport};
use crate::ui::{BrowserMessage, BrowserView, NoticeLevel, Page, Preview};
use crate::utils::clean_title;

pub struct FeatherApp {
    view: BrowserView,
    entries: Vec<DownloadEntry>,
    cover_client: Option<CoverArtClient>,
    covers: CoverCache<Handle>,
    launcher: SystemLauncher,
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(BrowserMessage),
    CatalogLoaded(Result<LoadReport, AppError>),
    /// (Clean title, lookup result)
    CoverFetched(String, Result<CoverArt, String>),
}

impl FeatherApp {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let cover_client = CoverArtClient::new(&settings.api).unwrap_or_else(|e| {
            warn!(error = %e, "cover art disabled");
            None
        });

        let app = Self {
            view: BrowserView::default(),
            entries: Vec::new(),
            cover_client,
            covers: CoverCache::default(),
            launcher: SystemLauncher,
        };

        let load = Task::perform(
            async move {
                let client =
                    SourceClient::new(&settings.api).map_err(|e| AppError::Api(e.to_string()))?;
                catalog::load_from_file(&client, &settings.sources).await
            },
            Message::CatalogLoaded,
        );

        (app, load)
    }

    fn catalog_loaded(&mut self, result: Result<LoadReport, AppError>) {
        match result {
            Ok(report) => {
                for failure in &report.failures {
                    self.view.notify(NoticeLevel::Warning, failure.describe());
                }
                self.entries = report.entries;
                self.view.catalog_size = self.entries.len();
                self.view.page = Page::Menu;
            }
            Err(e) => {
                self.view.status_message = e.to_string();
                self.view.page = Page::Failed;
                self.view.notify(NoticeLevel::Error, e.to_string());
            }
        }
    }

    fn show_all(&mut self) {
        if self.entries.is_empty() {
            self.view
                .notify(NoticeLevel::Warning, "No games available to display.");
            return;
        }
        self.view.show_results(
            "All Available Games".to_string(),
            self.entries.clone(),
            Page::Menu,
        );
    }

    fn search(&mut self) {
        let query = self.view.query.trim().to_string();
        if query.is_empty() {
            self.view
                .notify(NoticeLevel::Warning, "Please enter a search term.");
            return;
        }

        let results = catalog::filter_entries(&self.entries, &query);
        if results.is_empty() {
            self.view
                .notify(NoticeLevel::Info, "No games found with that search query.");
            return;
        }
        self.view.show_results(
            format!("Search Results for '{}'", query),
            results,
            Page::Search,
        );
    }

    fn surprise(&mut self) {
        let Some(pick) = catalog::pick_random(&self.entries).cloned() else {
            self.view
                .notify(NoticeLevel::Warning, "No games available to select.");
            return;
        };
        if pick.magnet_link().is_none() {
            self.view
                .notify(NoticeLevel::Error, AppError::NoMagnetLink.to_string());
            return;
        }
        self.view.surprise = Some(pick);
        self.view.page = Page::Surprise;
    }

    fn open(&mut self, entry: &DownloadEntry) {
        match launch_entry(&self.launcher, entry) {
            Ok(_) => self.view.notify(
                NoticeLevel::Info,
                format!("Opening magnet link for: {}", entry.display_title()),
            ),
            Err(e) => self.view.notify(NoticeLevel::Error, e.to_string()),
        }
    }

    fn request_cover(&mut self) -> Task<Message> {
        let Some(title) = self
            .view
            .selected_entry()
            .and_then(|entry| entry.title.as_deref())
            .map(|title| clean_title(title).to_string())
        else {
            self.view.preview = Preview::NoTitle;
            return Task::none();
        };

        if let Some(handle) = self.covers.get(&title) {
            debug!(%title, "cover served from cache");
            self.view.preview = Preview::Ready {
                title,
                handle: handle.clone(),
            };
            return Task::none();
        }

        let Some(client) = self.cover_client.clone() else {
            self.view.preview = Preview::Unavailable;
            return Task::none();
        };

        self.view.preview = Preview::Loading(title.clone());
        let lookup = title.clone();
        Task::perform(
            async move { client.fetch_cover(&lookup).await.map_err(|e| e.to_string()) },
            move |result| Message::CoverFetched(title, result),
        )
    }

    fn cover_fetched(&mut self, title: String, result: Result<CoverArt, String>) {
        let waiting = matches!(&self.view.preview, Preview::Loading(t) if *t == title);
        match result {
            Ok(art) => {
                debug!(%title, url = %art.url, width = art.width, height = art.height, "cover loaded");
                let handle = Handle::from_bytes(art.bytes);
                self.covers.insert(title.clone(), handle.clone());
                debug!(cached = self.covers.len(), "cover cache updated");
                if waiting {
                    self.view.preview = Preview::Ready { title, handle };
                }
            }
            Err(e) => {
                warn!(%title, error = %e, "error loading image from SteamGridDB");
                if waiting {
                    self.view.preview = Preview::Unavailable;
                }
            }
        }
    }
}

pub fn update(app: &mut FeatherApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            let surprise = match ui_msg {
                BrowserMessage::SurpriseAnswered(_) => app.view.surprise.take(),
                _ => None,
            };
            app.view.update(ui_msg.clone());

            match ui_msg {
                BrowserMessage::ShowAllPressed => app.show_all(),
                BrowserMessage::SearchSubmitted => app.search(),
                BrowserMessage::SurprisePressed => app.surprise(),
                BrowserMessage::SurpriseAnswered(true) => {
                    if let Some(entry) = surprise {
                        app.open(&entry);
                    }
                }
                BrowserMessage::EntrySelected(_) => return app.request_cover(),
                BrowserMessage::DownloadPressed => match app.view.selected_entry().cloned() {
                    Some(entry) => app.open(&entry),
                    None => app
                        .view
                        .notify(NoticeLevel::Warning, "Please select a game first."),
                },
                _ => {}
            }
        }
        Message::CatalogLoaded(result) => app.catalog_loaded(result),
        Message::CoverFetched(title, result) => app.cover_fetched(title, result),
    }
    Task::none()
}

pub fn view(app: &FeatherApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn run(settings: Settings) -> iced::Result {
    iced::application(move || FeatherApp::new(settings.clone()), update, view)
        .title("Feather")
        .window(window::Settings {
            size: Size::new(1500.0, 900.0),
            ..Default::default()
        })
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::config::Mode;
    use crate::domain::SourceFailure;
    use bytes::Bytes;
    use std::path::PathBuf;

    fn entry(title: &str, uri: Option<&str>) -> DownloadEntry {
        DownloadEntry {
            title: Some(title.to_string()),
            file_size: Some("4 GB".to_string()),
            uris: uri.into_iter().map(str::to_string).collect(),
        }
    }

    fn loaded_app(entries: Vec<DownloadEntry>) -> FeatherApp {
        let settings = Settings {
            mode: Mode::Desktop,
            sources: PathBuf::from("urls.txt"),
            api: ApiConfig::default(),
        };
        let (mut app, _load) = FeatherApp::new(settings);
        let _ = update(
            &mut app,
            Message::CatalogLoaded(Ok(LoadReport {
                entries,
                failures: vec![],
            })),
        );
        app
    }

    fn ui(app: &mut FeatherApp, message: BrowserMessage) {
        let _ = update(app, Message::UiMessage(message));
    }

    #[test]
    fn test_catalog_failures_become_warnings() {
        let (mut app, _load) = FeatherApp::new(Settings {
            mode: Mode::Desktop,
            sources: PathBuf::from("urls.txt"),
            api: ApiConfig::default(),
        });
        let _ = update(
            &mut app,
            Message::CatalogLoaded(Ok(LoadReport {
                entries: vec![entry("Celeste", None)],
                failures: vec![SourceFailure {
                    url: "https://down.example/list.json".to_string(),
                    reason: "Status code: 503".to_string(),
                }],
            })),
        );

        assert_eq!(app.view.page, Page::Menu);
        assert_eq!(app.view.catalog_size, 1);
        assert_eq!(app.view.notices[0].level, NoticeLevel::Warning);
        assert!(app.view.notices[0].message.contains("down.example"));
    }

    #[test]
    fn test_missing_source_list_stops_on_error_page() {
        let (mut app, _load) = FeatherApp::new(Settings {
            mode: Mode::Desktop,
            sources: PathBuf::from("urls.txt"),
            api: ApiConfig::default(),
        });
        let _ = update(
            &mut app,
            Message::CatalogLoaded(Err(AppError::SourceList {
                path: "urls.txt".to_string(),
                reason: "not found".to_string(),
            })),
        );

        assert_eq!(app.view.page, Page::Failed);
        assert!(app.view.status_message.contains("urls.txt"));
    }

    #[test]
    fn test_show_all_on_empty_catalog_warns() {
        let mut app = loaded_app(vec![]);
        ui(&mut app, BrowserMessage::ShowAllPressed);

        assert_eq!(app.view.page, Page::Menu);
        assert_eq!(app.view.notices[0].message, "No games available to display.");
    }

    #[test]
    fn test_search_flow() {
        let mut app = loaded_app(vec![
            entry("Celeste [GOG]", Some("magnet:?c")),
            entry("Hades", Some("magnet:?h")),
        ]);

        ui(&mut app, BrowserMessage::SearchPagePressed);
        ui(&mut app, BrowserMessage::SearchSubmitted);
        assert_eq!(app.view.notices[0].message, "Please enter a search term.");

        ui(&mut app, BrowserMessage::QueryChanged("gog".to_string()));
        ui(&mut app, BrowserMessage::SearchSubmitted);
        assert_eq!(app.view.page, Page::Search);
        assert_eq!(app.view.notices[1].level, NoticeLevel::Info);

        ui(&mut app, BrowserMessage::QueryChanged("CELE".to_string()));
        ui(&mut app, BrowserMessage::SearchSubmitted);
        assert_eq!(app.view.page, Page::Results);
        assert_eq!(app.view.results_heading, "Search Results for 'CELE'");
        assert_eq!(app.view.results.len(), 1);

        ui(&mut app, BrowserMessage::BackPressed);
        assert_eq!(app.view.page, Page::Search);
    }

    #[test]
    fn test_download_without_selection_warns() {
        let mut app = loaded_app(vec![entry("Hades", Some("magnet:?h"))]);
        ui(&mut app, BrowserMessage::ShowAllPressed);
        ui(&mut app, BrowserMessage::DownloadPressed);

        assert_eq!(app.view.notices[0].message, "Please select a game first.");
    }

    #[test]
    fn test_surprise_requires_magnet_link() {
        let mut app = loaded_app(vec![entry("Hades", None)]);
        ui(&mut app, BrowserMessage::SurprisePressed);

        assert_eq!(app.view.page, Page::Menu);
        assert_eq!(app.view.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_surprise_declined() {
        let mut app = loaded_app(vec![entry("Hades", Some("magnet:?h"))]);
        ui(&mut app, BrowserMessage::SurprisePressed);
        assert_eq!(app.view.page, Page::Surprise);

        ui(&mut app, BrowserMessage::SurpriseAnswered(false));
        assert_eq!(app.view.page, Page::Menu);
        assert!(app.view.surprise.is_none());
        assert!(app.view.notices.is_empty());
    }

    #[test]
    fn test_selection_without_api_key_shows_fallback() {
        let mut app = loaded_app(vec![entry("Hades (v1.38)", Some("magnet:?h"))]);
        ui(&mut app, BrowserMessage::ShowAllPressed);
        ui(&mut app, BrowserMessage::EntrySelected(0));

        assert!(matches!(app.view.preview, Preview::Unavailable));
    }

    #[test]
    fn test_fetched_cover_is_cached_by_clean_title() {
        let mut app = loaded_app(vec![entry("Hades (v1.38)", Some("magnet:?h"))]);
        ui(&mut app, BrowserMessage::ShowAllPressed);
        app.view.selected = Some(0);
        app.view.preview = Preview::Loading("Hades".to_string());

        let art = CoverArt {
            title: "Hades".to_string(),
            url: "https://cdn.example/hades.png".to_string(),
            bytes: Bytes::from_static(b"png"),
            width: 600,
            height: 900,
        };
        let _ = update(&mut app, Message::CoverFetched("Hades".to_string(), Ok(art)));

        assert!(matches!(&app.view.preview, Preview::Ready { title, .. } if title == "Hades"));
        assert!(app.covers.get("Hades").is_some());

        // A second selection is served from the cache
        app.view.preview = Preview::Empty;
        ui(&mut app, BrowserMessage::EntrySelected(0));
        assert!(matches!(app.view.preview, Preview::Ready { .. }));
    }

    #[test]
    fn test_failed_cover_lookup_is_not_cached() {
        let mut app = loaded_app(vec![entry("Hades", Some("magnet:?h"))]);
        app.view.preview = Preview::Loading("Hades".to_string());

        let _ = update(
            &mut app,
            Message::CoverFetched("Hades".to_string(), Err("No results".to_string())),
        );

        assert!(matches!(app.view.preview, Preview::Unavailable));
        assert!(app.covers.get("Hades").is_none());
    }
}
