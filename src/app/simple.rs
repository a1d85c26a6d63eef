use iced::{window, Size, Task};

use crate::api::SourceClient;
use crate::application::{catalog, launch_entry, SystemLauncher};
use crate::config::Settings;
use crate::domain::{AppError, DownloadEntry, LoadReport};
use crate::ui::simple::{SimpleMessage, SimpleView};

pub struct SimpleApp {
    view: SimpleView,
    entries: Vec<DownloadEntry>,
    launcher: SystemLauncher,
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(SimpleMessage),
    CatalogLoaded(Result<LoadReport, AppError>),
}

impl SimpleApp {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let app = Self {
            view: SimpleView::default(),
            entries: Vec::new(),
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

    fn summary(&self) -> String {
        format!("{} of {} games", self.view.shown.len(), self.entries.len())
    }
}

pub fn update(app: &mut SimpleApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                SimpleMessage::QuerySubmitted => {
                    app.view.shown = catalog::filter_entries(&app.entries, &app.view.query);
                    app.view.status_message = app.summary();
                }
                SimpleMessage::EntryChosen(index) => {
                    if let Some(entry) = app.view.shown.get(index) {
                        app.view.status_message = match launch_entry(&app.launcher, entry) {
                            Ok(_) => format!("Opening magnet link for: {}", entry.display_title()),
                            Err(e) => e.to_string(),
                        };
                    }
                }
                SimpleMessage::QueryChanged(_) => {}
            }
        }
        Message::CatalogLoaded(result) => match result {
            Ok(report) => {
                app.entries = report.entries;
                app.view.shown = app.entries.clone();
                app.view.status_message = match report.failures.as_slice() {
                    [] => app.summary(),
                    failures => failures
                        .iter()
                        .map(|f| f.describe())
                        .collect::<Vec<_>>()
                        .join("\n"),
                };
            }
            Err(e) => {
                app.view.status_message = e.to_string();
            }
        },
    }
    Task::none()
}

pub fn view(app: &SimpleApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn run(settings: Settings) -> iced::Result {
    iced::application(move || SimpleApp::new(settings.clone()), update, view)
        .title("Feather")
        .window(window::Settings {
            size: Size::new(1500.0, 900.0),
            ..Default::default()
        })
        .run()
}
