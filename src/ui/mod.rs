pub mod simple;

use iced::{
    widget::{
        button, column, container, image, row, scrollable, text, text_input, Column, Space,
    },
    Element, Length, Theme,
};

use crate::domain::DownloadEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Loading,
    Failed,
    Menu,
    Search,
    Results,
    Cover,
    Surprise,
}

/// What the cover-art panel currently shows.
#[derive(Debug, Clone)]
pub enum Preview {
    Empty,
    NoTitle,
    Loading(String),
    Ready { title: String, handle: image::Handle },
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Main view state
pub struct BrowserView {
    pub page: Page,
    pub previous_page: Page,
    pub status_message: String,
    pub catalog_size: usize,
    pub query: String,
    pub results_heading: String,
    pub results: Vec<DownloadEntry>,
    pub selected: Option<usize>,
    pub preview: Preview,
    pub surprise: Option<DownloadEntry>,
    pub notices: Vec<Notice>,
}

impl Default for BrowserView {
    fn default() -> Self {
        Self {
            page: Page::Loading,
            previous_page: Page::Menu,
            status_message: "Loading games...".to_string(),
            catalog_size: 0,
            query: String::new(),
            results_heading: String::new(),
            results: Vec::new(),
            selected: None,
            preview: Preview::Empty,
            surprise: None,
            notices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum BrowserMessage {
    ShowAllPressed,
    SearchPagePressed,
    SurprisePressed,
    QueryChanged(String),
    SearchSubmitted,
    BackPressed,
    EntrySelected(usize),
    DownloadPressed,
    PreviewPressed,
    CoverClosed,
    SurpriseAnswered(bool),
    NoticeDismissed,
}

impl BrowserView {
    /// Navigation and input handling; anything touching the catalog,
    /// the network or the OS is handled by the app.
    pub fn update(&mut self, message: BrowserMessage) {
        match message {
            BrowserMessage::QueryChanged(query) => {
                self.query = query;
            }
            BrowserMessage::SearchPagePressed => {
                self.page = Page::Search;
            }
            BrowserMessage::BackPressed => {
                self.page = match self.page {
                    Page::Results => self.previous_page,
                    _ => Page::Menu,
                };
            }
            BrowserMessage::EntrySelected(index) => {
                if index < self.results.len() {
                    self.selected = Some(index);
                }
            }
            BrowserMessage::PreviewPressed => {
                if let Preview::Ready { .. } = self.preview {
                    self.page = Page::Cover;
                }
            }
            BrowserMessage::CoverClosed => {
                self.page = Page::Results;
            }
            BrowserMessage::SurpriseAnswered(_) => {
                self.page = Page::Menu;
            }
            BrowserMessage::NoticeDismissed => {
                if !self.notices.is_empty() {
                    self.notices.remove(0);
                }
            }
            BrowserMessage::ShowAllPressed
            | BrowserMessage::SurprisePressed
            | BrowserMessage::SearchSubmitted
            | BrowserMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Switch to the results page; Back returns to `from`.
    pub fn show_results(&mut self, heading: String, results: Vec<DownloadEntry>, from: Page) {
        self.results_heading = heading;
        self.results = results;
        self.selected = None;
        self.preview = Preview::Empty;
        self.previous_page = from;
        self.page = Page::Results;
    }

    pub fn selected_entry(&self) -> Option<&DownloadEntry> {
        self.selected.and_then(|i| self.results.get(i))
    }

    pub fn view(&self) -> Element<'_, BrowserMessage> {
        let page: Element<'_, BrowserMessage> = match self.page {
            Page::Loading | Page::Failed => self.status_page(),
            Page::Menu => self.menu_page(),
            Page::Search => self.search_page(),
            Page::Results => self.results_page(),
            Page::Cover => self.cover_page(),
            Page::Surprise => self.surprise_page(),
        };

        let mut layout = Column::new().padding(20).spacing(10);
        if let Some(notice) = self.notices.first() {
            layout = layout.push(notice_bar(notice));
        }
        layout.push(page).into()
    }

    fn status_page(&self) -> Element<'_, BrowserMessage> {
        container(
            column![text("Feather").size(32), text(&self.status_message).size(16)].spacing(20),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    fn menu_page(&self) -> Element<'_, BrowserMessage> {
        container(
            column![
                text("Welcome to Feather").size(32),
                text(format!("{} games available", self.catalog_size)).size(16),
                Space::new().height(Length::Fixed(20.0)),
                text("Choose an option:").size(16),
                row![
                    button("Show All Games")
                        .on_press(BrowserMessage::ShowAllPressed)
                        .padding([10, 20]),
                    button("Search Games")
                        .on_press(BrowserMessage::SearchPagePressed)
                        .padding([10, 20]),
                    button("Surprise Me!")
                        .on_press(BrowserMessage::SurprisePressed)
                        .padding([10, 20]),
                ]
                .spacing(30),
            ]
            .spacing(10),
        )
        .center_x(Length::Fill)
        .into()
    }

    fn search_page(&self) -> Element<'_, BrowserMessage> {
        column![
            button("Back").on_press(BrowserMessage::BackPressed),
            text("Search for a game:").size(16),
            text_input("Enter game title...", &self.query)
                .on_input(BrowserMessage::QueryChanged)
                .on_submit(BrowserMessage::SearchSubmitted)
                .padding(10),
            button("Search")
                .on_press(BrowserMessage::SearchSubmitted)
                .padding([10, 20]),
        ]
        .spacing(20)
        .into()
    }

    fn results_page(&self) -> Element<'_, BrowserMessage> {
        let items = self.results.iter().enumerate().map(|(index, entry)| {
            let style: fn(&Theme, button::Status) -> button::Style =
                if self.selected == Some(index) {
                    button::primary
                } else {
                    button::text
                };
            button(text(entry.display_line()))
                .width(Length::Fill)
                .style(style)
                .on_press(BrowserMessage::EntrySelected(index))
                .into()
        });

        let list = column![
            button("Back").on_press(BrowserMessage::BackPressed),
            text(&self.results_heading).size(20),
            scrollable(Column::with_children(items).spacing(2)).height(Length::Fill),
            button("Download")
                .on_press_maybe(self.selected.map(|_| BrowserMessage::DownloadPressed))
                .padding([10, 20]),
        ]
        .spacing(20)
        .width(Length::FillPortion(2));

        let preview: Element<'_, BrowserMessage> = match &self.preview {
            Preview::Empty => text("No image selected").into(),
            Preview::NoTitle => text("No game title available").into(),
            Preview::Loading(title) => text(format!("Loading image for: {}", title)).into(),
            Preview::Ready { handle, .. } => button(
                image(handle.clone())
                    .width(Length::Fixed(380.0))
                    .height(Length::Fixed(380.0)),
            )
            .style(button::text)
            .on_press(BrowserMessage::PreviewPressed)
            .into(),
            Preview::Unavailable => text("No Cover Art\nAvailable").into(),
        };

        let cover = column![
            text("Game Cover Art").size(18),
            container(preview)
                .width(Length::Fixed(400.0))
                .height(Length::Fixed(400.0))
                .center_x(Length::Fixed(400.0))
                .center_y(Length::Fixed(400.0)),
        ]
        .spacing(10)
        .width(Length::FillPortion(1));

        row![list, cover].spacing(20).into()
    }

    fn cover_page(&self) -> Element<'_, BrowserMessage> {
        let cover: Element<'_, BrowserMessage> = match &self.preview {
            Preview::Ready { title, handle } => column![
                text(title).size(16),
                image(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill),
            ]
            .spacing(10)
            .into(),
            _ => text("No Cover Art Available").into(),
        };

        column![
            text("Game Cover Art").size(18),
            container(cover).height(Length::Fill),
            button("Close")
                .on_press(BrowserMessage::CoverClosed)
                .padding([5, 10]),
        ]
        .spacing(15)
        .into()
    }

    fn surprise_page(&self) -> Element<'_, BrowserMessage> {
        let title = self
            .surprise
            .as_ref()
            .map(DownloadEntry::display_title)
            .unwrap_or_default();

        container(
            column![
                text("Surprise Game!").size(24),
                text(format!("Would you like to download:\n\n{}?", title)).size(16),
                row![
                    button("Yes")
                        .on_press(BrowserMessage::SurpriseAnswered(true))
                        .padding([10, 20]),
                    button("No")
                        .style(button::secondary)
                        .on_press(BrowserMessage::SurpriseAnswered(false))
                        .padding([10, 20]),
                ]
                .spacing(20),
            ]
            .spacing(20),
        )
        .center_x(Length::Fill)
        .into()
    }
}

fn notice_bar(notice: &Notice) -> Element<'_, BrowserMessage> {
    let label = match notice.level {
        NoticeLevel::Info => "Information",
        NoticeLevel::Warning => "Warning",
        NoticeLevel::Error => "Error",
    };
    let style: fn(&Theme, button::Status) -> button::Style = match notice.level {
        NoticeLevel::Error => button::danger,
        _ => button::secondary,
    };

    row![
        text(format!("{}: {}", label, notice.message))
            .size(14)
            .width(Length::Fill),
        button("OK")
            .style(style)
            .on_press(BrowserMessage::NoticeDismissed),
    ]
    .spacing(10)
    .into()
}
