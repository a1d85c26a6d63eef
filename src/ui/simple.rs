use iced::{
    widget::{button, column, scrollable, text, text_input, Column},
    Element, Length,
};

use crate::domain::DownloadEntry;

/// Search bar over a flat list; choosing a row opens its link.
pub struct SimpleView {
    pub query: String,
    pub shown: Vec<DownloadEntry>,
    pub status_message: String,
}

impl Default for SimpleView {
    fn default() -> Self {
        Self {
            query: String::new(),
            shown: Vec::new(),
            status_message: "Loading games...".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SimpleMessage {
    QueryChanged(String),
    QuerySubmitted,
    EntryChosen(usize),
}

impl SimpleView {
    pub fn update(&mut self, message: SimpleMessage) {
        match message {
            SimpleMessage::QueryChanged(query) => {
                self.query = query;
            }
            SimpleMessage::QuerySubmitted | SimpleMessage::EntryChosen(_) => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, SimpleMessage> {
        let rows = self.shown.iter().enumerate().map(|(index, entry)| {
            button(text(entry.display_line()))
                .width(Length::Fill)
                .style(button::text)
                .on_press(SimpleMessage::EntryChosen(index))
                .into()
        });

        column![
            text_input("Search for a game...", &self.query)
                .on_input(SimpleMessage::QueryChanged)
                .on_submit(SimpleMessage::QuerySubmitted)
                .padding(5),
            scrollable(Column::with_children(rows).spacing(2)).height(Length::Fill),
            text(&self.status_message).size(14),
        ]
        .padding(10)
        .spacing(10)
        .into()
    }
}
