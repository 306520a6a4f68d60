/// The result card grid
///
/// Holds the ordered list of result cards for the current session and
/// renders them as a wrapping grid. The list is strictly append-only
/// between resets: appending a page never touches cards that are already
/// there, which keeps the scroll position and any open lightbox stable.

use iced::widget::{column, container, image, mouse_area, row, text};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;
use std::ops::Range;

use crate::api::ImageRecord;
use crate::Message;

/// Width of one gallery card in logical pixels
const CARD_WIDTH: f32 = 300.0;

/// Height of the thumbnail area of a card
const THUMB_HEIGHT: f32 = 200.0;

/// Gap between cards in the grid
const CARD_SPACING: f32 = 16.0;

/// One rendered search result
#[derive(Debug, Clone)]
pub struct Card {
    /// The record this card displays, rendered verbatim
    pub record: ImageRecord,
    /// Thumbnail pixels, None until the background fetch lands
    pub thumbnail: Option<image::Handle>,
}

/// Ordered, append-only collection of result cards
#[derive(Debug, Default)]
pub struct Gallery {
    cards: Vec<Card>,
}

impl Gallery {
    pub fn new() -> Self {
        Gallery { cards: Vec::new() }
    }

    /// Clear all displayed cards (start of a new search)
    pub fn reset(&mut self) {
        self.cards.clear();
    }

    /// Append a page of records, preserving input order
    ///
    /// Returns the index range of the newly added cards so the caller can
    /// kick off their thumbnail fetches.
    pub fn append(&mut self, records: Vec<ImageRecord>) -> Range<usize> {
        let start = self.cards.len();
        self.cards.extend(records.into_iter().map(|record| Card {
            record,
            thumbnail: None,
        }));
        start..self.cards.len()
    }

    /// Fill in a thumbnail that finished downloading
    ///
    /// Out-of-range indices are ignored; they can only come from a fetch
    /// that outlived a reset.
    pub fn set_thumbnail(&mut self, index: usize, handle: image::Handle) {
        if let Some(card) = self.cards.get_mut(index) {
            card.thumbnail = Some(handle);
        }
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Render the card grid
    pub fn view(&self) -> Element<Message> {
        let cards = self
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| card_view(index, card))
            .collect();

        Wrap::with_elements(cards)
            .spacing(CARD_SPACING)
            .line_spacing(CARD_SPACING)
            .into()
    }
}

/// Render one card: thumbnail on top, stat strip below
fn card_view(index: usize, card: &Card) -> Element<Message> {
    let thumbnail: Element<Message> = match &card.thumbnail {
        Some(handle) => image(handle.clone())
            .width(CARD_WIDTH)
            .height(THUMB_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("Loading...").size(14))
            .center_x(CARD_WIDTH)
            .center_y(THUMB_HEIGHT)
            .into(),
    };

    let stats = row![
        stat_view("Likes", card.record.likes),
        stat_view("Views", card.record.views),
        stat_view("Comments", card.record.comments),
        stat_view("Downloads", card.record.downloads),
    ]
    .width(CARD_WIDTH)
    .padding(8);

    let content = column![thumbnail, stats].width(CARD_WIDTH);

    mouse_area(container(content).style(container::rounded_box))
        .on_press(Message::LightboxOpened(index))
        .into()
}

/// One labeled counter in the stat strip
fn stat_view(label: &str, value: u64) -> Element<'static, Message> {
    column![
        text(label.to_string()).size(13),
        text(value.to_string()).size(13).style(text::secondary),
    ]
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .spacing(2)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tags: &str) -> ImageRecord {
        ImageRecord {
            thumbnail_url: format!("https://example.com/{tags}_640.jpg"),
            full_url: format!("https://example.com/{tags}_1280.jpg"),
            tags: tags.to_string(),
            likes: 1,
            views: 2,
            comments: 3,
            downloads: 4,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut gallery = Gallery::new();
        let range = gallery.append(vec![record("a"), record("b"), record("c")]);

        assert_eq!(range, 0..3);
        assert_eq!(gallery.card(0).unwrap().record.tags, "a");
        assert_eq!(gallery.card(1).unwrap().record.tags, "b");
        assert_eq!(gallery.card(2).unwrap().record.tags, "c");
    }

    #[test]
    fn test_append_is_append_only() {
        let mut gallery = Gallery::new();
        gallery.append(vec![record("a"), record("b")]);
        let before: Vec<String> = (0..2)
            .map(|i| gallery.card(i).unwrap().record.tags.clone())
            .collect();

        let range = gallery.append(vec![record("c")]);
        assert_eq!(range, 2..3);
        assert_eq!(gallery.len(), 3);

        // Earlier cards are untouched
        for (i, tags) in before.iter().enumerate() {
            assert_eq!(&gallery.card(i).unwrap().record.tags, tags);
        }
    }

    #[test]
    fn test_reset_clears_cards() {
        let mut gallery = Gallery::new();
        gallery.append(vec![record("a")]);
        gallery.reset();

        assert!(gallery.is_empty());
        // The next append starts from index 0 again
        assert_eq!(gallery.append(vec![record("b")]), 0..1);
    }

    #[test]
    fn test_stale_thumbnail_index_ignored() {
        let mut gallery = Gallery::new();
        gallery.append(vec![record("a")]);
        gallery.reset();

        // A thumbnail fetch from before the reset lands late
        gallery.set_thumbnail(0, image::Handle::from_bytes(vec![0u8; 4]));
        assert!(gallery.is_empty());
    }
}
