/// Full-size image overlay
///
/// Clicking a gallery card opens the lightbox: the full-size image is
/// fetched in the background and shown centered over a dimmed backdrop,
/// with the record's tags as caption. Clicking the backdrop closes it.

use iced::widget::{center, column, container, image, mouse_area, opaque, text};
use iced::{Alignment, Color, Element};

use crate::Message;

/// Widest the lightbox image may grow in logical pixels
const MAX_IMAGE_WIDTH: f32 = 1100.0;

/// What the lightbox is currently doing
#[derive(Debug, Clone, Default)]
pub enum Lightbox {
    /// Nothing open
    #[default]
    Closed,
    /// A card was clicked; the full-size fetch is in flight
    Loading { index: usize },
    /// Showing the full-size image for a card
    Open {
        index: usize,
        full: image::Handle,
    },
}

impl Lightbox {
    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Lightbox::Closed)
    }

    /// Which card the lightbox is showing or loading, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Closed => None,
            Lightbox::Loading { index } | Lightbox::Open { index, .. } => Some(*index),
        }
    }

    /// Whether a fetched image for `index` is the one we are waiting on
    pub fn is_waiting_for(&self, index: usize) -> bool {
        matches!(self, Lightbox::Loading { index: waiting } if *waiting == index)
    }

    /// Render the overlay layer
    ///
    /// `caption` is the tags of the card being viewed. Returns the layer
    /// to stack on top of the main content; callers only invoke this when
    /// the lightbox is open.
    pub fn view(&self, caption: &str) -> Element<'static, Message> {
        let content: Element<Message> = match self {
            Lightbox::Closed => text("").into(),
            Lightbox::Loading { .. } => text("Loading full-size image...").size(18).into(),
            Lightbox::Open { full, .. } => column![
                image(full.clone()).width(MAX_IMAGE_WIDTH),
                text(caption.to_string()).size(15).style(text::secondary),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into(),
        };

        let panel = container(content)
            .padding(16)
            .style(container::rounded_box);

        // Dimmed, click-to-close backdrop behind the panel
        opaque(
            mouse_area(center(opaque(panel)).style(|_theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.8).into()),
                ..container::Style::default()
            }))
            .on_press(Message::LightboxClosed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        let lightbox = Lightbox::default();
        assert!(!lightbox.is_open());
        assert!(!lightbox.is_waiting_for(0));
    }

    #[test]
    fn test_waiting_matches_index_only() {
        let lightbox = Lightbox::Loading { index: 3 };
        assert!(lightbox.is_open());
        assert!(lightbox.is_waiting_for(3));
        assert!(!lightbox.is_waiting_for(2));

        // Once open, nothing is being waited on
        let open = Lightbox::Open {
            index: 3,
            full: image::Handle::from_bytes(vec![0u8; 4]),
        };
        assert!(!open.is_waiting_for(3));
    }

    #[test]
    fn test_close() {
        let mut lightbox = Lightbox::Loading { index: 1 };
        lightbox.close();
        assert!(!lightbox.is_open());
    }
}
