/// Toast notifications
///
/// Fire-and-forget status messages shown in the top-left corner, matching
/// where the browser original put them. Each toast gets an id; a timer
/// task delivers that id back after a few seconds to dismiss it.

use iced::widget::{column, container, text};
use iced::{Element, Length};
use std::time::Duration;

use crate::Message;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Visual flavor of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// One visible notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// The currently visible notifications, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    entries: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Toasts {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Show a new toast; returns its id for the dismiss timer
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Toast { id, kind, message });
        id
    }

    /// Remove a toast whose timer expired
    ///
    /// Ids that already disappeared are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|toast| toast.id != id);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the toast stack, pinned to the top-left
    pub fn view(&self) -> Element<'static, Message> {
        let stack = self
            .entries
            .iter()
            .fold(column![].spacing(8), |col, toast| col.push(toast_view(toast)));

        container(stack)
            .padding(12)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Render one toast
fn toast_view(toast: &Toast) -> Element<'static, Message> {
    let style = match toast.kind {
        ToastKind::Success => text::success,
        ToastKind::Failure => text::danger,
    };

    container(text(toast.message.clone()).size(15).style(style))
        .padding([8.0, 12.0])
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_unique_ids() {
        let mut toasts = Toasts::new();
        let a = toasts.push(ToastKind::Success, "one".to_string());
        let b = toasts.push(ToastKind::Failure, "two".to_string());
        assert_ne!(a, b);
        assert!(!toasts.is_empty());
    }

    #[test]
    fn test_dismiss_removes_only_matching_toast() {
        let mut toasts = Toasts::new();
        let a = toasts.push(ToastKind::Success, "one".to_string());
        let b = toasts.push(ToastKind::Failure, "two".to_string());

        toasts.dismiss(a);
        assert!(!toasts.is_empty());
        toasts.dismiss(b);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let mut toasts = Toasts::new();
        toasts.push(ToastKind::Success, "one".to_string());
        toasts.dismiss(999);
        assert!(!toasts.is_empty());
    }
}
