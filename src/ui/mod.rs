/// UI components
///
/// Presentation-only pieces that the main application wires together:
/// - The result card grid (gallery.rs)
/// - The full-size image overlay (lightbox.rs)
/// - Toast notifications (notify.rs)

pub mod gallery;
pub mod lightbox;
pub mod notify;
