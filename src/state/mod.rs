/// State management module
///
/// This module owns the application state that is not pure presentation:
/// - The search session and its incremental-load state machine (session.rs)

pub mod session;
