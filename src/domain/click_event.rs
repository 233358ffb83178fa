//! Click event model for asynchronous click counting.

/// A successful redirect lookup waiting to be counted.
///
/// Sent from [`crate::application::services::LinkService::resolve`] to the
/// background worker through a bounded channel so the redirect never waits
/// on the counter write.
///
/// # Usage Flow
///
/// 1. Created after a short code resolves to a link
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub short_code: String,
}

impl ClickEvent {
    /// Creates a new click event for `short_code`.
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}
