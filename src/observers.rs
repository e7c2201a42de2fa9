use tracing::info;

use crate::{events::CollectorEvent, genre::Genre};

/// Trait for observing accepted collector changes
pub trait CollectorObserver {
    /// Called after a change has been applied
    fn on_change(&self, event: &CollectorEvent);
}

/// Logs every change that occurs in the collector
#[derive(Debug)]
pub struct ChangeLogger;

impl CollectorObserver for ChangeLogger {
    fn on_change(&self, event: &CollectorEvent) {
        info!(title = event.title(), "collector change: {event}");
    }
}

/// Reports books moving on or off the children's shelf
#[derive(Debug)]
pub struct ChildrenShelfNotifier;

impl CollectorObserver for ChildrenShelfNotifier {
    fn on_change(&self, event: &CollectorEvent) {
        let CollectorEvent::GenreAssigned { title, previous, genre } = event else {
            return;
        };
        let was_safe = previous.is_some_and(Genre::is_children_safe);

        match (was_safe, genre.is_children_safe()) {
            (false, true) => info!(%title, %genre, "book is now on the children's shelf"),
            (true, false) => info!(%title, %genre, "book left the children's shelf"),
            _ => {}
        }
    }
}
