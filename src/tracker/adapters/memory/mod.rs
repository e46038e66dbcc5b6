//! In-memory tracker adapters for tests and embedding hosts.

mod history;
mod items;
mod users;

pub use history::{InMemoryHistory, InMemoryNotifier, SentNotification};
pub use items::InMemoryTrackerStore;
pub use users::InMemoryUserDirectory;
