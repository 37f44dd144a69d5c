pub mod prelude;

pub mod favorites;
pub mod preferences;
pub mod sessions;
pub mod users;
pub mod watched_history;
pub mod watchlist_entries;
