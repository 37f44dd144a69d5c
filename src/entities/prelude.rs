pub use super::favorites::Entity as Favorites;
pub use super::preferences::Entity as Preferences;
pub use super::sessions::Entity as Sessions;
pub use super::users::Entity as Users;
pub use super::watched_history::Entity as WatchedHistory;
pub use super::watchlist_entries::Entity as WatchlistEntries;
