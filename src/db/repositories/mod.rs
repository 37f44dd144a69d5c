pub mod favorite;
pub mod history;
pub mod preference;
pub mod session;
pub mod user;
pub mod watchlist;
