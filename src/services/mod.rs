pub mod analytics;
pub mod catalog;
pub mod lists;
pub mod users;
