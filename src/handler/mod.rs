pub mod auth;
pub mod locals;
pub mod notifications;
pub mod providers;
pub mod tickets;
pub mod uploads;
pub mod users;
