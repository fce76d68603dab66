pub mod error;
pub mod lifecycle;
pub mod notification_service;
pub mod ticket_service;
