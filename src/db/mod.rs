pub mod db;
pub mod localdb;
pub mod notificationdb;
pub mod providerdb;
pub mod ticketdb;
pub mod userdb;
