pub mod localmodel;
pub mod notificationmodel;
pub mod providermodel;
pub mod ticketmodel;
pub mod usermodel;
