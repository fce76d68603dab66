pub mod localdtos;
pub mod providerdtos;
pub mod ticketdtos;
pub mod userdtos;
