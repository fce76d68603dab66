pub mod media;
pub mod password;
pub mod token;
