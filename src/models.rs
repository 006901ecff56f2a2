pub mod types;
pub mod user;
pub mod username;
