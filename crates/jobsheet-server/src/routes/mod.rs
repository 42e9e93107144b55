pub mod admin;
pub mod health;
pub mod pdf;
pub mod submissions;
