pub mod fridge_analysis;
pub mod health;
pub mod server;
