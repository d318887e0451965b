pub mod auth;
pub mod execute;
pub mod health;
pub mod history;
pub mod settings;
