pub mod app;
pub mod board;
pub mod fetch;
pub mod logging;
pub mod master_password;
pub mod settings;
pub mod theme;
