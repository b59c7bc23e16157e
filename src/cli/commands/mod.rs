pub mod config;
pub mod init;
pub mod monitor;
pub mod show;
