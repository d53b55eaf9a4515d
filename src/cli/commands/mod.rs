pub mod action;
pub mod config;
pub mod init;
pub mod status;
