pub mod cli;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod store;
pub mod view;
