pub mod cli;
pub mod client;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod utils;
pub mod views;
