pub mod activity;
pub mod auth;
pub mod client;
pub mod dashboard;
pub mod export;
pub mod script;
