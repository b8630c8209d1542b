pub mod auth;
pub mod client_service;
pub mod dashboard_service;
pub mod email_service;
pub mod export_service;
pub mod generation_service;
pub mod script_service;
pub mod voice_service;
