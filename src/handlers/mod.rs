pub mod auth;
pub mod clients;
pub mod email;
pub mod exports;
pub mod portal;
pub mod scripts;
pub mod voice;
