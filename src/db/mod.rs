mod activity_repo;
mod client_repo;
mod script_repo;
mod user_repo;

pub use activity_repo::ActivityRepository;
pub use client_repo::ClientRepository;
pub use script_repo::ScriptRepository;
pub use user_repo::UserRepository;
