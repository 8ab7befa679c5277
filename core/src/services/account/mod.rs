//! Account self-service: profile, credentials, avatar, deletion

mod config;
mod service;
mod storage;
mod types;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
pub use storage::AvatarStorage;
pub use types::AvatarUpload;
