// Environment driven configuration

pub mod agent;
pub mod app;
pub mod database;

pub use agent::AgentConfig;
pub use app::{AppConfig, StorageBackend};
pub use database::{run_migrations, DatabaseConfig};
