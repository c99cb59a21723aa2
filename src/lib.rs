pub mod analysis;
pub mod config;
pub mod data;
pub mod types;

pub use config::Config;
pub use data::{loader::DataLoader, Statement, StatementTable};
pub use types::{CategoryColumn, DisinfoFlag};
