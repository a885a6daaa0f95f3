//! Command implementations for forge-cli

pub mod agents;
pub mod branch;
pub mod config;
pub mod run;
pub mod search;

pub use agents::run_agents;
pub use branch::run_branch_name;
pub use config::run_config;
pub use run::run_pipeline;
pub use search::run_search;
