//! Agents and the remote agent runner
//!
//! An agent here is configuration only: a name, instructions, a model id
//! and a tool list. [`Runner`] implementations hand that configuration and
//! a prompt to a remote model and return its final text.
//!
//! - [`agent`]: [`Agent`] and [`Tool`]
//! - [`crew`]: the four canned roles
//! - [`computer`]: the computer-control surface exposed to models
//! - [`runner`]: [`Runner`] and the OpenAI Responses API implementation

pub mod agent;
pub mod computer;
pub mod crew;
pub mod error;
pub mod runner;

pub use agent::{Agent, Tool};
pub use computer::{Computer, ComputerAction, Environment, Point, TracingComputer};
pub use crew::{Crew, Role, RoleOverride};
pub use error::{AgentError, Result};
pub use runner::{OpenAiRunner, RunResult, Runner, RunnerConfig};
