//! Design pattern labs: Command (remote control, invoker/client, SQL
//! commands) and Template Method (restaurant orders).

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod records;
pub mod remote;
pub mod sql;
pub mod template;

pub use command::{Client, Command, CommandQueue};
pub use config::LabConfig;
pub use error::{LabError, Result};
