//! pmm-admin CLI wrapper module
//!
//! Command construction, the async process executor, and error types.

pub mod command;
pub mod error;
pub mod executor;

pub use command::PmmCommand;
pub use error::{PmmError, PmmResult, ProcessError};
pub use executor::PmmAdminCli;
