pub use cancel::CancelToken;
pub use command::{Command, ProcessResult};
pub use error::{Error, Result};

mod cancel;
pub mod command;
mod error;
