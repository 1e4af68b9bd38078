pub mod commands;
pub mod dispatch;
pub mod handlers;

pub use commands::{Cli, Commands};
pub use dispatch::{AppContext, CommandTable, Handler};
