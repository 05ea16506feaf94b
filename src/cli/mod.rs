pub mod command;
pub mod dispatcher;
pub mod shell;

pub use command::Command;
pub use dispatcher::{Dispatcher, Flow};
