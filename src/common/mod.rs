pub mod command_utils;

pub use command_utils::{CommandRunner, CommandSpec, SystemCommandRunner, log_multiline};
