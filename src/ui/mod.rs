pub mod console;
pub mod interactive;
pub mod styles;

pub use console::ConsolePresenter;
pub use interactive::{parse_command, Command};
