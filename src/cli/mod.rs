mod commands;

pub use commands::{Cli, Command, OutputFormat, ShowFormat};
