//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, CtxCommands, NsCommands};
pub use presentation::{format_failure, format_name_list, format_success};
pub use route::RunContext;
