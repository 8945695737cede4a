//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, FormArgs};
pub use presentation::{format_form_summary, format_options, format_schema};
pub use route::{DocumentFormat, RunContext};
