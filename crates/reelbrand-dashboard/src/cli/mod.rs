/*
[INPUT]:  Parsed subcommands from main.rs
[OUTPUT]: One-shot terminal commands (prompts, listings, schema dumps)
[POS]:    CLI layer
[UPDATE]: When adding subcommands
*/

pub mod accounts;
pub mod connect;
pub mod platforms;
