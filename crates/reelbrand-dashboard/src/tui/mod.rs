/*
[INPUT]:  Dashboard config, platform schemas, log buffer
[OUTPUT]: Terminal dashboard with accounts, onboarding, guide, and logs tabs
[POS]:    TUI module root
[UPDATE]: When adding TUI submodules or exports
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub(crate) use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui,
};
