/*
[INPUT]:  Gateway, configuration, log buffer and shutdown token from main
[OUTPUT]: Interactive kanban board in the terminal
[POS]:    TUI module root
[UPDATE]: When adding TUI submodules or changing the public entry point
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::run_tui;
