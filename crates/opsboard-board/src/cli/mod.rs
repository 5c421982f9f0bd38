/*
[INPUT]:  CLI subcommand arguments
[OUTPUT]: Non-TUI command handlers
[POS]:    CLI layer module root
[UPDATE]: When adding subcommands
*/

pub mod check;
pub mod init;
