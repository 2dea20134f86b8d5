mod cli;
mod tui;

pub(crate) use cli::{as_cli, export_file_name, shellexpand};
pub(crate) use tui::as_tui;
