mod command;
mod preview_viewer;
