//! Terminal glue: rendering and the line-oriented shell

pub mod convert;
pub mod list;
pub mod manage;
pub mod setup;
pub mod shell;
pub mod ui;
