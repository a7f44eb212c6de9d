pub mod classify;
pub mod cli;
pub mod host;
pub mod io;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;
pub mod tui;
