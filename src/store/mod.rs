pub mod config;
pub mod i18n;
pub mod tasks;

pub use config::ConfigStore;
pub use i18n::{I18nStore, Locale, Strings};
pub use tasks::{TaskPanelState, TaskStore};
