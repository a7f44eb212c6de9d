//! Locale string table, embedded at compile time.

use serde::Deserialize;
use tokio::sync::watch;
use tracing::warn;

const EN: &str = include_str!("../../i18n/en.json");
const ZH_CN: &str = include_str!("../../i18n/zh_CN.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    ZhCn,
}

impl Locale {
    /// Map a locale tag like `zh_CN.UTF-8` or `zh-CN` to a bundle.
    pub fn from_tag(tag: &str) -> Locale {
        let tag = tag.to_ascii_lowercase();
        if tag.starts_with("zh") {
            Locale::ZhCn
        } else {
            Locale::En
        }
    }
}

/// All user-visible strings. Field names follow the bundle keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strings {
    pub dock_title: String,
    pub loading: String,
    pub no_tasks: String,
    pub error_prefix: String,
    pub unknown_notebook: String,
    pub unknown_document: String,
    pub today: String,
    pub range_doc: String,
    pub range_notebook: String,
    pub range_workspace: String,
    pub status_all: String,
    pub status_todo: String,
    pub status_done: String,
    pub sort_created: String,
    pub sort_updated: String,
    pub sort_priority: String,
    pub sort_content: String,
    pub priority_urgent: String,
    pub priority_high: String,
    pub priority_normal: String,
    pub priority_wait: String,
    pub auto_refresh_on: String,
    pub auto_refresh_off: String,
    pub help_hint: String,
}

impl Strings {
    pub fn for_locale(locale: Locale) -> Strings {
        let bundle = match locale {
            Locale::En => EN,
            Locale::ZhCn => ZH_CN,
        };
        serde_json::from_str(bundle).unwrap_or_else(|err| {
            // The embedded English bundle is known-good at build time.
            warn!(%err, "malformed locale bundle, falling back to English");
            serde_json::from_str(EN).expect("embedded en bundle is valid")
        })
    }
}

impl Default for Strings {
    fn default() -> Self {
        Strings::for_locale(Locale::En)
    }
}

/// Observable string-table container.
pub struct I18nStore {
    tx: watch::Sender<Strings>,
}

impl I18nStore {
    pub fn new(locale: Locale) -> Self {
        let (tx, _) = watch::channel(Strings::for_locale(locale));
        I18nStore { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Strings> {
        self.tx.subscribe()
    }

    pub fn get(&self) -> Strings {
        self.tx.borrow().clone()
    }

    pub fn set_locale(&self, locale: Locale) {
        self.tx.send_replace(Strings::for_locale(locale));
    }
}
