//! # Internationalization Core
//!
//! Locale-aware message resolution for player UI strings:
//! - key-based lookup with a fallback chain (active locale, default locale,
//!   the key itself),
//! - grammatical plural selection across 21 language families,
//! - numeric token substitution and HTML escaping of the final output.
//!
//! ## Overview
//!
//! This crate holds the only localization logic in the workspace. Translation
//! string tables are data, loaded by hosts into [`LocaleTable`] values; the
//! logic here decides which entry (and which plural form) a given key and
//! count resolve to.

pub mod error;
pub mod plural;
pub mod translator;

pub use error::{I18nError, Result};
pub use plural::PluralFamily;
pub use translator::{escape_html, LocaleTable, MessageValue, Translator, DEFAULT_LANGUAGE};
