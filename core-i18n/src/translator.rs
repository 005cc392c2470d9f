//! # Translator
//!
//! Resolves message keys against locale catalogs with a three-step fallback
//! chain: active locale, default locale, the key itself. The last step keeps
//! compatibility with catalogs where the key doubles as the English text.
//!
//! When a plural count is supplied and the catalog declares a plural family,
//! form-list entries are resolved through [`PluralFamily`]; the first `%1`
//! token in the resolved string is then replaced by the count. The final
//! output is HTML-escaped exactly once.

use crate::error::{I18nError, Result};
use crate::plural::PluralFamily;
use parking_lot::RwLock;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Locale used when the active locale has no entry for a key.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reserved catalog key selecting the plural family.
pub const PLURAL_FORM_KEY: &str = "plural-form";

// ============================================================================
// Catalog Types
// ============================================================================

/// A single catalog entry: either one string or an ordered list of plural
/// forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Single(String),
    Forms(Vec<String>),
}

impl From<&str> for MessageValue {
    fn from(value: &str) -> Self {
        MessageValue::Single(value.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(value: String) -> Self {
        MessageValue::Single(value)
    }
}

impl From<Vec<String>> for MessageValue {
    fn from(value: Vec<String>) -> Self {
        MessageValue::Forms(value)
    }
}

impl<const N: usize> From<[&str; N]> for MessageValue {
    fn from(value: [&str; N]) -> Self {
        MessageValue::Forms(value.iter().map(|s| s.to_string()).collect())
    }
}

/// One locale's message table plus its optional plural family.
///
/// Deserializes from a flat string map where the reserved `plural-form`
/// entry holds the family index:
///
/// ```json
/// {
///   "plural-form": 7,
///   "player.play": "Воспроизвести",
///   "player.skip-seconds": ["%1 секунда", "%1 секунды", "%1 секунд"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTable {
    plural_family: Option<PluralFamily>,
    strings: HashMap<String, MessageValue>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plural family used for form-list entries.
    pub fn with_plural_family(mut self, family: PluralFamily) -> Self {
        self.plural_family = Some(family);
        self
    }

    /// Insert one entry, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MessageValue>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MessageValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.strings.get(key)
    }

    pub fn plural_family(&self) -> Option<PluralFamily> {
        self.plural_family
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl<'de> Deserialize<'de> for LocaleTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = LocaleTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of message keys to strings or string lists")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<LocaleTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = LocaleTable::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == PLURAL_FORM_KEY {
                        let index: u8 = map.next_value()?;
                        let family =
                            PluralFamily::new(index).map_err(serde::de::Error::custom)?;
                        table.plural_family = Some(family);
                    } else {
                        let value: MessageValue = map.next_value()?;
                        table.strings.insert(key, value);
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

// ============================================================================
// Translator
// ============================================================================

/// Thread-safe message translator.
///
/// Hosts install one catalog per language code and switch the active language
/// at runtime; lookups never fail — the fallback chain bottoms out at the key
/// itself.
#[derive(Debug)]
pub struct Translator {
    language: RwLock<String>,
    catalogs: RwLock<HashMap<String, LocaleTable>>,
}

impl Translator {
    /// Create a translator with the default language active and no catalogs
    /// installed.
    pub fn new() -> Self {
        Self {
            language: RwLock::new(DEFAULT_LANGUAGE.to_string()),
            catalogs: RwLock::new(HashMap::new()),
        }
    }

    /// Currently active language code.
    pub fn language(&self) -> String {
        self.language.read().clone()
    }

    /// Switch the active language.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InvalidLanguageCode`] unless the code matches
    /// `xx` or `xx-xx` (case-insensitive).
    pub fn set_language(&self, code: &str) -> Result<()> {
        if !is_valid_language_code(code) {
            return Err(I18nError::InvalidLanguageCode(code.to_string()));
        }
        *self.language.write() = code.to_ascii_lowercase();
        Ok(())
    }

    /// Install (or replace) the catalog for a language code.
    pub fn add_catalog(&self, code: &str, table: LocaleTable) -> Result<()> {
        if !is_valid_language_code(code) {
            return Err(I18nError::InvalidLanguageCode(code.to_string()));
        }
        self.catalogs
            .write()
            .insert(code.to_ascii_lowercase(), table);
        Ok(())
    }

    /// Install a catalog and make its language active in one call.
    pub fn set_locale(&self, code: &str, table: LocaleTable) -> Result<()> {
        self.add_catalog(code, table)?;
        self.set_language(code)
    }

    /// Resolve `key` to a display string.
    ///
    /// Steps: look up in the active catalog (resolving plural forms when
    /// `plural` is given and the catalog declares a family), fall back to the
    /// default catalog, fall back to the key itself; substitute the first
    /// `%1` with the count; HTML-escape the result. An empty key is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InsufficientPluralForms`] when a matched
    /// form-list entry is shorter than its family's rule requires.
    pub fn translate(&self, key: &str, plural: Option<u64>) -> Result<String> {
        if key.is_empty() {
            return Ok(String::new());
        }

        let language = self.language();
        let catalogs = self.catalogs.read();

        let mut resolved = match catalogs.get(&language) {
            Some(table) => lookup(table, key, plural)?,
            None => None,
        };

        if resolved.is_none() && language != DEFAULT_LANGUAGE {
            if let Some(table) = catalogs.get(DEFAULT_LANGUAGE) {
                resolved = lookup(table, key, plural)?;
            }
        }

        if resolved.is_none() {
            debug!(key, %language, "no catalog entry, using key as text");
        }

        let mut text = resolved.unwrap_or_else(|| key.to_string());

        if let Some(count) = plural {
            text = text.replacen("%1", &count.to_string(), 1);
        }

        Ok(escape_html(&text))
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(table: &LocaleTable, key: &str, plural: Option<u64>) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(MessageValue::Single(text)) => Ok(Some(text.clone())),
        Some(MessageValue::Forms(forms)) => match (plural, table.plural_family()) {
            (Some(count), Some(family)) => {
                family.resolve(count, forms).map(|s| Some(s.to_string()))
            }
            // A form list without a count (or without a declared family)
            // resolves to its first entry.
            _ => Ok(forms.first().cloned()),
        },
    }
}

/// `xx` or `xx-xx`, ASCII letters only, case-insensitive.
fn is_valid_language_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    match bytes.len() {
        2 => bytes.iter().all(u8::is_ascii_alphabetic),
        5 => {
            bytes[2] == b'-'
                && bytes[..2].iter().all(u8::is_ascii_alphabetic)
                && bytes[3..].iter().all(u8::is_ascii_alphabetic)
        }
        _ => false,
    }
}

/// Escape `& < > "` for safe interpolation into markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
