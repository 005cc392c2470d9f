use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Language codes must look like `xx` or `xx-xx`.
    #[error("Language code must have format `xx` or `xx-xx`: `{0}`")]
    InvalidLanguageCode(String),

    /// Plural family indexes are defined for 0..=20 only.
    #[error("Unknown plural family index: {0}")]
    UnknownPluralFamily(u8),

    /// A plural rule selected a form the catalog entry does not carry.
    #[error("Insufficient plural forms for family {family}: needed {needed}, got {got}")]
    InsufficientPluralForms {
        family: u8,
        needed: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, I18nError>;
