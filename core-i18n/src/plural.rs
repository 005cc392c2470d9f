//! # Plural Form Resolution
//!
//! Maps a cardinal count to a grammatical plural form for one of 21 language
//! families. Each family encodes the pluralization rule shared by a group of
//! languages; locale tables reference a family by its index through the
//! reserved `plural-form` entry.
//!
//! Resolution is a pure function: `(family, count, forms) -> form`. Forms are
//! numbered from 1, matching how translators author the lists, and every
//! branch is guarded — a rule that selects a form the entry does not carry
//! fails with [`I18nError::InsufficientPluralForms`] instead of silently
//! producing nothing.

use crate::error::{I18nError, Result};
use serde::{Deserialize, Serialize};

/// Index of a pluralization rule family (`0..=20`).
///
/// A sample of the groups covered:
///
/// - `0` — no plural distinction (Chinese, Japanese, Korean, Thai, ...)
/// - `1` — two forms, singular for exactly one (English, German, Spanish, ...)
/// - `2` — two forms, singular for zero and one (French, Filipino, ...)
/// - `7` — three Slavic forms (Russian, Ukrainian, Serbian, ...)
/// - `12` — six Arabic forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PluralFamily(u8);

impl PluralFamily {
    /// Number of defined families.
    pub const COUNT: u8 = 21;

    /// Validate a raw family index.
    pub fn new(index: u8) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(I18nError::UnknownPluralFamily(index))
        }
    }

    /// Raw family index.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Pick the plural form for `count` out of `forms`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::InsufficientPluralForms`] when the rule selects a
    /// form past the end of `forms`.
    pub fn resolve<'a, S: AsRef<str>>(self, count: u64, forms: &'a [S]) -> Result<&'a str> {
        let form = self.form_number(count);
        forms
            .get(form - 1)
            .map(|entry| entry.as_ref())
            .ok_or(I18nError::InsufficientPluralForms {
                family: self.0,
                needed: form,
                got: forms.len(),
            })
    }

    /// 1-based form number selected by this family's rule for `count`.
    pub fn form_number(self, n: u64) -> usize {
        match self.0 {
            // Chinese, Japanese, Korean, Persian, Turkish, Thai, Lao,
            // Indonesian, Georgian, Kazakh, Khmer, Malay, Vietnamese, ...
            0 => 1,

            // Danish, Dutch, English, German, Norwegian, Swedish, Finnish,
            // Hungarian, Greek, Hebrew, Italian, Portuguese, Spanish, Hindi,
            // Swahili, Tamil, Urdu, ...
            1 => {
                if n == 1 {
                    1
                } else {
                    2
                }
            }

            // French, Brazilian Portuguese, Amharic, Breton, Filipino,
            // Lingala, Malagasy, Occitan, Tajik, Uzbek, Walloon, ...
            2 => {
                if n <= 1 {
                    1
                } else {
                    2
                }
            }

            // Latvian
            3 => {
                if n % 10 == 1 && n % 100 != 11 {
                    1
                } else if n != 0 {
                    2
                } else {
                    3
                }
            }

            // Scottish Gaelic
            4 => {
                if n == 1 || n == 11 {
                    1
                } else if n == 2 || n == 12 {
                    2
                } else if n > 2 && n < 20 {
                    3
                } else {
                    4
                }
            }

            // Romanian
            5 => {
                if n == 1 {
                    1
                } else if n == 0 || (n % 100 > 0 && n % 100 < 20) {
                    2
                } else {
                    3
                }
            }

            // Lithuanian
            6 => {
                if n % 10 == 1 && n % 100 != 11 {
                    1
                } else if n % 10 >= 2 && (n % 100 < 10 || n % 100 >= 20) {
                    2
                } else {
                    3
                }
            }

            // Belarusian, Bosnian, Croatian, Serbian, Russian, Ukrainian
            7 => {
                if n % 10 == 1 && n % 100 != 11 {
                    1
                } else if (2..=4).contains(&(n % 10)) && !(10..20).contains(&(n % 100)) {
                    2
                } else {
                    3
                }
            }

            // Slovak, Czech
            8 => {
                if n == 1 {
                    1
                } else if (2..=4).contains(&n) {
                    2
                } else {
                    3
                }
            }

            // Polish
            9 => {
                if n == 1 {
                    1
                } else if (2..=4).contains(&(n % 10)) && !(10..20).contains(&(n % 100)) {
                    2
                } else {
                    3
                }
            }

            // Slovenian; the first listed form is the "everything else" form.
            10 => match n % 100 {
                1 => 2,
                2 => 3,
                3 | 4 => 4,
                _ => 1,
            },

            // Irish Gaelic
            11 => {
                if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if n > 2 && n < 7 {
                    3
                } else if n > 6 && n < 11 {
                    4
                } else {
                    5
                }
            }

            // Arabic
            12 => {
                if n == 0 {
                    1
                } else if n == 1 {
                    2
                } else if n == 2 {
                    3
                } else if (3..=10).contains(&(n % 100)) {
                    4
                } else if n % 100 >= 11 {
                    5
                } else {
                    6
                }
            }

            // Maltese
            13 => {
                if n == 1 {
                    1
                } else if n == 0 || (n % 100 > 1 && n % 100 < 11) {
                    2
                } else if n % 100 > 10 && n % 100 < 20 {
                    3
                } else {
                    4
                }
            }

            // Macedonian
            14 => match n % 10 {
                1 => 1,
                2 => 2,
                _ => 3,
            },

            // Icelandic
            15 => {
                if n != 11 && n % 10 == 1 {
                    1
                } else {
                    2
                }
            }

            // Kashubian
            16 => {
                if n == 1 {
                    1
                } else if (2..=4).contains(&(n % 10)) && !(10..20).contains(&(n % 100)) {
                    2
                } else {
                    3
                }
            }

            // Welsh
            17 => {
                if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if n != 8 && n != 11 {
                    3
                } else {
                    4
                }
            }

            // Javanese
            18 => {
                if n == 0 {
                    1
                } else {
                    2
                }
            }

            // Cornish
            19 => match n {
                1 => 1,
                2 => 2,
                3 => 3,
                _ => 4,
            },

            // Mandinka
            20 => match n {
                0 => 1,
                1 => 2,
                _ => 3,
            },

            // Unreachable through the validated constructor.
            _ => 1,
        }
    }
}

impl TryFrom<u8> for PluralFamily {
    type Error = I18nError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<PluralFamily> for u8 {
    fn from(family: PluralFamily) -> u8 {
        family.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("form{i}")).collect()
    }

    fn form_of(family: u8, count: u64) -> usize {
        PluralFamily::new(family).unwrap().form_number(count)
    }

    #[test]
    fn family_index_is_validated() {
        assert!(PluralFamily::new(0).is_ok());
        assert!(PluralFamily::new(20).is_ok());
        assert_eq!(
            PluralFamily::new(21),
            Err(I18nError::UnknownPluralFamily(21))
        );
    }

    #[test]
    fn family_0_never_distinguishes() {
        for n in [0, 1, 2, 11, 100] {
            assert_eq!(form_of(0, n), 1);
        }
    }

    #[test]
    fn family_1_singular_for_exactly_one() {
        assert_eq!(form_of(1, 1), 1);
        assert_eq!(form_of(1, 0), 2);
        assert_eq!(form_of(1, 30), 2);
    }

    #[test]
    fn family_2_singular_for_zero_and_one() {
        assert_eq!(form_of(2, 0), 1);
        assert_eq!(form_of(2, 1), 1);
        assert_eq!(form_of(2, 2), 2);
    }

    #[test]
    fn family_3_latvian_boundaries() {
        assert_eq!(form_of(3, 1), 1);
        assert_eq!(form_of(3, 21), 1);
        assert_eq!(form_of(3, 11), 2);
        assert_eq!(form_of(3, 5), 2);
        assert_eq!(form_of(3, 0), 3);
    }

    #[test]
    fn family_4_scottish_gaelic_boundaries() {
        assert_eq!(form_of(4, 1), 1);
        assert_eq!(form_of(4, 11), 1);
        assert_eq!(form_of(4, 2), 2);
        assert_eq!(form_of(4, 12), 2);
        assert_eq!(form_of(4, 19), 3);
        assert_eq!(form_of(4, 20), 4);
    }

    #[test]
    fn family_5_romanian_boundaries() {
        assert_eq!(form_of(5, 1), 1);
        assert_eq!(form_of(5, 0), 2);
        assert_eq!(form_of(5, 19), 2);
        assert_eq!(form_of(5, 119), 2);
        assert_eq!(form_of(5, 20), 3);
        assert_eq!(form_of(5, 100), 3);
    }

    #[test]
    fn family_6_lithuanian_follows_the_correct_rule() {
        assert_eq!(form_of(6, 1), 1);
        assert_eq!(form_of(6, 21), 1);
        assert_eq!(form_of(6, 2), 2);
        assert_eq!(form_of(6, 22), 2);
        // The "many" form must be reachable, including teens and zeros.
        assert_eq!(form_of(6, 10), 3);
        assert_eq!(form_of(6, 11), 3);
        assert_eq!(form_of(6, 12), 3);
        assert_eq!(form_of(6, 0), 3);
    }

    #[test]
    fn family_7_slavic_boundaries() {
        assert_eq!(form_of(7, 1), 1);
        assert_eq!(form_of(7, 21), 1);
        assert_eq!(form_of(7, 2), 2);
        assert_eq!(form_of(7, 4), 2);
        assert_eq!(form_of(7, 22), 2);
        assert_eq!(form_of(7, 5), 3);
        assert_eq!(form_of(7, 11), 3);
        assert_eq!(form_of(7, 12), 3);
        assert_eq!(form_of(7, 111), 3);
    }

    #[test]
    fn family_8_czech_slovak_boundaries() {
        assert_eq!(form_of(8, 1), 1);
        assert_eq!(form_of(8, 2), 2);
        assert_eq!(form_of(8, 4), 2);
        assert_eq!(form_of(8, 5), 3);
        assert_eq!(form_of(8, 0), 3);
    }

    #[test]
    fn family_9_polish_boundaries() {
        assert_eq!(form_of(9, 1), 1);
        assert_eq!(form_of(9, 2), 2);
        assert_eq!(form_of(9, 22), 2);
        assert_eq!(form_of(9, 12), 3);
        assert_eq!(form_of(9, 21), 3);
    }

    #[test]
    fn family_10_slovenian_boundaries() {
        assert_eq!(form_of(10, 101), 2);
        assert_eq!(form_of(10, 102), 3);
        assert_eq!(form_of(10, 103), 4);
        assert_eq!(form_of(10, 104), 4);
        assert_eq!(form_of(10, 105), 1);
        assert_eq!(form_of(10, 1), 2);
    }

    #[test]
    fn family_11_irish_boundaries() {
        assert_eq!(form_of(11, 1), 1);
        assert_eq!(form_of(11, 2), 2);
        assert_eq!(form_of(11, 6), 3);
        assert_eq!(form_of(11, 7), 4);
        assert_eq!(form_of(11, 10), 4);
        assert_eq!(form_of(11, 11), 5);
    }

    #[test]
    fn family_12_arabic_boundaries() {
        assert_eq!(form_of(12, 0), 1);
        assert_eq!(form_of(12, 1), 2);
        assert_eq!(form_of(12, 2), 3);
        assert_eq!(form_of(12, 3), 4);
        assert_eq!(form_of(12, 103), 4);
        assert_eq!(form_of(12, 11), 5);
        assert_eq!(form_of(12, 111), 5);
        assert_eq!(form_of(12, 100), 6);
    }

    #[test]
    fn family_13_maltese_boundaries() {
        assert_eq!(form_of(13, 1), 1);
        assert_eq!(form_of(13, 0), 2);
        assert_eq!(form_of(13, 10), 2);
        assert_eq!(form_of(13, 11), 3);
        assert_eq!(form_of(13, 19), 3);
        assert_eq!(form_of(13, 20), 4);
    }

    #[test]
    fn family_14_macedonian_boundaries() {
        assert_eq!(form_of(14, 1), 1);
        assert_eq!(form_of(14, 21), 1);
        assert_eq!(form_of(14, 2), 2);
        assert_eq!(form_of(14, 22), 2);
        assert_eq!(form_of(14, 5), 3);
    }

    #[test]
    fn family_15_icelandic_boundaries() {
        assert_eq!(form_of(15, 1), 1);
        assert_eq!(form_of(15, 21), 1);
        assert_eq!(form_of(15, 11), 2);
        assert_eq!(form_of(15, 2), 2);
    }

    #[test]
    fn family_17_welsh_boundaries() {
        assert_eq!(form_of(17, 1), 1);
        assert_eq!(form_of(17, 2), 2);
        assert_eq!(form_of(17, 3), 3);
        assert_eq!(form_of(17, 8), 4);
        assert_eq!(form_of(17, 11), 4);
    }

    #[test]
    fn families_18_to_20_boundaries() {
        assert_eq!(form_of(18, 0), 1);
        assert_eq!(form_of(18, 1), 2);

        assert_eq!(form_of(19, 1), 1);
        assert_eq!(form_of(19, 2), 2);
        assert_eq!(form_of(19, 3), 3);
        assert_eq!(form_of(19, 4), 4);

        assert_eq!(form_of(20, 0), 1);
        assert_eq!(form_of(20, 1), 2);
        assert_eq!(form_of(20, 2), 3);
    }

    #[test]
    fn resolve_picks_the_selected_form() {
        let family = PluralFamily::new(7).unwrap();
        let list = forms(3);
        assert_eq!(family.resolve(1, &list).unwrap(), "form1");
        assert_eq!(family.resolve(3, &list).unwrap(), "form2");
        assert_eq!(family.resolve(14, &list).unwrap(), "form3");
    }

    #[test]
    fn resolve_guards_short_form_lists() {
        let family = PluralFamily::new(12).unwrap();
        let list = forms(3);
        // Count 3 selects the fourth Arabic form, which is missing here.
        assert_eq!(
            family.resolve(3, &list),
            Err(I18nError::InsufficientPluralForms {
                family: 12,
                needed: 4,
                got: 3,
            })
        );
    }
}
