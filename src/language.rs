use std::fmt;

use serde::{Deserialize, Serialize};

/// Client languages the reference tables carry names for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Ja,
    Zh,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::De,
        Language::Fr,
        Language::Ja,
        Language::Zh,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Ja => "ja",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Display names keyed by language, stored flat as `name_en`, `name_de`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNames {
    #[serde(rename = "name_en")]
    pub en: String,
    #[serde(rename = "name_de", default)]
    pub de: String,
    #[serde(rename = "name_fr", default)]
    pub fr: String,
    #[serde(rename = "name_ja", default)]
    pub ja: String,
    #[serde(rename = "name_zh", default)]
    pub zh: String,
}

impl LocalizedNames {
    pub fn english(name: impl Into<String>) -> Self {
        Self {
            en: name.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::De => &self.de,
            Language::Fr => &self.fr,
            Language::Ja => &self.ja,
            Language::Zh => &self.zh,
        }
    }

    /// Name in `language`, or the English name when that one is blank.
    pub fn get_or_english(&self, language: Language) -> &str {
        match self.get(language) {
            "" => self.en.as_str(),
            name => name,
        }
    }
}
