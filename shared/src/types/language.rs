//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "uk")]
    Ukrainian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Pick the supported language with the highest `q` weight from an
    /// `Accept-Language` header. Unknown tags are skipped; when nothing
    /// matches, Ukrainian is used.
    pub fn from_accept_language(header: &str) -> Self {
        let mut best: Option<(Language, f32)> = None;

        for part in header.split(',') {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next().unwrap_or("").trim().to_lowercase();
            let weight = pieces
                .find_map(|param| param.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or("");
            let Ok(language) = primary.parse::<Language>() else {
                continue;
            };

            if weight <= 0.0 {
                continue;
            }

            match best {
                Some((_, current)) if current >= weight => {}
                _ => best = Some((language, weight)),
            }
        }

        best.map(|(language, _)| language).unwrap_or_default()
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ukrainian => "uk",
            Language::English => "en",
        }
    }

    /// Choose between an English and a Ukrainian text
    pub fn pick<'a>(&self, english: &'a str, ukrainian: &'a str) -> &'a str {
        match self {
            Language::Ukrainian => ukrainian,
            Language::English => english,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uk" | "ukr" | "ukrainian" | "ua" => Ok(Language::Ukrainian),
            "en" | "eng" | "english" => Ok(Language::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
