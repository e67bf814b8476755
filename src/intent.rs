//! Intent parsing for "how do you say X in Y" style questions
//!
//! The parser holds a fixed, ordered table of patterns in English, Spanish and
//! French. Each pattern captures the phrase to translate and, for most
//! patterns, the name of the language to translate into. The first pattern
//! that matches wins; there is no scoring.
//!
//! # Example
//!
//! ```ignore
//! use phrasebridge::intent::IntentParser;
//!
//! let parser = IntentParser::new();
//! let m = parser.parse("How do you say hello in French?").unwrap();
//! assert_eq!(m.phrase, "hello");
//! assert_eq!(m.target_language_name.as_deref(), Some("French"));
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Letters allowed in an English/French-prompted language name
const LATIN_NAME: &str = r"[a-z\x{00C0}-\x{024F}\s]+";
/// Letters allowed in a Spanish-prompted language name
const SPANISH_NAME: &str = r"[a-záéíóúüñ\s]+";
/// Letters allowed in a French-prompted language name
const FRENCH_NAME: &str = r"[a-zàâäéèêëîïôöùûüœæç\s]+";

/// Characters stripped from an extracted phrase
const QUOTE_CHARS: &[char] = &['"', '\'', '«', '»', '“', '”', '‹', '›'];

/// One entry of the pattern table
///
/// Group 1 is always the phrase. Group 2, when the pattern has one, is the
/// target language name.
#[derive(Debug)]
pub struct IntentPattern {
    /// Language the question is written in ("en", "es", "fr")
    pub language: &'static str,
    pub regex: Regex,
}

/// A phrase and target language extracted from a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    /// Phrase to translate, trimmed and without quote characters
    pub phrase: String,
    /// Free-form language name, still to be resolved
    pub target_language_name: Option<String>,
    /// Language of the pattern that matched
    pub pattern_language: &'static str,
}

static PATTERNS: OnceLock<Vec<IntentPattern>> = OnceLock::new();

fn pattern_sources() -> Vec<(&'static str, String)> {
    vec![
        // English
        (
            "en",
            format!(r"how\s+(?:do\s+i|do\s+you)\s+say\s+(.+?)\s+in\s+({LATIN_NAME})"),
        ),
        ("en", format!(r"how\s+to\s+say\s+(.+?)\s+in\s+({LATIN_NAME})")),
        ("en", format!(r"what\s+is\s+(.+?)\s+in\s+({LATIN_NAME})")),
        (
            "en",
            format!(r"(?:can\s+you\s+)?translate\s+(.+?)\s+(?:to|into)\s+({LATIN_NAME})"),
        ),
        (
            "en",
            format!(r"how\s+would\s+i\s+say\s+(.+?)\s+in\s+({LATIN_NAME})"),
        ),
        // Spanish: ¿Cómo se dice X en Y?
        (
            "es",
            format!(r"¿?\s*c[óo]mo\s+se\s+dice\s+(.+?)\s+en\s+({SPANISH_NAME})\s*\??"),
        ),
        (
            "es",
            format!(r"¿?\s*qu[ée]\s+significa\s+(.+?)\s+en\s+({SPANISH_NAME})\s*\??"),
        ),
        (
            "es",
            format!(r"¿?\s*qu[ée]\s+quiere\s+decir\s+(.+?)\s+en\s+({SPANISH_NAME})\s*\??"),
        ),
        (
            "es",
            r"¿?\s*qu[ée]\s+quiere\s+decir\s+(.+?)\s*\??\s*$".to_string(),
        ),
        // French: Comment dit-on X en Y ?
        (
            "fr",
            format!(r"comment\s+(?:dit[\s-]+on|on\s+dit)\s+(.+?)\s+en\s+({FRENCH_NAME})"),
        ),
        (
            "fr",
            format!(r"qu['’]est[\s-]+ce\s+que\s+c['’]est\s+(.+?)\s+en\s+({FRENCH_NAME})"),
        ),
    ]
}

/// The compiled, ordered pattern table
pub fn patterns() -> &'static [IntentPattern] {
    PATTERNS.get_or_init(|| {
        pattern_sources()
            .into_iter()
            .map(|(language, source)| IntentPattern {
                language,
                regex: Regex::new(&format!("(?i){}", source))
                    .expect("intent patterns are valid regular expressions"),
            })
            .collect()
    })
}

/// Ordered regex cascade over the pattern table
#[derive(Debug, Clone, Copy)]
pub struct IntentParser {
    patterns: &'static [IntentPattern],
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentParser {
    pub fn new() -> Self {
        Self {
            patterns: patterns(),
        }
    }

    /// Run the table against `text`, returning the first match
    pub fn parse(&self, text: &str) -> Option<IntentMatch> {
        self.patterns.iter().find_map(|pattern| {
            let caps = pattern.regex.captures(text)?;
            let phrase = caps.get(1).map(|m| clean_phrase(m.as_str()))?;
            let target_language_name = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string);

            Some(IntentMatch {
                phrase,
                target_language_name,
                pattern_language: pattern.language,
            })
        })
    }

    /// Parse `primary` (the English working copy) and, if nothing matches,
    /// `fallback` (the original text)
    pub fn parse_with_fallback(&self, primary: &str, fallback: &str) -> Option<IntentMatch> {
        self.parse(primary).or_else(|| {
            if primary == fallback {
                None
            } else {
                self.parse(fallback)
            }
        })
    }
}

fn clean_phrase(raw: &str) -> String {
    raw.trim().replace(QUOTE_CHARS, "")
}
