//! Language name resolution
//!
//! Maps free-form language names typed by users ("Spanish", "inglés",
//! "Français", "pt") to lowercase two-letter language codes understood by the
//! translation provider.
//!
//! Resolution is table driven. The [`AliasTable`] is built once at startup from
//! the canonical English language names plus an optional alias file (see
//! [`crate::aliases`]) and is never mutated afterwards, so a single table can be
//! shared by every request through an `Arc`.
//!
//! # Example
//!
//! ```ignore
//! use phrasebridge::resolver::{AliasTable, LanguageResolver};
//! use std::sync::Arc;
//!
//! let resolver = LanguageResolver::new(Arc::new(AliasTable::builtin()));
//! assert_eq!(resolver.resolve("Spanish").unwrap().as_str(), "es");
//! assert_eq!(resolver.resolve_loose("inglés").unwrap().as_str(), "en");
//! assert!(resolver.resolve("klingon").is_none());
//! ```

use icu_normalizer::DecomposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Codes the provider is known to support and that pass through unchanged
pub const SUPPORTED_CODES: [&str; 13] = [
    "en", "es", "fr", "hi", "zh", "vi", "pt", "de", "it", "ar", "ja", "ko", "ru",
];

/// Canonical English language names and their codes
pub const CANONICAL_NAMES: [(&str, &str); 13] = [
    ("english", "en"),
    ("spanish", "es"),
    ("french", "fr"),
    ("hindi", "hi"),
    ("mandarin", "zh"),
    ("vietnamese", "vi"),
    ("portuguese", "pt"),
    ("german", "de"),
    ("italian", "it"),
    ("arabic", "ar"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("russian", "ru"),
];

/// Language words as written in Spanish, after accent stripping
const SPANISH_NAMES: &[(&str, &str)] = &[
    ("ingles", "en"),
    ("ingleses", "en"),
    ("inglese", "en"),
    ("inglesa", "en"),
    ("espanol", "es"),
    ("espanola", "es"),
    ("espanoles", "es"),
    ("castellano", "es"),
    ("frances", "fr"),
    ("francesa", "fr"),
    ("franceses", "fr"),
    ("aleman", "de"),
    ("alemana", "de"),
    ("alemanes", "de"),
    ("italiano", "it"),
    ("italiana", "it"),
    ("italianos", "it"),
    ("portugues", "pt"),
    ("portuguesa", "pt"),
    ("portuguesas", "pt"),
    ("japones", "ja"),
    ("japonesa", "ja"),
    ("japoneses", "ja"),
    ("chino", "zh"),
    ("china", "zh"),
    ("chinos", "zh"),
    ("mandarin", "zh"),
    ("mandarines", "zh"),
    ("ruso", "ru"),
    ("rusa", "ru"),
    ("rusos", "ru"),
    ("arabe", "ar"),
    ("arabes", "ar"),
    ("coreano", "ko"),
    ("coreana", "ko"),
    ("coreanos", "ko"),
    ("vietnamita", "vi"),
    ("vietnamitas", "vi"),
    ("hindi", "hi"),
    ("hindues", "hi"),
];

/// Language words as written in French, after accent stripping
const FRENCH_NAMES: &[(&str, &str)] = &[
    ("anglais", "en"),
    ("anglaise", "en"),
    ("espagnol", "es"),
    ("espagnole", "es"),
    ("francais", "fr"),
    ("francaise", "fr"),
    ("allemand", "de"),
    ("allemande", "de"),
    ("italien", "it"),
    ("italienne", "it"),
    ("portugais", "pt"),
    ("portugaise", "pt"),
    ("japonais", "ja"),
    ("japonaise", "ja"),
    ("chinois", "zh"),
    ("russe", "ru"),
    ("coreen", "ko"),
    ("coreenne", "ko"),
    ("vietnamien", "vi"),
    ("vietnamienne", "vi"),
];

/// A lowercase language identifier such as `"en"` or `"es"`
///
/// Codes coming from the resolver are two letters. Codes reported by the
/// provider's detection endpoint are kept as reported (lowercased), which can
/// include region suffixes like `"zh-cn"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a code, trimming and lowercasing the input
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    pub fn spanish() -> Self {
        Self("es".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this code equals the given (lowercase) code
    pub fn is(&self, code: &str) -> bool {
        self.0 == code
    }

    /// Whether the code is in [`SUPPORTED_CODES`]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_CODES.contains(&self.0.as_str())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from canonical language name to a list of aliases, as stored in the
/// alias file
pub type AliasMap = BTreeMap<String, Vec<String>>;

/// Immutable alias-to-code lookup table
///
/// Keys are lowercase, trimmed alias strings. Built-in canonical names always
/// take precedence over entries from an alias file.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, LanguageCode>,
}

impl AliasTable {
    /// Table containing only the built-in canonical names
    pub fn builtin() -> Self {
        Self::with_aliases(&AliasMap::new())
    }

    /// Build a table from an alias map merged with the canonical names
    ///
    /// Every alias listed under a canonical name maps to that name's code. When
    /// the canonical name is not one of [`CANONICAL_NAMES`], the lowercased
    /// name itself is used as the code.
    ///
    /// # Arguments
    ///
    /// * `map` - Canonical name to aliases, typically loaded from JSON
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut map = AliasMap::new();
    /// map.insert("spanish".into(), vec!["castilian".into()]);
    /// let table = AliasTable::with_aliases(&map);
    /// assert_eq!(table.get("castilian").unwrap().as_str(), "es");
    /// ```
    pub fn with_aliases(map: &AliasMap) -> Self {
        let mut aliases = HashMap::new();

        for (canonical, list) in map {
            let key = canonical.trim().to_lowercase();
            let code = canonical_code(&key)
                .map(LanguageCode::new)
                .unwrap_or_else(|| LanguageCode::new(&key));

            for alias in list {
                aliases.insert(alias.trim().to_lowercase(), code.clone());
            }
            aliases.insert(key, code);
        }

        for (name, code) in CANONICAL_NAMES {
            aliases.insert(name.to_string(), LanguageCode::new(code));
        }

        Self { aliases }
    }

    /// Look up an already normalized (trimmed, lowercase) alias
    pub fn get(&self, alias: &str) -> Option<&LanguageCode> {
        self.aliases.get(alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn canonical_code(name: &str) -> Option<&'static str> {
    CANONICAL_NAMES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, code)| *code)
}

fn passthrough_code(code: &str) -> Option<&'static str> {
    SUPPORTED_CODES.iter().find(|c| **c == code).copied()
}

fn table_lookup(table: &[(&str, &'static str)], word: &str) -> Option<&'static str> {
    table.iter().find(|(w, _)| *w == word).map(|(_, code)| *code)
}

/// Resolves free-form language names to [`LanguageCode`]s
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    aliases: Arc<AliasTable>,
}

impl LanguageResolver {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }

    /// Resolve a language name or code
    ///
    /// Tries, in order: the alias table, the code passthrough table, both
    /// again after stripping every character outside `a-z`, and finally
    /// accepts any stripped value of exactly two letters as a code. The last
    /// step does not check the code against [`SUPPORTED_CODES`].
    ///
    /// # Returns
    ///
    /// * `Some(LanguageCode)` - The resolved code
    /// * `None` - The name is unknown; callers must not assume English
    pub fn resolve(&self, name: &str) -> Option<LanguageCode> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        if let Some(code) = self.lookup(&normalized) {
            return Some(code);
        }

        let stripped: String = normalized
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        if let Some(code) = self.lookup(&stripped) {
            return Some(code);
        }

        if stripped.len() == 2 {
            return Some(LanguageCode(stripped));
        }

        None
    }

    /// Resolve a language name that may be written in Spanish or French
    ///
    /// Falls back from [`resolve`](Self::resolve) to accent-insensitive
    /// matching against Spanish and French language words, e.g. `"inglés"`,
    /// `"Español"` or `"anglais"`. Used for names extracted from questions.
    pub fn resolve_loose(&self, name: &str) -> Option<LanguageCode> {
        if let Some(code) = self.resolve(name) {
            return Some(code);
        }

        let cleaned: String = strip_diacritics(&name.trim().to_lowercase())
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }

        table_lookup(SPANISH_NAMES, cleaned)
            .or_else(|| table_lookup(FRENCH_NAMES, cleaned))
            .map(LanguageCode::new)
            .or_else(|| self.lookup(cleaned))
    }

    fn lookup(&self, key: &str) -> Option<LanguageCode> {
        self.aliases
            .get(key)
            .cloned()
            .or_else(|| passthrough_code(key).map(LanguageCode::new))
    }
}

/// Decompose to NFD and drop combining diacritical marks (U+0300..=U+036F)
pub fn strip_diacritics(text: &str) -> String {
    let decomposed = DecomposingNormalizerBorrowed::new_nfd().normalize(text);
    decomposed
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LanguageResolver {
        LanguageResolver::new(Arc::new(AliasTable::builtin()))
    }

    fn code(c: Option<LanguageCode>) -> Option<String> {
        c.map(|c| c.as_str().to_string())
    }

    // ========== Canonical Names ==========

    #[test]
    fn test_resolve_all_canonical_names() {
        let resolver = resolver();
        for (name, expected) in CANONICAL_NAMES {
            assert_eq!(
                code(resolver.resolve(name)),
                Some(expected.to_string()),
                "canonical name {}",
                name
            );
        }
    }

    #[test]
    fn test_resolve_is_case_and_whitespace_insensitive() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve("  Spanish ")), Some("es".into()));
        assert_eq!(code(resolver.resolve("FRENCH")), Some("fr".into()));
    }

    #[test]
    fn test_resolve_supported_codes_pass_through() {
        let resolver = resolver();
        for c in SUPPORTED_CODES {
            assert_eq!(code(resolver.resolve(c)), Some(c.to_string()));
        }
    }

    #[test]
    fn test_resolve_strips_punctuation() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve("english!")), Some("en".into()));
        assert_eq!(code(resolver.resolve("(german)")), Some("de".into()));
    }

    // ========== Permissive Passthrough ==========

    #[test]
    fn test_resolve_any_two_letters_pass_through() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve("xx")), Some("xx".into()));
        assert_eq!(code(resolver.resolve("QZ")), Some("qz".into()));
        assert_eq!(code(resolver.resolve("n-l")), Some("nl".into()));
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let resolver = resolver();
        assert!(resolver.resolve("klingon").is_none());
        assert!(resolver.resolve("").is_none());
        assert!(resolver.resolve("   ").is_none());
        assert!(resolver.resolve("x").is_none());
        assert!(resolver.resolve("inglés").is_none());
    }

    // ========== Alias Table ==========

    #[test]
    fn test_alias_map_entries_resolve() {
        let mut map = AliasMap::new();
        map.insert(
            "Spanish".to_string(),
            vec!["Castilian".to_string(), " espanol ".to_string()],
        );
        map.insert("mandarin".to_string(), vec!["chinese".to_string()]);
        let resolver = LanguageResolver::new(Arc::new(AliasTable::with_aliases(&map)));

        assert_eq!(code(resolver.resolve("castilian")), Some("es".into()));
        assert_eq!(code(resolver.resolve("Espanol")), Some("es".into()));
        assert_eq!(code(resolver.resolve("Chinese")), Some("zh".into()));
    }

    #[test]
    fn test_alias_map_unknown_canonical_uses_own_name() {
        let mut map = AliasMap::new();
        map.insert("tl".to_string(), vec!["tagalog".to_string()]);
        let table = AliasTable::with_aliases(&map);
        assert_eq!(table.get("tagalog").map(|c| c.as_str()), Some("tl"));
    }

    #[test]
    fn test_builtin_canonical_names_win_over_file() {
        let mut map = AliasMap::new();
        map.insert("french".to_string(), vec!["english".to_string()]);
        let table = AliasTable::with_aliases(&map);
        assert_eq!(table.get("english").map(|c| c.as_str()), Some("en"));
    }

    #[test]
    fn test_builtin_table_size() {
        let table = AliasTable::builtin();
        assert_eq!(table.len(), CANONICAL_NAMES.len());
        assert!(!table.is_empty());
    }

    // ========== Loose Resolution ==========

    #[test]
    fn test_resolve_loose_spanish_names() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve_loose("inglés")), Some("en".into()));
        assert_eq!(code(resolver.resolve_loose("Español")), Some("es".into()));
        assert_eq!(code(resolver.resolve_loose("francés")), Some("fr".into()));
        assert_eq!(code(resolver.resolve_loose("alemán")), Some("de".into()));
        assert_eq!(code(resolver.resolve_loose("chino")), Some("zh".into()));
        assert_eq!(code(resolver.resolve_loose("japonés")), Some("ja".into()));
    }

    #[test]
    fn test_resolve_loose_french_names() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve_loose("anglais")), Some("en".into()));
        assert_eq!(code(resolver.resolve_loose("Français")), Some("fr".into()));
        assert_eq!(code(resolver.resolve_loose("coréen")), Some("ko".into()));
    }

    #[test]
    fn test_resolve_loose_prefers_primary_resolver() {
        let resolver = resolver();
        assert_eq!(code(resolver.resolve_loose("German")), Some("de".into()));
    }

    #[test]
    fn test_resolve_loose_unknown() {
        let resolver = resolver();
        assert!(resolver.resolve_loose("élfico").is_none());
        assert!(resolver.resolve_loose("¿?").is_none());
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("inglés"), "ingles");
        assert_eq!(strip_diacritics("español"), "espanol");
        assert_eq!(strip_diacritics("plain"), "plain");
    }

    // ========== LanguageCode ==========

    #[test]
    fn test_language_code_is_lowercase() {
        let c = LanguageCode::new(" EN ");
        assert_eq!(c.as_str(), "en");
        assert!(c.is("en"));
        assert!(c.is_supported());
        assert!(!LanguageCode::new("xx").is_supported());
    }

    #[test]
    fn test_language_code_serializes_as_string() {
        let json = serde_json::to_string(&LanguageCode::spanish()).unwrap();
        assert_eq!(json, "\"es\"");
    }
}
