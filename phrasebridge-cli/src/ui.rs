//! Localized terminal strings and status lines

use crate::client::Outcome;

/// Language of the client's own messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    En,
    Es,
}

pub struct UiStrings {
    pub error_server: &'static str,
    pub detected_prefix: &'static str,
    pub translating_to: &'static str,
    pub manual_mode: &'static str,
    pub manual_source_label: &'static str,
    pub manual_target_label: &'static str,
    pub auto_option: &'static str,
}

const EN: UiStrings = UiStrings {
    error_server: "Cannot reach translation server. Make sure it is running.",
    detected_prefix: "Detected:",
    translating_to: "Translating to:",
    manual_mode: "Manual mode",
    manual_source_label: "I speak:",
    manual_target_label: "Translate to:",
    auto_option: "Auto-detect",
};

const ES: UiStrings = UiStrings {
    error_server: "No se puede acceder al servidor de traducción. Asegúrate de que esté en ejecución.",
    detected_prefix: "Detectado:",
    translating_to: "Traduciendo a:",
    manual_mode: "Modo manual",
    manual_source_label: "Hablo:",
    manual_target_label: "Traducir a:",
    auto_option: "Detección automática",
};

impl UiLocale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("en") => Some(UiLocale::En),
            Some("es") => Some(UiLocale::Es),
            _ => None,
        }
    }

    /// Locale from a `LANG`-style value such as `es_ES.UTF-8`; English otherwise
    pub fn from_lang(lang: Option<&str>) -> Self {
        lang.and_then(Self::parse).unwrap_or(UiLocale::En)
    }

    pub fn strings(self) -> &'static UiStrings {
        match self {
            UiLocale::En => &EN,
            UiLocale::Es => &ES,
        }
    }
}

/// A language the user can pick in manual mode
pub struct ManualOption {
    /// Value sent to the server
    pub key: &'static str,
    pub label_en: &'static str,
    pub label_es: &'static str,
}

pub const MANUAL_OPTIONS: [ManualOption; 6] = [
    ManualOption { key: "english", label_en: "English", label_es: "Inglés" },
    ManualOption { key: "spanish", label_en: "Spanish (Español)", label_es: "Español" },
    ManualOption { key: "french", label_en: "French (Français)", label_es: "Francés" },
    ManualOption { key: "hindi", label_en: "Hindi (हिंदी)", label_es: "Hindi" },
    ManualOption { key: "mandarin", label_en: "Mandarin (中文)", label_es: "Mandarín" },
    ManualOption { key: "vietnamese", label_en: "Vietnamese (Tiếng Việt)", label_es: "Vietnamita" },
];

pub fn manual_keys() -> Vec<&'static str> {
    MANUAL_OPTIONS.iter().map(|o| o.key).collect()
}

/// Languages picked on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualSelection {
    pub source: Option<String>,
    pub target: Option<String>,
}

impl ManualSelection {
    /// Manual mode is on when either side was picked; a lone source gets
    /// Spanish as its target
    pub fn from_args(source: Option<String>, target: Option<String>) -> Option<Self> {
        match (source, target) {
            (None, None) => None,
            (Some(source), None) => Some(Self {
                source: Some(source),
                target: Some("spanish".to_string()),
            }),
            (source, target) => Some(Self { source, target }),
        }
    }
}

const FRIENDLY_NAMES: [(&str, &str); 6] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("zh", "Mandarin"),
    ("vi", "Vietnamese"),
];

/// Display name for a code; unknown codes are shown raw, missing ones as `—`
pub fn friendly_name(code: Option<&str>) -> String {
    match code {
        None | Some("") => "—".to_string(),
        Some(code) => FRIENDLY_NAMES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}

fn manual_label(key: Option<&str>, locale: UiLocale) -> String {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return locale.strings().auto_option.to_string();
    };
    match MANUAL_OPTIONS.iter().find(|o| o.key == key) {
        Some(option) if locale == UiLocale::Es => option.label_es.to_string(),
        Some(option) => option.label_en.to_string(),
        None => key.to_string(),
    }
}

pub fn detected_status(
    detected_source: Option<&str>,
    target_used: Option<&str>,
    locale: UiLocale,
) -> String {
    let strings = locale.strings();
    format!(
        "{} {} → {} {}",
        strings.detected_prefix,
        friendly_name(detected_source),
        strings.translating_to,
        friendly_name(target_used)
    )
}

pub fn manual_status(selection: &ManualSelection, locale: UiLocale) -> String {
    let target = match selection.target.as_deref() {
        Some(target) => manual_label(Some(target), locale),
        None => "—".to_string(),
    };
    format!(
        "Manual: {} → {}",
        manual_label(selection.source.as_deref(), locale),
        target
    )
}

/// Header printed once when manual mode is active
pub fn manual_banner(selection: &ManualSelection, locale: UiLocale) -> String {
    let strings = locale.strings();
    format!(
        "{} | {} {} | {} {}",
        strings.manual_mode,
        strings.manual_source_label,
        manual_label(selection.source.as_deref(), locale),
        strings.manual_target_label,
        selection
            .target
            .as_deref()
            .map(|t| manual_label(Some(t), locale))
            .unwrap_or_else(|| "—".to_string())
    )
}

/// Lines to print for a server outcome
pub fn render(outcome: &Outcome, manual: Option<&ManualSelection>, locale: UiLocale) -> Vec<String> {
    match outcome {
        Outcome::Failed(error) => vec![format!("Error: {}", error)],
        Outcome::Translated {
            result,
            detected_source,
            target_used,
        } => {
            let status = match manual {
                Some(selection) => manual_status(selection, locale),
                None => detected_status(detected_source.as_deref(), target_used.as_deref(), locale),
            };
            vec![result.clone(), status]
        }
    }
}
