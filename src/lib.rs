//! PhraseBridge: a small translation helper
//!
//! Users type a phrase or a question such as "¿Qué significa 'lo que sea' en
//! inglés?". The service detects the source language, picks a sensible target,
//! recognizes "how do you say X in Y" questions in English, Spanish and French,
//! and translates just the phrase when it can, or the whole text otherwise.
//!
//! - [`resolver`] maps language names to codes
//! - [`aliases`] loads the optional alias file
//! - [`provider`] wraps the external translation API
//! - [`intent`] recognizes translation questions
//! - [`handler`] runs the request pipeline
//!
//! The HTTP server and the terminal client live in the `phrasebridge-web` and
//! `phrasebridge-cli` workspace members.

pub mod aliases;
pub mod handler;
pub mod intent;
pub mod provider;
pub mod resolver;

#[cfg(test)]
mod integration_tests;

pub use aliases::{AliasError, load_alias_table, load_aliases_from_file};
pub use handler::{HandlerError, TranslationRequest, TranslationResponse, TranslationService};
pub use intent::{IntentMatch, IntentParser};
pub use provider::{
    GoogleTranslateProvider, ProviderError, ProviderResult, TranslationProvider,
    TranslationResult,
};
pub use resolver::{AliasMap, AliasTable, LanguageCode, LanguageResolver};
