/// Translation provider client
///
/// Thin wrapper around an external translation API. The request handler only
/// sees the [`TranslationProvider`] trait; [`GoogleTranslateProvider`] talks to
/// Google Cloud Translation v2 and [`MockProvider`] answers deterministically
/// for tests.
///
/// No call is ever retried. A failed attempt surfaces as a [`ProviderError`]
/// carrying the HTTP status and raw error body, and the caller decides whether
/// to degrade or fail the request.
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use error::{ProviderError, ProviderResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockDetection, MockMode, MockProvider, ProviderCall};
pub use translator::{TranslationProvider, TranslationResult};
