mod config;
mod routes;

use config::Config;
use phrasebridge::{
    GoogleTranslateProvider, LanguageResolver, ProviderResult, TranslationProvider,
    TranslationService, load_alias_table,
};
use routes::{AppState, router};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let config = Config::from_env();
    match config.masked_api_key() {
        Some(masked) => info!(masked = %masked, "GOOGLE_API_KEY present"),
        None => warn!("GOOGLE_API_KEY not set; translation requests will fail"),
    }

    let service = build_service(&config)?;
    let state = AppState {
        service: Arc::new(service),
    };

    info!("Starting PhraseBridge web server");

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the shared service from configuration
///
/// A missing API key is not an error here: the service is built without a
/// provider and every translate request answers with a configuration error.
fn build_service(config: &Config) -> ProviderResult<TranslationService> {
    let aliases = Arc::new(load_alias_table(&config.aliases_path));
    let resolver = LanguageResolver::new(aliases);

    let provider = match &config.api_key {
        Some(key) => {
            let provider = match &config.google_base_url {
                Some(url) => GoogleTranslateProvider::with_base_url(key.clone(), url.clone())?,
                None => GoogleTranslateProvider::new(key.clone())?,
            };
            info!(base_url = provider.base_url(), "Using Google Translate provider");
            Some(Arc::new(provider) as Arc<dyn TranslationProvider>)
        }
        None => None,
    };

    let mut service = TranslationService::new(provider, resolver.clone());

    if let Some(raw) = &config.site_main_target {
        match resolver.resolve(raw) {
            Some(code) => {
                info!(target_lang = %code, "Using site default target");
                service = service.with_default_target(code);
            }
            None => warn!(value = raw.as_str(), "Could not map SITE_MAIN_TARGET, using es"),
        }
    }

    Ok(service)
}
