//! Streaming session bootstrap.
//!
//! All of the hard protocol work (handshake, credential exchange, audio key
//! requests) lives in librespot; this module only decides how to obtain
//! credentials and which audio quality the account is entitled to.
//!
//! Credential sources, in order:
//! 1. Reusable credentials cached from an earlier login
//! 2. `SPOTIFY_ACCESS_TOKEN` environment variable
//! 3. Interactive OAuth flow in the browser
//!
//! Whatever source succeeds, librespot stores reusable credentials in the
//! cache so the next run logs in without interaction.

use librespot_core::authentication::Credentials;
use librespot_core::cache::Cache;
use librespot_core::config::SessionConfig;
use librespot_core::session::Session;
use librespot_metadata::audio::AudioFileFormat;

/// Web API scopes requested for the bearer token
const WEB_API_SCOPES: &str =
    "user-read-email,user-read-private,playlist-read-private,user-library-read";

/// Scopes for the interactive OAuth login
const OAUTH_SCOPES: &[&str] = &["streaming"];

/// Loopback address the OAuth flow listens on for the redirect
const OAUTH_REDIRECT_URI: &str = "http://127.0.0.1:8898/login";

/// Name of the cached credentials file inside the cache directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors from session setup and token handling
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Could not determine cache directory for credentials")]
    NoCacheDir,

    #[error("Credentials cache error: {0}")]
    Cache(#[from] std::io::Error),

    #[error("Interactive login failed: {0}")]
    OAuth(#[from] librespot_oauth::OAuthError),

    #[error("Login task failed: {0}")]
    LoginTask(String),

    #[error("{0}")]
    Core(#[from] librespot_core::Error),
}

/// A connected streaming session plus the quality the account gets
pub struct StreamingSession {
    session: Session,
    quality: AudioFileFormat,
}

impl StreamingSession {
    /// Connect using the first credential source that works.
    pub async fn login() -> Result<Self, SessionError> {
        let session_config = SessionConfig::default();
        let cache = open_cache()?;

        let credentials = match cache.credentials() {
            Some(credentials) => {
                tracing::info!("Using cached credentials");
                credentials
            }
            None => match std::env::var("SPOTIFY_ACCESS_TOKEN") {
                Ok(token) if !token.is_empty() => {
                    tracing::info!("Using access token from SPOTIFY_ACCESS_TOKEN");
                    Credentials::with_access_token(token)
                }
                _ => oauth_credentials(&session_config).await?,
            },
        };

        let session = Session::new(session_config, Some(cache));
        // store_credentials=true writes reusable credentials into the cache
        session.connect(credentials, true).await?;

        let premium = session
            .user_data()
            .attributes
            .get("type")
            .is_some_and(|account_type| account_type == "premium");
        let quality = quality_for(premium);

        tracing::info!(
            premium,
            "Connected as {} ({:?})",
            session.username(),
            quality
        );

        Ok(Self { session, quality })
    }

    /// Fetch a Web API bearer token from the session's token provider.
    pub async fn web_api_token(&self) -> Result<String, SessionError> {
        let token = self
            .session
            .token_provider()
            .get_token(WEB_API_SCOPES)
            .await?;
        Ok(token.access_token)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Vorbis quality matching the account tier
    pub fn quality(&self) -> AudioFileFormat {
        self.quality
    }
}

/// Remove cached credentials. Returns whether anything was deleted.
pub fn logout() -> Result<bool, SessionError> {
    let dir = crate::config::cache_dir().ok_or(SessionError::NoCacheDir)?;
    let path = dir.join(CREDENTIALS_FILE);

    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!("Removed cached credentials at {:?}", path);
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Whether a cached credentials file exists (for `check-tools`)
pub fn has_cached_credentials() -> bool {
    crate::config::cache_dir()
        .map(|dir| dir.join(CREDENTIALS_FILE).exists())
        .unwrap_or(false)
}

fn open_cache() -> Result<Cache, SessionError> {
    let dir = crate::config::cache_dir().ok_or(SessionError::NoCacheDir)?;
    std::fs::create_dir_all(&dir)?;
    // Credentials only; no volume or audio file caching for a downloader
    Ok(Cache::new(Some(dir), None, None, None)?)
}

/// Run the browser OAuth flow. The flow blocks on a local redirect
/// listener, so it runs on the blocking pool.
async fn oauth_credentials(config: &SessionConfig) -> Result<Credentials, SessionError> {
    tracing::info!("No stored credentials, starting browser login");

    let client_id = config.client_id.clone();
    let token = tokio::task::spawn_blocking(move || {
        librespot_oauth::get_access_token(&client_id, OAUTH_REDIRECT_URI, OAUTH_SCOPES.to_vec())
    })
    .await
    .map_err(|e| SessionError::LoginTask(e.to_string()))??;

    Ok(Credentials::with_access_token(token.access_token))
}

/// 320 kbps Vorbis for premium accounts, 160 kbps otherwise
fn quality_for(premium: bool) -> AudioFileFormat {
    if premium {
        AudioFileFormat::OGG_VORBIS_320
    } else {
        AudioFileFormat::OGG_VORBIS_160
    }
}
