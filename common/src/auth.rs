//! Credenciais do Google
//!
//! O fluxo OAuth, o cache de tokens e a renovação ficam a cargo do
//! `yup-oauth2`; aqui só escolhemos o fluxo a partir das configurações.

use crate::config::{AuthMode, Settings, SHEETS_SCOPE};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{
    InstalledFlowAuthenticator, InstalledFlowReturnMethod, ServiceAccountAuthenticator,
};

/// Fornece um token Bearer válido (renovado quando expira)
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Token fixo (GOOGLE_ACCESS_TOKEN), útil em scripts e testes
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("GOOGLE_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Self(t.trim().to_string()))
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Autenticador do Google (app instalado ou conta de serviço)
pub struct GoogleAuth {
    inner: DefaultAuthenticator,
}

impl GoogleAuth {
    /// Fluxo de app instalado: consentimento na primeira vez, depois renovação silenciosa
    pub async fn installed(secret_json: &str, token_cache: &Path) -> Result<Self> {
        let secret = yup_oauth2::parse_application_secret(secret_json)
            .map_err(|e| Error::Auth(format!("client secret inválido: {}", e)))?;
        if let Some(parent) = token_cache.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let inner = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
            .persist_tokens_to_disk(token_cache)
            .build()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;
        debug!(cache = %token_cache.display(), "installed flow authenticator ready");
        Ok(Self { inner })
    }

    pub async fn service_account(key_path: &Path) -> Result<Self> {
        let key = yup_oauth2::read_service_account_key(key_path)
            .await
            .map_err(|e| Error::Auth(format!("{}: {}", key_path.display(), e)))?;

        let inner = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;
        debug!(key = %key_path.display(), "service account authenticator ready");
        Ok(Self { inner })
    }
}

#[async_trait]
impl CredentialProvider for GoogleAuth {
    async fn access_token(&self) -> Result<String> {
        let token = self
            .inner
            .token(&[SHEETS_SCOPE])
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| Error::Auth("token de acesso ausente".into()))
    }
}

/// Conteúdo do client secret: arquivo configurado ou GOOGLE_CLIENT_SECRET
fn client_secret_json(settings: &Settings) -> Result<String> {
    if let Some(path) = &settings.auth.client_secret_path {
        return std::fs::read_to_string(path)
            .map_err(|e| Error::Auth(format!("{}: {}", path.display(), e)));
    }
    std::env::var("GOOGLE_CLIENT_SECRET")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::Auth("Não encontrei credenciais do Google.".into()))
}

/// Escolhe o provedor de credenciais conforme ambiente e configurações
pub async fn credentials_from_settings(settings: &Settings) -> Result<Box<dyn CredentialProvider>> {
    if let Some(token) = StaticToken::from_env() {
        info!("using GOOGLE_ACCESS_TOKEN");
        return Ok(Box::new(token));
    }

    match settings.auth.mode {
        AuthMode::Installed => {
            let secret = client_secret_json(settings)?;
            let cache = settings.token_cache_path()?;
            Ok(Box::new(GoogleAuth::installed(&secret, &cache).await?))
        }
        AuthMode::ServiceAccount => {
            let key = settings
                .auth
                .service_account_key
                .as_deref()
                .ok_or_else(|| Error::Auth("auth.service_account_key não definido".into()))?;
            Ok(Box::new(GoogleAuth::service_account(key).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_invalid_client_secret() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("token.json");
        let result = GoogleAuth::installed("{ not json", &cache).await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_service_account_missing_key() {
        let settings = Settings {
            auth: crate::config::AuthSettings {
                mode: AuthMode::ServiceAccount,
                ..Default::default()
            },
            ..Default::default()
        };
        if StaticToken::from_env().is_some() {
            return;
        }
        let result = credentials_from_settings(&settings).await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
