//! Session verification delegated to an external session service.
//!
//! The service exposes `POST {base}/verify` taking `{"token": "..."}`.
//! `200` returns the identity JSON, `401`/`404` mean the token is not a live
//! session, and anything else is treated as a fault.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::{collections::HashMap, time::Duration};
use tracing::{Instrument, info_span};
use url::Url;

use super::{models::Identity, repo::TokenVerifier};

const VERIFY_TIMEOUT_SECONDS: u64 = 5;

#[derive(Clone, Debug)]
pub struct RemoteTokenVerifier {
    verify_url: Url,
    client: Client,
}

impl RemoteTokenVerifier {
    /// Build a verifier for the session service at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or not HTTP(S), or the client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let verify_url = format!("{}/verify", base_url.trim_end_matches('/'));
        let verify_url = Url::parse(&verify_url)
            .with_context(|| format!("Invalid session verify URL: {base_url}"))?;
        if !matches!(verify_url.scheme(), "http" | "https") {
            return Err(anyhow!("Session verify URL must use http or https: {base_url}"));
        }

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build session verify HTTP client")?;

        Ok(Self { verify_url, client })
    }

    #[must_use]
    pub fn verify_url(&self) -> &str {
        self.verify_url.as_str()
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Identity>> {
        let span = info_span!(
            "session.verify",
            http.method = "POST",
            url = %self.verify_url
        );
        async {
            let mut body = HashMap::new();
            body.insert("token", token);

            let response = self
                .client
                .post(self.verify_url.clone())
                .json(&body)
                .send()
                .await
                .context("session verify request failed")?;

            match response.status() {
                StatusCode::OK => {
                    let identity = response
                        .json::<Identity>()
                        .await
                        .context("invalid identity payload from session service")?;
                    Ok(Some(identity))
                }
                StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(None),
                status => Err(anyhow!("session verify failed: {status}")),
            }
        }
        .instrument(span)
        .await
    }
}
