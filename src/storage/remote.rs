//! Remote object-store backend.
//!
//! Speaks a drive-style HTTP API: `PUT {base}/{key}` uploads a blob,
//! `GET {base}/{key}` downloads it, `HEAD {base}/{key}` probes existence.
//! Requests carry an optional bearer token. There is no public URL for
//! stored blobs, so `url_or_stream` always returns a byte stream.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::storage::{validate_key, ArtifactPayload, ArtifactStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::unavailable(format!("http client init: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn object_url(&self, key: &str) -> Result<String> {
        validate_key(key)?;
        Ok(format!("{}/{key}", self.base_url))
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response> {
        self.authorize(request)
            .send()
            .map_err(|err| Error::unavailable(err.to_string()))
    }
}

impl ArtifactStore for RemoteStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    fn put(&self, key: &str, content: &[u8], content_type: &str) -> Result<()> {
        let url = self.object_url(key)?;
        let response = self.send(
            self.client
                .put(&url)
                .header(CONTENT_TYPE, content_type)
                .body(content.to_vec()),
        )?;
        if !response.status().is_success() {
            return Err(Error::unavailable(format!(
                "PUT {key} returned {}",
                response.status()
            )));
        }
        log::debug!("uploaded artifact key={key} bytes={}", content.len());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let url = self.object_url(key)?;
        let response = self.send(self.client.get(&url))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(key)),
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .map_err(|err| Error::unavailable(err.to_string()))?;
                Ok(bytes.to_vec())
            }
            status => Err(Error::unavailable(format!("GET {key} returned {status}"))),
        }
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let url = self.object_url(key)?;
        let response = self.send(self.client.head(&url))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Error::unavailable(format!("HEAD {key} returned {status}"))),
        }
    }

    fn url_or_stream(&self, key: &str) -> Result<ArtifactPayload> {
        let url = self.object_url(key)?;
        let response = self.send(self.client.get(&url))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(key)),
            status if status.is_success() => Ok(ArtifactPayload::Stream(Box::new(response))),
            status => Err(Error::unavailable(format!("GET {key} returned {status}"))),
        }
    }
}
