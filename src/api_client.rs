use crate::config::Config;
use crate::error::RequestError;
use crate::retry::RetryPolicy;
use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

/// REST client whose every call goes through the configured [`RetryPolicy`]
pub struct ApiClient {
    client: Client,
    config: Config,
    retry_policy: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.http.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            retry_policy: RetryPolicy::new(config.retry.clone()),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn get_json<U>(&self, path: &str) -> Result<U, RequestError>
    where
        U: DeserializeOwned,
    {
        let url = self.resolve_url(path)?;
        let url = url.as_str();

        self.retry_policy
            .execute(move || async move {
                let response = send(self.request(Method::GET, url), url).await?;
                decode_json(response, url).await
            })
            .await
    }

    pub async fn post_json<T, U>(&self, path: &str, body: &T) -> Result<U, RequestError>
    where
        T: Serialize + ?Sized,
        U: DeserializeOwned,
    {
        let url = self.resolve_url(path)?;
        let url = url.as_str();

        self.retry_policy
            .execute(move || async move {
                let request = self.request(Method::POST, url).json(body);
                let response = send(request, url).await?;
                decode_json(response, url).await
            })
            .await
    }

    pub async fn get_text(&self, path: &str) -> Result<String, RequestError> {
        let url = self.resolve_url(path)?;
        let url = url.as_str();

        self.retry_policy
            .execute(move || async move {
                let response = send(self.request(Method::GET, url), url).await?;
                response.text().await.map_err(|e| transport_error(url, e))
            })
            .await
    }

    /// Absolute URLs pass through; anything else is joined onto `[http] base_url`
    pub fn resolve_url(&self, path: &str) -> Result<String, RequestError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }

        match &self.config.http.base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            None => Err(RequestError::InvalidRequest {
                url: path.to_string(),
                message: "relative path given but no base_url is configured".to_string(),
            }),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.config.http.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, RequestError> {
    debug!("API request: {}", url);
    let response = request.send().await.map_err(|e| transport_error(url, e))?;

    let status = response.status();
    debug!("API response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body
        };
        return Err(RequestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

async fn decode_json<U>(response: Response, url: &str) -> Result<U, RequestError>
where
    U: DeserializeOwned,
{
    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| transport_error(url, e))?;
    serde_json::from_str(&text).map_err(|e| RequestError::Decode {
        url: url.to_string(),
        status,
        message: e.to_string(),
    })
}

fn transport_error(url: &str, err: reqwest::Error) -> RequestError {
    let url = url.to_string();
    if err.is_builder() {
        RequestError::InvalidRequest {
            url,
            message: err.to_string(),
        }
    } else if err.is_connect() || err.is_timeout() || err.is_request() {
        RequestError::Network {
            url,
            message: err.to_string(),
        }
    } else if let Some(status) = err.status() {
        RequestError::HttpStatus {
            url,
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        RequestError::Unknown {
            url,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    fn client_with_base(base_url: Option<&str>) -> ApiClient {
        let config = Config {
            http: HttpConfig {
                base_url: base_url.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        };
        ApiClient::new(config).unwrap()
    }

    #[test]
    fn test_resolve_relative_path() {
        let client = client_with_base(Some("https://api.test/v1/"));
        assert_eq!(
            client.resolve_url("/contracts").unwrap(),
            "https://api.test/v1/contracts"
        );
        assert_eq!(
            client.resolve_url("proposals/7").unwrap(),
            "https://api.test/v1/proposals/7"
        );
    }

    #[test]
    fn test_resolve_absolute_url_passes_through() {
        let client = client_with_base(Some("https://api.test"));
        assert_eq!(
            client.resolve_url("http://other.test/x").unwrap(),
            "http://other.test/x"
        );
    }

    #[test]
    fn test_relative_path_without_base_is_rejected() {
        let client = client_with_base(None);
        let err = client.resolve_url("contracts").unwrap_err();
        assert!(matches!(err, RequestError::InvalidRequest { .. }));
        assert!(!err.is_transient());
    }
}
