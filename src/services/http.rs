use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::DeleteConfirmation;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one JSON request. Implementations only report `ApiError::Network`;
/// status handling is left to [`ApiClient`].
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .client
            .request(request.method, request.url.as_str())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// JSON client bound to the backend base URL. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn HttpTransport>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').into(),
            transport,
        }
    }

    pub fn with_reqwest(base_url: &str) -> Self {
        Self::new(base_url, Rc::new(ReqwestTransport::new()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<String, ApiError> {
        let request = HttpRequest { method: method.clone(), url: self.url(path), body };
        tracing::debug!(%method, url = %request.url, "api request");

        let resp = self.transport.execute(request).await?;
        if !resp.is_success() {
            tracing::debug!(%method, path, status = resp.status, "api request rejected");
            return Err(ApiError::Status { status: resp.status, body: resp.body });
        }
        Ok(resp.body)
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.call(Method::GET, path, None).await?;
        Self::decode(&body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.call(Method::POST, path, Some(Self::encode(body)?)).await?;
        Self::decode(&body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.call(Method::PATCH, path, Some(Self::encode(body)?)).await?;
        Self::decode(&body)
    }

    /// Deletes are confirmed by status; any JSON `message` in the body is passed along.
    pub async fn delete(&self, path: &str) -> Result<DeleteConfirmation, ApiError> {
        let body = self.call(Method::DELETE, path, None).await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}
