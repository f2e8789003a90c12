// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `ScheduleApi` over HTTP with `reqwest`.

use crate::error::ApiError;
use crate::request_response::{
    ErrorResponse, GenerateExcelRequest, GenerateExcelResponse, SaveScheduleRequest,
    ScheduleQuery, StatusResponse, UploadPatternResponse,
};
use crate::{ScheduleApi, check_pattern_upload_name};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use shiftboard_domain::{Engineer, Pattern, Period, Schedule};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// A raw response: status plus the full body.
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// HTTP implementation of [`ScheduleApi`].
///
/// Requests are not retried. A timeout applies only when configured.
#[derive(Debug, Clone)]
pub struct HttpScheduleApi {
    client: Client,
    base: Url,
}

impl HttpScheduleApi {
    /// Creates a client for a backend.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root, e.g. `http://127.0.0.1:8000/api/`; a
    ///   missing trailing slash is added
    /// * `timeout` - Optional per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot carry paths,
    /// or if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let normalized: String = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base: Url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid(String::from("URL cannot carry a path")));
        }

        let mut builder: reqwest::ClientBuilder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client: Client = builder.build().map_err(|e| invalid(e.to_string()))?;

        Ok(Self { client, base })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url: Url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: String::from("URL cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(endpoint: &str, request: RequestBuilder) -> Result<RawResponse, ApiError> {
        let transport = |source: reqwest::Error| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response: Response = request.send().await.map_err(transport)?;
        let status: StatusCode = response.status();
        let body: Vec<u8> = response.bytes().await.map_err(transport)?.to_vec();
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(RawResponse { status, body })
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let request: RequestBuilder = self.client.post(self.url(&[endpoint])?).json(body);
        decode(endpoint, &Self::send(endpoint, request).await?)
    }
}

fn status_error(endpoint: &str, raw: &RawResponse) -> ApiError {
    let message: String = serde_json::from_slice::<ErrorResponse>(&raw.body).map_or_else(
        |_| {
            raw.status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        },
        |e| e.error,
    );
    warn!(endpoint, status = raw.status.as_u16(), %message, "Request failed");
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: raw.status.as_u16(),
        message,
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, raw: &RawResponse) -> Result<T, ApiError> {
    if !raw.status.is_success() {
        return Err(status_error(endpoint, raw));
    }
    serde_json::from_slice(&raw.body).map_err(|e| ApiError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn ensure_success(endpoint: &str, status: &str, error: Option<String>) -> Result<(), ApiError> {
    if status == crate::request_response::STATUS_SUCCESS {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            endpoint: endpoint.to_string(),
            message: error.unwrap_or_else(|| format!("status '{status}'")),
        })
    }
}

impl ScheduleApi for HttpScheduleApi {
    async fn list_engineers(&self) -> Result<Vec<Engineer>, ApiError> {
        let request: RequestBuilder = self.client.get(self.url(&["engineers"])?);
        let engineers: Vec<Engineer> = decode("engineers", &Self::send("engineers", request).await?)?;
        debug!(count = engineers.len(), "Loaded engineers");
        Ok(engineers)
    }

    async fn upsert_engineer(&self, engineer: &Engineer) -> Result<(), ApiError> {
        let response: StatusResponse = self.post_json("engineers", engineer).await?;
        ensure_success("engineers", &response.status, response.error)?;
        info!(engineer = %engineer.name, "Saved engineer");
        Ok(())
    }

    async fn delete_engineer(&self, name: &str) -> Result<(), ApiError> {
        let request: RequestBuilder = self.client.delete(self.url(&["engineers", name])?);
        let response: StatusResponse =
            decode("engineers", &Self::send("engineers", request).await?)?;
        ensure_success("engineers", &response.status, response.error)?;
        info!(engineer = name, "Deleted engineer");
        Ok(())
    }

    async fn load_schedule(&self, period: Period) -> Result<Schedule, ApiError> {
        let request: RequestBuilder = self
            .client
            .get(self.url(&["schedule"])?)
            .query(&ScheduleQuery::from(period));
        let schedule: Schedule = decode("schedule", &Self::send("schedule", request).await?)?;
        debug!(%period, assignments = schedule.assignment_count(), "Loaded schedule");
        Ok(schedule)
    }

    async fn save_schedule(&self, period: Period, schedule: &Schedule) -> Result<(), ApiError> {
        let body: SaveScheduleRequest = SaveScheduleRequest {
            year: period.year(),
            month: period.month(),
            workplaces: schedule.clone(),
        };
        let response: StatusResponse = self.post_json("schedule", &body).await?;
        ensure_success("schedule", &response.status, response.error)?;
        info!(%period, assignments = schedule.assignment_count(), "Saved schedule");
        Ok(())
    }

    async fn generate_excel(&self, period: Period) -> Result<Vec<String>, ApiError> {
        const ENDPOINT: &str = "generate_excel";
        let request: RequestBuilder = self
            .client
            .post(self.url(&[ENDPOINT])?)
            .json(&GenerateExcelRequest::from(period));
        let raw: RawResponse = Self::send(ENDPOINT, request).await?;
        if raw.status == StatusCode::NOT_FOUND {
            return Err(ApiError::NoScheduleData);
        }
        let response: GenerateExcelResponse = decode(ENDPOINT, &raw)?;
        ensure_success(ENDPOINT, &response.status, None)?;
        info!(%period, files = response.files.len(), "Generated spreadsheets");
        Ok(response.files)
    }

    async fn download(&self, file: &str) -> Result<Vec<u8>, ApiError> {
        const ENDPOINT: &str = "download";
        let request: RequestBuilder = self.client.get(self.url(&[ENDPOINT, file])?);
        let raw: RawResponse = Self::send(ENDPOINT, request).await?;
        if raw.status == StatusCode::NOT_FOUND {
            return Err(ApiError::FileNotFound(file.to_string()));
        }
        if !raw.status.is_success() {
            return Err(status_error(ENDPOINT, &raw));
        }
        Ok(raw.body)
    }

    async fn upload_pattern(&self, file_name: &str, contents: Vec<u8>) -> Result<Pattern, ApiError> {
        const ENDPOINT: &str = "pattern/upload";
        check_pattern_upload_name(file_name)?;

        let part: Part = Part::bytes(contents).file_name(file_name.to_string());
        let request: RequestBuilder = self
            .client
            .post(self.url(&["pattern", "upload"])?)
            .multipart(Form::new().part("file", part));
        let response: UploadPatternResponse = decode(ENDPOINT, &Self::send(ENDPOINT, request).await?)?;
        ensure_success(ENDPOINT, &response.status, None)?;
        info!(file = file_name, days = response.pattern.day_count(), "Uploaded pattern");
        Ok(response.pattern)
    }
}
