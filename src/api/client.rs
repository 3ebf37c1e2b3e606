//! Blocking HTTP implementation of the server interface.
//!
//! Same-origin form posts with the CSRF token sent as both header and body
//! field, plus the `X-Requested-With` marker the server's AJAX views check.

use reqwest::blocking::{Client, Response};
use std::time::Duration;
use tracing::debug;

use super::endpoints::EndpointMap;
use super::error::ApiError;
use super::types::{ProductsPayload, StageUpdate, StatusUpdate};
use super::LeadApi;
use crate::config::Config;
use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;
use crate::models::LeadProduct;

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

const CSRF_HEADER: &str = "X-CSRFToken";
const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// HTTP-backed [`LeadApi`].
pub struct HttpApi {
    http: Client,
    endpoints: EndpointMap,
    csrf_token: Option<String>,
    session_cookie: Option<String>,
}

impl HttpApi {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("funnel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoints: EndpointMap::from_config(config),
            csrf_token: config.csrf_token.clone(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<Response, ApiError> {
        debug!(url, "POST");
        let mut request = self
            .http
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(form);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        if let Some(cookie) = self.cookie_header() {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        Ok(request.send()?)
    }

    fn get(&self, url: &str) -> Result<Response, ApiError> {
        debug!(url, "GET");
        let mut request = self
            .http
            .get(url)
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(cookie) = self.cookie_header() {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        Ok(request.send()?)
    }

    fn cookie_header(&self) -> Option<String> {
        match (&self.session_cookie, &self.csrf_token) {
            (Some(session), Some(token)) => Some(format!("sessionid={session}; csrftoken={token}")),
            (Some(session), None) => Some(format!("sessionid={session}")),
            (None, Some(token)) => Some(format!("csrftoken={token}")),
            (None, None) => None,
        }
    }

    fn base_form(&self) -> Vec<(&'static str, String)> {
        match &self.csrf_token {
            Some(token) => vec![(CSRF_FIELD, token.clone())],
            None => vec![],
        }
    }
}

/// Decode a JSON body of type `T`, mapping parse failures to
/// `MalformedBody` and falling back to `Http` for non-2xx responses whose
/// body is not JSON (e.g. an HTML login redirect).
fn decode_body<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text()?;
    match serde_json::from_str::<T>(&text) {
        Ok(body) => Ok(body),
        Err(parse_err) => {
            if status.is_success() {
                Err(ApiError::MalformedBody(parse_err))
            } else {
                Err(ApiError::Http {
                    status: status.as_u16(),
                })
            }
        }
    }
}

impl LeadApi for HttpApi {
    fn update_stage(
        &self,
        lead_id: u64,
        stage: EnquiryStage,
        number: Option<&str>,
    ) -> Result<StageUpdate, ApiError> {
        let url = self.endpoints.update_stage(lead_id);
        let mut form = self.base_form();
        form.push(("enquiry_stage", stage.wire_name().to_string()));
        if let (Some(kind), Some(number)) = (stage.required_number(), number) {
            form.push((kind.form_field(), number.to_string()));
        }

        let response = self.post_form(&url, &form)?;
        let body: StageUpdate = decode_body(response)?;
        if body.success {
            debug!(lead_id, stage = stage.wire_name(), "stage updated");
            Ok(body)
        } else {
            Err(ApiError::Rejected(
                body.error.unwrap_or_else(|| "Failed to update stage".to_string()),
            ))
        }
    }

    fn update_status(
        &self,
        lead_id: u64,
        status: LeadStatus,
        reason_id: Option<u64>,
    ) -> Result<StatusUpdate, ApiError> {
        let url = self.endpoints.update_status(lead_id);
        let mut form = self.base_form();
        form.push(("status", status.wire_name().to_string()));
        if let Some(reason_id) = reason_id {
            form.push(("reason_id", reason_id.to_string()));
        }

        let response = self.post_form(&url, &form)?;
        let body: StatusUpdate = decode_body(response)?;
        if body.success {
            debug!(lead_id, status = status.wire_name(), "status updated");
            Ok(body)
        } else {
            Err(ApiError::Rejected(
                body.error.unwrap_or_else(|| "Failed to update status".to_string()),
            ))
        }
    }

    fn lead_products(&self, lead_id: u64) -> Result<Vec<LeadProduct>, ApiError> {
        let url = self.endpoints.lead_products(lead_id);
        let response = self.get(&url)?;
        let payload: ProductsPayload = decode_body(response)?;
        Ok(payload.lead_products)
    }
}
