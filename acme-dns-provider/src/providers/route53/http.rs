//! Route53 HTTP request methods

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{self, HttpResponse};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::sign::SignableRequest;
use super::types::{ErrorResponse, InvalidChangeBatch};
use super::{ROUTE53_HOST, Route53Provider};

const XML_CONTENT_TYPE: &str = "application/xml";

impl Route53Provider {
    // ==================== Helpers ====================

    /// Pass a 2xx response through, map anything else to a `ProviderError`
    fn check_response(&self, response: HttpResponse, ctx: &ErrorContext) -> Result<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }

        let raw = if let Ok(error) = quick_xml::de::from_str::<ErrorResponse>(&response.body) {
            RawApiError::with_code(error.error.code, error.error.message.unwrap_or_default())
        } else if let Ok(batch) = quick_xml::de::from_str::<InvalidChangeBatch>(&response.body) {
            RawApiError::with_code("InvalidChangeBatch", batch.messages.items.join("; "))
        } else {
            return Err(self.unknown_error(RawApiError::new(format!(
                "HTTP {}: {}",
                response.status, response.body
            ))));
        };
        Err(self.map_error(raw, ctx.clone()))
    }

    /// Decode a successful response body
    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        quick_xml::de::from_str(body).map_err(|e| {
            log::error!("XML parse failed: {e}");
            log::debug!("Response body: {}", truncate_for_log(body));
            self.parse_error(e)
        })
    }

    /// Sign and send a request, returning the body of a successful response
    async fn send(
        &self,
        method: &str,
        path: &str,
        query: &str,
        body: Option<String>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let payload = body.unwrap_or_default();

        let mut headers = vec![
            ("Host".to_string(), ROUTE53_HOST.to_string()),
            ("X-Amz-Date".to_string(), amz_date.clone()),
        ];
        if !payload.is_empty() {
            headers.push(("Content-Type".to_string(), XML_CONTENT_TYPE.to_string()));
        }
        if let Some(token) = &self.signer.session_token {
            headers.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }

        let authorization = self.signer.authorization(
            &SignableRequest {
                method,
                uri: path,
                query,
                headers: &headers,
                payload: &payload,
            },
            &amz_date,
        )?;

        let url = if query.is_empty() {
            format!("https://{ROUTE53_HOST}{path}")
        } else {
            format!("https://{ROUTE53_HOST}{path}?{query}")
        };

        let mut request = match method {
            "POST" => self.client.post(&url).body(payload),
            _ => self.client.get(&url),
        };
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = request.header("Authorization", authorization);

        log::debug!("{method} {url}");
        let response = http_client::send_with_retry(request, self.provider_name(), &self.retry, |r| {
            self.check_response(r, &ctx)
        })
        .await?;
        Ok(response.body)
    }

    // ==================== API methods ====================

    /// Execute a GET request and decode the XML response
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self.send("GET", path, query, None, ctx).await?;
        self.decode(&text)
    }

    /// Execute a POST request with an XML body and decode the XML response
    pub(crate) async fn post_xml<T: DeserializeOwned>(
        &self,
        path: &str,
        body: String,
        ctx: ErrorContext,
    ) -> Result<T> {
        log::debug!("Request Body: {}", truncate_for_log(&body));
        let text = self.send("POST", path, "", Some(body), ctx).await?;
        self.decode(&text)
    }
}
