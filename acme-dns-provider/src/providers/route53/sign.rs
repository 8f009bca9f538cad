//! AWS Signature Version 4
//!
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::providers::common::hmac_sha256;
use crate::utils::log_sanitizer::{mask_key_id, truncate_for_log};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Credentials plus the scope they sign for.
pub(crate) struct Signer {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub region: String,
    pub service: String,
}

/// The parts of an HTTP request covered by the signature.
pub(crate) struct SignableRequest<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    /// Already URL-encoded `k=v` pairs joined by `&`, in any order.
    pub query: &'a str,
    pub headers: &'a [(String, String)],
    pub payload: &'a str,
}

impl Signer {
    /// Build the `Authorization` header value for a request.
    ///
    /// `amz_date` must be the same `YYYYMMDDTHHMMSSZ` timestamp sent in `X-Amz-Date`.
    pub(crate) fn authorization(
        &self,
        request: &SignableRequest<'_>,
        amz_date: &str,
    ) -> Result<String> {
        let date = amz_date.get(..8).unwrap_or(amz_date);
        let (canonical_request, signed_headers) = canonical_request(request);

        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        let credential_scope = format!(
            "{date}/{region}/{service}/aws4_request",
            region = self.region,
            service = self.service
        );
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign =
            format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{hashed_canonical_request}");

        log::debug!("StringToSign:\n{string_to_sign}");

        let signing_key = self.signing_key(date)?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        log::debug!(
            "Signed request with key {} for scope {credential_scope}",
            mask_key_id(&self.access_key_id)
        );

        Ok(format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.access_key_id
        ))
    }

    /// kSigning = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")
    fn signing_key(&self, date: &str) -> Result<Vec<u8>> {
        let k_secret = format!("AWS4{}", self.secret_access_key);
        let k_date = hmac_sha256(k_secret.as_bytes(), date.as_bytes())?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        hmac_sha256(&k_service, b"aws4_request")
    }
}

/// Returns the canonical request and the `SignedHeaders` list.
fn canonical_request(request: &SignableRequest<'_>) -> (String, String) {
    let canonical_uri = if request.uri.is_empty() {
        "/"
    } else {
        request.uri
    };

    let canonical_query = if request.query.is_empty() {
        String::new()
    } else {
        let mut params: Vec<&str> = request.query.split('&').collect();
        params.sort_unstable();
        params.join("&")
    };

    let mut sorted_headers: Vec<(String, &str)> = request
        .headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.trim()))
        .collect();
    sorted_headers.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical_headers = sorted_headers
        .iter()
        .fold(String::new(), |mut acc, (k, v)| {
            let _ = writeln!(acc, "{k}:{v}");
            acc
        });

    let signed_headers = sorted_headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let hashed_payload = hex::encode(Sha256::digest(request.payload.as_bytes()));

    let canonical_request = format!(
        "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}",
        method = request.method
    );

    (canonical_request, signed_headers)
}
