use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &str) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn derive_signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, InvalidLength> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date)?;
    let k_region = hmac_sha256(&k_date, region)?;
    let k_service = hmac_sha256(&k_region, service)?;
    hmac_sha256(&k_service, "aws4_request")
}

pub struct SigV4Params<'a> {
    pub method: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub host: &'a str,
    pub canonical_uri: &'a str,
    pub payload: &'a [u8],
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub session_token: Option<&'a str>,
    /// Additional headers to sign, e.g. content-type and x-amz-target.
    pub headers: Vec<(String, String)>,
    pub timestamp: DateTime<Utc>,
}

/// Signs a request with an empty query string. Returns the headers to send,
/// `authorization` included.
pub fn sign(params: SigV4Params<'_>) -> Result<Vec<(String, String)>, InvalidLength> {
    let amz_date = params.timestamp.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = params.timestamp.format("%Y%m%d").to_string();
    let payload_hash = hex_sha256(params.payload);

    let mut headers: Vec<(String, String)> = vec![
        ("host".into(), params.host.to_string()),
        ("x-amz-date".into(), amz_date.clone()),
    ];
    headers.extend(
        params
            .headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v)),
    );
    if let Some(token) = params.session_token {
        headers.push(("x-amz-security-token".into(), token.to_string()));
    }
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let signed_headers = headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical_headers = headers
        .iter()
        .map(|(k, v)| format!("{}:{}\n", k, v.trim()))
        .collect::<String>();

    let canonical_request = format!(
        "{method}\n{uri}\n\n{headers}\n{signed}\n{payload}",
        method = params.method,
        uri = params.canonical_uri,
        headers = canonical_headers,
        signed = signed_headers,
        payload = payload_hash
    );

    let credential_scope = format!(
        "{}/{}/{}/aws4_request",
        date_stamp, params.region, params.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{credential_scope}\n{hash}",
        hash = hex_sha256(canonical_request.as_bytes())
    );

    let signing_key = derive_signing_key(
        params.secret_key,
        &date_stamp,
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac_sha256(&signing_key, &string_to_sign)?);

    let authorization = format!(
        "{ALGORITHM} Credential={access_key}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
        access_key = params.access_key,
    );

    headers.retain(|(k, _)| k != "host");
    headers.push(("authorization".into(), authorization));
    Ok(headers)
}
