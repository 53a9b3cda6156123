use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub const INVOCATION_ID_HEADER: &str = "x-request-id";

/// Correlates every log line of one trigger invocation.
#[derive(Clone, Debug)]
pub struct InvocationId(pub String);

pub async fn invocation_id_middleware(mut request: Request, next: Next) -> Response {
    let invocation_id = request
        .headers()
        .get(INVOCATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(InvocationId(invocation_id.clone()));

    let span = tracing::info_span!(
        "invocation",
        invocation_id = %invocation_id,
        method = %request.method(),
        uri = %request.uri().path()
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&invocation_id) {
        response
            .headers_mut()
            .insert(INVOCATION_ID_HEADER, header_value);
    }

    response
}
