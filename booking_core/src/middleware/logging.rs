//! Per-request tracing for the booking API

use axum::body::Body;
use http::{header, Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer,
};
use tracing::{debug, error, info, info_span, warn, Span};

/// First path segment, e.g. `bookings` for `/bookings/7`.
fn resource_of(path: &str) -> &str {
    match path.trim_start_matches('/').split('/').next() {
        Some("") | None => "index",
        Some(segment) => segment,
    }
}

pub fn logging_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
    DefaultOnBodyChunk,
    DefaultOnEos,
    impl OnFailure<ServerErrorsFailureClass> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let origin = request
                .headers()
                .get(header::ORIGIN)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");

            info_span!(
                "request",
                method = %request.method(),
                resource = resource_of(request.uri().path()),
                path = %request.uri().path(),
                origin = origin,
            )
        })
        .on_request(|_request: &Request<Body>, _span: &Span| {
            debug!("request received");
        })
        .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
            let status = response.status().as_u16();
            let latency_ms = latency.as_millis();

            match status {
                100..=399 => info!(status, latency_ms, "request served"),
                400..=499 => warn!(status, latency_ms, "request rejected"),
                _ => error!(status, latency_ms, "request errored"),
            }
        })
        .on_failure(|failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
            error!(latency_ms = latency.as_millis(), failure = %failure, "request failed");
        })
}
