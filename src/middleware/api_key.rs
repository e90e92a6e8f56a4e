// src/middleware/api_key.rs
use std::future::{ready, Ready};
use std::rc::Rc;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use crate::config::settings::ApiKeySettings;
use crate::errors::ApiError;

/// Header carrying the shared secret. Lower-case so it can be used as a
/// static `HeaderName`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reads are open, everything else has to present the shared secret.
pub fn requires_api_key(method: &Method) -> bool {
    *method != Method::GET && *method != Method::OPTIONS
}

/// Check the `X-API-Key` header against the configured secret.
pub fn has_valid_api_key(req: &ServiceRequest, settings: &ApiKeySettings) -> bool {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|key| settings.matches(key))
        .unwrap_or(false)
}

// Create the middleware
pub struct ApiKeyMiddleware {
    settings: Rc<ApiKeySettings>,
}

impl ApiKeyMiddleware {
    pub fn new(settings: ApiKeySettings) -> Self {
        Self {
            settings: Rc::new(settings),
        }
    }
}

// Middleware factory
impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddlewareService {
            service,
            settings: Rc::clone(&self.settings),
        }))
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: S,
    settings: Rc<ApiKeySettings>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if requires_api_key(req.method()) && !has_valid_api_key(&req, &self.settings) {
            tracing::warn!(
                method = %req.method(),
                path = %req.path(),
                "Rejected request without a valid API key"
            );
            // Short-circuit before any handler or store access
            let response = ApiError::Unauthorized.error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
