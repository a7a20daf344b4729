use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUsername;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// Request-level authentication.
///
/// Extracts the `Authorization: Bearer` token, verifies it against the
/// [`TokenService`] registered as application data, and stashes the verified
/// username in request extensions for [`CurrentUser`](super::CurrentUser) to
/// resolve. A missing, malformed or expired token is answered with the same
/// 401 response; nothing about the failure mode is revealed to the client.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        // Skip authentication for health check and auth endpoints
        let path = req.path();
        if path == "/health"
            || path.starts_with("/api/auth/login")
            || path.starts_with("/api/auth/register")
        {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let tokens = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => tokens.clone(),
            None => {
                let res = HttpResponse::from_error(AppError::InternalServerError(
                    "Token service not configured".into(),
                ))
                .map_into_right_body();
                return Box::pin(async move { Ok(req.into_response(res)) });
            }
        };

        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match tokens.verify(token) {
                Ok(username) => {
                    req.extensions_mut().insert(AuthenticatedUsername(username));
                    let fut = self.service.call(req);
                    Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
                }
                // Malformed and expired tokens get the same answer.
                Err(_) => {
                    let res =
                        HttpResponse::from_error(AppError::Unauthorized("Invalid token".into()))
                            .map_into_right_body();
                    Box::pin(async move { Ok(req.into_response(res)) })
                }
            },
            None => {
                let res = HttpResponse::from_error(AppError::Unauthorized("Missing token".into()))
                    .map_into_right_body();
                Box::pin(async move { Ok(req.into_response(res)) })
            }
        }
    }
}
