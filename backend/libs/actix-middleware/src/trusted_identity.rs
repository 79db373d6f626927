/// Identity propagation for internal Orbit services
///
/// Only identity-service is internet-facing. It decodes the bearer token
/// once and re-issues the caller's identity as the `X-User-ID` header on
/// every forwarded request (plus `X-Original-Authorization` for admin
/// flows). Services behind the gateway trust these headers verbatim and
/// never re-verify a signature.
///
/// This only holds on a closed network: nothing here stops a caller who
/// can reach an internal service directly from minting the header.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Trusted header carrying the authenticated user's numeric id.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Trusted header relaying the caller's original bearer token (admin flows).
pub const ORIGINAL_AUTH_HEADER: &str = "X-Original-Authorization";

/// Identity established from the trusted `X-User-ID` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

/// The original `Authorization` value relayed by the gateway, if any.
///
/// Extracting this never fails; orchestration code that requires a token
/// checks `0.is_some()` itself so it can fail before any network call.
#[derive(Debug, Clone)]
pub struct ForwardedAuth(pub Option<String>);

/// Actix middleware that establishes identity from `X-User-ID`.
///
/// A missing header passes through (public routes behind the same scope
/// stay reachable; handlers that extract `UserId` reject the request). A
/// present but malformed header is rejected outright and no identity is
/// left in the request extensions.
pub struct TrustedIdentityMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TrustedIdentityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TrustedIdentityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TrustedIdentityMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct TrustedIdentityMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TrustedIdentityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(raw) = req.headers().get(USER_ID_HEADER) {
                let user_id = raw
                    .to_str()
                    .ok()
                    .and_then(|v| v.trim().parse::<i64>().ok())
                    .ok_or_else(|| {
                        tracing::warn!("Rejecting request with malformed {} header", USER_ID_HEADER);
                        ErrorUnauthorized("Invalid X-User-ID header")
                    })?;

                req.extensions_mut().insert(UserId(user_id));
            }

            if let Some(auth) = req
                .headers()
                .get(ORIGINAL_AUTH_HEADER)
                .and_then(|h| h.to_str().ok())
            {
                req.extensions_mut()
                    .insert(ForwardedAuth(Some(auth.to_string())));
            }

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .copied()
                .ok_or_else(|| ErrorUnauthorized("User identity missing")),
        )
    }
}

impl FromRequest for ForwardedAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<ForwardedAuth>()
            .cloned()
            .unwrap_or(ForwardedAuth(None))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(user_id: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user_id.0.to_string())
    }

    async fn echo_auth(auth: ForwardedAuth) -> HttpResponse {
        HttpResponse::Ok().body(auth.0.unwrap_or_default())
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(TrustedIdentityMiddleware)
                    .route("/whoami", web::get().to(whoami))
                    .route("/auth", web::get().to(echo_auth)),
            )
        };
    }

    #[actix_web::test]
    async fn well_formed_header_establishes_identity() {
        let srv = test_app!().await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((USER_ID_HEADER, "42"))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, "42");
    }

    #[actix_web::test]
    async fn malformed_header_is_unauthorized() {
        let srv = test_app!().await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((USER_ID_HEADER, "forty-two"))
            .to_request();
        let resp = test::try_call_service(&srv, req).await;

        let err = resp.expect_err("malformed header must be rejected");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn missing_header_rejects_identity_consumers() {
        let srv = test_app!().await;
        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::try_call_service(&srv, req).await;

        let err = resp.expect_err("handler requiring identity must reject");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn forwarded_auth_is_relayed() {
        let srv = test_app!().await;
        let req = test::TestRequest::get()
            .uri("/auth")
            .insert_header((USER_ID_HEADER, "1"))
            .insert_header((ORIGINAL_AUTH_HEADER, "Bearer token-123"))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert_eq!(body, "Bearer token-123");
    }
}
