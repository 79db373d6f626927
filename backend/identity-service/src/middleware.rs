/// JWT authentication middleware for the internet-facing edge
///
/// This is the single place a bearer token is decoded. The established
/// identity is stored as `actix_middleware::UserId` — the same extractor
/// type the internal services fill from `X-User-ID` — and the raw token
/// is kept alongside so the gateway can relay it verbatim on admin
/// forwards.
use actix_middleware::UserId;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// The verbatim `Authorization` header value of the current request.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
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
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme"))?;

            let user_id = crypto_core::jwt::get_user_id_from_token(token)
                .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

            req.extensions_mut().insert(UserId(user_id));
            req.extensions_mut().insert(BearerToken(auth_header.clone()));

            service.call(req).await
        })
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<BearerToken>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Bearer token missing")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    const TEST_SECRET: &str =
        "c2VjcmV0LWtleS1mb3ItdW5pdC10ZXN0cy1vbmx5LW5ldmVyLXByb2QtMDE=";

    fn init_test_keys() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            crypto_core::jwt::initialize_keys(TEST_SECRET).expect("init test keys");
        });
    }

    async fn whoami(user_id: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user_id.0.to_string())
    }

    #[actix_web::test]
    async fn valid_bearer_token_is_accepted() {
        init_test_keys();
        let srv = test::init_service(
            App::new()
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let token = crypto_core::jwt::generate_access_token(77, "a@b.c").unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&srv, req).await;

        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, "77");
    }

    #[actix_web::test]
    async fn missing_and_malformed_tokens_are_rejected() {
        init_test_keys();
        let srv = test::init_service(
            App::new()
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let err = test::try_call_service(&srv, req)
            .await
            .expect_err("missing token must be rejected");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let err = test::try_call_service(&srv, req)
            .await
            .expect_err("garbage token must be rejected");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }
}
