//! Bearer token authentication for protected endpoints.
//!
//! Every request outside the public allow-list must carry a valid access
//! token for an active account. The resolved principal is stored in the
//! request extensions and read back by handlers through [`AuthContext`].

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::AUTHORIZATION, Method},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use nbj_core::entities::Role;
use nbj_core::AuthenticatedUser;
use nbj_shared::error_codes;

use crate::app::AppState;
use crate::handlers::ApiError;

/// Paths reachable without a token
const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/refresh",
    "/api/health",
];

/// Matches an allow-listed path exactly or any path below it
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Authenticated principal attached to the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user_id = self.user_id, "Admin endpoint refused");
            Err(ApiError::access_denied())
        }
    }

    pub fn require_tenant(&self) -> Result<(), ApiError> {
        if self.role == Role::Tenant {
            Ok(())
        } else {
            Err(ApiError::access_denied())
        }
    }

    /// The principal in the form the services expect
    pub fn principal(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: self.user_id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl From<AuthenticatedUser> for AuthContext {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            role: user.role,
        }
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            ApiError::unauthorized(error_codes::UNAUTHORIZED, "Authentication required")
        });
        ready(result)
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if req.method() == Method::OPTIONS || is_public_path(req.path()) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let auth = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.auth.clone(),
                None => {
                    tracing::error!("Application state missing from request");
                    return Ok(reject(req, ApiError::internal()));
                }
            };

            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(reject(
                        req,
                        ApiError::unauthorized(error_codes::UNAUTHORIZED, "Authentication required"),
                    ));
                }
            };

            match auth.authenticate(&token).await {
                Ok(principal) => {
                    req.extensions_mut().insert(AuthContext::from(principal));
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    tracing::debug!(path = %req.path(), error = %e, "Bearer token rejected");
                    Ok(reject(req, ApiError::from(e)))
                }
            }
        })
    }
}

/// Short-circuits the request with a JSON error body
fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    let (request, _) = req.into_parts();
    let response = error.error_response().map_into_right_body();
    ServiceResponse::new(request, response)
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/health"));
        assert!(is_public_path("/api/health/db"));
        assert!(!is_public_path("/api/auth/logout"));
        assert!(!is_public_path("/api/auth/loginx"));
        assert!(!is_public_path("/api/tenants"));
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi".to_string()));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_role_checks() {
        let admin = AuthContext {
            user_id: 1,
            email: "admin@nbj.test".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_tenant().is_err());
        assert!(admin.principal().is_admin());
    }
}
