use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::entities::Account,
  domain::auth::services::AccessControl,
};

/// Authentication middleware that validates bearer tokens and attaches
/// the account to the request
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Resolves it to a live account through AccessControl
/// 3. Attaches the Account entity to request extensions for downstream handlers
/// 4. Returns 401 Unauthorized if the token is invalid, expired or orphaned
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userhub::domain::auth::services::AccessControl;
/// # use userhub::adapters::http::middleware::auth::AuthMiddleware;
///
/// # async fn example(access_control: Arc<AccessControl>) {
/// let app = App::new()
///   .wrap(AuthMiddleware::new(access_control))
///   .service(
///     web::resource("/protected")
///       .route(web::get().to(|| async { "Protected endpoint" }))
///   );
/// # }
/// ```
pub struct AuthMiddleware {
  access_control: Arc<AccessControl>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  ///
  /// # Arguments
  ///
  /// * `access_control` - Service resolving bearer tokens to live accounts
  pub fn new(access_control: Arc<AccessControl>) -> Self {
    Self { access_control }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      access_control: self.access_control.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  access_control: Arc<AccessControl>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let access_control = self.access_control.clone();

    Box::pin(async move {
      // Extract bearer token from Authorization header
      let token = match extract_bearer_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // Resolve the token to the account it identifies
      let account = match access_control.authenticate(&token).await {
        Ok(account) => account,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // Attach the account to request extensions
      req.extensions_mut().insert(account);

      // Call the next service
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::Unauthorized))
}

/// Extension trait to easily extract the authenticated account from a request
pub trait AuthAccount {
  /// Get the authenticated account from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the account is not present in extensions.
  /// This should only be called in handlers that are protected by AuthMiddleware.
  fn authenticated_account(&self) -> Account;
}

impl AuthAccount for actix_web::HttpRequest {
  fn authenticated_account(&self) -> Account {
    self
      .extensions()
      .get::<Account>()
      .cloned()
      .expect("Account not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}
