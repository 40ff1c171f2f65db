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
  adapters::http::errors::ApiError,
  domain::auth::entities::{Account, AccountRole},
  domain::auth::errors::AuthError,
  domain::auth::services::AccessControl,
};

/// Middleware restricting a scope to accounts holding the admin role
///
/// This middleware:
/// 1. Expects an Account in request extensions (set by AuthMiddleware)
/// 2. Enforces the admin role through AccessControl
/// 3. Returns 403 Forbidden for every other account
///
/// AuthMiddleware must wrap this guard from the outside so the account is
/// already attached when the role check runs.
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use userhub::domain::auth::services::AccessControl;
/// # use userhub::adapters::http::middleware::admin::AdminGuard;
/// # use userhub::adapters::http::middleware::auth::AuthMiddleware;
///
/// # async fn example(access_control: Arc<AccessControl>) {
/// let app = App::new().service(
///   web::scope("/admin")
///     .wrap(AdminGuard::new(access_control.clone()))
///     .wrap(AuthMiddleware::new(access_control))
///     .route("", web::get().to(|| async { "Admins only" })),
/// );
/// # }
/// ```
pub struct AdminGuard {
  access_control: Arc<AccessControl>,
}

impl AdminGuard {
  /// Creates a new admin guard
  pub fn new(access_control: Arc<AccessControl>) -> Self {
    Self { access_control }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AdminGuardService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AdminGuardService {
      service: Rc::new(service),
      access_control: self.access_control.clone(),
    }))
  }
}

pub struct AdminGuardService<S> {
  service: Rc<S>,
  access_control: Arc<AccessControl>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
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
      let account = req.extensions().get::<Account>().cloned();

      let outcome = match account {
        Some(account) => access_control.require_role(&account, AccountRole::Admin),
        // No account attached means the auth layer never ran for this scope
        None => Err(AuthError::Unauthorized),
      };

      if let Err(e) = outcome {
        let (request, _) = req.into_parts();
        let api_error: ApiError = e.into();
        let response = api_error.error_response().map_into_right_body();
        return Ok(ServiceResponse::new(request, response));
      }

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::http::middleware::auth::AuthMiddleware;
  use crate::domain::auth::ports::AccountRepository;
  use crate::domain::auth::test_support::{FakeTokenService, InMemoryAccountRepository};
  use actix_web::http::StatusCode;
  use actix_web::{App, HttpResponse, test, web};

  /// Stands up a guarded scope seeded with one account and probes it with
  /// the given Authorization header.
  async fn probe(role: AccountRole, header: Option<&str>) -> StatusCode {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let mut account = Account::new(
      "guard@example.com".to_string(),
      "hash".to_string(),
      "Guard Test".to_string(),
    );
    account.set_role(role);
    repo.create(account).await.unwrap();

    let access_control = Arc::new(AccessControl::new(repo, Arc::new(FakeTokenService)));

    let app = test::init_service(
      App::new().service(
        web::scope("/admin")
          .wrap(AdminGuard::new(access_control.clone()))
          .wrap(AuthMiddleware::new(access_control))
          .route("", web::get().to(|| async { HttpResponse::Ok().finish() })),
      ),
    )
    .await;

    let mut req = test::TestRequest::get().uri("/admin");
    if let Some(value) = header {
      req = req.insert_header(("Authorization", value));
    }
    test::call_service(&app, req.to_request()).await.status()
  }

  #[actix_web::test]
  async fn test_admin_account_passes() {
    let status = probe(AccountRole::Admin, Some("Bearer token:guard@example.com")).await;
    assert_eq!(status, StatusCode::OK);
  }

  #[actix_web::test]
  async fn test_regular_account_is_forbidden() {
    let status = probe(AccountRole::User, Some("Bearer token:guard@example.com")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
  }

  #[actix_web::test]
  async fn test_missing_token_is_unauthorized() {
    let status = probe(AccountRole::Admin, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }
}
