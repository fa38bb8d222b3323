//! Permission guard middleware for the drinks server.
//! This middleware can be placed on any route or service.
//!
//! It extracts the bearer token from the incoming request's `Authorization` header, verifies it
//! with the [`TokenVerifier`] registered in the application data, and checks that the token's
//! claims grant the permission the route requires. If all three steps pass, the claims are stored
//! in the request extensions and the request continues. Otherwise the request is short-circuited
//! with the matching error envelope.

use std::{marker::PhantomData, pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};

use crate::{
    auth::{check_permission, extract_bearer_token, TokenVerifier},
    errors::ServerError,
};

pub struct RequirePermissionFactory<V> {
    permission: &'static str,
    _verifier: PhantomData<fn() -> V>,
}

impl<V> RequirePermissionFactory<V> {
    pub fn new(permission: &'static str) -> Self {
        Self { permission, _verifier: PhantomData }
    }
}

impl<S, B, V> Transform<S, ServiceRequest> for RequirePermissionFactory<V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    V: TokenVerifier + 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = RequirePermissionService<S, V>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequirePermissionService {
            permission: self.permission,
            service: Rc::new(service),
            _verifier: PhantomData,
        })
    }
}

pub struct RequirePermissionService<S, V> {
    permission: &'static str,
    service: Rc<S>,
    _verifier: PhantomData<fn() -> V>,
}

impl<S, B, V> Service<ServiceRequest> for RequirePermissionService<S, V>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    V: TokenVerifier + 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permission = self.permission;
        Box::pin(async move {
            let verifier = req.app_data::<web::Data<V>>().cloned().ok_or_else(|| {
                log::warn!("No token verifier found in app data");
                Error::from(ServerError::BackendError("No token verifier configured".to_string()))
            })?;
            let claims = {
                let token = extract_bearer_token(req.request()).map_err(ServerError::from)?;
                verifier.verify(token).map_err(ServerError::from)?
            };
            check_permission(permission, &claims).map_err(ServerError::from)?;
            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}
