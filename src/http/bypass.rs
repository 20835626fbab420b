//! Per-request bypass flag.
//!
//! The flag lives in the request's typed extension map, keyed by the
//! [`BypassValidation`] type itself, so it cannot collide with anything
//! else stored there.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Request;

/// Marks a request whose path matched an exception pattern.
///
/// Absent means `false`. Also usable as an axum extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BypassValidation(pub bool);

/// Read access to the bypass flag for downstream stages.
pub trait BypassExt {
    fn bypass_validation(&self) -> bool;
}

impl<B> BypassExt for Request<B> {
    fn bypass_validation(&self) -> bool {
        self.extensions()
            .get::<BypassValidation>()
            .is_some_and(|flag| flag.0)
    }
}

impl BypassExt for Parts {
    fn bypass_validation(&self) -> bool {
        self.extensions
            .get::<BypassValidation>()
            .is_some_and(|flag| flag.0)
    }
}

/// Set the flag, keeping every other extension on the request.
pub fn mark_bypassed<B>(req: &mut Request<B>) {
    req.extensions_mut().insert(BypassValidation(true));
}

impl<S> FromRequestParts<S> for BypassValidation
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BypassValidation(parts.bypass_validation()))
    }
}
