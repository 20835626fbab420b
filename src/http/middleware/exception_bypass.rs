//! Exception bypass middleware.
//!
//! Marks requests whose path matches a configured exception so that the
//! validation stage further down the chain lets them through. The inner
//! service is always called exactly once; this layer never answers a
//! request itself.

use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::exceptions::MatcherSet;
use crate::http::bypass::mark_bypassed;
use crate::observability::logging::{Logger, NoopLogger};
use crate::observability::metrics;
use crate::plugin::PLUGIN_NAME;

/// Layer that wraps services in [`ExceptionBypass`].
#[derive(Clone)]
pub struct ExceptionBypassLayer {
    matchers: Arc<MatcherSet>,
    logger: Arc<dyn Logger>,
}

impl ExceptionBypassLayer {
    /// Layer that logs nothing.
    pub fn new(matchers: MatcherSet) -> Self {
        Self::with_logger(matchers, Arc::new(NoopLogger))
    }

    pub fn with_logger(matchers: MatcherSet, logger: Arc<dyn Logger>) -> Self {
        logger.debug(format_args!(
            "[PLUGIN: {}] configured exception patterns: {:?}",
            PLUGIN_NAME,
            matchers.expressions()
        ));

        Self {
            matchers: Arc::new(matchers),
            logger,
        }
    }

    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }
}

impl fmt::Debug for ExceptionBypassLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionBypassLayer")
            .field("matchers", &self.matchers)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for ExceptionBypassLayer {
    type Service = ExceptionBypass<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionBypass {
            inner,
            matchers: self.matchers.clone(),
            logger: self.logger.clone(),
        }
    }
}

/// Service that flags exception paths before delegating to `S`.
#[derive(Clone)]
pub struct ExceptionBypass<S> {
    inner: S,
    matchers: Arc<MatcherSet>,
    logger: Arc<dyn Logger>,
}

impl<S> ExceptionBypass<S> {
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }
}

impl<S: fmt::Debug> fmt::Debug for ExceptionBypass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionBypass")
            .field("inner", &self.inner)
            .field("matchers", &self.matchers)
            .finish_non_exhaustive()
    }
}

impl<S, B> Service<Request<B>> for ExceptionBypass<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        self.logger.info(format_args!(
            "[PLUGIN: {}] exception bypass middleware executing",
            PLUGIN_NAME
        ));

        let bypassed = match self.matchers.first_match(req.uri().path()) {
            Some(matcher) => {
                self.logger.info(format_args!(
                    "[PLUGIN: {}] request bypassed: path={} pattern={}",
                    PLUGIN_NAME,
                    req.uri().path(),
                    matcher.template()
                ));
                true
            }
            None => {
                self.logger.debug(format_args!(
                    "[PLUGIN: {}] request not bypassed: path={}",
                    PLUGIN_NAME,
                    req.uri().path()
                ));
                false
            }
        };

        metrics::record_bypass_decision(bypassed);
        if bypassed {
            mark_bypassed(&mut req);
        }

        self.inner.call(req)
    }
}
