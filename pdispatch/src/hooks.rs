//! Hook contract for observing each dispatch.
//!
//! ```rust
//! use pdispatch::{DispatchHooks, NoopDispatchHooks};
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! accepts_hooks(&NoopDispatchHooks);
//! ```

use std::sync::Arc;
use std::time::Duration;

use pprovider::ProviderId;

use crate::DispatchError;

pub trait DispatchHooks: Send + Sync {
    fn on_dispatch_start(&self, _provider: ProviderId, _model: &str) {}

    fn on_dispatch_success(&self, _provider: ProviderId, _model: &str, _elapsed: Duration) {}

    fn on_dispatch_failure(
        &self,
        _provider: ProviderId,
        _model: &str,
        _error: &DispatchError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatchHooks;

impl DispatchHooks for NoopDispatchHooks {}

impl<T> DispatchHooks for Arc<T>
where
    T: DispatchHooks + ?Sized,
{
    fn on_dispatch_start(&self, provider: ProviderId, model: &str) {
        (**self).on_dispatch_start(provider, model);
    }

    fn on_dispatch_success(&self, provider: ProviderId, model: &str, elapsed: Duration) {
        (**self).on_dispatch_success(provider, model, elapsed);
    }

    fn on_dispatch_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &DispatchError,
        elapsed: Duration,
    ) {
        (**self).on_dispatch_failure(provider, model, error, elapsed);
    }
}
