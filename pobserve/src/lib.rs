//! Observability hooks for dispatch and tool execution.
//!
//! ```rust
//! use pobserve::{ObservabilityHooks, SafeDispatchHooks, SafeToolHooks};
//!
//! let _dispatch_hooks = SafeDispatchHooks::new(ObservabilityHooks::default());
//! let _tool_hooks = SafeToolHooks::new(ObservabilityHooks::default());
//! ```

mod combined;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use combined::ObservabilityHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeDispatchHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, ObservabilityHooks, SafeDispatchHooks, SafeToolHooks,
        TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
