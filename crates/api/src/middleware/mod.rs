//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS
//! 5. `validate_id` (per-route, product `{id}` paths only)

pub mod request_id;
pub mod validate_id;

pub use request_id::request_id_middleware;
pub use validate_id::validate_id;
