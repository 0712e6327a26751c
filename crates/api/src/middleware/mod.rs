//! HTTP middleware.
//!
//! Layer order in [`crate::app`] (outermost first):
//! 1. Sentry hub and transaction layers
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (recorded on the span opened by the trace layer)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
