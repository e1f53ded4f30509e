//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod authenticate;
pub mod trace;

pub use authenticate::Authenticate;
pub use trace::Trace;
