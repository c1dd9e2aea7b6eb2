//! Concurrency limiting for remote calls
//!
//! Every lookup and price update goes through one `ConcurrencyLimiter`.
//! The limiter admits at most `capacity` tasks at a time and queues the rest
//! in submission order.

mod limiter;


pub use limiter::{ConcurrencyLimiter, LimiterClosed};
