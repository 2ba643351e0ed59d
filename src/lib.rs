//! `ctxmeta` - context-scoped metadata for structured log entries.
//!
//! A call chain learns useful identifiers early (a user id, a request id)
//! and emits log entries much later, several layers down. This crate lets
//! the chain attach those identifiers to a [`Context`] as it descends, then
//! folds everything attached into the fields of a log entry at the leaf,
//! with no explicit parameter threading in between.
//!
//! Attach as often as the call tree wants; later attachments merge over
//! earlier ones, last write winning per key:
//!
//! ```
//! use ctxmeta::{Context, Field, Meta};
//!
//! fn do_business_logic(ctx: &Context, user_id: &str) {
//!     let ctx = ctx.with_meta(Meta::from([("user_id", user_id)]));
//!     get_resource(&ctx);
//! }
//!
//! fn get_resource(ctx: &Context) {
//!     let ctx = ctx.with_meta(Meta::from([("resource", "deal")]));
//!
//!     // At the leaf, fold the accumulated metadata into the log fields.
//!     let fields = ctx.decorate(vec![Field::string("event", "fetched")]);
//!     assert_eq!(fields.last().unwrap().name(), "context");
//! }
//!
//! do_business_logic(&Context::new(), "u-1001");
//! ```
//!
//! A context that never saw an attachment decorates to the unchanged input,
//! so the enrichment is strictly best-effort and can never make a logging
//! call fail.
//!
//! [`ContextLogger`] wraps the decorate-then-emit step for callers that
//! want entries rendered as JSON and emitted through `tracing` directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod errors;
pub mod fields;
pub mod logging;
pub mod meta;

pub use context::Context;
pub use errors::FieldError;
pub use fields::Field;
pub use logging::{ContextLogger, LogEntry, LogLevel};
pub use meta::{Meta, CONTEXT_FIELD};
