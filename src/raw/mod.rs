//! Raw source records
//!
//! Upstream items arrive as JSON objects whose fields may be missing, null,
//! or shaped differently from one document source to the next. This module
//! wraps them so the normalizer can inspect every field through a single
//! discriminated type instead of probing JSON values ad hoc.

mod record;
mod value;

pub use record::RawRecord;
pub use value::RawValue;
