//! OpenAPI-style query parameter encoding for Serde.
//!
//! Flattens an arbitrary `Serialize` value into an ordered list of
//! `name=value` query parameters following the OpenAPI serialization
//! styles: `form` (the default), `spaceDelimited`, `pipeDelimited`, and
//! `deepObject`, each combined with an `explode` flag.
//!
//! The encoder accumulates: every `encode` call appends to the same
//! item list, so a query can be composed from several values, each with
//! its own per-call style.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use serde::Serialize;
//! use url_query_encoder::{EncodeOptions, QueryEncoder};
//!
//! #[derive(Serialize)]
//! struct User {
//!     role: String,
//!     name: String,
//! }
//!
//! let user = User {
//!     role: "admin".to_owned(),
//!     name: "kean".to_owned(),
//! };
//!
//! let mut encoder = QueryEncoder::new();
//! encoder.encode_with(
//!     &HashMap::from([("id", vec![3, 4, 5])]),
//!     EncodeOptions::new().explode(false),
//! );
//! encoder.encode_with(&HashMap::from([("user", &user)]), EncodeOptions::new().deep_object(true));
//!
//! assert_eq!(encoder.query(), "id=3,4,5&user[role]=admin&user[name]=kean");
//! assert_eq!(
//!     encoder.percent_encoded_query(),
//!     "id=3,4,5&user%5Brole%5D=admin&user%5Bname%5D=kean"
//! );
//! ```
//!
//! ## Supported values
//!
//! At the top level the encoder expects a keyed value (a struct or a
//! map): each field becomes a top-level query key. Below that, scalars,
//! options, sequences, nested structs, maps, and enums are all
//! supported. `None` values contribute nothing, at any depth.
//!
//! The style rules are only defined for one level of object nesting;
//! scalars more than two path segments deep collapse onto their
//! top-level key.
//!
//! Dates go through the [`Date`] wrapper and are formatted according to
//! the encoder's [`DateEncodingStrategy`].

mod config;
mod date;
mod encode;
mod encoder;
mod error;
mod ser;
mod style;

pub use config::EncodeOptions;
pub use date::{Date, DateEncodingStrategy};
pub use encoder::{QueryEncoder, QueryItem, to_string};
pub use error::{Error, Result};
