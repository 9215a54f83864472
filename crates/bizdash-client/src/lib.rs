//! HTTP collaborator for the bizdash admin dashboard
//!
//! Performs authenticated GET/PUT/PATCH/DELETE requests against the
//! marketplace API, attaching the bearer token from a shared
//! [`CredentialStore`] when one is present.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod client;
pub mod credentials;
pub mod envelope;
pub mod error;

pub use client::ApiClient;
pub use credentials::CredentialStore;
pub use envelope::{CollectionShape, decode_collection};
pub use error::{ClientError, ClientResult};
