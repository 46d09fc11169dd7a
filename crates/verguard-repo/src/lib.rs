//! Repository adapters: fetch and parse remote metadata and policy documents.
//!
//! This crate is allowed to do network and filesystem IO. Everything it
//! returns is an immutable value handed to the pure `verguard-domain` layer;
//! nothing here is cached across runs.

#![forbid(unsafe_code)]

pub mod fetch;

mod locate;
mod metadata;
mod policy_xml;

pub use fetch::{DefaultFetcher, FetchError, Fetcher};
pub use locate::{locate_policy, policy_address, LocateOutcome, LocatedPolicy};
pub use metadata::{metadata_address, resolve_latest_version, METADATA_FILE_NAME};
pub use policy_xml::{parse_policy, PolicyFormatError};
