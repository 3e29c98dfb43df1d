//! Data models and serialization helpers.
//!
//! This module contains the request descriptor produced by the CLI, the
//! records decoded from the air quality server and the custom deserializers
//! needed to read its loosely typed attributes.
pub mod records;
pub mod request;
pub mod serde_helpers;
