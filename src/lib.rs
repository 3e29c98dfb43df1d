//! arqual - query Portuguese air quality data
//!
//! Retrieves stations, index readings and alerts published on
//! https://qualar.apambiente.pt by querying the ArcGIS MapServer behind it.

pub mod error;
pub mod models;
pub mod network;
pub mod parser;
pub mod scraper;
pub mod ui;

pub use error::{ArqualError, Result};
