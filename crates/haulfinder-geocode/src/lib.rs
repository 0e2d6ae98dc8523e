//! HTTP geocoder adapter for the haulfinder search engine.

mod client;
mod types;

pub use client::HttpGeocoder;
