//! Road facts server for Maltese traffic incidents.
//!
//! Answers historical questions about a road at the time of an incident:
//! was there a speed camera on it, was it fully closed, and had it been
//! raining.

pub mod cache;
pub mod cameras;
pub mod closures;
pub mod config;
pub mod dataset;
pub mod facts;
pub mod names;
pub mod weather;
pub mod web;
