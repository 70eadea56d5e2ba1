//! EV charging route server.
//!
//! A web service that answers: "Which charging stations can I reach from
//! here with my remaining range, and how do I get to my destination?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod optimizer;
pub mod web;
