//! Travel mode recommender server.
//!
//! A web application that answers: "what's the best way to get from here
//! to there, given what I care about?" Free-text locations are matched
//! fuzzily against a catalog of travel options, and the mode with the
//! lowest cost on the chosen priority is recommended.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod intent;
pub mod recommend;
pub mod resolve;
pub mod web;
