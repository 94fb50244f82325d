//! # wicket-core
//!
//! Core types and error types for Wicket.
//!
//! This crate provides the foundational types shared across all Wicket crates:
//! - Pipeline entities (analytical steps, chart recommendations, claim verifications)
//! - Project bundle and validation report shapes
//! - Enums for chart kinds, verification methods, and validation outcomes
//! - HTTP request and response bodies
//! - Slug generation for published projects
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod lenient;
pub mod requests;
pub mod responses;
pub mod slug;

/// A single result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;
