//! Vitrine Storefront library.
//!
//! This crate provides the catalog and cart stores and the JSON HTTP surface
//! over them as a library, allowing it to be tested and reused.
//!
//! # Modules
//!
//! - [`catalog`] - Product catalog with brand filter and one-time extended upgrade
//! - [`cart`] - Cart line items with option-aware merging
//! - [`data`] - Data sources the catalog loads from
//! - [`routes`] - Axum routes exposing both stores per session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
