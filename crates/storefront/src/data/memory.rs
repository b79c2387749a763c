//! In-memory datasets.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use vitrine_core::{Brand, Product};

use super::{CatalogSource, DataError};

/// Source holding its datasets in memory.
///
/// An extended list of `None` behaves like a missing file. The number of
/// extended fetches is counted so callers can observe load-once behavior, and
/// an optional gate holds each extended fetch until it is notified.
#[derive(Debug, Default)]
pub struct MemorySource {
    brands: Vec<Brand>,
    basic: Vec<Product>,
    extended: Option<Vec<Product>>,
    extended_fetches: AtomicUsize,
    extended_gate: Option<Arc<Notify>>,
}

impl MemorySource {
    /// Create a source with brands and a basic product list, and no
    /// extended list.
    #[must_use]
    pub fn new(brands: Vec<Brand>, basic: Vec<Product>) -> Self {
        Self {
            brands,
            basic,
            extended: None,
            extended_fetches: AtomicUsize::new(0),
            extended_gate: None,
        }
    }

    /// Set the extended product list.
    #[must_use]
    pub fn with_extended(mut self, extended: Vec<Product>) -> Self {
        self.extended = Some(extended);
        self
    }

    /// Hold every extended fetch until `gate` is notified once per fetch.
    ///
    /// The fetch counter is bumped before waiting, so a caller can tell when
    /// a fetch is in flight.
    #[must_use]
    pub fn with_extended_gate(mut self, gate: Arc<Notify>) -> Self {
        self.extended_gate = Some(gate);
        self
    }

    /// How many times the extended list has been requested.
    #[must_use]
    pub fn extended_fetches(&self) -> usize {
        self.extended_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    async fn brands(&self) -> Result<Vec<Brand>, DataError> {
        Ok(self.brands.clone())
    }

    async fn basic_products(&self) -> Result<Vec<Product>, DataError> {
        Ok(self.basic.clone())
    }

    async fn extended_products(&self) -> Result<Vec<Product>, DataError> {
        self.extended_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.extended_gate {
            gate.notified().await;
        }
        // Give concurrent callers a chance to interleave.
        tokio::task::yield_now().await;
        self.extended
            .clone()
            .ok_or_else(|| DataError::NotFound("extended products".to_string()))
    }
}
