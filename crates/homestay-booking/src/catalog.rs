//! # Property Catalog Port
//!
//! The reservation layer reads property listings (rates, stay rules,
//! seed blocked dates) from an external catalog. This module defines
//! that seam as a trait so the core stays storage-agnostic: tests use
//! [`InMemoryCatalog`], a real deployment plugs in whatever backs its
//! listings.

use std::collections::HashMap;

use homestay_core::{Property, PropertyId};

/// Read-only lookup of property listings.
///
/// Implementations may hit storage; callers treat every lookup as
/// potentially fresh and never cache stay rules across operations.
pub trait PropertyCatalog: Send + Sync {
    /// Fetches a single property by id.
    fn get(&self, id: PropertyId) -> Option<Property>;

    /// All listed properties, in id order.
    fn all(&self) -> Vec<Property>;
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// A fixed catalog held in memory.
///
/// This is the production implementation for a single-host deployment
/// seeded at startup, and the only one the tests need.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    properties: HashMap<PropertyId, Property>,
}

impl InMemoryCatalog {
    /// Builds a catalog from a listing seed.
    pub fn new(properties: impl IntoIterator<Item = Property>) -> Self {
        InMemoryCatalog {
            properties: properties.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

impl PropertyCatalog for InMemoryCatalog {
    fn get(&self, id: PropertyId) -> Option<Property> {
        self.properties.get(&id).cloned()
    }

    fn all(&self) -> Vec<Property> {
        let mut all: Vec<Property> = self.properties.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
