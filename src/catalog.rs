use thiserror::Error;

use crate::types::KeyboardOption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("service `{0}` not found")]
    NotFound(String),
}

/// Read-only list of the services users can request, in display order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    /// Later duplicates of an id are dropped.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut catalog = ServiceCatalog { entries: vec![] };
        for (id, label) in entries {
            if catalog.resolve(id).is_ok() {
                log::warn!("Duplicate service id {} ignored", id);
                continue;
            }
            catalog.entries.push(ServiceEntry {
                id: id.to_string(),
                label: label.to_string(),
            });
        }
        catalog
    }

    pub fn city_services() -> Self {
        ServiceCatalog::new([
            ("electrician", "⚡ Electrician"),
            ("plumber", "🔧 Plumber"),
            ("construction", "🏗️ Construction Worker"),
        ])
    }

    pub fn list(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn resolve(&self, id: &str) -> Result<&ServiceEntry, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn options(&self) -> Vec<KeyboardOption> {
        self.entries
            .iter()
            .map(|entry| KeyboardOption {
                label: entry.label.clone(),
                value: entry.id.clone(),
            })
            .collect()
    }
}
