use crate::models::Offering;
use serde::Serialize;
use tracing::info;

pub mod packages;
pub mod sections;

/// Read-only offering catalog compiled into the program.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Offering>,
    platinum: Vec<Offering>,
    performance: Vec<Offering>,
}

/// Option tree of the package flow as the UI renders it.
#[derive(Debug, Clone, Serialize)]
pub struct PackageTree<'a> {
    pub platinum: &'a [Offering],
    pub performance: &'a [Offering],
}

impl Catalog {
    pub fn new() -> Self {
        Self::from_offerings(
            sections::all(),
            packages::platinum_options(),
            packages::performance_options(),
        )
    }

    /// Builds a catalog from explicit offerings, e.g. a sold-out fixture.
    pub fn from_offerings(
        sections: Vec<Offering>,
        platinum: Vec<Offering>,
        performance: Vec<Offering>,
    ) -> Self {
        let catalog = Self {
            sections,
            platinum,
            performance,
        };
        info!(
            "Catalog loaded: {} sections, {} packages",
            catalog.sections.len(),
            catalog.platinum.len() + catalog.performance.len()
        );
        catalog
    }

    pub fn sections(&self) -> &[Offering] {
        &self.sections
    }

    pub fn platinum_options(&self) -> &[Offering] {
        &self.platinum
    }

    pub fn performance_options(&self) -> &[Offering] {
        &self.performance
    }

    pub fn packages(&self) -> PackageTree<'_> {
        PackageTree {
            platinum: &self.platinum,
            performance: &self.performance,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Offering> {
        self.sections.iter().find(|o| o.id == id)
    }

    pub fn platinum_option(&self, id: &str) -> Option<&Offering> {
        self.platinum.iter().find(|o| o.id == id)
    }

    pub fn performance_option(&self, id: &str) -> Option<&Offering> {
        self.performance.iter().find(|o| o.id == id)
    }

    /// Lookup across every offering, sections first.
    pub fn get(&self, id: &str) -> Option<&Offering> {
        self.section(id)
            .or_else(|| self.platinum_option(id))
            .or_else(|| self.performance_option(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
