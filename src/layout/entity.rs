use std::collections::BTreeMap;

/// A domain entity as delivered by the external fetch layer.
///
/// Parent and child relations are references by `name`, not by id.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    /// Stable domain id.
    pub id: String,
    /// Display name, also the key other entities reference.
    pub name: String,
    /// Numeric annotations (counts, weights) carried through to callbacks.
    #[serde(default)]
    pub annotations: BTreeMap<String, f64>,
    /// Names of parent entities.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Names of child entities.
    #[serde(default)]
    pub children: Vec<String>,
}

impl Entity {
    /// Entity with id and name and no relations.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a parent reference.
    pub fn with_parent(mut self, name: impl Into<String>) -> Self {
        self.parents.push(name.into());
        self
    }

    /// Add a child reference.
    pub fn with_child(mut self, name: impl Into<String>) -> Self {
        self.children.push(name.into());
        self
    }
}

/// Entity document: the home lists plus a catalog used to resolve relations by name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntityCatalog {
    /// Home grid entities.
    pub roots: Vec<Entity>,
    /// Featured row entities.
    pub featured: Vec<Entity>,
    /// Active search hits.
    pub search: Vec<Entity>,
    /// Every other known entity.
    pub nodes: Vec<Entity>,
}

impl EntityCatalog {
    /// Every entity, catalog first, then roots, featured and search hits.
    pub fn all(&self) -> impl Iterator<Item = &Entity> {
        self.nodes
            .iter()
            .chain(&self.roots)
            .chain(&self.featured)
            .chain(&self.search)
    }

    /// First entity with `id`.
    pub fn find(&self, id: &str) -> Option<&Entity> {
        self.all().find(|e| e.id == id)
    }

    /// Resolve name references in order. Unknown names are skipped.
    pub fn by_names(&self, names: &[String]) -> Vec<Entity> {
        names
            .iter()
            .filter_map(|n| {
                let hit = self.all().find(|e| &e.name == n);
                if hit.is_none() {
                    tracing::debug!(name = %n, "unresolved entity reference");
                }
                hit.cloned()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/entity.rs"]
mod tests;
