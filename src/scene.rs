//! Scene orchestration: picks and sequences the choreography between view modes.

/// Contextual button rules.
pub mod buttons;
pub mod choreography;
pub mod domain_zoom;
/// Scene state machine.
pub mod orchestrator;

use crate::foundation::error::{NodeweaveError, NodeweaveResult};
use crate::layout::{Entity, EntityCatalog, LayoutEngine, LayoutResult};

pub use buttons::{ContextFlags, buttons_for};
pub use choreography::{Choreography, Phase, PhaseTween, build_phases};
pub use domain_zoom::{DomainZoom, ZoomDirection};
pub use orchestrator::SceneOrchestrator;

/// Named view mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    /// Nothing applied yet.
    #[default]
    None,
    /// Overview grid.
    Home,
    /// Radial parent/child view.
    NodeDetail,
    /// Graph-style title view.
    TitleDetail,
}

impl SceneId {
    /// Return `true` for the two focus views.
    pub fn is_detail(self) -> bool {
        matches!(self, Self::NodeDetail | Self::TitleDetail)
    }

    /// Stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Home => "home",
            Self::NodeDetail => "node_detail",
            Self::TitleDetail => "title_detail",
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity input for one scene request.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "scene", rename_all = "snake_case")]
pub enum SceneData {
    /// Overview grid.
    Home {
        /// Grid entities.
        #[serde(default)]
        roots: Vec<Entity>,
        /// Featured row entities.
        #[serde(default)]
        featured: Vec<Entity>,
        /// Search hits; a non-empty list empties the visual layout.
        #[serde(default)]
        search: Vec<Entity>,
    },
    /// Radial detail view.
    NodeDetail {
        /// Focus entity.
        center: Entity,
        /// Parents, upper half-circle.
        #[serde(default)]
        parents: Vec<Entity>,
        /// Children, lower half-circle.
        #[serde(default)]
        children: Vec<Entity>,
    },
    /// Title view.
    TitleDetail {
        /// Title entity.
        title: Entity,
        /// Members.
        #[serde(default)]
        members: Vec<Entity>,
    },
}

impl SceneData {
    /// Scene this data belongs to.
    pub fn id(&self) -> SceneId {
        match self {
            Self::Home { .. } => SceneId::Home,
            Self::NodeDetail { .. } => SceneId::NodeDetail,
            Self::TitleDetail { .. } => SceneId::TitleDetail,
        }
    }

    /// Compute the layout for this request.
    pub fn layout_with(&self, engine: &LayoutEngine) -> LayoutResult {
        match self {
            Self::Home {
                roots,
                featured,
                search,
            } => engine.home(roots, featured, search),
            Self::NodeDetail {
                center,
                parents,
                children,
            } => engine.detail(center, parents, children),
            Self::TitleDetail { title, members } => engine.title(title, members),
        }
    }

    /// Focus entity of a detail scene.
    pub fn focus(&self) -> Option<&Entity> {
        match self {
            Self::Home { .. } => None,
            Self::NodeDetail { center, .. } => Some(center),
            Self::TitleDetail { title, .. } => Some(title),
        }
    }

    /// Build the request for `scene` from a catalog.
    ///
    /// Detail scenes resolve the focus by id and its relations by name; a title scene takes
    /// the focus entity's children as members.
    pub fn from_catalog(
        catalog: &EntityCatalog,
        scene: SceneId,
        focus: Option<&str>,
    ) -> NodeweaveResult<Self> {
        Ok(match scene {
            SceneId::None | SceneId::Home => Self::Home {
                roots: catalog.roots.clone(),
                featured: catalog.featured.clone(),
                search: catalog.search.clone(),
            },
            SceneId::NodeDetail => {
                let center = focus_entity(catalog, scene, focus)?;
                Self::NodeDetail {
                    parents: catalog.by_names(&center.parents),
                    children: catalog.by_names(&center.children),
                    center: center.clone(),
                }
            }
            SceneId::TitleDetail => {
                let title = focus_entity(catalog, scene, focus)?;
                Self::TitleDetail {
                    members: catalog.by_names(&title.children),
                    title: title.clone(),
                }
            }
        })
    }
}

fn focus_entity<'a>(
    catalog: &'a EntityCatalog,
    scene: SceneId,
    focus: Option<&str>,
) -> NodeweaveResult<&'a Entity> {
    let id = focus
        .ok_or_else(|| NodeweaveError::validation(format!("scene '{scene}' needs a focus entity")))?;
    catalog
        .find(id)
        .ok_or_else(|| NodeweaveError::validation(format!("unknown entity '{id}'")))
}

#[cfg(test)]
#[path = "../tests/unit/scene/data.rs"]
mod tests;
