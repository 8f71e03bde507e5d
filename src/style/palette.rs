use crate::style::color::Color;

/// Semantic role of a visual node within a scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Focus of a detail view.
    Center,
    /// Parent satellite of a detail view.
    Parent,
    /// Child satellite of a detail view.
    Child,
    /// Top-level entity on the home grid.
    #[default]
    Root,
    /// Highlighted entity on the home featured row.
    Featured,
    /// Search hit.
    Search,
    /// Node that only exists inside a preview sandbox.
    Preview,
    /// Focus of a title view.
    Title,
    /// Member of a title view graph.
    Member,
    /// Knowledge-domain portal node.
    Domain,
}

/// Fill treatment drawn inside a node body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPattern {
    /// Single flat fill.
    #[default]
    Solid,
    /// Secondary ring inset inside the body.
    Ring,
    /// Secondary core disc at the center.
    Core,
}

/// Colors and fill treatment for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisualStyle {
    /// Body fill.
    pub primary: Color,
    /// Pattern accent.
    pub secondary: Color,
    /// Halo color.
    pub glow: Color,
    /// Outline color.
    pub rim: Color,
    /// Fill treatment.
    #[serde(default)]
    pub pattern: FillPattern,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self::for_type(NodeType::Root)
    }
}

impl VisualStyle {
    /// Default style for a node role.
    pub fn for_type(node_type: NodeType) -> Self {
        let (primary, secondary, glow, pattern) = match node_type {
            NodeType::Center => (
                Color::rgb(0x4f, 0x8c, 0xff),
                Color::rgb(0xc8, 0xdc, 0xff),
                Color::rgb(0x7a, 0xa8, 0xff),
                FillPattern::Ring,
            ),
            NodeType::Parent => (
                Color::rgb(0x9b, 0x6b, 0xff),
                Color::rgb(0xe0, 0xd2, 0xff),
                Color::rgb(0xb4, 0x94, 0xff),
                FillPattern::Solid,
            ),
            NodeType::Child => (
                Color::rgb(0x2e, 0xc4, 0x9a),
                Color::rgb(0xc2, 0xf2, 0xe2),
                Color::rgb(0x5c, 0xe0, 0xb8),
                FillPattern::Solid,
            ),
            NodeType::Root => (
                Color::rgb(0x3a, 0x6e, 0xd8),
                Color::rgb(0xa9, 0xc6, 0xff),
                Color::rgb(0x5a, 0x8e, 0xf0),
                FillPattern::Core,
            ),
            NodeType::Featured => (
                Color::rgb(0xf2, 0xa9, 0x3b),
                Color::rgb(0xff, 0xe2, 0xb0),
                Color::rgb(0xff, 0xc4, 0x6a),
                FillPattern::Core,
            ),
            NodeType::Search => (
                Color::rgb(0x8a, 0x94, 0xa6),
                Color::rgb(0xdd, 0xe2, 0xea),
                Color::rgb(0xa8, 0xb0, 0xc0),
                FillPattern::Solid,
            ),
            NodeType::Preview => (
                Color::rgb(0xff, 0x6b, 0x9a),
                Color::rgb(0xff, 0xd0, 0xe0),
                Color::rgb(0xff, 0x8f, 0xb4),
                FillPattern::Ring,
            ),
            NodeType::Title => (
                Color::rgb(0xe8, 0x5d, 0x4a),
                Color::rgb(0xff, 0xd5, 0xcc),
                Color::rgb(0xff, 0x85, 0x70),
                FillPattern::Ring,
            ),
            NodeType::Member => (
                Color::rgb(0x5b, 0x9b, 0xb5),
                Color::rgb(0xcf, 0xe8, 0xf2),
                Color::rgb(0x7e, 0xbc, 0xd4),
                FillPattern::Solid,
            ),
            NodeType::Domain => (
                Color::rgb(0x1f, 0x2a, 0x44),
                Color::rgb(0x6c, 0x84, 0xc0),
                Color::rgb(0x44, 0x5c, 0x98),
                FillPattern::Ring,
            ),
        };
        Self {
            primary,
            secondary,
            glow,
            rim: Color::rgba(255, 255, 255, 200),
            pattern,
        }
    }
}

/// Kind of relation an edge encodes. Drives its color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Satellite is a parent of the center.
    Parent,
    /// Satellite is a child of the center.
    Child,
    /// Title-to-member or member-to-member link.
    Member,
    /// Unclassified link.
    #[default]
    Link,
}

impl RelationKind {
    /// Stroke color used for this relation.
    pub fn color(self) -> Color {
        match self {
            Self::Parent => Color::rgba(0xb4, 0x94, 0xff, 200),
            Self::Child => Color::rgba(0x5c, 0xe0, 0xb8, 200),
            Self::Member => Color::rgba(0x7e, 0xbc, 0xd4, 180),
            Self::Link => Color::rgba(0xa0, 0xa8, 0xb8, 160),
        }
    }
}
