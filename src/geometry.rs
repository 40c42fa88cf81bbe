//! Construction-step vertices for a geometry design graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexCategory {
    Geometry,
    Variable,
}

/// One step of a construction history: a workplane, a point, a polyline, an
/// extrusion, a named variable.
///
/// `editing` marks a step that is currently open in an editor, `implicit`
/// a step created as a by-product of another (such as the points of a
/// polyline), and `proto` a step that is still being drawn and has not been
/// committed yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeomVertex {
    pub id: String,
    pub category: VertexCategory,
    #[serde(default)]
    pub editing: bool,
    #[serde(default)]
    pub implicit: bool,
    #[serde(default)]
    pub proto: bool,
    #[serde(default)]
    pub parameters: Value,
}

impl GeomVertex {
    pub fn geometry(id: impl Into<String>) -> Self {
        Self::with_category(id, VertexCategory::Geometry)
    }

    pub fn variable(id: impl Into<String>) -> Self {
        Self::with_category(id, VertexCategory::Variable)
    }

    fn with_category(id: impl Into<String>, category: VertexCategory) -> Self {
        Self {
            id: id.into(),
            category,
            editing: false,
            implicit: false,
            proto: false,
            parameters: Value::Null,
        }
    }

    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn proto(mut self, proto: bool) -> Self {
        self.proto = proto;
        self
    }

    /// A committed, explicit step that is open for editing.
    pub fn is_user_editing(&self) -> bool {
        !self.proto && self.editing && !self.implicit
    }
}

impl Vertex for GeomVertex {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// What a workplane view does with its persistent height when a vertex is
/// replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTransition {
    /// The replacement opened an edit: adopt its workplane height and
    /// remember the current one.
    Push,
    /// The original was being edited and the replacement closed it: restore
    /// the remembered height.
    Pop,
    /// Re-render only.
    Refresh,
}

pub fn edit_transition(original: &GeomVertex, replacement: &GeomVertex) -> EditTransition {
    if replacement.category != VertexCategory::Geometry {
        return EditTransition::Refresh;
    }
    if replacement.is_user_editing() {
        EditTransition::Push
    } else if original.is_user_editing() {
        EditTransition::Pop
    } else {
        EditTransition::Refresh
    }
}
