//! Core-Domänentypen: Anker, Attribute, Prims, CurveModel, Export, Spatial-Index.

pub mod anchor;
pub mod attribute;
pub mod curve_model;
/// Vorlagen und Projektionsebenen
pub mod custom_shape;
pub mod export;
pub mod prim;
pub mod selection_box;
pub mod spatial;

pub use anchor::{Anchor, AnchorType, ControlPoint, Handle, HandleMove};
pub use attribute::{AttributeType, AttributeValue, PSCALE_ROLL_ATTRIBUTE};
pub use curve_model::{AlignMode, Arrowhead, Axis, CurveModel, ModelSettings};
pub use custom_shape::{CustomShape, CustomShapeAnchor, ProjectionPlane};
pub use export::{ExportedGeometry, ExportedPoint, ExportedPrim};
pub use prim::Prim;
pub use selection_box::SelectionBox;
pub use spatial::{AnchorMatch, AnchorSpatialIndex};
