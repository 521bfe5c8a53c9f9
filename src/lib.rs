//! Pen Curve Editor Library.
//! Host-unabhängiges Bezier-Kurvenmodell mit Editor-Layer, als Library
//! exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{
    EditorCommand, EditorController, EditorState, MenuArgs, MenuPointer, MenuRegistry,
    SelectionState,
};
pub use core::{
    AlignMode, Anchor, AnchorType, AttributeType, AttributeValue, Axis, ControlPoint, CurveModel,
    CustomShape, CustomShapeAnchor, ExportedGeometry, Handle, HandleMove, Prim, ProjectionPlane,
    SelectionBox, PSCALE_ROLL_ATTRIBUTE,
};
pub use core::{AnchorMatch, AnchorSpatialIndex};
pub use json::{export_document, parse_curve_document, write_curve_document};
pub use shared::EditorOptions;
