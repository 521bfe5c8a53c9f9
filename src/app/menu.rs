//! Kontextmenü: explizite Tabelle Menüeintrag → Command-Fabrik.
//!
//! Jeder Eintrag ist eine Funktion, die aus dem Menü-Kontext (Hover,
//! Selektion, Weltposition) einen `EditorCommand` baut oder `None` liefert,
//! wenn der Eintrag in diesem Kontext nichts bewirkt.

use glam::DVec3;
use indexmap::IndexMap;

use super::{EditorCommand, EditorState, SelectionState};
use crate::core::{AlignMode, AnchorType, Axis, CurveModel, ProjectionPlane};

/// Zusatzargumente eines Menüeintrags (z.B. gewählter Typ oder Vorlage).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuArgs {
    /// Vorlage für `insert_shape`
    pub shape: Option<String>,
    /// Typ für `anchor_type`
    pub anchor_type: Option<AnchorType>,
    /// Zielzustand für `closed_curve`
    pub closed: Option<bool>,
}

/// Zeiger-Zustand beim Öffnen des Menüs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuPointer {
    /// Anker unter dem Cursor
    pub hovered_anchor: Option<usize>,
    /// Prim unter dem Cursor (fällt auf das Prim des Hover-Ankers zurück)
    pub hovered_prim: Option<usize>,
    /// Weltposition des Cursors
    pub world_position: DVec3,
    pub args: MenuArgs,
}

/// Read-only Sicht auf den Zustand für die Command-Fabriken.
pub struct MenuContext<'a> {
    pub model: &'a CurveModel,
    pub selection: &'a SelectionState,
    pub draw_mode: bool,
    pub last_shape: Option<&'a str>,
    pub projection: ProjectionPlane,
    pub pointer: MenuPointer,
}

impl<'a> MenuContext<'a> {
    /// Baut den Kontext aus dem Editor-Zustand.
    pub fn from_state(state: &'a EditorState, pointer: MenuPointer) -> Self {
        Self {
            model: &state.model,
            selection: &state.selection,
            draw_mode: state.draw_mode,
            last_shape: state.last_shape.as_deref(),
            projection: state.projection,
            pointer,
        }
    }

    /// Anker, auf die ein Anker-Befehl wirkt.
    ///
    /// Der Hover-Anker allein, wenn er nicht Teil einer Mehrfachauswahl ist;
    /// sonst die Selektion.
    pub fn action_anchors(&self) -> Vec<usize> {
        match self.pointer.hovered_anchor {
            Some(hovered) if !(self.selection.len() > 1 && self.selection.contains(hovered)) => {
                vec![hovered]
            }
            _ => self.selection.indices(),
        }
    }

    /// Prim unter dem Cursor; ungültige Host-Indizes ergeben `None`.
    pub fn hovered_prim(&self) -> Option<usize> {
        match self.pointer.hovered_prim {
            Some(prim) => (prim < self.model.prim_count()).then_some(prim),
            None => self
                .pointer
                .hovered_anchor
                .and_then(|a| self.model.prim_of(a)),
        }
    }
}

/// Command-Fabrik eines Menüeintrags.
pub type MenuAction = fn(&MenuContext) -> Option<EditorCommand>;

/// Registry aller Menüeinträge in Anzeigereihenfolge.
pub struct MenuRegistry {
    items: IndexMap<&'static str, MenuAction>,
}

impl Default for MenuRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuRegistry {
    /// Baut die Tabelle aller Einträge.
    pub fn new() -> Self {
        let mut items: IndexMap<&'static str, MenuAction> = IndexMap::new();

        items.insert("insert_shape", insert_shape);
        items.insert("insert_last_shape", insert_last_shape);
        items.insert("enable_drawing", |ctx| {
            Some(EditorCommand::SetDrawMode {
                enabled: !ctx.draw_mode,
            })
        });
        items.insert("remove_anchor", |ctx| {
            non_empty(ctx.action_anchors()).map(|anchors| EditorCommand::RemoveAnchors { anchors })
        });
        items.insert("rewire_anchor", rewire_anchor);
        items.insert("remove_curve", |ctx| {
            ctx.hovered_prim().map(|prim| EditorCommand::RemovePrim { prim })
        });
        items.insert("select_all", |_| Some(EditorCommand::SelectAll));
        items.insert("select_none", |_| Some(EditorCommand::ClearSelection));
        items.insert("duplicate_curve", |ctx| {
            ctx.hovered_prim().map(|prim| EditorCommand::DuplicatePrim {
                prim,
                target: ctx.pointer.world_position,
            })
        });
        items.insert("select_curve", |ctx| select_curve(ctx, false));
        items.insert("add_curve_to_selection", |ctx| select_curve(ctx, true));
        items.insert("closed_curve", closed_curve);
        items.insert("reverse_curve", |ctx| {
            ctx.hovered_prim().map(|prim| EditorCommand::ReversePrim { prim })
        });
        items.insert("reset_selection_transform", |_| {
            Some(EditorCommand::ResetSelectionTransform)
        });
        items.insert("anchor_type", |ctx| {
            let anchor_type = ctx.pointer.args.anchor_type?;
            set_type(ctx, anchor_type)
        });
        items.insert("auto_smooth_anchor", |ctx| set_type(ctx, AnchorType::Smooth));

        items.insert("align_x_min", |ctx| align(ctx, Axis::X, AlignMode::Min));
        items.insert("align_x_max", |ctx| align(ctx, Axis::X, AlignMode::Max));
        items.insert("align_x_avrg", |ctx| align(ctx, Axis::X, AlignMode::Average));
        items.insert("align_y_min", |ctx| align(ctx, Axis::Y, AlignMode::Min));
        items.insert("align_y_max", |ctx| align(ctx, Axis::Y, AlignMode::Max));
        items.insert("align_y_avrg", |ctx| align(ctx, Axis::Y, AlignMode::Average));
        items.insert("align_z_min", |ctx| align(ctx, Axis::Z, AlignMode::Min));
        items.insert("align_z_max", |ctx| align(ctx, Axis::Z, AlignMode::Max));
        items.insert("align_z_avrg", |ctx| align(ctx, Axis::Z, AlignMode::Average));

        items.insert("straighten", |ctx| {
            let anchors = ctx.action_anchors();
            (anchors.len() >= 2).then_some(EditorCommand::StraightenAnchors { anchors })
        });
        items.insert("anchor_proj_xy", |ctx| project(ctx, DVec3::Z));
        items.insert("anchor_proj_xz", |ctx| project(ctx, DVec3::Y));
        items.insert("anchor_proj_yz", |ctx| project(ctx, DVec3::X));
        items.insert("anchor_proj_cp", |ctx| project(ctx, ctx.projection.normal()));

        Self { items }
    }

    /// Namen aller Einträge.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.items.keys().copied()
    }

    /// Prüft, ob ein Eintrag existiert.
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Baut den Command eines Eintrags.
    pub fn dispatch(&self, name: &str, ctx: &MenuContext) -> Option<EditorCommand> {
        let Some(action) = self.items.get(name) else {
            log::warn!("Unbekannter Menüeintrag: {}", name);
            return None;
        };
        let command = action(ctx);
        if command.is_none() {
            log::debug!("Menüeintrag {} ohne Wirkung im aktuellen Kontext", name);
        }
        command
    }
}

// ── Command-Fabriken ────────────────────────────────────────────────

fn non_empty(anchors: Vec<usize>) -> Option<Vec<usize>> {
    (!anchors.is_empty()).then_some(anchors)
}

fn insert_shape(ctx: &MenuContext) -> Option<EditorCommand> {
    let name = ctx.pointer.args.shape.clone()?;
    Some(EditorCommand::InsertShape {
        name,
        target: ctx.pointer.world_position,
        normal: None,
    })
}

fn insert_last_shape(ctx: &MenuContext) -> Option<EditorCommand> {
    ctx.last_shape?;
    Some(EditorCommand::InsertLastShape {
        target: ctx.pointer.world_position,
        normal: None,
    })
}

fn rewire_anchor(ctx: &MenuContext) -> Option<EditorCommand> {
    match ctx.action_anchors().as_slice() {
        [anchor] => Some(EditorCommand::RewireAnchor { anchor: *anchor }),
        _ => None,
    }
}

fn select_curve(ctx: &MenuContext, additive: bool) -> Option<EditorCommand> {
    ctx.hovered_prim()
        .map(|prim| EditorCommand::SelectPrim { prim, additive })
}

fn closed_curve(ctx: &MenuContext) -> Option<EditorCommand> {
    let prim = ctx.hovered_prim()?;
    let closed = ctx
        .pointer
        .args
        .closed
        .unwrap_or(!ctx.model.prim(prim).is_closed);
    Some(EditorCommand::SetPrimClosed { prim, closed })
}

fn set_type(ctx: &MenuContext, anchor_type: AnchorType) -> Option<EditorCommand> {
    non_empty(ctx.action_anchors()).map(|anchors| EditorCommand::SetAnchorType {
        anchors,
        anchor_type,
    })
}

fn align(ctx: &MenuContext, axis: Axis, mode: AlignMode) -> Option<EditorCommand> {
    non_empty(ctx.action_anchors()).map(|anchors| EditorCommand::AlignAnchors {
        anchors,
        axis,
        mode,
    })
}

fn project(ctx: &MenuContext, normal: DVec3) -> Option<EditorCommand> {
    non_empty(ctx.action_anchors()).map(|anchors| EditorCommand::ProjectAnchors { anchors, normal })
}
