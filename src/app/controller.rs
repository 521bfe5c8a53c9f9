//! Editor Controller für zentrale Command-Verarbeitung.

use super::menu::{MenuContext, MenuPointer, MenuRegistry};
use super::{EditorCommand, EditorState};

/// Orchestriert Host-Events und Handler auf den EditorState.
#[derive(Default)]
pub struct EditorController {
    menu: MenuRegistry,
}

impl EditorController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self {
            menu: MenuRegistry::new(),
        }
    }

    /// Registry der Kontextmenü-Einträge.
    pub fn menu(&self) -> &MenuRegistry {
        &self.menu
    }

    /// Führt einen Kontextmenü-Eintrag aus.
    ///
    /// Gibt `true` zurück, wenn der Eintrag einen Command ausgelöst hat.
    pub fn handle_menu_item(
        &mut self,
        state: &mut EditorState,
        item: &str,
        pointer: MenuPointer,
    ) -> anyhow::Result<bool> {
        let command = {
            let ctx = MenuContext::from_state(state, pointer);
            self.menu.dispatch(item, &ctx)
        };
        match command {
            Some(command) => {
                self.handle_command(state, command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Führt mutierende Commands auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: EditorCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            EditorCommand::LoadDocument { text } => handlers::file_io::load_document(state, &text)?,
            EditorCommand::LoadFile { path } => handlers::file_io::load_file(state, &path)?,
            EditorCommand::SaveFile { path } => handlers::file_io::save_file(state, path)?,
            EditorCommand::ExportFile { path } => handlers::file_io::export_file(state, &path)?,
            EditorCommand::ApplyOptions { options } => {
                handlers::file_io::apply_options(state, options)
            }

            // === Zeichnen & Kurven ===
            EditorCommand::SetDrawMode { enabled } => handlers::curve::set_draw_mode(state, enabled),
            EditorCommand::AppendAnchor { position } => {
                handlers::curve::append_anchor(state, position);
            }
            EditorCommand::InsertAnchorOnCurve { prim, u } => {
                handlers::curve::insert_anchor_on_curve(state, prim, u)?
            }
            EditorCommand::RemovePrim { prim } => handlers::curve::remove_prim(state, prim)?,
            EditorCommand::ReversePrim { prim } => handlers::curve::reverse_prim(state, prim)?,
            EditorCommand::RewireAnchor { anchor } => handlers::curve::rewire_anchor(state, anchor)?,
            EditorCommand::SetPrimClosed { prim, closed } => {
                handlers::curve::set_prim_closed(state, prim, closed)?
            }
            EditorCommand::RenamePrim { prim, name } => {
                handlers::curve::rename_prim(state, prim, name)?
            }
            EditorCommand::DuplicatePrim { prim, target } => {
                handlers::curve::duplicate_prim(state, prim, target)?
            }
            EditorCommand::RegisterShape { name, shape } => {
                handlers::curve::register_shape(state, name, shape)?
            }
            EditorCommand::InsertShape {
                name,
                target,
                normal,
            } => handlers::curve::insert_shape(state, &name, target, normal)?,
            EditorCommand::InsertLastShape { target, normal } => {
                handlers::curve::insert_last_shape(state, target, normal)?
            }
            EditorCommand::SetProjectionPlane { plane } => {
                handlers::curve::set_projection_plane(state, plane)
            }

            // === Anker ===
            EditorCommand::BeginDrag => handlers::anchor::begin_drag(state),
            EditorCommand::MoveAnchor { anchor, position } => {
                handlers::anchor::move_anchor(state, anchor, position)?
            }
            EditorCommand::MoveSelected { delta } => handlers::anchor::move_selected(state, delta),
            EditorCommand::MoveControl {
                anchor,
                handle,
                position,
            } => handlers::anchor::move_control(state, anchor, handle, position)?,
            EditorCommand::SetHandleMove { mode } => handlers::anchor::set_handle_move(state, mode),
            EditorCommand::SetAnchorType {
                anchors,
                anchor_type,
            } => handlers::anchor::set_anchor_type(state, &anchors, anchor_type)?,
            EditorCommand::ToggleAnchorSmoothness { anchor } => {
                handlers::anchor::toggle_smoothness(state, anchor)?
            }
            EditorCommand::SetTag { anchor, tag } => handlers::anchor::set_tag(state, anchor, tag)?,
            EditorCommand::RemoveAnchors { anchors } => {
                handlers::anchor::remove_anchors(state, &anchors)?
            }
            EditorCommand::StraightenAnchors { anchors } => {
                handlers::anchor::straighten(state, &anchors)?
            }
            EditorCommand::AlignAnchors {
                anchors,
                axis,
                mode,
            } => handlers::anchor::align(state, &anchors, axis, mode)?,
            EditorCommand::ProjectAnchors { anchors, normal } => {
                handlers::anchor::project(state, &anchors, normal)?
            }

            // === Selektion ===
            EditorCommand::SelectAll => handlers::selection::select_all(state),
            EditorCommand::ClearSelection => handlers::selection::clear(state),
            EditorCommand::SelectAnchors { anchors, additive } => {
                handlers::selection::select_anchors(state, &anchors, additive)?
            }
            EditorCommand::SelectPrim { prim, additive } => {
                handlers::selection::select_prim(state, prim, additive)?
            }
            EditorCommand::PickAnchor { position, additive } => {
                handlers::selection::pick_anchor(state, position, additive)
            }
            EditorCommand::SelectInBox { min, max, additive } => {
                handlers::selection::select_in_box(state, min, max, additive)
            }
            EditorCommand::ResetSelectionTransform => {
                handlers::anchor::reset_selection_transform(state)
            }
            EditorCommand::TransformSelection {
                center,
                size,
                rotation_deg,
            } => handlers::anchor::transform_selection(state, center, size, rotation_deg),

            // === Attribute ===
            EditorCommand::AddAttribute { name, ty } => {
                handlers::attributes::add_attribute(state, &name, ty)
            }
            EditorCommand::RemoveAttribute { name } => {
                handlers::attributes::remove_attribute(state, &name)
            }
            EditorCommand::SyncAttributes { defs } => {
                handlers::attributes::sync_attributes(state, &defs)
            }
            EditorCommand::SetAttributeValue {
                anchors,
                name,
                value,
            } => handlers::attributes::set_attribute_value(state, &anchors, &name, value)?,

            // === History ===
            EditorCommand::Undo => handlers::history::undo(state),
            EditorCommand::Redo => handlers::history::redo(state),
        }

        Ok(())
    }
}
