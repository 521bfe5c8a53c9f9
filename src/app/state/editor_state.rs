use crate::app::cache::PresentationCache;
use crate::app::history::{EditHistory, Snapshot};
use crate::app::CommandLog;
use crate::core::{CurveModel, CustomShape, HandleMove, ProjectionPlane, SelectionBox};
use crate::shared::EditorOptions;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::SelectionState;

/// Hauptzustand des Editors
pub struct EditorState {
    /// Aktuelles Kurvenmodell (Arc für O(1)-Snapshots)
    pub model: Arc<CurveModel>,
    /// Selection-State
    pub selection: SelectionState,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Registrierte Vorlagen zum Stempeln
    pub custom_shapes: IndexMap<String, CustomShape>,
    /// Zuletzt gestempelte Vorlage
    pub last_shape: Option<String>,
    /// Zeichenwerkzeug aktiv
    pub draw_mode: bool,
    /// Modus beim Ziehen von Handles
    pub handle_move: HandleMove,
    /// Orientierung eingefügter Vorlagen ohne Normale
    pub projection: ProjectionPlane,
    /// Transformations-Box der Mehrfachauswahl
    pub selection_box: Option<SelectionBox>,
    /// Darstellungs-Caches
    pub caches: PresentationCache,
    /// Pfad des geladenen Dokuments (für Save ohne Pfad)
    pub current_file_path: Option<PathBuf>,
}

impl EditorState {
    /// Erstellt einen leeren Editor-Zustand mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren Editor-Zustand mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            model: Arc::new(CurveModel::with_settings(options.model_settings())),
            selection: SelectionState::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            command_log: CommandLog::new(),
            handle_move: options.handle_move(),
            options,
            custom_shapes: IndexMap::new(),
            last_shape: None,
            draw_mode: false,
            projection: ProjectionPlane::default(),
            selection_box: None,
            caches: PresentationCache::default(),
            current_file_path: None,
        }
    }

    /// Mutabler Zugriff auf das Modell (CoW: klont nur, wenn ein Snapshot es teilt).
    #[inline]
    pub fn model_mut(&mut self) -> &mut CurveModel {
        Arc::make_mut(&mut self.model)
    }

    /// Gibt die Anzahl der Anker zurück (für UI-Anzeige)
    pub fn anchor_count(&self) -> usize {
        self.model.anchor_count()
    }

    /// Gibt die Anzahl der Prims zurück (für UI-Anzeige)
    pub fn prim_count(&self) -> usize {
        self.model.prim_count()
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Ersetzt Modell und Selektion (Laden); History und Caches werden verworfen.
    pub fn replace_document(&mut self, mut model: CurveModel, selection: SelectionState) {
        model.set_settings(self.options.model_settings());
        self.model = Arc::new(model);
        self.selection = selection;
        self.selection_box = None;
        self.history.clear();
        self.caches.invalidate();
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
