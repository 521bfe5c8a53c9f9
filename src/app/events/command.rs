use crate::core::{
    AlignMode, AnchorType, AttributeType, AttributeValue, Axis, CustomShape, Handle, HandleMove,
    ProjectionPlane,
};
use crate::shared::EditorOptions;
use glam::DVec3;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    // === Datei-I/O ===
    /// Dokument aus einem JSON-String laden (Host-Parameter)
    LoadDocument { text: String },
    /// Dokument aus einer Datei laden
    LoadFile { path: PathBuf },
    /// Dokument speichern (`None` = aktueller Pfad)
    SaveFile { path: Option<PathBuf> },
    /// Export-Snapshot als JSON schreiben
    ExportFile { path: PathBuf },
    /// Laufzeit-Optionen übernehmen
    ApplyOptions { options: EditorOptions },

    // === Zeichnen & Kurven ===
    /// Zeichenmodus setzen
    SetDrawMode { enabled: bool },
    /// Zeichenwerkzeug: Anker an Weltposition anhängen
    AppendAnchor { position: DVec3 },
    /// Anker auf der Kurve einfügen (Prim-Parameter `u`)
    InsertAnchorOnCurve { prim: usize, u: f64 },
    /// Prim samt Ankern entfernen
    RemovePrim { prim: usize },
    /// Prim umkehren
    ReversePrim { prim: usize },
    /// Anker zum Startanker seines Prims machen
    RewireAnchor { anchor: usize },
    /// Prim öffnen/schließen
    SetPrimClosed { prim: usize, closed: bool },
    /// Prim umbenennen
    RenamePrim { prim: usize, name: String },
    /// Prim an Zielposition duplizieren
    DuplicatePrim { prim: usize, target: DVec3 },
    /// Vorlage registrieren
    RegisterShape { name: String, shape: CustomShape },
    /// Registrierte Vorlage stempeln
    InsertShape {
        name: String,
        target: DVec3,
        normal: Option<DVec3>,
    },
    /// Zuletzt gestempelte Vorlage erneut stempeln
    InsertLastShape { target: DVec3, normal: Option<DVec3> },
    /// Projektionsebene für Vorlagen setzen
    SetProjectionPlane { plane: ProjectionPlane },

    // === Anker ===
    /// Beginn eines Drags (nimmt Undo-Snapshot auf)
    BeginDrag,
    /// Anker starr an neue Position verschieben
    MoveAnchor { anchor: usize, position: DVec3 },
    /// Alle selektierten Anker um ein Delta verschieben
    MoveSelected { delta: DVec3 },
    /// Handle eines Ankers verschieben (aktueller Handle-Modus)
    MoveControl {
        anchor: usize,
        handle: Handle,
        position: DVec3,
    },
    /// Handle-Modus setzen
    SetHandleMove { mode: HandleMove },
    /// Anker-Typ setzen
    SetAnchorType {
        anchors: Vec<usize>,
        anchor_type: AnchorType,
    },
    /// Corner ↔ Smooth umschalten
    ToggleAnchorSmoothness { anchor: usize },
    /// Label eines Ankers setzen
    SetTag { anchor: usize, tag: String },
    /// Anker entfernen
    RemoveAnchors { anchors: Vec<usize> },
    /// Anker begradigen
    StraightenAnchors { anchors: Vec<usize> },
    /// Anker an einer Achse ausrichten
    AlignAnchors {
        anchors: Vec<usize>,
        axis: Axis,
        mode: AlignMode,
    },
    /// Anker auf Ebene durch den Ursprung projizieren
    ProjectAnchors { anchors: Vec<usize>, normal: DVec3 },

    // === Selektion ===
    /// Alle Anker selektieren
    SelectAll,
    /// Selektion aufheben
    ClearSelection,
    /// Anker selektieren
    SelectAnchors { anchors: Vec<usize>, additive: bool },
    /// Alle Anker eines Prims selektieren
    SelectPrim { prim: usize, additive: bool },
    /// Nächsten Anker im Pick-Radius selektieren
    PickAnchor { position: DVec3, additive: bool },
    /// Anker innerhalb einer achsenparallelen Box selektieren
    SelectInBox {
        min: DVec3,
        max: DVec3,
        additive: bool,
    },
    /// Selektions-Box neu aufbauen
    ResetSelectionTransform,
    /// Selektions-Box transformieren (Mitte, Größe, Euler-Grad)
    TransformSelection {
        center: DVec3,
        size: DVec3,
        rotation_deg: [f64; 3],
    },

    // === Attribute ===
    /// Attribut hinzufügen
    AddAttribute { name: String, ty: AttributeType },
    /// Attribut entfernen
    RemoveAttribute { name: String },
    /// Attribut-Definitionen abgleichen
    SyncAttributes { defs: Vec<(String, AttributeType)> },
    /// Attributwert auf mehreren Ankern setzen
    SetAttributeValue {
        anchors: Vec<usize>,
        name: String,
        value: AttributeValue,
    },

    // === History ===
    /// Letzte Operation rückgängig machen
    Undo,
    /// Rückgängig gemachte Operation wiederholen
    Redo,
}
