//! Pen Curve Editor.
//!
//! Kommandozeilen-Host für das Kurvenmodell: lädt ein Kurven-Dokument,
//! wendet optionale Bearbeitungen an und schreibt Dokument oder Export.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use pen_curve_editor::{EditorCommand, EditorController, EditorOptions, EditorState};

#[derive(Parser)]
#[command(version, about = "Pen Curve Editor: Bezier-Kurven-Dokumente prüfen und exportieren")]
struct Cli {
    /// Kurven-Dokument (JSON)
    document: PathBuf,

    /// Export-Snapshot als JSON schreiben
    #[arg(long, value_name = "OUT")]
    export: Option<PathBuf>,

    /// Alle Prims begradigen
    #[arg(long)]
    straighten_all: bool,

    /// Bearbeitetes Dokument speichern
    #[arg(long, value_name = "OUT")]
    save: Option<PathBuf>,

    /// Optionen-Datei (TOML), Standard: neben der Binary
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Pen Curve Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("Abbruch: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&config_path);

    let mut state = EditorState::with_options(options);
    let mut controller = EditorController::new();

    controller.handle_command(
        &mut state,
        EditorCommand::LoadFile {
            path: cli.document,
        },
    )?;

    if cli.straighten_all {
        let anchors: Vec<usize> = (0..state.anchor_count()).collect();
        controller.handle_command(&mut state, EditorCommand::StraightenAnchors { anchors })?;
    }

    let geometry = state.caches.geometry.get(&state.model);
    log::info!(
        "{} Anker, {} Prims, {} Attribute, {} exportierte Punkte",
        state.anchor_count(),
        state.prim_count(),
        geometry.attribute_names.len(),
        geometry.point_count()
    );
    for prim in &geometry.prims {
        log::info!(
            "  Prim {} '{}': {} Punkte{}",
            prim.source_prim,
            prim.name,
            prim.points.len(),
            if prim.is_closed { ", geschlossen" } else { "" }
        );
    }

    if let Some(path) = cli.save {
        controller.handle_command(&mut state, EditorCommand::SaveFile { path: Some(path) })?;
    }
    if let Some(path) = cli.export {
        controller.handle_command(&mut state, EditorCommand::ExportFile { path })?;
    }
    Ok(())
}
