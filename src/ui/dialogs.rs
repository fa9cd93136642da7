//! Native Datei-Dialoge (rfd).

use std::path::Path;

/// Konvertiert einen Pfad in einen UI-tauglichen String.
fn path_to_ui_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Speicherdialog für das Export-Artefakt.
pub fn pick_export_save_path(suggested_filename: &str) -> Option<String> {
    rfd::FileDialog::new()
        .add_filter("Map Export", &["zip"])
        .set_file_name(suggested_filename)
        .save_file()
        .map(|path| path_to_ui_string(&path))
}
