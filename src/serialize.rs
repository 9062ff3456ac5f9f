/*!
 * Output serialization
 *
 * Turns merged text into a downloadable artifact: bytes, final
 * filename and MIME type. Non-PDF formats are a byte-transparent wrap
 * of the merged text; no well-formedness check is performed for the
 * markup formats. The PDF target is laid out in `pdf`.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::ensure;
use crate::error::{Result, ResultExt};
use crate::pdf;

/// A serialized merge result ready to hand to the save collaborator
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Raw artifact bytes
    pub bytes: Vec<u8>,
    /// Final filename including extension
    pub filename: String,
    /// MIME type of the artifact
    pub mime_type: &'static str,
}

/// Serialize merged text into the target container format.
///
/// Failure is scoped to this attempt: no partial artifact is ever
/// returned.
pub fn serialize(merged: &str, format: OutputFormat, base_filename: &str) -> Result<Artifact> {
    ensure!(
        !base_filename.trim().is_empty(),
        Serialization,
        "output base name is empty"
    );

    let bytes = match format {
        OutputFormat::Pdf => pdf::render_pdf(merged, base_filename)?,
        _ => merged.as_bytes().to_vec(),
    };

    Ok(Artifact {
        bytes,
        filename: format!("{}.{}", base_filename, format.extension()),
        mime_type: format.mime_type(),
    })
}

/// Write an artifact into the given directory and return its path
pub fn save_artifact(artifact: &Artifact, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
