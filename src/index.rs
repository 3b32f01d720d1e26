use std::path::Path;

use log::debug;

use crate::error::BuildError;

pub(crate) const START_MARKER: &str = "<!-- AUTO:START -->";
pub(crate) const END_MARKER: &str = "<!-- AUTO:END -->";

/// Replace the text between the first start marker and the first end marker after it.
///
/// Everything outside the markers is kept byte for byte, including any later
/// duplicate markers.
pub(crate) fn splice_markers(file: &Path, html: &str, blocks: &[String]) -> Result<String, BuildError> {
    let missing = || BuildError::MissingMarkers {
        file: file.to_path_buf(),
    };
    let start = html.find(START_MARKER).ok_or_else(missing)? + START_MARKER.len();
    let end = start + html[start..].find(END_MARKER).ok_or_else(missing)?;

    let before = &html[..start];
    let after = &html[end..];
    Ok(format!("{before}\n{}\n{after}", blocks.join("\n")))
}

/// Rewrite the managed region of an index file with `blocks`.
pub(crate) fn update_index(index_file: &Path, blocks: &[String]) -> Result<(), BuildError> {
    let html = std::fs::read_to_string(index_file).map_err(|e| BuildError::io(index_file, e))?;
    let spliced = splice_markers(index_file, &html, blocks)?;
    debug!("splicing {} entries into {index_file:?}", blocks.len());
    std::fs::write(index_file, spliced).map_err(|e| BuildError::io(index_file, e))
}
