// src/xml.rs

//! XML declaration fixup
//!
//! Configuration blobs pulled off a device sometimes carry their
//! `<?xml version…?>` declaration somewhere below the first line,
//! which downstream XML consumers reject. This moves the declaration
//! back to the top, in place.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Move a misplaced XML declaration to the first line of a file
///
/// Returns `true` when the file was rewritten, `false` when the
/// declaration was already first or absent.
pub fn promote_declaration(path: &Path) -> Result<bool> {
    let text = fs::read_to_string(path).map_err(|source| Error::XmlRewrite {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines: Vec<&str> = text.lines().collect();
    let Some(position) = lines.iter().position(|line| line.contains("<?xml version")) else {
        debug!("no XML declaration in {}", path.display());
        return Ok(false);
    };
    if position == 0 {
        return Ok(false);
    }

    let declaration = lines.remove(position);
    lines.insert(0, declaration);

    let mut fixed = lines.join("\n");
    if text.ends_with('\n') {
        fixed.push('\n');
    }
    fs::write(path, fixed).map_err(|source| Error::XmlRewrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
