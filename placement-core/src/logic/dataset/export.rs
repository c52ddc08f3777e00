use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::record::StudentProfile;

/// Write profiles to a JSONL file, one profile per line
/// Returns the number of records written
pub fn to_jsonl(profiles: &[StudentProfile], target_path: &Path) -> io::Result<usize> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Create target file (truncate if exists)
    let mut output = BufWriter::new(File::create(target_path)?);

    for profile in profiles {
        let json = serde_json::to_string(profile)?;
        writeln!(output, "{}", json)?;
    }

    output.flush()?;
    log::info!("Exported {} profiles to {}", profiles.len(), target_path.display());
    Ok(profiles.len())
}
