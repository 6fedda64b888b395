use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn save_archive(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    Ok(())
}
