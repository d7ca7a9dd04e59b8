//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the generated site
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        fs::create_dir_all(folio.public_dir.join("blog")).unwrap();
        fs::write(folio.public_dir.join("index.html"), "<html>").unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());

        // Nothing to clean is fine
        run(&folio).unwrap();
    }
}
