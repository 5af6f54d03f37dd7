//! Implementation of `ratp-importer clean`.

use std::path::PathBuf;

use anyhow::Result;

use crate::util::fs::remove_dir_all_if_exists;
use crate::util::GlobalContext;

/// Remove the build directory, and with `all` the raw and extract
/// directories too. Returns the directories that existed and were removed.
pub fn clean(ctx: &GlobalContext, all: bool) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![ctx.build_dir()];
    if all {
        dirs.push(ctx.extract_dir());
        dirs.push(ctx.raw_dir());
    }

    let mut removed = Vec::new();
    for dir in dirs {
        if dir.exists() {
            remove_dir_all_if_exists(&dir)?;
            tracing::debug!("Removed {}", dir.display());
            removed.push(dir);
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> (TempDir, GlobalContext) {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_config(tmp.path().to_path_buf(), Default::default());
        for dir in [ctx.raw_dir(), ctx.extract_dir(), ctx.build_dir()] {
            std::fs::create_dir_all(&dir).unwrap();
        }
        (tmp, ctx)
    }

    #[test]
    fn test_clean_build_only() {
        let (_tmp, ctx) = layout();
        let removed = clean(&ctx, false).unwrap();
        assert_eq!(removed, vec![ctx.build_dir()]);
        assert!(ctx.raw_dir().exists());
        assert!(ctx.extract_dir().exists());
    }

    #[test]
    fn test_clean_all() {
        let (_tmp, ctx) = layout();
        let removed = clean(&ctx, true).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(!ctx.raw_dir().exists());
        assert!(!ctx.extract_dir().exists());
        assert!(!ctx.build_dir().exists());

        assert!(clean(&ctx, true).unwrap().is_empty());
    }
}
