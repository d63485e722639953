use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{get_config_path, Config};

/// Write the built-in configuration as a starting point for editing.
///
/// Refuses to replace an existing file unless `force` is set. The file is
/// written atomically, so a failed write never leaves a truncated config.
/// Returns the path written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    write_config(&config_path, &Config::default())?;
    Ok(config_path)
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_write_and_reload_default_config() {
        let path = env::temp_dir()
            .join("scorecard_test_init")
            .join("config.yaml");
        let _ = std::fs::remove_file(&path);

        let written = write_default_config(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let path = env::temp_dir().join("scorecard_test_init_existing.yaml");
        std::fs::write(&path, "grading:\n  bands: []\n").unwrap();

        assert!(write_default_config(Some(path.clone()), false).is_err());
        assert!(write_default_config(Some(path.clone()), true).is_ok());
        assert_eq!(load_config(Some(path.clone())).unwrap(), Config::default());

        let _ = std::fs::remove_file(&path);
    }
}
