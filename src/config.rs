use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TodolistConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("todolist.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".todolist").join("todolist.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TodolistConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TodolistConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TodolistConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database location: explicit flag, then config file, then the default under `base`
pub fn resolve_database_path(
    flag: Option<&Path>,
    config: Option<&TodolistConfig>,
    base: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_database_path_in(base))
}

/// Resolve the database for one invocation. The config file is only read when no
/// flag names the database and `skip_config` is unset, so a broken file never
/// blocks `--database` or `init --force`.
pub fn resolve_database(
    flag: Option<&Path>,
    config_path: &Path,
    base: &Path,
    skip_config: bool,
) -> anyhow::Result<PathBuf> {
    if flag.is_some() || skip_config {
        return Ok(resolve_database_path(flag, None, base));
    }
    let loaded = load_config(Some(config_path)).map_err(|e| {
        anyhow::anyhow!("failed to read config {}: {} (fix it or run `todolist init --force`)", config_path.display(), e)
    })?;
    Ok(resolve_database_path(None, loaded.as_ref(), base))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todolist.toml");
        let config = TodolistConfig { database: Some("lists.db".to_string()) };

        write_config(&path, &config, false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("lists.db"));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &TodolistConfig::default(), true).unwrap();
        assert!(load_config(Some(&path)).unwrap().unwrap().database.is_none());
    }

    #[test]
    fn test_resolve_database_path_precedence() {
        let base = Path::new("/work");
        let config = TodolistConfig { database: Some("from-config.db".to_string()) };

        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config), base),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            resolve_database_path(None, Some(&config), base),
            PathBuf::from("from-config.db")
        );
        assert_eq!(
            resolve_database_path(None, None, base),
            PathBuf::from("/work/.todolist/todolist.db")
        );
    }

    #[test]
    fn test_broken_config_does_not_block_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todolist.toml");
        std::fs::write(&path, "database = [broken").unwrap();

        let flagged = resolve_database(Some(Path::new("flag.db")), &path, dir.path(), false).unwrap();
        assert_eq!(flagged, PathBuf::from("flag.db"));

        let forced = resolve_database(None, &path, dir.path(), true).unwrap();
        assert_eq!(forced, default_database_path_in(dir.path()));

        let err = resolve_database(None, &path, dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("init --force"));
    }

    #[test]
    fn test_resolve_database_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todolist.toml");
        write_config(&path, &TodolistConfig { database: Some("from-config.db".to_string()) }, false).unwrap();

        let resolved = resolve_database(None, &path, dir.path(), false).unwrap();
        assert_eq!(resolved, PathBuf::from("from-config.db"));
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("todolist.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
