use std::{io::ErrorKind, path::Path, path::PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{FileStore, LocalStorage, domain};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one file per collection.
    pub data_dir: PathBuf,
    /// Prepended to every store key.
    pub key_prefix: String,
    /// Number of sets a new exercise log starts with.
    pub sets_per_exercise: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./fitlog-data"),
            key_prefix: String::new(),
            sets_per_exercise: domain::DEFAULT_SETS_PER_EXERCISE,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content).context("failed to parse config")?;
        if config.sets_per_exercise == 0 {
            anyhow::bail!("sets_per_exercise must be at least 1");
        }
        Ok(config)
    }

    /// Reads the config file at `path`. A missing file yields the default config.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("invalid config {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    #[must_use]
    pub fn open_store(&self) -> LocalStorage<FileStore> {
        LocalStorage::with_prefix(FileStore::new(&self.data_dir), self.key_prefix.clone())
    }

    #[must_use]
    pub fn open_service(&self) -> domain::Service<LocalStorage<FileStore>> {
        domain::Service::new(self.open_store()).with_sets_per_exercise(self.sets_per_exercise)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::domain::TrainingService;

    use super::*;

    #[test]
    fn test_from_toml() {
        assert_eq!(
            Config::from_toml("data_dir = \"/var/lib/fitlog\"\nkey_prefix = \"@\"\n").unwrap(),
            Config {
                data_dir: PathBuf::from("/var/lib/fitlog"),
                key_prefix: "@".to_string(),
                sets_per_exercise: 3,
            }
        );
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(Config::from_toml("sets_per_exercise = 0").is_err());
        assert!(Config::from_toml("sets_per_exercise = \"three\"").is_err());
    }

    #[tokio::test]
    async fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitlog.toml");

        assert_eq!(Config::load(&path).await.unwrap(), Config::default());

        tokio::fs::write(&path, "sets_per_exercise = 4").await.unwrap();
        assert_eq!(Config::load(&path).await.unwrap().sets_per_exercise, 4);
    }

    #[test]
    fn test_open_store() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/fitlog"),
            ..Config::default()
        };
        assert_eq!(config.open_store().store().dir(), Path::new("/tmp/fitlog"));
    }

    #[tokio::test]
    async fn test_open_service() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            sets_per_exercise: 4,
            ..Config::default()
        };
        let service = config.open_service();
        let exercise = domain::Exercise::with_id(
            1.into(),
            domain::NewExercise {
                name: domain::Name::new("Marches").unwrap(),
                description: String::new(),
                category: domain::Category::TotalBody,
                image: domain::Image::default(),
                video: None,
            },
        );
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let log = service
            .complete_set(&exercise, date, 1, None)
            .await
            .unwrap();

        assert_eq!(service.sets_per_exercise(), 4);
        assert_eq!(log.sets.len(), 4);
        assert!(dir.path().join("exercise_logs.json").exists());
    }
}
