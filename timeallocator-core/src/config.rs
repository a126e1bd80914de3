//! Configuration: where the fixture data lives and which calendars to load.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AllocatorError, AllocatorResult};

static DEFAULT_DATA_DIR: &str = "data";
static DEFAULT_SLOT_TYPES_FILE: &str = "slottypes.json";
static LOCAL_CONFIG_FILE: &str = "timeallocator.toml";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_slot_types_file() -> String {
    DEFAULT_SLOT_TYPES_FILE.to_string()
}

/// Configuration read from `timeallocator.toml` (or the user config dir),
/// overridable with `TIMEALLOCATOR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct AllocatorConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_slot_types_file")]
    pub slot_types_file: String,

    #[serde(default)]
    pub calendars: Vec<CalendarSource>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

/// One calendar to load: its id, display name and fixture file (relative to `data_dir`).
#[derive(Debug, Deserialize, Clone)]
pub struct CalendarSource {
    pub id: String,
    pub name: String,
    pub file: String,
}

impl CalendarSource {
    pub fn uuid(&self) -> AllocatorResult<Uuid> {
        Uuid::parse_str(&self.id).map_err(|e| {
            AllocatorError::Config(format!("Invalid calendar id '{}': {e}", self.id))
        })
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            data_dir: default_data_dir(),
            slot_types_file: default_slot_types_file(),
            calendars: Vec::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl AllocatorConfig {
    /// ~/.config/timeallocator/config.toml (platform equivalent)
    pub fn config_path() -> AllocatorResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AllocatorError::Config("Could not determine config directory".into()))?
            .join("timeallocator");

        Ok(config_dir.join("config.toml"))
    }

    /// Pick the config file to read: an explicit path (which must exist),
    /// then `./timeallocator.toml`, then the user config file.
    pub fn locate(explicit: Option<&Path>) -> AllocatorResult<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(AllocatorError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        let user = Self::config_path()?;
        Ok(user.exists().then_some(user))
    }

    pub fn load(explicit: Option<&Path>) -> AllocatorResult<Self> {
        let path = Self::locate(explicit)?;

        let mut builder = Config::builder();
        if let Some(path) = &path {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        let mut config: AllocatorConfig = builder
            .add_source(Environment::with_prefix("TIMEALLOCATOR"))
            .build()
            .map_err(|e| AllocatorError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AllocatorError::Config(e.to_string()))?;

        config.base_dir = path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config)
    }

    /// Data directory with `~` expanded and relative paths anchored at the config file.
    pub fn data_path(&self) -> PathBuf {
        let expanded = PathBuf::from(
            shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned(),
        );

        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    pub fn slot_types_path(&self) -> PathBuf {
        self.data_path().join(&self.slot_types_file)
    }

    pub fn calendar_path(&self, source: &CalendarSource) -> PathBuf {
        let path = self.data_path().join(&source.file);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("json")
        }
    }
}
