use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use crate::config::Config;

const APP_DIR_NAME: &str = "trigpad";
const LAST_PORT_FILE_NAME: &str = "last-port.json";
const CONFIG_FILE_NAME: &str = "config.toml";

// NOTE: same layout as `gitui`
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join(".config"))
    } else {
        dirs::config_dir()
    }
    .ok_or_else(|| anyhow!("failed to find os config dir."))?;

    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

pub fn get_app_data_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join(".local").join("share"))
    } else {
        dirs::data_local_dir()
    }
    .ok_or_else(|| anyhow!("failed to find os local data dir."))?;

    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

/// The port of the last session that opened successfully, so `--last` can
/// reconnect without prompting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPort {
    pub name: String,
    pub baud_rate: u32,
}

pub trait Storage: Debug {
    fn read_config(&self) -> Result<Config>;
    fn read_last_port(&self) -> Result<LastPort>;
    fn write_last_port(&self, last_port: &LastPort) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    data_dir: PathBuf,
    config_dir: PathBuf,
}

impl Storage for FileStorage {
    fn read_config(&self) -> Result<Config> {
        let config_path = self.config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            tracing::info!("Writing default config to {}", config_path.display());
            fs::write(
                &config_path,
                include_str!("../../assets/default-config.toml"),
            )?;
        }

        let file = self.read_from_config_dir(CONFIG_FILE_NAME.into())?;
        Config::read_from_string(&file)
            .with_context(|| format!("Error while parsing `{}`", config_path.display()))
    }

    fn read_last_port(&self) -> Result<LastPort> {
        let file = self
            .read_from_data_dir(LAST_PORT_FILE_NAME.into())
            .context("No previous session recorded")?;
        serde_json::from_str(&file).context("Error while parsing `last-port.json`")
    }

    fn write_last_port(&self, last_port: &LastPort) -> Result<()> {
        self.write_to_data_dir(
            LAST_PORT_FILE_NAME.into(),
            &serde_json::to_string_pretty(last_port)?,
        )
    }
}

impl FileStorage {
    pub fn init() -> Result<Self> {
        Ok(Self {
            data_dir: get_app_data_path()?,
            config_dir: get_app_config_path()?,
        })
    }

    #[cfg(test)]
    pub const fn in_dirs(data_dir: PathBuf, config_dir: PathBuf) -> Self {
        Self {
            data_dir,
            config_dir,
        }
    }

    fn read_from_config_dir(&self, path_from_config_dir: PathBuf) -> Result<String> {
        let file_path = Path::new(&self.config_dir).join(path_from_config_dir);
        let file = fs::read_to_string(file_path)?;
        Ok(file)
    }

    fn read_from_data_dir(&self, path_from_data_dir: PathBuf) -> Result<String> {
        let file_path = Path::new(&self.data_dir).join(path_from_data_dir);
        let file = fs::read_to_string(file_path)?;
        Ok(file)
    }

    fn write_to_data_dir(&self, path_from_data_dir: PathBuf, data: &str) -> Result<()> {
        let file_path = Path::new(&self.data_dir).join(path_from_data_dir);
        fs::write(file_path, data)?;
        Ok(())
    }
}
