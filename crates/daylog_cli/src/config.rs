use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        // Fall back to the working directory when the platform reports no
        // home (containers, stripped-down CI).
        let (data_file, log_dir) = match project_dirs() {
            Some(dirs) => (
                dirs.data_dir().join("entries.csv"),
                dirs.data_dir().join("logs"),
            ),
            None => (PathBuf::from("entries.csv"), PathBuf::from("logs")),
        };
        Self {
            data_file,
            log_dir,
            log_level: daylog_core::default_log_level().to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "daylog", "daylog")
}

pub fn config_paths() -> Option<(PathBuf, PathBuf)> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir().to_path_buf();
    let file = config_dir.join("config.toml");
    Some((config_dir, file))
}

pub fn load_or_default() -> Config {
    let Some((dir, file)) = config_paths() else {
        return Config::default();
    };
    fs::create_dir_all(&dir).ok();
    if let Ok(text) = fs::read_to_string(&file) {
        if let Ok(cfg) = toml::from_str::<Config>(&text) {
            return cfg;
        }
    }
    let cfg = Config::default();
    save(&cfg).ok();
    cfg
}

pub fn save(cfg: &Config) -> io::Result<()> {
    let Some((dir, file)) = config_paths() else {
        return Ok(());
    };
    let text = toml::to_string_pretty(cfg)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    fs::create_dir_all(&dir)?;
    fs::write(file, text)
}
