use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub page_size: i32,
    pub api_base_url: String,
    pub export_path: PathBuf,
    pub data_path: PathBuf,
}

#[derive(Default)]
pub struct AppConfigOverrides {
    pub log_level: Option<String>,
    pub page_size: Option<i32>,
    pub api_base_url: Option<String>,
    pub export_path: Option<PathBuf>,
}

fn default_data_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".photofetch")
}

impl AppConfig {
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let mut builder = config::Config::builder();
        let path = match path {
            Some(p) => p,
            None => default_data_path().join("config"),
        };
        builder = builder.add_source(config::File::from(path).required(false));
        let cfg = builder.build().unwrap_or_default();

        let log_level = cfg
            .get_string("log_level")
            .unwrap_or_else(|_| "info".to_string());
        let page_size = cfg.get_int("page_size").unwrap_or(20) as i32;
        let api_base_url = cfg
            .get_string("api_base_url")
            .unwrap_or_else(|_| "https://photoslibrary.googleapis.com".to_string());
        let export_path = cfg
            .get_string("export_path")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("download_photos.sh"));
        let data_path = cfg
            .get_string("data_path")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        Self {
            log_level,
            page_size,
            api_base_url,
            export_path,
            data_path,
        }
    }

    pub fn apply_overrides(mut self, ov: &AppConfigOverrides) -> Self {
        if let Some(l) = &ov.log_level {
            self.log_level = l.clone();
        }
        if let Some(p) = ov.page_size {
            self.page_size = p;
        }
        if let Some(u) = &ov.api_base_url {
            self.api_base_url = u.clone();
        }
        if let Some(e) = &ov.export_path {
            self.export_path = e.clone();
        }
        self
    }

    pub fn save_to(&self, path: Option<PathBuf>) -> std::io::Result<()> {
        let path = match path {
            Some(p) => p,
            None => default_data_path().join("config"),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}
