use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use crate::common::AppResult;

// 全局配置实例（仅供二进制入口使用）
static CONFIG: OnceLock<Settings> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub polling: PollingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String, // 后端地址，可被 NEXT_PUBLIC_API_URL 覆盖
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    pub path: String, // 持久化会话文件（相当于浏览器的 localStorage）
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PollingConfig {
    pub notification_interval_secs: u64, // 通知轮询间隔
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
            },
            storage: StorageConfig {
                path: "session.json".to_string(),
            },
            polling: PollingConfig {
                notification_interval_secs: 30,
            },
            log: LogConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn global() -> &'static Settings {
        CONFIG.get_or_init(|| {
            Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
                panic!("Failed to initialize config: {}", e);
            })
        })
    }

    /// 读取配置文件；文件不存在时写入默认配置并使用默认值
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Settings>(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Settings::default();
                let content = toml::to_string_pretty(&default_config)?;
                fs::write(path, content)?;
                default_config
            }
            Err(e) => return Err(e.into()),
        };

        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// 环境变量优先于配置文件中的 API 地址
    pub fn apply_env_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }
}

#[cfg(test)]
#[path = "conf_test.rs"]
mod tests;
