//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

use super::{ensure_huddle_dir, huddle_dir, load_toml, save_toml};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub update: UpdateConfig,
}

/// 后端服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 服务地址 (e.g., "https://api.huddle.dev")
    #[serde(default = "default_server_url")]
    pub url: String,
    /// 匿名 API key（随 apikey 头发送）
    #[serde(default)]
    pub anon_key: String,
}

fn default_server_url() -> String {
    "https://api.huddle.dev".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            anon_key: String::new(),
        }
    }
}

impl ServerConfig {
    /// 实际使用的服务地址（HUDDLE_SERVER_URL 环境变量优先，便于本地联调）
    pub fn effective_url(&self) -> String {
        std::env::var("HUDDLE_SERVER_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 更新检查配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateConfig {
    /// Last update check time (RFC 3339 format)
    pub last_check: Option<String>,
    /// Cached latest version
    pub latest_version: Option<String>,
}

/// 获取配置文件路径
fn config_path() -> PathBuf {
    huddle_dir().join("config.toml")
}

/// 加载配置（不存在或损坏则返回默认值）
pub fn load_config() -> Config {
    load_toml(&config_path()).unwrap_or_default()
}

/// 保存配置
pub fn save_config(config: &Config) -> io::Result<()> {
    ensure_huddle_dir()?;
    save_toml(&config_path(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "https://api.huddle.dev");
        assert!(config.server.anon_key.is_empty());
        assert_eq!(config.theme.name, "Auto");
        assert!(config.update.last_check.is_none());
    }

    #[test]
    fn test_config_parses_partial_file() {
        let config: Config = toml::from_str("[theme]\nname = \"Dark\"\n").unwrap();
        assert_eq!(config.theme.name, "Dark");
        // 未出现的 section 落到默认值
        assert_eq!(config.server.url, "https://api.huddle.dev");
    }
}
