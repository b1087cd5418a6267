pub mod config;
pub mod session;

use std::io;
use std::path::{Path, PathBuf};

/// 获取 ~/.huddle/ 目录路径
pub fn huddle_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Cannot find home directory")
        .join(".huddle")
}

/// 确保 ~/.huddle/ 目录存在
pub fn ensure_huddle_dir() -> io::Result<PathBuf> {
    let path = huddle_dir();
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 将数据序列化后保存到 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let content =
        toml::to_string_pretty(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");

        let data = Sample {
            name: "huddle".to_string(),
            count: 4,
        };
        save_toml(&path, &data).unwrap();

        let loaded: Sample = load_toml(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let result: io::Result<Sample> = load_toml(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_toml_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let result: io::Result<Sample> = load_toml(&path);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
