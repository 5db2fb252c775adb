use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// summarize 后端的基础 URL
    pub api_base_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            verbose_logging: false,
        }
    }
}

/// config.toml 的可选字段
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 从环境变量加载，未设置的字段使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("SUMMARIZE_API_BASE_URL").unwrap_or(default.api_base_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 从可选的配置文件加载，再叠加环境变量
    ///
    /// 文件不存在时静默退回 [`Config::from_env`]；
    /// 文件存在但读不了或解析失败则报错。
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::from_env());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let file: ConfigFile =
            toml::from_str(&text).map_err(|e| ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;

        let env = Self::from_env();
        // 优先级：环境变量 > 配置文件 > 默认值
        let default = Self::default();
        Ok(Self {
            api_base_url: if env.api_base_url != default.api_base_url {
                env.api_base_url
            } else {
                file.api_base_url.unwrap_or(default.api_base_url)
            },
            verbose_logging: if env.verbose_logging != default.verbose_logging {
                env.verbose_logging
            } else {
                file.verbose_logging.unwrap_or(default.verbose_logging)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let config = Config::load("definitely-not-a-config.toml").unwrap();
        assert!(!config.api_base_url.is_empty());
    }

    #[test]
    fn test_config_file_fields_parse() {
        let file: ConfigFile = toml::from_str(
            r#"
            api_base_url = "http://backend:8080"
            verbose_logging = true
            "#,
        )
        .unwrap();
        assert_eq!(file.api_base_url.as_deref(), Some("http://backend:8080"));
        assert_eq!(file.verbose_logging, Some(true));
    }

    #[test]
    fn test_config_file_fields_optional() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.api_base_url.is_none());
        assert!(file.verbose_logging.is_none());
    }
}
