/*
* 开发心理过程：
* 1. 创建服务端配置管理，支持TOML文件和环境变量两种来源
* 2. 所有配置段都有合理的默认值，缺省即可运行
* 3. 提供类型安全的配置访问接口
* 4. 数据库路径支持环境变量覆盖，便于部署
*/

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::core::error::{Result, ServerError};
use crate::world::location::GeoLocation;

// 数据库路径的环境变量覆盖项
const DB_PATH_ENV: &str = "POKEMONGO_DB_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    // WAL模式允许捕捉提交与读请求并发
    pub wal_mode: bool,
}

// 世界播种配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    // 播种的野生宝可梦数量
    pub population: u32,
    // 投放区域（经纬度包围盒）
    pub region: SpawnRegion,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRegion {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "pokemongo.db".to_string(),
            wal_mode: true,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            population: 500,
            region: SpawnRegion::default(),
        }
    }
}

impl Default for SpawnRegion {
    fn default() -> Self {
        // 默认覆盖整个可用经纬度范围
        Self {
            lat_min: -90.0,
            lat_max: 90.0,
            lng_min: -180.0,
            lng_max: 180.0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            database: DatabaseConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl ServerConfig {
    // 从TOML文件加载配置，文件不存在时使用默认值
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            ServerConfig::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    // 从TOML字符串解析
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: ServerConfig = toml::from_str(content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            self.database.path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        let region = &self.spawn.region;
        if region.lat_min >= region.lat_max || region.lng_min >= region.lng_max {
            return Err(ServerError::Config(
                "投放区域边界无效: min 必须小于 max".to_string(),
            ));
        }
        Ok(())
    }
}

impl SpawnRegion {
    // 在区域内均匀取一点（u/v 为 [0,1) 内的均匀随机数）
    pub fn point_at(&self, u: f64, v: f64) -> GeoLocation {
        GeoLocation {
            lat: self.lat_min + (self.lat_max - self.lat_min) * u,
            lng: self.lng_min + (self.lng_max - self.lng_min) * v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.spawn.population, 500);
        assert!(config.database.wal_mode);
    }

    #[test]
    fn test_parse_toml() {
        let config = ServerConfig::from_toml(
            r#"
            [general]
            log_level = "debug"

            [spawn]
            population = 42

            [spawn.region]
            lat_min = -23.0
            lat_max = -22.0
            lng_min = -44.0
            lng_max = -43.0
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.spawn.population, 42);
        assert_eq!(config.spawn.region.lat_min, -23.0);
        // 未指定的段落使用默认值
        assert!(config.database.wal_mode);
    }

    #[test]
    fn test_invalid_region() {
        let result = ServerConfig::from_toml(
            r#"
            [spawn.region]
            lat_min = 10.0
            lat_max = -10.0
            lng_min = 0.0
            lng_max = 1.0
            "#,
        );
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn test_region_point() {
        let region = SpawnRegion {
            lat_min: 0.0,
            lat_max: 10.0,
            lng_min: 100.0,
            lng_max: 120.0,
        };
        let point = region.point_at(0.5, 0.25);
        assert_eq!(point.lat, 5.0);
        assert_eq!(point.lng, 105.0);
    }
}
