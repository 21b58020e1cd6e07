//! 配置与默认值模块：
//! - 固定的图标尺寸表 `ICON_SIZES` 与 favicon 分辨率 `FAVICON_SIZES`
//! - 可选的 YAML 配置文件（显式路径或自动发现 favgen.yaml / favgen.yml）
//! - 暴露配置来源信息，便于日志打印

use std::{fs, path::{Path, PathBuf}};
use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// 单个输出图标：文件名与像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IconSpec {
    pub(crate) name: &'static str,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

pub(crate) const FAVICON_16: &str = "favicon-16x16.png";
pub(crate) const FAVICON_32: &str = "favicon-32x32.png";

/// 各平台需要的 PNG 图标
pub(crate) const ICON_SIZES: [IconSpec; 5] = [
    IconSpec { name: FAVICON_16, width: 16, height: 16 },
    IconSpec { name: FAVICON_32, width: 32, height: 32 },
    IconSpec { name: "apple-touch-icon.png", width: 180, height: 180 },
    IconSpec { name: "android-chrome-192x192.png", width: 192, height: 192 },
    IconSpec { name: "android-chrome-512x512.png", width: 512, height: 512 },
];

/// favicon.ico 内声明的分辨率
pub(crate) const FAVICON_SIZES: [u32; 2] = [16, 32];

pub(crate) const DEFAULT_SVG: &str = "logo.svg";
pub(crate) const DEFAULT_ICONS_DIR: &str = "icons";
pub(crate) const DEFAULT_FAVICON: &str = "favicon.ico";
pub(crate) const ICO_NAME: &str = "favicon.ico";

const CONFIG_CANDIDATES: [&str; 2] = ["favgen.yaml", "favgen.yml"];

/// 配置文件内容（全部字段可选，未填写时使用内置默认值）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// 源 SVG 路径，默认 `logo.svg`
    #[serde(default, alias = "logo")]
    pub(crate) svg: Option<PathBuf>,
    /// PNG 图标输出目录，默认 `icons`
    #[serde(default, alias = "out_dir")]
    pub(crate) icons_dir: Option<PathBuf>,
    /// favicon.ico 输出路径，默认 `favicon.ico`
    #[serde(default)]
    pub(crate) favicon: Option<PathBuf>,
    /// 回退时读取 favicon-16x16.png / favicon-32x32.png 的目录，默认同 `icons_dir`
    #[serde(default)]
    pub(crate) fallback_dir: Option<PathBuf>,
    /// `icons` 结束后是否顺带合成 favicon.ico
    #[serde(default)]
    pub(crate) ico: Option<bool>,
}

/// 配置来源（用于打印和调试）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    LocalExplicit(String),
    LocalAuto(String),
    Builtin,
}

/// 加载后的配置及其来源
#[derive(Debug)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) source: ConfigSource,
}

/// 人类可读的来源描述
pub(crate) fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::LocalExplicit(p) => format!("本地文件: {}", p),
        ConfigSource::LocalAuto(p) => format!("本地文件(自动发现): {}", p),
        ConfigSource::Builtin => "内置默认值".to_string(),
    }
}

// 自动发现：search_dir 下的 favgen.yaml / favgen.yml
fn resolve_local_config_path(search_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|cand| search_dir.join(cand))
        .find(|p| p.is_file())
}

fn parse_config_file(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("读取配置失败: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&raw).with_context(|| format!("解析 YAML 失败: {}", path.display()))
}

/// 加载配置：显式路径优先（不存在即报错），否则在 search_dir 自动发现，都没有时使用内置默认值。
pub(crate) fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("配置文件不存在: {}", path.display());
        }
        let config = parse_config_file(path)?;
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::LocalExplicit(path.display().to_string()),
        });
    }
    if let Some(path) = resolve_local_config_path(search_dir) {
        let config = parse_config_file(&path)?;
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::LocalAuto(path.display().to_string()),
        });
    }
    Ok(LoadedConfig { config: Config::default(), source: ConfigSource::Builtin })
}
