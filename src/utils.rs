//! 通用辅助函数：
//! - 环境变量读取与解析
//! - 文件大小格式化

use std::{env, fs, path::Path, path::PathBuf};

/// 可选读取 PATH 环境变量为 PathBuf（空值视为未设置）。
pub(crate) fn env_opt_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// 读取布尔环境变量的真值（1/true/on/yes/y）。
pub(crate) fn env_bool_truthy(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_truthy(&v))
}

fn parse_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes" | "y"
    )
}

/// 文件大小（KB，保留一位小数）；读取失败时返回 None。
pub(crate) fn file_size_kb(path: &Path) -> Option<f64> {
    fs::metadata(path).ok().map(|m| m.len() as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_values() {
        for v in ["1", "true", "ON", " yes ", "y"] {
            assert!(parse_truthy(v), "{v}");
        }
        for v in ["0", "false", "off", "no", "", "maybe"] {
            assert!(!parse_truthy(v), "{v}");
        }
    }

    #[test]
    fn size_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_size_kb(&dir.path().join("nope.png")).is_none());

        let p = dir.path().join("a.bin");
        fs::write(&p, vec![0u8; 2048]).unwrap();
        assert_eq!(file_size_kb(&p), Some(2.0));
    }
}
