//! 图标集生成模块：
//! - 按固定尺寸表把 SVG 栅格化为多张 PNG
//! - 单张失败只记录并计数，不中断其余转换
//! - 结束后若 16/32 两张 PNG 都存在，则顺带合成 favicon.ico（失败静默忽略）

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    config::{IconSpec, FAVICON_16, FAVICON_32, FAVICON_SIZES, ICON_SIZES, ICO_NAME},
    container::{open_image, write_ico},
    raster::Rasterizer,
    utils::file_size_kb,
};

/// 一次 `icons` 运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IconSetReport {
    pub(crate) succeeded: usize,
    pub(crate) total: usize,
    /// 成功合成的 favicon.ico 路径
    pub(crate) ico: Option<PathBuf>,
}

impl IconSetReport {
    pub(crate) fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

fn convert_one(
    rasterizer: &dyn Rasterizer,
    svg: &Path,
    dest: &Path,
    spec: &IconSpec,
) -> Result<()> {
    let png = rasterizer.rasterize(svg, spec.width, spec.height)?;
    fs::write(dest, &png).with_context(|| format!("写入失败: {}", dest.display()))
}

/// 生成 `ICON_SIZES` 中的全部 PNG，并在 `with_ico` 时尝试合成 favicon.ico。
pub(crate) fn generate_icon_set(
    rasterizer: &dyn Rasterizer,
    svg: &Path,
    out_dir: &Path,
    with_ico: bool,
) -> IconSetReport {
    let total = ICON_SIZES.len();
    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("❌ 创建输出目录失败: {} -> {}", out_dir.display(), e);
    }

    println!("🎨 正在将 {} 转换为 PNG 图标（{}）...\n", svg.display(), rasterizer.name());

    let mut succeeded = 0;
    for spec in ICON_SIZES.iter() {
        let dest = out_dir.join(spec.name);
        match convert_one(rasterizer, svg, &dest, spec) {
            Ok(()) => {
                let kb = file_size_kb(&dest).unwrap_or(0.0);
                println!("✅ {} ({}x{}) - {:.1}KB", dest.display(), spec.width, spec.height, kb);
                succeeded += 1;
            }
            Err(e) => eprintln!("❌ 转换失败 {}: {:#}", dest.display(), e),
        }
    }

    let ico = if with_ico { synthesize_ico(out_dir) } else { None };
    IconSetReport { succeeded, total, ico }
}

// 仅当 16/32 两张 PNG 均存在时合成；任何错误都吞掉，不影响计数
fn synthesize_ico(out_dir: &Path) -> Option<PathBuf> {
    let png16 = out_dir.join(FAVICON_16);
    let png32 = out_dir.join(FAVICON_32);
    // 只看文件是否存在：上一次运行留下的 PNG 同样会被打包
    if !(png16.is_file() && png32.is_file()) {
        return None;
    }
    let ico_path = out_dir.join(ICO_NAME);
    let build = || -> Result<()> {
        let images = [open_image(&png16)?, open_image(&png32)?];
        write_ico(&images, &FAVICON_SIZES, &ico_path)
    };
    build().ok().map(|_| ico_path)
}
