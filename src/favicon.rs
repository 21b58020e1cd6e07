//! favicon.ico 生成模块：
//! 按顺序尝试 “直接栅格化 SVG” → “读取已生成的 16/32 PNG”，
//! 第一个成功者胜出；全部失败时返回带原因的 `Failed`，从不 panic。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    config::{FAVICON_16, FAVICON_32, FAVICON_SIZES},
    container::{decode_image, open_image, write_ico},
    raster::Rasterizer,
};

/// 直接栅格化时使用的边长，16x16 由它缩放得到
const PRIMARY_RENDER_SIZE: u32 = 32;

/// favicon 生成所需的路径
#[derive(Debug, Clone)]
pub(crate) struct FaviconJob {
    pub(crate) svg: PathBuf,
    pub(crate) out: PathBuf,
    pub(crate) fallback_dir: PathBuf,
}

/// 生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FaviconOutcome {
    /// 由 SVG 直接生成
    FromSource { svg: PathBuf },
    /// 由回退目录中的 PNG 生成
    FromFallback { dir: PathBuf },
    /// 无输出文件
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Vector,
    Fallback,
}

const ATTEMPTS: [Attempt; 2] = [Attempt::Vector, Attempt::Fallback];

fn from_vector(rasterizer: &dyn Rasterizer, job: &FaviconJob) -> Result<()> {
    let png = rasterizer.rasterize(&job.svg, PRIMARY_RENDER_SIZE, PRIMARY_RENDER_SIZE)?;
    let img = decode_image(&png)?;
    write_ico(&[img], &FAVICON_SIZES, &job.out)
}

fn from_fallback(job: &FaviconJob) -> Result<()> {
    let png16 = job.fallback_dir.join(FAVICON_16);
    let png32 = job.fallback_dir.join(FAVICON_32);
    let images = [open_image(&png16)?, open_image(&png32)?];
    write_ico(&images, &FAVICON_SIZES, &job.out)
        .with_context(|| format!("由 {} 生成 ICO 失败", job.fallback_dir.display()))
}

fn failure_hint(fallback_dir: &Path) -> String {
    format!(
        "无法创建 favicon.ico。请先在 {} 中生成 {} 与 {}（可运行 `favgen icons`）",
        fallback_dir.display(),
        FAVICON_16,
        FAVICON_32
    )
}

/// 生成 favicon.ico；`rasterizer` 为 None 表示当前构建不支持 SVG 栅格化。
pub(crate) fn create_favicon(
    rasterizer: Option<&dyn Rasterizer>,
    job: &FaviconJob,
) -> FaviconOutcome {
    for attempt in ATTEMPTS {
        match attempt {
            Attempt::Vector => {
                let Some(r) = rasterizer else {
                    println!("⚠️ 未启用 SVG 栅格化（feature `svg`），跳过直接转换");
                    continue;
                };
                match from_vector(r, job) {
                    Ok(()) => return FaviconOutcome::FromSource { svg: job.svg.clone() },
                    Err(e) => eprintln!("⚠️ SVG -> ICO 转换失败: {:#}", e),
                }
            }
            Attempt::Fallback => match from_fallback(job) {
                Ok(()) => return FaviconOutcome::FromFallback { dir: job.fallback_dir.clone() },
                Err(e) => eprintln!("⚠️ 回退 PNG -> ICO 失败: {:#}", e),
            },
        }
    }
    FaviconOutcome::Failed { reason: failure_hint(&job.fallback_dir) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::read_ico_sizes;
    use crate::raster::tests::{BrokenRasterizer, SAMPLE_SVG};
    use image::{Rgba, RgbaImage};
    use std::fs;

    fn job(root: &Path) -> FaviconJob {
        FaviconJob {
            svg: root.join("logo.svg"),
            out: root.join("favicon.ico"),
            fallback_dir: root.join("icons"),
        }
    }

    fn write_fallback_pngs(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]))
            .save(dir.join(FAVICON_16))
            .unwrap();
        RgbaImage::from_pixel(32, 32, Rgba([0, 0, 255, 255]))
            .save(dir.join(FAVICON_32))
            .unwrap();
    }

    #[cfg(feature = "svg")]
    #[test]
    fn renders_from_svg_when_available() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path());
        fs::write(&job.svg, SAMPLE_SVG).unwrap();
        let r = crate::raster::SvgRasterizer::new();

        let outcome = create_favicon(Some(&r), &job);
        assert_eq!(outcome, FaviconOutcome::FromSource { svg: job.svg.clone() });
        assert_eq!(read_ico_sizes(&job.out).unwrap(), vec![(16, 16), (32, 32)]);
    }

    #[test]
    fn falls_back_without_rasterizer() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path());
        write_fallback_pngs(&job.fallback_dir);

        let outcome = create_favicon(None, &job);
        assert_eq!(outcome, FaviconOutcome::FromFallback { dir: job.fallback_dir.clone() });
        assert_eq!(read_ico_sizes(&job.out).unwrap(), vec![(16, 16), (32, 32)]);
    }

    #[test]
    fn falls_back_when_rasterizer_fails() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path());
        fs::write(&job.svg, SAMPLE_SVG).unwrap();
        write_fallback_pngs(&job.fallback_dir);

        let outcome = create_favicon(Some(&BrokenRasterizer), &job);
        assert!(matches!(outcome, FaviconOutcome::FromFallback { .. }));
        assert!(job.out.is_file());
    }

    #[test]
    fn reports_failure_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path());

        let outcome = create_favicon(None, &job);
        match outcome {
            FaviconOutcome::Failed { reason } => {
                assert!(reason.contains(FAVICON_16), "{reason}");
                assert!(reason.contains(FAVICON_32), "{reason}");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!job.out.exists());
    }

    #[test]
    fn one_fallback_png_is_not_enough() {
        let dir = tempfile::tempdir().unwrap();
        let job = job(dir.path());
        write_fallback_pngs(&job.fallback_dir);
        fs::remove_file(job.fallback_dir.join(FAVICON_32)).unwrap();

        let outcome = create_favicon(Some(&BrokenRasterizer), &job);
        assert!(matches!(outcome, FaviconOutcome::Failed { .. }));
        assert!(!job.out.exists());
    }
}
