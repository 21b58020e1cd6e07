//! SVG 栅格化模块：
//! - `Rasterizer` 抽象：给定 SVG 路径与目标宽高，输出 PNG 字节
//! - （启用 svg 特性时）基于 resvg 的实现

use std::path::Path;

use anyhow::Result;

/// 矢量转位图能力
pub(crate) trait Rasterizer {
    /// 用于日志的实现名称
    fn name(&self) -> &'static str;

    /// 将 `svg` 渲染为恰好 `width` x `height` 像素的 PNG。
    fn rasterize(&self, svg: &Path, width: u32, height: u32) -> Result<Vec<u8>>;
}

/// 当前构建可用的栅格化实现；未启用 svg 特性时返回 None。
#[cfg(feature = "svg")]
pub(crate) fn default_rasterizer() -> Option<Box<dyn Rasterizer>> {
    Some(Box::new(SvgRasterizer::new()))
}

#[cfg(not(feature = "svg"))]
pub(crate) fn default_rasterizer() -> Option<Box<dyn Rasterizer>> {
    None
}

#[cfg(feature = "svg")]
pub(crate) use self::svg::SvgRasterizer;

#[cfg(feature = "svg")]
mod svg {
    use std::{fs, path::Path, sync::Arc};

    use anyhow::{bail, Context, Result};
    use resvg::{tiny_skia, usvg};

    use super::Rasterizer;

    pub(crate) struct SvgRasterizer {
        fontdb: Arc<usvg::fontdb::Database>,
    }

    impl SvgRasterizer {
        pub(crate) fn new() -> Self {
            // 加载系统字体，保证 logo 中的 <text> 能正常渲染
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            Self { fontdb: Arc::new(db) }
        }

        fn parse(&self, svg: &Path) -> Result<usvg::Tree> {
            let data = fs::read(svg).with_context(|| format!("读取 SVG 失败: {}", svg.display()))?;
            let mut opt = usvg::Options::default();
            opt.resources_dir = svg.parent().map(Path::to_path_buf);
            opt.fontdb = Arc::clone(&self.fontdb);
            usvg::Tree::from_data(&data, &opt)
                .with_context(|| format!("解析 SVG 失败: {}", svg.display()))
        }
    }

    impl Rasterizer for SvgRasterizer {
        fn name(&self) -> &'static str {
            "resvg"
        }

        fn rasterize(&self, svg: &Path, width: u32, height: u32) -> Result<Vec<u8>> {
            if width == 0 || height == 0 {
                bail!("目标尺寸无效: {}x{}", width, height);
            }
            let tree = self.parse(svg)?;
            let size = tree.size();
            if size.width() <= 0.0 || size.height() <= 0.0 {
                bail!("SVG 尺寸为空: {}", svg.display());
            }

            // 按宽高分别缩放，铺满目标画布
            let transform = tiny_skia::Transform::from_scale(
                width as f32 / size.width(),
                height as f32 / size.height(),
            );
            let mut pixmap = tiny_skia::Pixmap::new(width, height)
                .with_context(|| format!("无法分配 {}x{} 画布", width, height))?;
            resvg::render(&tree, transform, &mut pixmap.as_mut());

            pixmap
                .encode_png()
                .with_context(|| format!("PNG 编码失败: {}", svg.display()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 测试用 SVG：一个非正方形的双色 logo
    pub(crate) const SAMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80" viewBox="0 0 100 80">
  <rect width="100" height="80" rx="12" fill="#1e88e5"/>
  <circle cx="50" cy="40" r="24" fill="#ffffff"/>
</svg>
"##;

    /// 始终失败的栅格化实现
    pub(crate) struct BrokenRasterizer;

    impl Rasterizer for BrokenRasterizer {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn rasterize(&self, _svg: &Path, _width: u32, _height: u32) -> Result<Vec<u8>> {
            anyhow::bail!("rasterizer exploded")
        }
    }

    #[cfg(feature = "svg")]
    #[test]
    fn renders_exact_size() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        std::fs::write(&svg, SAMPLE_SVG).unwrap();

        let r = SvgRasterizer::new();
        for (w, h) in [(16, 16), (180, 180), (64, 20)] {
            let png = r.rasterize(&svg, w, h).unwrap();
            let img = image::load_from_memory(&png).unwrap();
            assert_eq!((img.width(), img.height()), (w, h));
        }
    }

    #[cfg(feature = "svg")]
    #[test]
    fn fills_the_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        std::fs::write(&svg, SAMPLE_SVG).unwrap();

        let png = SvgRasterizer::new().rasterize(&svg, 32, 32).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        // 中心是白色圆，边缘中点是蓝色背景
        assert_eq!(img.get_pixel(16, 16).0, [255, 255, 255, 255]);
        let edge = img.get_pixel(16, 1).0;
        assert!(edge[2] > edge[0] && edge[3] == 255, "{edge:?}");
    }

    #[cfg(feature = "svg")]
    #[test]
    fn reports_missing_and_invalid_sources() {
        let dir = tempfile::tempdir().unwrap();
        let r = SvgRasterizer::new();
        assert!(r.rasterize(&dir.path().join("missing.svg"), 16, 16).is_err());

        let bad = dir.path().join("bad.svg");
        std::fs::write(&bad, "not an svg").unwrap();
        assert!(r.rasterize(&bad, 16, 16).is_err());

        let ok = dir.path().join("ok.svg");
        std::fs::write(&ok, SAMPLE_SVG).unwrap();
        assert!(r.rasterize(&ok, 0, 16).is_err());
    }

    #[cfg(feature = "svg")]
    #[test]
    fn default_rasterizer_is_resvg() {
        assert_eq!(default_rasterizer().map(|r| r.name()), Some("resvg"));
    }

    #[cfg(not(feature = "svg"))]
    #[test]
    fn no_rasterizer_without_feature() {
        assert!(default_rasterizer().is_none());
    }
}
