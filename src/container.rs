//! ICO 容器读写：把一张或多张位图打包为多分辨率 favicon.ico

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// ICO 单个条目的最大边长
const MAX_ICO_SIZE: u32 = 256;

/// 打开 PNG 等位图文件
pub(crate) fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("打开图片失败: {}", path.display()))
}

/// 从内存中的 PNG 字节解码
pub(crate) fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("解码 PNG 失败")
}

// 选图规则：优先使用尺寸完全一致的图；否则取最大的一张缩放
fn pick_for_size(images: &[DynamicImage], size: u32) -> Option<DynamicImage> {
    if let Some(exact) = images.iter().find(|img| img.dimensions() == (size, size)) {
        return Some(exact.clone());
    }
    images
        .iter()
        .max_by_key(|img| u64::from(img.width()) * u64::from(img.height()))
        .map(|largest| largest.resize_exact(size, size, FilterType::Lanczos3))
}

/// 将 `images` 写为声明了 `sizes` 各分辨率（正方形）的 ICO 文件。
pub(crate) fn write_ico(images: &[DynamicImage], sizes: &[u32], dest: &Path) -> Result<()> {
    if images.is_empty() {
        bail!("没有可用于生成 ICO 的图片");
    }
    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.is_empty() {
        bail!("未指定 ICO 分辨率");
    }
    if let Some(bad) = sizes.iter().find(|s| **s == 0 || **s > MAX_ICO_SIZE) {
        bail!("ICO 分辨率超出范围 1..={}: {}", MAX_ICO_SIZE, bad);
    }

    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
    for size in sizes {
        let Some(img) = pick_for_size(images, size) else {
            bail!("没有可用于 {}x{} 的图片", size, size);
        };
        let rgba = img.to_rgba8();
        let icon_image = ico::IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = ico::IconDirEntry::encode(&icon_image)
            .with_context(|| format!("编码 ICO 条目失败: {}x{}", size, size))?;
        icon_dir.add_entry(entry);
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("创建目录失败: {}", parent.display()))?;
        }
    }
    let file = File::create(dest).with_context(|| format!("创建文件失败: {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    icon_dir
        .write(&mut writer)
        .with_context(|| format!("写入 ICO 失败: {}", dest.display()))?;
    writer.flush().with_context(|| format!("写入 ICO 失败: {}", dest.display()))?;
    Ok(())
}

/// 读取 ICO 文件中各条目的 (宽, 高)
pub(crate) fn read_ico_sizes(path: &Path) -> Result<Vec<(u32, u32)>> {
    let file = File::open(path).with_context(|| format!("打开 ICO 失败: {}", path.display()))?;
    let icon_dir = ico::IconDir::read(BufReader::new(file))
        .with_context(|| format!("解析 ICO 失败: {}", path.display()))?;
    Ok(icon_dir.entries().iter().map(|e| (e.width(), e.height())).collect())
}
