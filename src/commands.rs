//! 命令调度模块：
//! - 接收解析好的 CLI 参数，按 CLI > 环境变量 > 配置文件 > 默认值 计算“有效参数”
//! - 调用图标集生成、favicon 生成模块并打印结果

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::{
    cli::{Cli, Command},
    config::{self, Config, DEFAULT_FAVICON, DEFAULT_ICONS_DIR, DEFAULT_SVG},
    container::read_ico_sizes,
    favicon::{create_favicon, FaviconJob, FaviconOutcome},
    icons::generate_icon_set,
    raster::default_rasterizer,
    utils::{env_bool_truthy, env_opt_path},
};

/// 环境变量覆盖项（FAVGEN_*）
#[derive(Debug, Default)]
struct EnvOverrides {
    config: Option<PathBuf>,
    svg: Option<PathBuf>,
    icons_dir: Option<PathBuf>,
    favicon: Option<PathBuf>,
    fallback_dir: Option<PathBuf>,
    no_ico: Option<bool>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            config: env_opt_path("FAVGEN_CONFIG"),
            svg: env_opt_path("FAVGEN_SVG"),
            icons_dir: env_opt_path("FAVGEN_ICONS_DIR"),
            favicon: env_opt_path("FAVGEN_FAVICON"),
            fallback_dir: env_opt_path("FAVGEN_FALLBACK_DIR"),
            no_ico: env_bool_truthy("FAVGEN_NO_ICO"),
        }
    }
}

/// `icons` 子命令的有效参数
#[derive(Debug, PartialEq, Eq)]
struct IconsParams {
    svg: PathBuf,
    out_dir: PathBuf,
    with_ico: bool,
}

fn effective_svg(cli: Option<PathBuf>, env: &EnvOverrides, cfg: &Config) -> PathBuf {
    cli.or_else(|| env.svg.clone())
        .or_else(|| cfg.svg.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SVG))
}

fn effective_icons_dir(env: &EnvOverrides, cfg: &Config) -> PathBuf {
    env.icons_dir
        .clone()
        .or_else(|| cfg.icons_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ICONS_DIR))
}

fn resolve_icons(
    svg: Option<PathBuf>,
    out: Option<PathBuf>,
    no_ico: bool,
    env: &EnvOverrides,
    cfg: &Config,
) -> IconsParams {
    let with_ico = if no_ico {
        false
    } else if let Some(disabled) = env.no_ico {
        !disabled
    } else {
        cfg.ico.unwrap_or(true)
    };
    IconsParams {
        svg: effective_svg(svg, env, cfg),
        out_dir: out.unwrap_or_else(|| effective_icons_dir(env, cfg)),
        with_ico,
    }
}

fn resolve_favicon(
    svg: Option<PathBuf>,
    out: Option<PathBuf>,
    fallback_dir: Option<PathBuf>,
    env: &EnvOverrides,
    cfg: &Config,
) -> FaviconJob {
    // 回退目录缺省与 icons 输出目录一致
    let fallback_dir = fallback_dir
        .or_else(|| env.fallback_dir.clone())
        .or_else(|| cfg.fallback_dir.clone())
        .unwrap_or_else(|| effective_icons_dir(env, cfg));
    FaviconJob {
        svg: effective_svg(svg, env, cfg),
        out: out
            .or_else(|| env.favicon.clone())
            .or_else(|| cfg.favicon.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FAVICON)),
        fallback_dir,
    }
}

/// 读回 ICO 中实际包含的分辨率，例如 `16x16, 32x32`
fn ico_summary(path: &Path) -> String {
    match read_ico_sizes(path) {
        Ok(sizes) => sizes
            .iter()
            .map(|(w, h)| format!("{}x{}", w, h))
            .collect::<Vec<_>>()
            .join(", "),
        Err(e) => format!("无法读取分辨率: {:#}", e),
    }
}

fn load(explicit: Option<PathBuf>, env: &EnvOverrides) -> Result<Config> {
    let explicit = explicit.or_else(|| env.config.clone());
    let loaded = config::load_config(explicit.as_deref(), Path::new("."))?;
    println!("ℹ️ 本次使用的配置来源: {}", config::describe_source(&loaded.source));
    Ok(loaded.config)
}

/// 运行指定的子命令
pub(crate) fn run(cli: Cli) -> Result<()> {
    let env = EnvOverrides::from_env();
    match cli.command {
        Command::Icons { svg, out, no_ico, config } => {
            let Some(rasterizer) = default_rasterizer() else {
                bail!("缺少 SVG 栅格化支持：请使用 `cargo install favgen --features svg` 重新安装（默认已启用）");
            };
            let cfg = load(config, &env)?;
            let params = resolve_icons(svg, out, no_ico, &env, &cfg);

            let report =
                generate_icon_set(&*rasterizer, &params.svg, &params.out_dir, params.with_ico);
            println!("\n✨ 转换完成: 已生成 {}/{} 个图标", report.succeeded, report.total);
            if let Some(ico) = &report.ico {
                println!("✅ {} 已由 PNG 合成 [{}]", ico.display(), ico_summary(ico));
            }
            if report.all_succeeded() {
                println!("\n🚀 图标已就绪，接下来可以：");
                println!("   1. 随站点一起部署 {} 目录", params.out_dir.display());
                println!("   2. 在 index.html 中引用 favicon / apple-touch-icon 等链接");
                println!("   3. 使用 https://realfavicongenerator.net/ 检查效果");
            }
            Ok(())
        }
        Command::Favicon { svg, out, fallback_dir, config } => {
            let cfg = load(config, &env)?;
            let job = resolve_favicon(svg, out, fallback_dir, &env, &cfg);
            let rasterizer = default_rasterizer();

            match create_favicon(rasterizer.as_deref(), &job) {
                FaviconOutcome::FromSource { svg } => {
                    println!(
                        "✅ {} 已由 {} 生成 [{}]",
                        job.out.display(),
                        svg.display(),
                        ico_summary(&job.out)
                    );
                }
                FaviconOutcome::FromFallback { dir } => {
                    println!(
                        "✅ {} 已由 {} 中的 PNG 生成 [{}]",
                        job.out.display(),
                        dir.display(),
                        ico_summary(&job.out)
                    );
                }
                FaviconOutcome::Failed { reason } => {
                    eprintln!("❌ {}", reason);
                }
            }
            Ok(())
        }
    }
}
