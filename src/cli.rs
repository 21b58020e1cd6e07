//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 所有参数均可省略，缺省时依次回退到环境变量、配置文件与内置默认值。

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "favgen", about = "把 logo.svg 转换为 PNG 图标与 favicon.ico", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// 子命令定义
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// 生成各平台所需的 PNG 图标（并顺带合成 favicon.ico）
    Icons {
        /// 源 SVG，默认：logo.svg
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,
        /// 输出目录，默认：icons
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// 不合成 favicon.ico
        #[arg(long)]
        no_ico: bool,
        /// 配置文件路径，默认自动发现 favgen.yaml / favgen.yml
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// 生成 favicon.ico（优先由 SVG 直接生成，失败时使用已生成的 PNG）
    Favicon {
        /// 源 SVG，默认：logo.svg
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,
        /// 输出文件，默认：favicon.ico
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// 回退 PNG 所在目录，默认：icons
        #[arg(long, value_name = "DIR")]
        fallback_dir: Option<PathBuf>,
        /// 配置文件路径，默认自动发现 favgen.yaml / favgen.yml
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}
