//! favgen：把 logo.svg 转换为各平台需要的 PNG 图标与多分辨率 favicon.ico。

mod cli;
mod commands;
mod config;
mod container;
mod favicon;
mod icons;
mod raster;
mod utils;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    commands::run(cli)
}
