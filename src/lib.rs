// thread_viewer — A terminal viewer for exported chat threads
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod app;
pub mod error;
pub mod export;
pub mod render;
pub mod storage;
pub mod thread;
pub mod ui;

use clap::Parser;
use error::AppError;
use std::path::PathBuf;

/// Environment variable consulted when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "THREAD_VIEWER_DATA_DIR";

#[derive(Parser, Debug)]
#[command(name = "thread-viewer", about = "Terminal viewer for exported chat threads")]
pub struct Cli {
    /// Directory holding imported conversations and scroll state
    #[arg(long, short = 'D')]
    pub data_dir: Option<PathBuf>,

    /// Import export files (several files of one thread are merged)
    #[arg(long, short, num_args = 1.., value_name = "FILE")]
    pub import: Vec<PathBuf>,

    /// Open this conversation id on startup
    #[arg(long, short)]
    pub open: Option<String>,

    /// Write tracing diagnostics to a file (disabled unless explicitly set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (example: `info,thread_viewer=debug`)
    /// Falls back to `RUST_LOG` when omitted.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    /// `--data-dir`, then the environment, then the platform data directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, AppError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::data_dir().map(|dir| dir.join("thread-viewer")).ok_or(AppError::NoDataDir)
    }
}
