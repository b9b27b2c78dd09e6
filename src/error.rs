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

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("No data directory available")]
    NoDataDir,
    #[error("Data directory {0} is not usable")]
    DataDirUnusable(PathBuf),
    #[error("Import file {0} not found")]
    ImportFileMissing(PathBuf),
}

impl AppError {
    pub const NO_DATA_DIR_EXIT_CODE: i32 = 20;
    pub const DATA_DIR_UNUSABLE_EXIT_CODE: i32 = 21;
    pub const IMPORT_FILE_MISSING_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDataDir => Self::NO_DATA_DIR_EXIT_CODE,
            Self::DataDirUnusable(_) => Self::DATA_DIR_UNUSABLE_EXIT_CODE,
            Self::ImportFileMissing(_) => Self::IMPORT_FILE_MISSING_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoDataDir => format!(
                "Could not determine a data directory. Pass --data-dir or set {}.",
                crate::DATA_DIR_ENV
            ),
            Self::DataDirUnusable(path) => {
                format!("{} exists but is not a directory. Pass a different --data-dir.", path.display())
            }
            Self::ImportFileMissing(path) => format!("Cannot import {}: no such file.", path.display()),
        }
    }
}
