// SPDX-License-Identifier: Apache-2.0
// Copyright 2024 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::{File, OpenOptions, TryLockError};
use std::path::PathBuf;

use log::{debug, warn};

use crate::error::Error;

/// Name of the lock file in the temporary directory.
pub const LOCK_FILE: &str = "ukcp-srd-import.lock";

/// Exclusive lock that prevents two imports from running at once.
///
/// The lock is released when it is dropped or the process exits.
#[derive(Debug)]
pub struct ProcessLock {
    file: File,
    path: PathBuf,
}

impl ProcessLock {
    /// Acquires the lock on the file at `path` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRunning`] if another process holds the lock.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        match file.try_lock() {
            Ok(()) => {
                debug!("acquired process lock {}", path.display());
                Ok(Self { file, path })
            }
            Err(TryLockError::WouldBlock) => Err(Error::AlreadyRunning(path)),
            Err(TryLockError::Error(e)) => Err(e.into()),
        }
    }

    /// Acquires the lock [`LOCK_FILE`] in the temporary directory.
    pub fn acquire_default() -> Result<Self, Error> {
        Self::acquire(std::env::temp_dir().join(LOCK_FILE))
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => debug!("released process lock {}", self.path.display()),
            Err(e) => warn!("failed to release process lock {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_is_exclusive() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join(LOCK_FILE);

        let lock = ProcessLock::acquire(&path).expect("lock should be acquired");

        assert!(matches!(
            ProcessLock::acquire(&path),
            Err(Error::AlreadyRunning(held)) if held == path
        ));

        drop(lock);
        ProcessLock::acquire(&path).expect("released lock should be acquired again");
    }
}
