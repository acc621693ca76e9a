/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// A fresh, empty directory under the system temp dir, unique per test name
/// and process. Removed again when dropped, so keep it bound for as long as
/// the test uses it.
pub struct ScratchDir {
	path: PathBuf,
}

pub fn scratch_dir(name: &str) -> ScratchDir {
	let path = std::env::temp_dir()
		.join(format!("kurs-test-{}-{}", name, std::process::id()));
	if path.exists() {
		fs::remove_dir_all(&path).unwrap();
	}
	fs::create_dir_all(&path).unwrap();
	ScratchDir { path }
}

impl Deref for ScratchDir {
	type Target = Path;

	fn deref(&self) -> &Path {
		&self.path
	}
}

impl Drop for ScratchDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

#[test]
fn test_scratch_dir_removed_on_drop() {
	let dir = scratch_dir("scratch_drop");
	let path = dir.to_path_buf();
	fs::write(path.join("file"), "x").unwrap();
	assert!(path.exists());

	drop(dir);
	assert!(!path.exists());
}
