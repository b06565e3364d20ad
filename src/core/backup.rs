use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path actually written, or `None` when the user declined
    /// to overwrite an existing file.
    pub fn backup(
        cfg: &Config,
        dest_file: &str,
        compress: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        let pool = DbPool::new(&cfg.database)?;
        // Flush the WAL (if any) so the copied file is self-contained.
        // First column of the result is 1 when a reader kept it busy.
        match pool
            .conn
            .query_row("PRAGMA wal_checkpoint(FULL)", [], |r| r.get::<_, i64>(0))
        {
            Ok(0) => {}
            Ok(_) => warning(
                "WAL checkpoint incomplete (database busy), the backup may miss recent changes.",
            ),
            Err(e) => warning(format!(
                "WAL checkpoint failed, the backup may miss recent changes: {e}"
            )),
        }

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if compressed != dest {
                match fs::remove_file(dest) {
                    Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                    Err(e) => warning(format!("Failed to remove uncompressed backup: {e}")),
                }
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        if let Err(e) = ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(Some(final_path))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Do you want to overwrite it? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Compress a backup using .zip
pub(crate) fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Validation(format!("not a file path: {}", path.display())))?;

    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
