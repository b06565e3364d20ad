use crate::config::Config;
use crate::config::migrate::fill_missing_fields;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file values plus overrides).
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{yaml}");
        Ok(())
    }

    /// Add missing keys to the configuration file.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        let added = fill_missing_fields(path)?;
        if added.is_empty() && path.exists() {
            success("Configuration file is complete.");
        }
        Ok(added)
    }

    /// Open the configuration file in an editor: the requested one first,
    /// then `$EDITOR`/`$VISUAL`, then nano (notepad on Windows).
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        if run_editor(&requested, path) {
            success(format!("Configuration file edited using '{requested}'"));
            return Ok(());
        }

        warning(format!(
            "Editor '{requested}' not available, falling back to '{default_editor}'"
        ));

        if run_editor(&default_editor, path) {
            success(format!("Configuration file edited using '{default_editor}'"));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "failed to edit {} with '{default_editor}'",
                path.display()
            )))
        }
    }
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}
