use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Report keys missing from the configuration file on disk.
    pub fn check(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {} (defaults are in use). Run `init` to create one.",
                path.display()
            ));
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        let missing = Config::missing_keys(&content)?;

        // parse errors and invalid values surface here
        Config::from_yaml(&content)?;

        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            for key in &missing {
                warning(format!("Missing key '{}' (default value in use)", key));
            }
        }
        Ok(())
    }

    /// Open the configuration file in an editor, falling back to the
    /// platform default when the requested one fails.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
                Ok(())
            }
            _ => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));

                match Command::new(&default_editor).arg(path).status() {
                    Ok(s) if s.success() => {
                        success(format!(
                            "Configuration file edited successfully using fallback '{}'",
                            default_editor
                        ));
                        Ok(())
                    }
                    _ => Err(AppError::Config(format!(
                        "failed to edit configuration file using '{}'",
                        default_editor
                    ))),
                }
            }
        }
    }
}
