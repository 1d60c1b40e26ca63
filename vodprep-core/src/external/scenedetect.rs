//! Scene-boundary detection via an external detector CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CoreError, CoreResult};

use super::run_tool;

/// Runs the scene detector against `input` and returns the path of the scene
/// CSV it wrote under `scenes_dir`.
///
/// The detector is expected to write `<stem>-Scenes.csv`; a run that exits
/// zero without producing it is still an error.
pub fn run_scene_detect(scenedetect: &str, input: &Path, scenes_dir: &Path) -> CoreResult<PathBuf> {
    fs::create_dir_all(scenes_dir)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CoreError::PathError(format!("no file stem in {}", input.display())))?;
    let csv_path = scenes_dir.join(format!("{stem}-Scenes.csv"));

    let mut cmd = Command::new(scenedetect);
    cmd.arg("-i")
        .arg(input)
        .arg("-o")
        .arg(scenes_dir)
        .arg("detect-content")
        .arg("list-scenes");

    run_tool(scenedetect, &mut cmd)?;

    if !csv_path.exists() {
        return Err(CoreError::OutputMissing(csv_path));
    }
    Ok(csv_path)
}
