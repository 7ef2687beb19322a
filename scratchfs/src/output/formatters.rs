//! Output formatter implementations.

use serde::Serialize;

use super::OutputFormatter;
use crate::error::Result;
use crate::fs::{is_pseudo, Directory, FileInfo, FileType};
use crate::operations::{CleanupPlan, CleanupResult};
use crate::path::Path;

/// The `ls -l` style mode string, type character included.
///
/// # Examples
///
/// ```
/// use scratchfs::fs::MemoryFileSystem;
/// use scratchfs::output::permission_string;
/// use scratchfs::{FileInfo, Path};
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir("/d").unwrap();
/// let info = FileInfo::probe(&fs, &Path::new("/d").unwrap()).unwrap();
/// assert_eq!(permission_string(&info), "drwxr-xr-x");
/// ```
#[must_use]
pub fn permission_string(info: &FileInfo) -> String {
    let kind = match info.file_type() {
        FileType::BlockDevice => 'b',
        FileType::CharDevice => 'c',
        FileType::Directory => 'd',
        FileType::Fifo => 'p',
        FileType::Symlink => 'l',
        FileType::Regular => '-',
        FileType::Socket => 's',
        FileType::Whiteout => 'w',
    };

    let bits = [
        (info.is_owner_readable(), 'r'),
        (info.is_owner_writable(), 'w'),
        (info.is_owner_executable(), 'x'),
        (info.is_group_readable(), 'r'),
        (info.is_group_writable(), 'w'),
        (info.is_group_executable(), 'x'),
        (info.is_other_readable(), 'r'),
        (info.is_other_writable(), 'w'),
        (info.is_other_executable(), 'x'),
    ];

    std::iter::once(kind)
        .chain(bits.iter().map(|&(set, c)| if set { c } else { '-' }))
        .collect()
}

fn entries(dir: &Directory, include_pseudo: bool) -> impl Iterator<Item = (&str, &FileInfo)> {
    dir.iter().filter(move |(name, _)| include_pseudo || !is_pseudo(name))
}

/// Formatter for human-readable output.
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format_file_info(&self, info: &FileInfo) -> Result<String> {
        Ok([
            format!("path:   {}", info.path()),
            format!("type:   {}", info.file_type()),
            format!("mode:   {:04o} ({})", info.mode(), permission_string(info)),
            format!("device: {}", info.device()),
        ]
        .join("\n"))
    }

    fn format_directory(&self, dir: &Directory, include_pseudo: bool) -> Result<String> {
        let lines: Vec<String> = entries(dir, include_pseudo)
            .map(|(name, info)| format!("{}  {}", permission_string(info), name))
            .collect();

        if lines.is_empty() {
            return Ok(format!("{} is empty.", dir.path()));
        }
        Ok(lines.join("\n"))
    }

    fn format_mount_points(&self, mounts: &[Path]) -> Result<String> {
        if mounts.is_empty() {
            return Ok("No mount points.".to_string());
        }
        Ok(mounts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_cleanup_result(&self, result: &CleanupResult) -> Result<String> {
        let mut lines: Vec<String> = result
            .unmounted
            .iter()
            .map(|mount| format!("Unmounted {mount}"))
            .collect();
        lines.push(format!(
            "Removed {} file(s) and {} director{}.",
            result.files_removed,
            result.directories_removed,
            if result.directories_removed == 1 { "y" } else { "ies" }
        ));
        Ok(lines.join("\n"))
    }

    fn format_cleanup_plan(&self, plan: &CleanupPlan) -> Result<String> {
        let mut lines = vec![format!("Cleanup plan for {}:", plan.root)];
        lines.extend(plan.describe().into_iter().map(|step| format!("  {step}")));
        Ok(lines.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

#[derive(Serialize)]
struct DirectoryEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    info: &'a FileInfo,
}

#[derive(Serialize)]
struct DirectoryListing<'a> {
    path: &'a Path,
    entries: Vec<DirectoryEntry<'a>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_file_info(&self, info: &FileInfo) -> Result<String> {
        Ok(serde_json::to_string_pretty(info)?)
    }

    fn format_directory(&self, dir: &Directory, include_pseudo: bool) -> Result<String> {
        let listing = DirectoryListing {
            path: dir.path(),
            entries: entries(dir, include_pseudo)
                .map(|(name, info)| DirectoryEntry { name, info })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&listing)?)
    }

    fn format_mount_points(&self, mounts: &[Path]) -> Result<String> {
        Ok(serde_json::to_string_pretty(mounts)?)
    }

    fn format_cleanup_result(&self, result: &CleanupResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn format_cleanup_plan(&self, plan: &CleanupPlan) -> Result<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }
}
