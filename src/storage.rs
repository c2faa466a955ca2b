//! Reading the member list and previous groupings, and saving accepted ones.
//!
//! Every accepted grouping is stored twice in the group directory:
//! `groupings_<k>.yml` for later sessions to read back, and
//! `groupings_<k>.txt` for people to read.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StorageError;
use crate::group::Group;

const GROUPING_EXTENSION: &str = "yml";
const GROUPING_PREFIX: &str = "groupings_";

/// Reads the member list, one member per line.
///
/// Lines are trimmed and blank lines skipped. A missing file is not an
/// error: it yields an empty list, which the search later rejects as too
/// short.
pub fn load_full_list(path: &Path) -> Result<Vec<String>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "no member list found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(StorageError::io(path, e)),
    };

    let members: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    info!(path = %path.display(), count = members.len(), "loaded member list");
    Ok(members)
}

fn grouping_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StorageError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == GROUPING_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every stored grouping in `dir` and flattens them into one list of
/// groups. A missing directory means there is no history yet.
pub fn load_previous_groups(dir: &Path) -> Result<Vec<Group<String>>, StorageError> {
    let mut previous_groups = Vec::new();
    let files = grouping_files(dir)?;

    for file in &files {
        let contents = fs::read_to_string(file).map_err(|e| StorageError::io(file, e))?;
        let grouping: Vec<Group<String>> =
            serde_yaml::from_str(&contents).map_err(|e| StorageError::yaml(file, e))?;
        previous_groups.extend(grouping);
    }

    info!(
        dir = %dir.display(),
        files = files.len(),
        groups = previous_groups.len(),
        "loaded previous groups"
    );
    Ok(previous_groups)
}

// Index `k` of a `groupings_<k>.yml` file, None for any other name
fn grouping_index(path: &Path) -> Option<usize> {
    path.file_stem()?
        .to_str()?
        .strip_prefix(GROUPING_PREFIX)?
        .parse()
        .ok()
}

/// Path stem for the next grouping, `<dir>/groupings_<k>` with `k` one past
/// the highest stored index, so gaps in the numbering never reuse a name.
/// Creates `dir` when missing.
pub fn next_grouping_stem(dir: &Path) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
    let highest = grouping_files(dir)?
        .iter()
        .filter_map(|path| grouping_index(path))
        .max()
        .unwrap_or(0);
    Ok(dir.join(format!("{}{}", GROUPING_PREFIX, highest + 1)))
}

fn render_text(grouping: &[Group<String>]) -> String {
    let mut text = String::new();
    for group in grouping {
        text.push_str(&group.members.join("\n"));
        text.push_str("\n\n");
    }
    text
}

/// Writes `grouping` as the next numbered grouping in `dir` and returns the
/// stem both files share.
///
/// The text dump goes first: only the `.yml` file counts as history, so a
/// failed save never leaves a half-written grouping behind.
pub fn save_grouping(dir: &Path, grouping: &[Group<String>]) -> Result<PathBuf, StorageError> {
    let stem = next_grouping_stem(dir)?;

    let yaml_path = stem.with_extension(GROUPING_EXTENSION);
    let yaml = serde_yaml::to_string(grouping).map_err(|e| StorageError::yaml(&yaml_path, e))?;

    let txt_path = stem.with_extension("txt");
    fs::write(&txt_path, render_text(grouping)).map_err(|e| StorageError::io(&txt_path, e))?;
    fs::write(&yaml_path, yaml).map_err(|e| StorageError::io(&yaml_path, e))?;

    info!(path = %yaml_path.display(), groups = grouping.len(), "saved grouping");
    Ok(stem)
}
