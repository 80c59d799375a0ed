//! Study-materials collaborators: a read-only listing of the two fixed
//! content directories, a serving guard that refuses anything outside
//! them, and the manually tracked mock-paper scores.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::storage::{self, KeyValueStore};

/// Directory groups scanned for study material, relative to the app's
/// base directory.
pub const MATERIAL_GROUPS: [&str; 2] = ["materials", "mock_papers"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Pdf,
    Html,
    Other,
}

impl MaterialKind {
    pub fn from_ext(ext: &str) -> Self {
        match ext {
            "pdf" => MaterialKind::Pdf,
            "html" | "htm" => MaterialKind::Html,
            _ => MaterialKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::Pdf => "PDF",
            MaterialKind::Html => "HTML",
            MaterialKind::Other => "FILE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MaterialEntry {
    pub name: String,
    pub group: String,
    pub url: String,
    pub ext: String,
    pub size: u64,
    pub kind: MaterialKind,
}

impl MaterialEntry {
    pub fn size_label(&self) -> String {
        if self.size >= 1_048_576 {
            format!("{:.1} MB", self.size as f64 / 1_048_576.0)
        } else {
            format!("{:.0} KB", (self.size as f64 / 1024.0).max(1.0))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServeError {
    Forbidden,
    NotFound,
    NotAFile,
}

impl ServeError {
    pub fn message(&self) -> &'static str {
        match self {
            ServeError::Forbidden => "That file is outside the materials directories.",
            ServeError::NotFound => "File not found.",
            ServeError::NotAFile => "Not a regular file.",
        }
    }
}

/// Lists every regular file in the two material directories. Missing
/// directories are skipped, not errors.
#[cfg(not(target_arch = "wasm32"))]
pub fn list_materials(base: &Path) -> Vec<MaterialEntry> {
    let mut items = Vec::new();
    for group in MATERIAL_GROUPS {
        let dir = base.join(group);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let ext = Path::new(&name)
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            items.push(MaterialEntry {
                url: format!("{group}/{name}"),
                kind: MaterialKind::from_ext(&ext),
                name,
                group: group.to_owned(),
                ext,
                size: meta.len(),
            });
        }
    }
    items.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
    items
}

/// Resolves a requested path against the two allowed directories.
/// Anything that normalizes to the outside is refused before the
/// filesystem is touched.
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_material(base: &Path, requested: &str) -> Result<PathBuf, ServeError> {
    let resolved = normalize(&base.join(requested));
    let allowed = MATERIAL_GROUPS
        .iter()
        .map(|group| normalize(&base.join(group)))
        .any(|dir| resolved.starts_with(&dir) && resolved != dir);
    if !allowed {
        return Err(ServeError::Forbidden);
    }
    if !resolved.exists() {
        return Err(ServeError::NotFound);
    }
    if !resolved.is_file() {
        return Err(ServeError::NotAFile);
    }
    Ok(resolved)
}

// Lexical normalization (like the original's path.resolve): `..` must
// not escape the allowed roots even when the target does not exist.
#[cfg(not(target_arch = "wasm32"))]
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// One manually entered mock-paper result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MockScore {
    pub score: i64,
    pub total: u32,
    pub date_epoch_ms: u64,
}

/// Validates manual score input at the boundary; nothing is stored on
/// rejection.
pub fn parse_mock_entry(score: &str, total: &str) -> Result<(i64, u32), String> {
    let score: i64 = score
        .trim()
        .parse()
        .map_err(|_| "Score must be a number.".to_owned())?;
    let total: u32 = total
        .trim()
        .parse()
        .map_err(|_| "Total must be a number.".to_owned())?;
    if total == 0 {
        return Err("Total must be greater than zero.".to_owned());
    }
    Ok((score, total))
}

pub fn load_mock_scores(store: &dyn KeyValueStore) -> Vec<MockScore> {
    storage::load_json(store, storage::MOCK_PERF_KEY).unwrap_or_default()
}

pub fn save_mock_scores(scores: &[MockScore], store: &mut dyn KeyValueStore) {
    storage::save_json(store, storage::MOCK_PERF_KEY, &scores);
}

/// Mean percentage across entries, `None` when there are none.
pub fn mock_average(scores: &[MockScore]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores
        .iter()
        .map(|s| s.score as f64 / s.total as f64 * 100.0)
        .sum();
    Some(sum / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_numeric_entries() {
        assert!(parse_mock_entry("abc", "200").is_err());
        assert!(parse_mock_entry("120", "").is_err());
        assert!(parse_mock_entry("120", "0").is_err());
    }

    #[test]
    fn accepts_valid_entries_including_negative_scores() {
        assert_eq!(parse_mock_entry(" 120 ", "200"), Ok((120, 200)));
        // negative marking can push a mock score below zero
        assert_eq!(parse_mock_entry("-5", "200"), Ok((-5, 200)));
    }

    #[test]
    fn average_is_percentage_over_entries() {
        let scores = vec![
            MockScore {
                score: 100,
                total: 200,
                date_epoch_ms: 1,
            },
            MockScore {
                score: 150,
                total: 200,
                date_epoch_ms: 2,
            },
        ];
        assert_eq!(mock_average(&scores), Some(62.5));
        assert_eq!(mock_average(&[]), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod serving {
        use super::super::*;

        fn sandbox() -> PathBuf {
            let dir = std::env::temp_dir().join(format!(
                "kiddoprep-materials-{}-{:?}",
                std::process::id(),
                std::thread::current().id()
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(dir.join("materials")).expect("create materials dir");
            std::fs::create_dir_all(dir.join("mock_papers")).expect("create mock_papers dir");
            std::fs::write(dir.join("materials/notes.pdf"), b"pdf").expect("write file");
            std::fs::write(dir.join("secret.txt"), b"no").expect("write file");
            dir
        }

        #[test]
        fn lists_only_files_inside_the_fixed_groups() {
            let base = sandbox();
            let items = list_materials(&base);
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].name, "notes.pdf");
            assert_eq!(items[0].group, "materials");
            assert_eq!(items[0].kind, MaterialKind::Pdf);
        }

        #[test]
        fn serves_whitelisted_files_only() {
            let base = sandbox();
            assert!(resolve_material(&base, "materials/notes.pdf").is_ok());
            assert_eq!(
                resolve_material(&base, "secret.txt"),
                Err(ServeError::Forbidden)
            );
            assert_eq!(
                resolve_material(&base, "materials/../secret.txt"),
                Err(ServeError::Forbidden)
            );
            assert_eq!(
                resolve_material(&base, "materials/missing.pdf"),
                Err(ServeError::NotFound)
            );
        }

        #[test]
        fn missing_directories_are_skipped() {
            let base = std::env::temp_dir().join("kiddoprep-definitely-missing");
            assert!(list_materials(&base).is_empty());
        }
    }
}
