//! Line icon naming.
//!
//! The open-data icon archives name their files inconsistently: rail icons
//! carry a mode letter (`T3`, `M_14`), bus icons carry no mode at all and are
//! only recognizable by the archive they were extracted from, and most files
//! end in a vendor marker meaning "RGB-generated artwork". This module maps
//! every such file to a canonical `<mode>-<line>` slug so station records can
//! find their icon by line identity.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::core::text::slugify;
use crate::util::fs::{relative_path, to_slash};

/// Source artwork labels that prefix some bus icon names (`BUS_texture_42`).
static BUS_LABELS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:bus|texture)[_\- ]+)+").expect("valid regex")
});

/// Vendor "RGB-generated" markers, longest alternatives first.
static VENDOR_SUFFIXES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:-gen-rvb|-genrvb|genrvb|enrvb)").expect("valid regex")
});

static NIGHT_BUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bus-noct-n?").expect("valid regex"));
static TRAM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^t(?:-|(\d))").expect("valid regex"));
static SUBWAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^m(?:-|(\d))").expect("valid regex"));

/// An icon file found under the extract root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIconFile {
    /// Absolute path of the extracted file
    pub source_path: PathBuf,
    /// Path relative to the extract root, `/`-separated
    pub relative_path: String,
    /// File name without extension
    pub base_name: String,
    /// Extension including the leading dot (`.png`), or empty
    pub extension: String,
}

impl RawIconFile {
    /// Describe `path`, which must live under `extract_root`.
    pub fn new(extract_root: &Path, path: &Path) -> Self {
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        RawIconFile {
            source_path: path.to_path_buf(),
            relative_path: to_slash(&relative_path(extract_root, path)),
            base_name,
            extension,
        }
    }

    /// Name of the top-level directory under the extract root.
    pub fn top_level_dir(&self) -> &str {
        match self.relative_path.split_once('/') {
            Some((first, _)) => first,
            None => "",
        }
    }

    /// File name of the icon once built: `<slug><extension>`.
    pub fn built_file_name(&self, slug: &IconSlug) -> String {
        format!("{}{}", slug, self.extension)
    }
}

/// Canonical icon key, `<mode>-<line>[-suffix]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconSlug(String);

impl IconSlug {
    /// Wrap an already-normalized slug.
    pub fn new(slug: impl Into<String>) -> Self {
        IconSlug(slug.into())
    }

    /// The key icons of a line are looked up by.
    pub fn for_line(subtype: &str, line_number: &str) -> Self {
        IconSlug(format!("{}-{}", subtype, line_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this slug names an icon of `key`, i.e. starts with it.
    pub fn belongs_to(&self, key: &IconSlug) -> bool {
        self.0.starts_with(key.as_str())
    }
}

impl fmt::Display for IconSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An icon name that yields no usable slug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("icon `{path}` has no usable name")]
pub struct NormalizationError {
    pub path: String,
}

/// Compute the canonical slug of an icon.
///
/// Files whose top-level extract directory is `bus_root` are bus icons:
/// their source labels are dropped and `bus_` is prepended. Vendor markers
/// are then removed, the name is slugified and the mode rewrites are
/// applied (`bus-noct-` -> `bus-n`, `t` -> `tram-t`, `m` -> `subway-`).
///
/// ```
/// use ratp_importer::core::icon::normalize_icon_name;
///
/// let slug = normalize_icon_name("rail_icons/M3-genRVB.png", "M3-genRVB", "bus_icon").unwrap();
/// assert_eq!(slug.as_str(), "subway-3");
/// ```
pub fn normalize_icon_name(
    relative_path: &str,
    base_name: &str,
    bus_root: &str,
) -> Result<IconSlug, NormalizationError> {
    let is_bus = relative_path
        .split('/')
        .next()
        .is_some_and(|first| first == bus_root);

    let name = if is_bus {
        format!("bus_{}", BUS_LABELS.replace(base_name, ""))
    } else {
        base_name.to_string()
    };

    let name = VENDOR_SUFFIXES.replace_all(&name, "");
    let slug = slugify(&name);

    let slug = NIGHT_BUS.replace_all(&slug, "bus-n");
    let slug = TRAM_PREFIX.replace(&slug, "tram-t${1}");
    let slug = SUBWAY_PREFIX.replace(&slug, "subway-${1}");

    let stem = slug.trim_matches('-');
    if stem.is_empty() || stem == "bus" {
        return Err(NormalizationError {
            path: relative_path.to_string(),
        });
    }

    Ok(IconSlug(slug.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(path: &str) -> String {
        let base = Path::new(path)
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        normalize_icon_name(path, &base, "bus_icon")
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_bus_icons() {
        assert_eq!(normalize("bus_icon/BUS_texture_42-genRVB.png"), "bus-42");
        assert_eq!(normalize("bus_icon/NOCT-N01.png"), "bus-n01");
        assert_eq!(normalize("bus_icon/NOCT-01.png"), "bus-n01");
        assert_eq!(normalize("bus_icon/png/215genRVB.png"), "bus-215");
    }

    #[test]
    fn test_rail_icons() {
        assert_eq!(normalize("rail_icons/T3-genRVB.png"), "tram-t3");
        assert_eq!(normalize("rail_icons/T_3a-gen-rvb.png"), "tram-t3a");
        assert_eq!(normalize("rail_icons/M3-genRVB.png"), "subway-3");
        assert_eq!(normalize("rail_icons/M_14genRVB.png"), "subway-14");
        assert_eq!(normalize("rail_icons/RER_A-GENRVB.png"), "rer-a");
    }

    #[test]
    fn test_bus_detection_uses_top_level_dir_only() {
        // A rail archive containing a `bus_icon` subfolder is not a bus archive
        assert_eq!(normalize("rail_icons/bus_icon/M1.png"), "subway-1");
        // Names elsewhere are never prefixed
        assert_eq!(normalize("other/42.png"), "42");
    }

    #[test]
    fn test_unusable_name() {
        let err = normalize_icon_name("rail_icons/genRVB.png", "genRVB", "bus_icon").unwrap_err();
        assert_eq!(err.path, "rail_icons/genRVB.png");
        assert!(normalize_icon_name("bus_icon/BUS_.png", "BUS_", "bus_icon").is_err());
    }

    #[test]
    fn test_raw_icon_file() {
        let root = Path::new("/data/extract");
        let file = RawIconFile::new(root, &root.join("bus_icon/png/42.png"));
        assert_eq!(file.relative_path, "bus_icon/png/42.png");
        assert_eq!(file.top_level_dir(), "bus_icon");
        assert_eq!(file.base_name, "42");
        assert_eq!(file.extension, ".png");
        assert_eq!(file.built_file_name(&IconSlug::new("bus-42")), "bus-42.png");
    }

    #[test]
    fn test_slug_belongs_to() {
        let key = IconSlug::for_line("subway", "1");
        assert!(IconSlug::new("subway-1").belongs_to(&key));
        assert!(IconSlug::new("subway-1-bis").belongs_to(&key));
        assert!(IconSlug::new("subway-1b").belongs_to(&key));
        assert!(!IconSlug::new("subway-2").belongs_to(&key));
        assert!(!IconSlug::new("bus-1").belongs_to(&key));
    }
}
