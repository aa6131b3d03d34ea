use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Logical name of one processor output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvId {
    Csv1,
    Csv2,
    Csv3,
    Csv4,
}

impl CsvId {
    pub const ALL: [CsvId; 4] = [CsvId::Csv1, CsvId::Csv2, CsvId::Csv3, CsvId::Csv4];

    /// Exact, case-sensitive match on the route segment.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "csv1" => Some(CsvId::Csv1),
            "csv2" => Some(CsvId::Csv2),
            "csv3" => Some(CsvId::Csv3),
            "csv4" => Some(CsvId::Csv4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CsvId::Csv1 => "csv1",
            CsvId::Csv2 => "csv2",
            CsvId::Csv3 => "csv3",
            CsvId::Csv4 => "csv4",
        }
    }

    /// File name relative to the public directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            CsvId::Csv1 => "output.csv",
            CsvId::Csv2 => "output_2.csv",
            CsvId::Csv3 => "output_3.csv",
            CsvId::Csv4 => "output_4.csv",
        }
    }
}

impl std::fmt::Display for CsvId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable identifier -> path table, built and checked once at startup.
#[derive(Debug, Clone)]
pub struct CsvTable {
    paths: Vec<(CsvId, PathBuf)>,
}

impl CsvTable {
    pub fn new(public_dir: &Path) -> Result<Self, String> {
        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(CsvId::ALL.len());

        for id in CsvId::ALL {
            let relative = Path::new(id.file_name());
            if !is_contained(relative) {
                return Err(format!("CSV path for {id} escapes the public directory"));
            }

            let path = public_dir.join(relative);
            if !seen.insert(path.clone()) {
                return Err(format!("CSV path {} is bound more than once", path.display()));
            }

            if !path.is_file() {
                tracing::warn!("CSV file for {id} not present yet: {}", path.display());
            }

            paths.push((id, path));
        }

        Ok(CsvTable { paths })
    }

    pub fn path(&self, id: CsvId) -> &Path {
        // Built in `CsvId::ALL` order, so the discriminant is the index.
        &self.paths[id as usize].1
    }

    /// Resolve a route segment. `None` means the identifier is unknown.
    pub fn resolve(&self, raw: &str) -> Option<&Path> {
        CsvId::parse(raw).map(|id| self.path(id))
    }
}

fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
