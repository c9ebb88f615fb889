//! Workbook: an ordered set of named sheets bound to an optional file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GridError, Result};
use crate::sheet::Sheet;
use crate::xlsx;

/// In-memory workbook.
///
/// Opened from an xlsx file, edited in memory, and written back with
/// [`save`](Self::save). Nothing touches the file until then, so dropping a
/// workbook discards every unsaved change.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    path: Option<PathBuf>,
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Empty workbook with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every sheet of the xlsx file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let sheets = xlsx::read_sheets(path)?;
        let cell_count: usize = sheets.iter().map(Sheet::len).sum();
        info!(
            path = %path.display(),
            sheet_count = sheets.len(),
            cell_count,
            "workbook loaded"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            sheets,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn contains_sheet(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.position(name)
            .map(|index| &self.sheets[index])
            .ok_or_else(|| GridError::SheetNotFound {
                name: name.to_string(),
            })
    }

    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        match self.position(name) {
            Some(index) => Ok(&mut self.sheets[index]),
            None => Err(GridError::SheetNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Append `sheet`, rejecting a duplicate name.
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<&mut Sheet> {
        if self.contains_sheet(sheet.name()) {
            return Err(GridError::DuplicateSheet {
                name: sheet.name().to_string(),
            });
        }
        self.sheets.push(sheet);
        let index = self.sheets.len() - 1;
        Ok(&mut self.sheets[index])
    }

    /// Duplicate `source` (every cell) as a new sheet named `new_name`.
    pub fn copy_sheet(&mut self, source: &str, new_name: &str) -> Result<&mut Sheet> {
        let mut copy = self.sheet(source)?.clone();
        copy.rename(new_name);
        debug!(
            source_sheet = source,
            target_sheet = new_name,
            cell_count = copy.len(),
            "sheet copied"
        );
        self.add_sheet(copy)
    }

    /// Write the workbook back to the file it was opened from.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(GridError::NoPath)?;
        self.write_to(path)
    }

    /// Write the workbook to `path` and bind it to that file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        xlsx::write_sheets(path, &self.sheets)?;
        info!(path = %path.display(), sheet_count = self.sheets.len(), "workbook saved");
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.name() == name)
    }
}
