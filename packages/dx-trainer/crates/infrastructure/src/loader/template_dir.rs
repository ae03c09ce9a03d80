use domain::{CatalogLoadError, DiseaseCatalog, DiseaseTemplate};
use dx_template::{TemplateFormat, TemplateParser};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A directory of disease template files (one disease per file).
pub struct TemplateDirectory {
    root: PathBuf,
    recursive: bool,
}

impl TemplateDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
        }
    }

    /// Also read templates from subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse every template in the directory and build the catalog.
    ///
    /// Hidden files and files with an unsupported extension are skipped.
    /// Templates are ordered by disease name.
    pub fn load(&self) -> Result<DiseaseCatalog, CatalogLoadError> {
        if !self.root.is_dir() {
            return Err(CatalogLoadError::Unreadable {
                origin: self.root.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        let mut templates = Vec::new();
        for path in self.template_files()? {
            let template = Self::load_file(&path)?;
            tracing::debug!(disease = %template.name, path = %path.display(), "Loaded template");
            templates.push(template);
        }

        templates.sort_by(|a, b| a.name.cmp(&b.name));
        let catalog = DiseaseCatalog::new(templates)?;

        tracing::info!(
            "Loaded {} disease templates from {}",
            catalog.len(),
            self.root.display()
        );
        Ok(catalog)
    }

    fn load_file(path: &Path) -> Result<DiseaseTemplate, CatalogLoadError> {
        TemplateParser::parse_file(path).map_err(|e| CatalogLoadError::Unreadable {
            origin: path.display().to_string(),
            message: format!("{:#}", e),
        })
    }

    fn template_files(&self) -> Result<Vec<PathBuf>, CatalogLoadError> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| CatalogLoadError::Unreadable {
                origin: self.root.display().to_string(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if TemplateFormat::from_path(entry.path()).is_none() {
                tracing::debug!(path = %entry.path().display(), "Skipping non-template file");
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
