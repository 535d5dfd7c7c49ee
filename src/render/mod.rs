//! Page renderer — writes the index page and one Markdown page per type.

pub mod markdown;

use crate::model::full_name;
use crate::parser::DocIndex;
use crate::toc;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output directory used when none is given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "docs/api-markdown";

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    /// Render fields, events and method exceptions too
    pub all_members: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            all_members: false,
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct Summary {
    pub types: usize,
    pub index_path: PathBuf,
}

pub struct Generator<'a> {
    index: &'a DocIndex,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub fn new(index: &'a DocIndex, config: &'a GeneratorConfig) -> Self {
        Self { index, config }
    }

    /// Write `index.md` and every type page into the output directory.
    ///
    /// Existing files with the same names are overwritten.
    pub fn generate_all(&self) -> Result<Summary> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).with_context(|| {
            format!("failed to create output directory: {}", output_dir.display())
        })?;

        let types = self.index.get_all_types();

        let index_path = output_dir.join(toc::INDEX_FILE);
        write_page(&index_path, &toc::render_index(&types))?;
        info!(path = %index_path.display(), types = types.len(), "wrote index page");

        for type_id in &types {
            self.generate_type_doc(type_id)?;
        }

        Ok(Summary {
            types: types.len(),
            index_path,
        })
    }

    /// Render and write the page for a single type. Returns the written path.
    pub fn generate_type_doc(&self, type_id: &str) -> Result<PathBuf> {
        let content = markdown::render_type_page(self.index, type_id, self.config.all_members);
        let path = self
            .config
            .output_dir
            .join(toc::type_file_name(full_name(type_id)));
        write_page(&path, &content)?;
        debug!(member = %type_id, path = %path.display(), "wrote type page");
        Ok(path)
    }
}

fn write_page(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
