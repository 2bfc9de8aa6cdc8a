//! Static site generation on top of the markdown core.
//!
//! A site root holds a `static/` tree copied verbatim, a `content/` tree of
//! markdown pages, and an HTML template. Every page is rendered into the
//! template and written under `public/` with the same relative path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, TemplateConfig};
use crate::error::{Error, SiteError};
use crate::{extract_title, markdown_to_tree};

/// Counts reported after a successful build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub static_files: usize,
}

/// Render one markdown document into the page template.
pub fn render_page(
    markdown: &str,
    template: &str,
    placeholders: &TemplateConfig,
) -> Result<String, Error> {
    let html = markdown_to_tree(markdown)?.render()?;
    let title = extract_title(markdown)?;

    Ok(template
        .replace(&placeholders.title, title)
        .replace(&placeholders.content, &html))
}

/// Build the whole site described by `config`, with paths resolved against `root`.
pub fn build_site(config: &Config, root: &Path) -> Result<BuildSummary, SiteError> {
    let static_dir = root.join(&config.paths.static_dir);
    let content_dir = root.join(&config.paths.content);
    let public_dir = root.join(&config.paths.public);
    let template_path = root.join(&config.paths.template);

    log::debug!("Static files: {}", static_dir.display());
    log::debug!("Content: {}", content_dir.display());
    log::debug!("Output: {}", public_dir.display());

    if !static_dir.is_dir() {
        return Err(SiteError::MissingDirectory(static_dir));
    }
    if !content_dir.is_dir() {
        return Err(SiteError::MissingDirectory(content_dir));
    }
    if !content_dir.join("index.md").is_file() {
        return Err(SiteError::MissingIndex(content_dir));
    }

    let template =
        fs::read_to_string(&template_path).map_err(SiteError::io(&template_path))?;

    check_output_dir(&public_dir, root, &[&content_dir, &static_dir, &template_path])?;

    // Start from a clean output directory
    if public_dir.exists() {
        log::debug!("Removing {}", public_dir.display());
        fs::remove_dir_all(&public_dir).map_err(SiteError::io(&public_dir))?;
    }
    fs::create_dir_all(&public_dir).map_err(SiteError::io(&public_dir))?;

    let static_files = copy_static(&static_dir, &public_dir)?;
    let pages = generate_pages_recursive(&content_dir, &template, &public_dir, &config.template)?;

    Ok(BuildSummary {
        pages,
        static_files,
    })
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;

    for entry in sorted_entries(src)? {
        let target = dst.join(entry.file_name().unwrap_or_default());

        if entry.is_file() {
            log::info!("Copying {} to {}", entry.display(), target.display());
            fs::copy(&entry, &target).map_err(SiteError::io(&entry))?;
            copied += 1;
        } else if entry.is_dir() {
            fs::create_dir_all(&target).map_err(SiteError::io(&target))?;
            copied += copy_static(&entry, &target)?;
        } else {
            return Err(SiteError::UnsupportedFile(entry));
        }
    }

    Ok(copied)
}

/// Render a single markdown file and write it to `dest` with an `.html` extension.
pub fn generate_page(
    from: &Path,
    template: &str,
    dest: &Path,
    placeholders: &TemplateConfig,
) -> Result<PathBuf, SiteError> {
    let dest = dest.with_extension("html");
    log::info!("Generating page from {} to {}", from.display(), dest.display());

    let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;
    let page = render_page(&markdown, template, placeholders).map_err(|source| {
        SiteError::Markdown {
            path: from.to_path_buf(),
            source,
        }
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(&dest, page).map_err(SiteError::io(&dest))?;

    Ok(dest)
}

/// Mirror `content_dir` into `dest_dir`, rendering every markdown file.
///
/// Files other than `.md` are rejected; assets belong in the static tree.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    placeholders: &TemplateConfig,
) -> Result<usize, SiteError> {
    let mut generated = 0;

    for entry in sorted_entries(content_dir)? {
        let target = dest_dir.join(entry.file_name().unwrap_or_default());

        if entry.is_file() && entry.extension().is_some_and(|ext| ext == "md") {
            generate_page(&entry, template, &target, placeholders)?;
            generated += 1;
        } else if entry.is_dir() {
            fs::create_dir_all(&target).map_err(SiteError::io(&target))?;
            generated += generate_pages_recursive(&entry, template, &target, placeholders)?;
        } else {
            return Err(SiteError::UnsupportedFile(entry));
        }
    }

    Ok(generated)
}

/// Refuse an output directory that would take site sources with it when cleaned.
fn check_output_dir(output: &Path, root: &Path, sources: &[&Path]) -> Result<(), SiteError> {
    let resolved = resolve(output)?;
    let unsafe_output = |overlaps: &Path| SiteError::UnsafeOutput {
        output: output.to_path_buf(),
        overlaps: overlaps.to_path_buf(),
    };

    if resolve(root)?.starts_with(&resolved) {
        return Err(unsafe_output(root));
    }
    for &source in sources {
        let source_resolved = resolve(source)?;
        if source_resolved.starts_with(&resolved) || resolved.starts_with(&source_resolved) {
            return Err(unsafe_output(source));
        }
    }

    Ok(())
}

/// Canonical form of `path`; parts that do not exist yet are appended as given.
fn resolve(path: &Path) -> Result<PathBuf, SiteError> {
    if path.exists() {
        return fs::canonicalize(path).map_err(SiteError::io(path));
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Ok(resolve(parent)?.join(name)),
        _ => Ok(path.to_path_buf()),
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(SiteError::io(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SiteError::io(dir))?;
    entries.sort();
    Ok(entries)
}
