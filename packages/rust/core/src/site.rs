//! Batch pass over a static-site output directory.
//!
//! Every `.html`/`.htm` file under the site root is mapped to the URL it is
//! served at, rendered, and written back in place or into an output directory.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use autocrumb_shared::{AutocrumbError, BreadcrumbOptions, Result};

use crate::render::render_html;

/// Characters escaped in URL path segments derived from file names.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Configuration for [`render_site`].
#[derive(Debug, Clone)]
pub struct SiteJob {
    /// Directory containing the built site.
    pub root: PathBuf,
    /// Write results here instead of in place.
    pub out_dir: Option<PathBuf>,
    /// URL the site root is served at. A path component acts as a base path.
    pub base_url: Url,
    /// Strip `.html` and `index.html` from derived URLs.
    pub clean_urls: bool,
    /// Maximum number of files processed at once.
    pub concurrency: usize,
    pub options: BreadcrumbOptions,
}

/// Summary of a completed site pass.
#[derive(Debug, Clone, Default)]
pub struct SiteSummary {
    /// HTML files found.
    pub files: usize,
    /// Files whose content changed.
    pub rewritten: usize,
    /// Files without a breadcrumb root or already up to date.
    pub unchanged: usize,
    /// Failures (path, message). A failing file does not stop the pass.
    pub errors: Vec<(PathBuf, String)>,
    pub elapsed: Duration,
}

/// Progress callback for reporting site pass status.
pub trait ProgressReporter: Send + Sync {
    /// Called once the file list is known.
    fn started(&self, total: usize);
    /// Called after each file is processed.
    fn file_done(&self, path: &Path, current: usize, total: usize);
    /// Called when the pass completes.
    fn done(&self, summary: &SiteSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn file_done(&self, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _summary: &SiteSummary) {}
}

// ---------------------------------------------------------------------------
// Path mapping
// ---------------------------------------------------------------------------

/// URL path a site-relative HTML file is served at.
///
/// With `clean_urls`, `index.html` maps to its directory (with a trailing
/// slash) and `name.html` to `name`; otherwise the file path is used as is.
pub fn url_path_for(relative: &Path, clean_urls: bool) -> String {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let mut trailing_slash = false;
    if clean_urls {
        if let Some(last) = parts.pop() {
            let file = Path::new(&last);
            let stem = match file.file_stem() {
                Some(stem) if is_html(file) => stem.to_string_lossy().into_owned(),
                _ => last.clone(),
            };
            if stem == "index" {
                trailing_slash = !parts.is_empty();
            } else {
                parts.push(stem);
            }
        }
    }

    let encoded: Vec<String> = parts
        .iter()
        .map(|p| utf8_percent_encode(p, SEGMENT).to_string())
        .collect();

    let mut path = format!("/{}", encoded.join("/"));
    if trailing_slash {
        path.push('/');
    }
    path
}

/// Full page URL for a site-relative file under `base_url`.
pub fn page_url(base_url: &Url, relative: &Path, clean_urls: bool) -> Url {
    let base_path = base_url.path().trim_end_matches('/');
    let mut url = base_url.clone();
    url.set_path(&format!("{base_path}{}", url_path_for(relative, clean_urls)));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// All HTML files under `root`, sorted, as paths relative to `root`.
pub fn collect_html_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut dirs = vec![root.to_path_buf()];

    while let Some(dir) = dirs.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| AutocrumbError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AutocrumbError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| AutocrumbError::io(&path, e))?;

            if file_type.is_dir() {
                dirs.push(path);
            } else if is_html(&path) {
                if let Ok(relative) = path.strip_prefix(root) {
                    files.push(relative.to_path_buf());
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

// ---------------------------------------------------------------------------
// Site pass
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum FileOutcome {
    Rewritten,
    Unchanged,
}

/// Render every HTML file of a site.
#[instrument(skip_all, fields(root = %job.root.display(), base_url = %job.base_url))]
pub async fn render_site(job: &SiteJob, reporter: &dyn ProgressReporter) -> Result<SiteSummary> {
    let start = Instant::now();

    if job.concurrency == 0 {
        return Err(AutocrumbError::validation("concurrency must be at least 1"));
    }
    if !job.root.is_dir() {
        return Err(AutocrumbError::validation(format!(
            "site root '{}' is not a directory",
            job.root.display()
        )));
    }

    let files = collect_html_files(&job.root)?;
    let total = files.len();
    reporter.started(total);
    info!(files = total, concurrency = job.concurrency, "rendering site");

    let semaphore = Arc::new(Semaphore::new(job.concurrency));
    let mut handles = Vec::with_capacity(total);

    for relative in files {
        let sem = semaphore.clone();
        let source = job.root.join(&relative);
        let target = job.out_dir.as_ref().unwrap_or(&job.root).join(&relative);
        let url = page_url(&job.base_url, &relative, job.clean_urls);
        let options = job.options.clone();
        let copy_unchanged = job.out_dir.is_some();

        handles.push(tokio::spawn(async move {
            let outcome = match sem.acquire_owned().await {
                Ok(_permit) => render_file(&source, &target, &url, &options, copy_unchanged).await,
                Err(e) => Err(AutocrumbError::validation(format!("render queue closed: {e}"))),
            };
            (relative, outcome)
        }));
    }

    let mut summary = SiteSummary {
        files: total,
        ..SiteSummary::default()
    };

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok((relative, Ok(outcome))) => {
                match outcome {
                    FileOutcome::Rewritten => summary.rewritten += 1,
                    FileOutcome::Unchanged => summary.unchanged += 1,
                }
                reporter.file_done(&relative, i + 1, total);
            }
            Ok((relative, Err(e))) => {
                warn!(path = %relative.display(), error = %e, "failed to render file");
                reporter.file_done(&relative, i + 1, total);
                summary.errors.push((relative, e.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "render task panicked");
                summary.errors.push((PathBuf::new(), format!("task failed: {e}")));
            }
        }
    }

    summary.elapsed = start.elapsed();
    info!(
        rewritten = summary.rewritten,
        unchanged = summary.unchanged,
        errors = summary.errors.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "site rendered"
    );
    reporter.done(&summary);

    Ok(summary)
}

async fn render_file(
    source: &Path,
    target: &Path,
    url: &Url,
    options: &BreadcrumbOptions,
    copy_unchanged: bool,
) -> Result<FileOutcome> {
    let html = tokio::fs::read_to_string(source)
        .await
        .map_err(|e| AutocrumbError::io(source, e))?;

    // Parsing and serializing are CPU-bound; keep them off the async workers.
    let (task_url, task_options) = (url.clone(), options.clone());
    let (html, output) = tokio::task::spawn_blocking(move || {
        let output = render_html(&html, &task_url, &task_options);
        (html, output)
    })
    .await
    .map_err(|e| AutocrumbError::validation(format!("render task failed: {e}")))?;
    let changed = output.html != html;

    if changed || copy_unchanged {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AutocrumbError::io(parent, e))?;
        }
        tokio::fs::write(target, &output.html)
            .await
            .map_err(|e| AutocrumbError::io(target, e))?;
    }

    debug!(path = %source.display(), %url, changed, "file processed");
    Ok(if changed {
        FileOutcome::Rewritten
    } else {
        FileOutcome::Unchanged
    })
}
