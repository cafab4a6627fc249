use crate::api::ingest::error::IngestError;
use crate::api::ingest::files::parse_public_url;
use crate::database::event_image_store::EventImageStore;
use crate::database::event_store::EventStore;
use app_state::IngestionSettings;
use sqlx::PgPool;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, instrument, warn};

/// Everything in the upload root that is still referenced by the database.
#[derive(Debug, Default)]
pub struct LiveUploads {
    pub slugs: HashSet<String>,
    /// `(slug, filename)` pairs of every `event_image` row.
    pub files: HashSet<(String, String)>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub removed_dirs: usize,
    pub removed_files: usize,
}

fn is_older_than(metadata: &fs::Metadata, grace: Duration, now: SystemTime) -> bool {
    metadata
        .modified()
        .ok()
        .and_then(|modified| now.duration_since(modified).ok())
        .is_some_and(|age| age >= grace)
}

/// Removes upload directories of events that no longer exist, and files in
/// live directories that no image row points at. Anything modified within
/// `grace` is left alone, which covers uploads whose rows are not written yet.
///
/// # Errors
///
/// * I/O errors while listing or removing entries.
pub fn sweep_directory(
    root: &Path,
    live: &LiveUploads,
    grace: Duration,
    now: SystemTime,
) -> io::Result<SweepReport> {
    let mut report = SweepReport::default();
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let slug = entry.file_name().to_string_lossy().into_owned();

        if !live.slugs.contains(&slug) {
            if is_older_than(&entry.metadata()?, grace, now) {
                fs::remove_dir_all(entry.path())?;
                report.removed_dirs += 1;
            }
            continue;
        }

        for file in fs::read_dir(entry.path())? {
            let file = file?;
            if !file.file_type()?.is_file() {
                continue;
            }
            let filename = file.file_name().to_string_lossy().into_owned();
            if live.files.contains(&(slug.clone(), filename)) {
                continue;
            }
            if is_older_than(&file.metadata()?, grace, now) {
                fs::remove_file(file.path())?;
                report.removed_files += 1;
            }
        }
    }

    Ok(report)
}

/// Reads live slugs and image urls from the database and sweeps the upload root.
#[instrument(skip(pool, settings))]
pub async fn sweep_orphans(
    pool: &PgPool,
    settings: &IngestionSettings,
) -> Result<SweepReport, IngestError> {
    let slugs = EventStore::list_slugs(pool).await?;
    let urls = EventImageStore::list_urls(pool).await?;

    let mut live = LiveUploads {
        slugs: slugs.into_iter().collect(),
        files: HashSet::new(),
    };
    for url in urls {
        match parse_public_url(settings, &url) {
            Ok(file) => {
                live.files.insert((file.slug, file.filename));
            }
            Err(_) => warn!("Image url {url} does not point into the upload folder"),
        }
    }

    let root = settings.upload_root.clone();
    let grace = settings.orphan_grace;
    let report =
        tokio::task::spawn_blocking(move || sweep_directory(&root, &live, grace, SystemTime::now()))
            .await??;

    if report.removed_dirs > 0 || report.removed_files > 0 {
        info!(
            "Orphan sweep removed {} directories and {} files",
            report.removed_dirs, report.removed_files
        );
    }
    Ok(report)
}
