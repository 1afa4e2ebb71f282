use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use std::fmt;
use std::path::Path;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::catalog::Catalog;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::filter;
use crate::translation::TranslationService;

// @module: Application controller for catalog batch translation

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Entries selected for translation
    pub entries_considered: usize,

    /// Entries successfully translated and mutated
    pub translated: usize,

    /// Entries attempted but left unchanged
    pub errored: usize,
}

impl RunSummary {
    /// Fold another summary into this one
    pub fn merge(&mut self, other: RunSummary) {
        self.entries_considered += other.entries_considered;
        self.translated += other.translated;
        self.errored += other.errored;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} considered, {} translated, {} errors",
            self.entries_considered, self.translated, self.errored
        )
    }
}

/// Main application controller for catalog translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Remote translation adapter
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone())?;
        Ok(Self { config, service })
    }

    /// Create a controller around an existing service - used by tests
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// Process a single catalog file.
    ///
    /// Selects the entries that need work, translates them in fixed-size
    /// contiguous batches, and persists the catalog once at the end if
    /// anything changed. A dry run performs the selection and reporting but
    /// makes no remote calls and no mutations. Hard errors (unreadable
    /// file, no derivable target language, failed backup or save) surface
    /// as `Err`; per-entry translation failures only increment the summary.
    pub async fn run_file(&self, path: &Path, dry_run: bool) -> Result<RunSummary> {
        if !FileManager::file_exists(path) {
            return Err(anyhow!("Catalog file does not exist: {}", path.display()));
        }

        let target_language = language_utils::target_language_from_path(path)?;

        info!("📁 Processing: {}", path.display());
        info!(
            "🌐 Target language: {} ({})",
            target_language,
            if dry_run { "dry-run" } else { "production" }
        );

        let mut catalog = Catalog::from_path(path)?;

        // Entry selection: eligibility by catalog state, then the
        // translatability gate on the source text
        let eligible: Vec<usize> = catalog
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.needs_translation() && filter::should_translate(&entry.msgid))
            .map(|(index, _)| index)
            .collect();

        let mut summary = RunSummary {
            entries_considered: eligible.len(),
            ..Default::default()
        };

        if eligible.is_empty() {
            info!("✅ No entries need translation");
            return Ok(summary);
        }

        info!(
            "📊 Entries to translate: {} (in batches of {})",
            eligible.len(),
            self.config.batch_size
        );

        if !dry_run {
            // Snapshot before the first mutation
            let backup_path = catalog
                .create_backup()
                .context("Failed to create catalog backup")?;
            info!("💾 Backup created: {}", backup_path.display());
        }

        let source_name = language_utils::display_name(&self.config.source_language)
            .unwrap_or_else(|_| self.config.source_language.clone());
        let target_name = language_utils::display_name(&target_language)
            .unwrap_or_else(|_| target_language.clone());

        let progress = if dry_run {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(eligible.len() as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style);
            }
            bar
        };

        let total_batches = eligible.len().div_ceil(self.config.batch_size);
        let mut processed = 0usize;

        // Strictly sequential: one batch at a time, one entry at a time,
        // each remote call a blocking round-trip
        for (batch_index, batch) in eligible.chunks(self.config.batch_size).enumerate() {
            info!(
                "🔄 Batch {}/{} ({} entries)",
                batch_index + 1,
                total_batches,
                batch.len()
            );

            for &entry_index in batch {
                processed += 1;
                let source_text = catalog.entries[entry_index].msgid.clone();

                if dry_run {
                    info!(
                        "🔍 [{}/{}] Would translate: {}",
                        processed,
                        eligible.len(),
                        preview(&source_text)
                    );
                    continue;
                }

                progress.set_message(preview(&source_text));

                match self
                    .service
                    .translate_smart(&source_text, &source_name, &target_name)
                    .await
                {
                    Ok(translation) => {
                        let entry = &mut catalog.entries[entry_index];
                        entry.msgstr = translation;
                        entry.set_fuzzy(false);
                        summary.translated += 1;
                    }
                    Err(e) => {
                        summary.errored += 1;
                        warn!(
                            "Could not translate entry {}/{} ({}): {}",
                            processed,
                            eligible.len(),
                            preview(&source_text),
                            e
                        );
                    }
                }

                progress.inc(1);
            }
        }

        progress.finish_and_clear();

        if !dry_run && summary.translated > 0 {
            catalog.save().context("Failed to save catalog")?;
            info!("💾 Catalog saved: {}", path.display());
        }

        info!("✅ Done: {}", summary);

        Ok(summary)
    }

    /// Process every `.po` catalog under a locale tree.
    ///
    /// Files are processed independently; one failing file is reported and
    /// the scan continues, but any failure makes the overall run an error
    /// so the process exits non-zero.
    pub async fn run_tree(&self, locale_dir: &Path, dry_run: bool) -> Result<RunSummary> {
        if !FileManager::dir_exists(locale_dir) {
            return Err(anyhow!(
                "Locale directory does not exist: {}",
                locale_dir.display()
            ));
        }

        let catalog_files = FileManager::find_files(locale_dir, "po")?;
        if catalog_files.is_empty() {
            return Err(anyhow!(
                "No .po files found under: {}",
                locale_dir.display()
            ));
        }

        info!("📄 Catalog files found: {}", catalog_files.len());

        let mut totals = RunSummary::default();
        let mut failed_files = 0usize;

        for file in &catalog_files {
            match self.run_file(file, dry_run).await {
                Ok(file_summary) => totals.merge(file_summary),
                Err(e) => {
                    failed_files += 1;
                    error!("Failed to process {}: {:#}", file.display(), e);
                }
            }
        }

        info!("🌍 Run totals: {}", totals);

        if failed_files > 0 {
            return Err(anyhow!(
                "{} of {} catalog file(s) failed to process",
                failed_files,
                catalog_files.len()
            ));
        }

        Ok(totals)
    }
}

/// Truncate a source text for progress output
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 80;
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= MAX_CHARS {
        flat
    } else {
        let truncated: String = flat.chars().take(MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}
