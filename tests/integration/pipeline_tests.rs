/*!
 * End-to-end batch driver tests against mock providers
 */

use std::fs;
use std::sync::atomic::Ordering;
use anyhow::Result;
use yaptwai::app_config::Config;
use yaptwai::app_controller::Controller;
use yaptwai::providers::mock::MockProvider;
use yaptwai::translation::TranslationService;
use crate::common;

fn mock_controller(provider: MockProvider) -> Controller {
    let config = Config::default();
    let service = TranslationService::with_mock(config.translation.clone(), provider);
    Controller::with_service(config, service)
}

/// Five plain untranslated entries
fn five_entry_catalog() -> String {
    let mut content = String::from("msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
    for i in 1..=5 {
        content.push_str(&format!(
            "\nmsgid \"Texto pendiente número {}\"\nmsgstr \"\"\n",
            i
        ));
    }
    content
}

#[tokio::test]
async fn test_dryRun_withEligibleEntries_shouldReportWithoutSideEffects() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_catalog(
        &temp_dir.path().to_path_buf(),
        "en",
        &five_entry_catalog(),
    )?;
    let original_content = fs::read_to_string(&path)?;

    let provider = MockProvider::echoing();
    let counter = provider.request_counter();
    let controller = mock_controller(provider);

    let summary = controller.run_file(&path, true).await?;

    assert_eq!(summary.entries_considered, 5);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.errored, 0);

    // Zero remote calls, zero persistence, no backup
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(fs::read_to_string(&path)?, original_content);
    assert!(!path.parent().unwrap().join("backups").exists());

    Ok(())
}

#[tokio::test]
async fn test_run_withWorkingProvider_shouldTranslateAndPersistOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_catalog(
        &temp_dir.path().to_path_buf(),
        "en",
        common::sample_catalog_content(),
    )?;

    let controller = mock_controller(MockProvider::echoing());
    let summary = controller.run_file(&path, false).await?;

    // Untranslated + fuzzy + stale entries are eligible; the
    // interpolation-only and obsolete entries are not
    assert_eq!(summary.entries_considered, 3);
    assert_eq!(summary.translated, 3);
    assert_eq!(summary.errored, 0);

    // Mutations were persisted
    let catalog = yaptwai::catalog::Catalog::from_path(&path)?;
    assert_eq!(catalog.entries[1].msgstr, "[MOCK] Bienvenido a la plataforma");
    assert_eq!(catalog.entries[2].msgstr, "[MOCK] Cerrar la sesión actual");
    assert!(!catalog.entries[2].is_fuzzy());
    assert_eq!(catalog.entries[3].msgstr, "[MOCK] Guardar cambios");

    // Untouched entries survive the rewrite
    assert_eq!(catalog.entries[4].msgid, "%(count)s");
    assert_eq!(catalog.entries[4].msgstr, "");
    assert!(catalog.entries[5].obsolete);

    // A backup snapshot of the pre-run catalog exists
    let backups_dir = path.parent().unwrap().join("backups");
    let backups: Vec<_> = fs::read_dir(&backups_dir)?.collect();
    assert_eq!(backups.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_run_withMarkupEntry_shouldPreserveTags() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "msgid \"<p>Hola <strong>mundo</strong></p>\"\nmsgstr \"\"\n";
    let path = common::create_test_catalog(&temp_dir.path().to_path_buf(), "en", content)?;

    let controller = mock_controller(MockProvider::echoing());
    let summary = controller.run_file(&path, false).await?;

    assert_eq!(summary.translated, 1);

    // The segmenter hands the fragment "Hola " (with its trailing space) to
    // the service, which returns it trimmed, exactly like the real protocol
    let catalog = yaptwai::catalog::Catalog::from_path(&path)?;
    assert_eq!(
        catalog.entries[0].msgstr,
        "<p>[MOCK] Hola<strong>[MOCK] mundo</strong></p>"
    );

    Ok(())
}

#[tokio::test]
async fn test_run_withFailingProvider_shouldLeaveEntriesUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_catalog(
        &temp_dir.path().to_path_buf(),
        "en",
        &five_entry_catalog(),
    )?;
    let original_content = fs::read_to_string(&path)?;

    let controller = mock_controller(MockProvider::failing());
    let summary = controller.run_file(&path, false).await?;

    assert_eq!(summary.entries_considered, 5);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.errored, 5);

    // Nothing translated, so nothing was persisted
    assert_eq!(fs::read_to_string(&path)?, original_content);

    Ok(())
}

#[tokio::test]
async fn test_run_withIncompleteFragmentResponse_shouldCountAsError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "msgid \"<p>Hola</p><p>Mundo</p>\"\nmsgstr \"\"\n";
    let path = common::create_test_catalog(&temp_dir.path().to_path_buf(), "en", content)?;
    let original_content = fs::read_to_string(&path)?;

    // One of the two fragments never comes back
    let controller = mock_controller(MockProvider::scripted(vec!["1. Hola".to_string()]));
    let summary = controller.run_file(&path, false).await?;

    assert_eq!(summary.entries_considered, 1);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.errored, 1);
    assert_eq!(fs::read_to_string(&path)?, original_content);

    Ok(())
}

#[tokio::test]
async fn test_runFile_withUndeterminableLanguage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "django.po",
        &five_entry_catalog(),
    )?;

    let controller = mock_controller(MockProvider::echoing());
    let result = controller.run_file(&path, false).await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_runTree_shouldAggregateAcrossCatalogs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let base = temp_dir.path().to_path_buf();
    common::create_test_catalog(&base, "en", &five_entry_catalog())?;
    common::create_test_catalog(&base, "pt", &five_entry_catalog())?;

    let controller = mock_controller(MockProvider::echoing());
    let summary = controller.run_tree(&base.join("locale"), true).await?;

    assert_eq!(summary.entries_considered, 10);
    assert_eq!(summary.translated, 0);

    Ok(())
}

#[tokio::test]
async fn test_runTree_withEmptyTree_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let empty = temp_dir.path().join("locale");
    fs::create_dir_all(&empty)?;

    let controller = mock_controller(MockProvider::echoing());
    assert!(controller.run_tree(&empty, true).await.is_err());

    Ok(())
}
