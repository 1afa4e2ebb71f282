/*!
 * Tests for gettext catalog parsing and serialization
 */

use anyhow::Result;
use yaptwai::catalog::{Catalog, CatalogEntry};
use crate::common;

#[test]
fn test_parse_withSampleCatalog_shouldRecoverEntries() -> Result<()> {
    let entries = Catalog::parse_str(common::sample_catalog_content())?;

    assert_eq!(entries.len(), 6);

    // Header
    assert!(entries[0].is_header());
    assert!(entries[0].msgstr.contains("Project-Id-Version: demo\n"));

    // Untranslated entry with a reference comment
    assert_eq!(entries[1].msgid, "Bienvenido a la plataforma");
    assert_eq!(entries[1].msgstr, "");
    assert_eq!(entries[1].comments, vec!["#: templates/home.html:4"]);

    // Fuzzy entry
    assert_eq!(entries[2].msgid, "Cerrar la sesión actual");
    assert!(entries[2].is_fuzzy());

    // Stale entry
    assert_eq!(entries[3].msgid, entries[3].msgstr);

    // Obsolete entry
    assert!(entries[5].obsolete);
    assert_eq!(entries[5].msgid, "Texto antiguo");

    Ok(())
}

#[test]
fn test_parse_withMultilineStrings_shouldConcatenate() -> Result<()> {
    let content = r#"msgid ""
"Primera línea\n"
"segunda línea"
msgstr ""
"First line\n"
"second line"
"#;

    let entries = Catalog::parse_str(content)?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].msgid, "Primera línea\nsegunda línea");
    assert_eq!(entries[0].msgstr, "First line\nsecond line");

    Ok(())
}

#[test]
fn test_parse_withEscapes_shouldUnescapeOnce() -> Result<()> {
    let content = r#"msgid "Una \"cita\" y un salto\n"
msgstr "literal backslash-n: \\n"
"#;

    let entries = Catalog::parse_str(content)?;
    assert_eq!(entries[0].msgid, "Una \"cita\" y un salto\n");
    assert_eq!(entries[0].msgstr, "literal backslash-n: \\n");

    Ok(())
}

#[test]
fn test_parse_withPluralForms_shouldPreserveThem() -> Result<()> {
    let content = r#"msgid "Un mensaje"
msgid_plural "%(count)s mensajes"
msgstr[0] "One message"
msgstr[1] "%(count)s messages"
"#;

    let entries = Catalog::parse_str(content)?;
    assert_eq!(entries.len(), 1);
    assert!(entries[0].has_plural());
    assert_eq!(entries[0].msgid_plural.as_deref(), Some("%(count)s mensajes"));
    assert_eq!(entries[0].msgstr_plural.len(), 2);

    // Plural entries are never selected for machine translation
    assert!(!entries[0].needs_translation());

    Ok(())
}

#[test]
fn test_roundTrip_withSampleCatalog_shouldBeStable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "django.po",
        common::sample_catalog_content(),
    )?;

    let catalog = Catalog::from_path(&path)?;
    let serialized = catalog.to_po_string();
    let reparsed = Catalog::parse_str(&serialized)?;

    assert_eq!(catalog.entries, reparsed);

    Ok(())
}

#[test]
fn test_needsTranslation_shouldFollowEligibilityRules() {
    // Empty translation
    let entry = CatalogEntry::new("Hola", "");
    assert!(entry.needs_translation());

    // Fuzzy translation
    let mut entry = CatalogEntry::new("Hola", "Hello");
    entry.set_fuzzy(true);
    assert!(entry.needs_translation());

    // Translation textually equal to the source (stale heuristic)
    let entry = CatalogEntry::new("Hola", "Hola");
    assert!(entry.needs_translation());

    // Properly translated
    let entry = CatalogEntry::new("Hola", "Hello");
    assert!(!entry.needs_translation());

    // Obsolete
    let mut entry = CatalogEntry::new("Hola", "");
    entry.obsolete = true;
    assert!(!entry.needs_translation());

    // Header
    let entry = CatalogEntry::new("", "Project-Id-Version: x");
    assert!(!entry.needs_translation());
}

#[test]
fn test_setFuzzy_shouldToggleFlagOnce() {
    let mut entry = CatalogEntry::new("Hola", "Hello");

    entry.set_fuzzy(true);
    entry.set_fuzzy(true);
    assert_eq!(entry.flags.iter().filter(|f| *f == "fuzzy").count(), 1);

    entry.set_fuzzy(false);
    assert!(!entry.is_fuzzy());
    assert!(entry.flags.is_empty());
}

#[test]
fn test_createBackup_shouldSnapshotUnderBackupsDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "django.po",
        common::sample_catalog_content(),
    )?;

    let catalog = Catalog::from_path(&path)?;
    let backup_path = catalog.create_backup()?;

    assert!(backup_path.exists());
    assert!(backup_path.parent().unwrap().ends_with("backups"));
    assert_eq!(
        std::fs::read_to_string(&backup_path)?,
        common::sample_catalog_content()
    );

    Ok(())
}

#[test]
fn test_display_withObsoleteEntry_shouldKeepPrefix() -> Result<()> {
    let entries = Catalog::parse_str("#~ msgid \"Viejo\"\n#~ msgstr \"Old\"\n")?;
    assert!(entries[0].obsolete);

    let serialized = entries[0].to_string();
    assert!(serialized.contains("#~ msgid \"Viejo\""));
    assert!(serialized.contains("#~ msgstr \"Old\""));

    Ok(())
}
