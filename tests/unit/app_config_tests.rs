/*!
 * Tests for app configuration functionality
 */

use std::str::FromStr;
use yaptwai::app_config::{Config, LogLevel, TranslationProvider};

#[test]
fn test_defaultConfig_shouldMatchOriginalTuning() {
    let config = Config::default();

    assert_eq!(config.source_language, "es");
    assert_eq!(config.batch_size, 10);
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.translation.provider, TranslationProvider::DeepSeek);
    assert_eq!(config.translation.model, "deepseek-chat");
    assert!((config.translation.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(config.translation.fragment_max_tokens, 4000);
    assert_eq!(config.translation.text_max_tokens, 2000);
    assert_eq!(config.translation.fragment_timeout_secs, 90);
    assert_eq!(config.translation.text_timeout_secs, 60);
}

#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withApiKey_shouldPass() {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withZeroBatchSize_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    config.batch_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withBogusSourceLanguage_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    config.source_language = "notalang".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOutOfRangeTemperature_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    config.translation.temperature = 5.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_provider_fromStr_shouldRoundTripThroughDisplay() {
    let provider = TranslationProvider::from_str("deepseek").unwrap();
    assert_eq!(provider, TranslationProvider::DeepSeek);
    assert_eq!(provider.to_string(), "deepseek");
    assert_eq!(provider.display_name(), "DeepSeek");

    assert!(TranslationProvider::from_str("telepathy").is_err());
}

#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{
        "source_language": "es",
        "batch_size": 25,
        "translation": {
            "api_key": "sk-from-file"
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.batch_size, 25);
    assert_eq!(config.translation.api_key, "sk-from-file");
    // Untouched fields fall back to defaults
    assert_eq!(config.translation.model, "deepseek-chat");
    assert_eq!(config.translation.fragment_timeout_secs, 90);
}
