/*!
 * Tests for markup segmentation and placeholder round-tripping
 */

use yaptwai::translation::reintegrate::reintegrate;
use yaptwai::translation::segmenter::{has_markup, placeholder_token, segment, PlaceholderMap};

/// Segmentation followed by identity reintegration must reproduce the input
fn assert_round_trips(markup: &str) {
    let (tokenized, map) = segment(markup).unwrap();

    let mut identity = PlaceholderMap::new();
    for (token, text) in map.iter() {
        identity.insert(token, text);
    }

    assert_eq!(
        reintegrate(&tokenized, &identity),
        markup,
        "round trip failed for: {}",
        markup
    );
}

#[test]
fn test_segment_withSimpleParagraph_shouldTokenizeText() {
    let (tokenized, map) = segment("<p>Hola mundo</p>").unwrap();

    assert_eq!(tokenized, "<p>{{TEXT_1}}</p>");
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("{{TEXT_1}}"), Some("Hola mundo"));
}

#[test]
fn test_segment_withMultipleLeaves_shouldNumberInDocumentOrder() {
    let (tokenized, map) = segment("<div><p>Uno</p><p>Dos</p>tres</div>").unwrap();

    assert_eq!(tokenized, "<div><p>{{TEXT_1}}</p><p>{{TEXT_2}}</p>{{TEXT_3}}</div>");

    let tokens: Vec<&str> = map.tokens().collect();
    assert_eq!(tokens, vec!["{{TEXT_1}}", "{{TEXT_2}}", "{{TEXT_3}}"]);
    assert_eq!(map.get("{{TEXT_1}}"), Some("Uno"));
    assert_eq!(map.get("{{TEXT_2}}"), Some("Dos"));
    assert_eq!(map.get("{{TEXT_3}}"), Some("tres"));
}

#[test]
fn test_segment_withAttributes_shouldLeaveMarkupIntact() {
    let (tokenized, map) =
        segment("<a href=\"/ayuda\" class=\"btn\">Ayuda</a>").unwrap();

    assert_eq!(tokenized, "<a href=\"/ayuda\" class=\"btn\">{{TEXT_1}}</a>");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_segment_withWhitespaceOnlyLeaves_shouldLeaveThemAlone() {
    let (tokenized, map) = segment("<p> </p><p>Hola</p>").unwrap();

    assert_eq!(tokenized, "<p> </p><p>{{TEXT_1}}</p>");
    assert_eq!(map.len(), 1);
}

#[test]
fn test_segment_withNoTextLeaves_shouldReturnEmptyMap() {
    let (_, map) = segment("<img src=\"logo.png\">").unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_segment_shouldRoundTripThroughIdentityMap() {
    assert_round_trips("<p>Hola mundo</p>");
    assert_round_trips("<div><p>Uno</p><p>Dos</p></div>");
    assert_round_trips("<a href=\"/x\">Enlace</a> con cola");
    assert_round_trips("<p>Con <strong>énfasis</strong> interno</p>");
    assert_round_trips("Linea<br>cortada");
    assert_round_trips("<p> </p><p>Texto</p>");
}

#[test]
fn test_hasMarkup_shouldDetectTagPairs() {
    assert!(has_markup("<p>Hola</p>"));
    assert!(has_markup("antes <br> después"));
    assert!(!has_markup("texto plano"));
    assert!(!has_markup("2 < 3 pero sin cierre"));
}

#[test]
fn test_placeholderToken_shouldUseDoubleBraceFormat() {
    assert_eq!(placeholder_token(1), "{{TEXT_1}}");
    assert_eq!(placeholder_token(12), "{{TEXT_12}}");
}

#[test]
fn test_placeholderMap_shouldPreserveInsertionOrderAndOverwrite() {
    let mut map = PlaceholderMap::new();
    map.insert("{{TEXT_1}}", "uno");
    map.insert("{{TEXT_2}}", "dos");
    map.insert("{{TEXT_1}}", "uno bis");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("{{TEXT_1}}"), Some("uno bis"));

    let tokens: Vec<&str> = map.tokens().collect();
    assert_eq!(tokens, vec!["{{TEXT_1}}", "{{TEXT_2}}"]);
}
