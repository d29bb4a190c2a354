use super::{alias_fragment, condense_whitespace, fold_umlauts, normalize_text, strip_markup};
use pretty_assertions::assert_eq;

#[test]
fn test_fold_umlauts_keeps_leading_case() {
    assert_eq!(fold_umlauts("Übersicht Größe"), "Uebersicht Groesse");
    assert_eq!(fold_umlauts("Äpfel und Öl"), "Aepfel und Oel");
}

#[test]
fn test_condense_whitespace() {
    assert_eq!(condense_whitespace("  a \t b\n\n c  "), "a b c");
    assert_eq!(condense_whitespace("   "), "");
}

#[test]
fn test_normalize_text_folds_and_lowercases() {
    assert_eq!(normalize_text(" Grüße\n aus  KÖLN "), "gruesse aus koeln");
}

#[test]
fn test_alias_fragment_drops_non_alphanumerics() {
    assert_eq!(alias_fragment("Getting Started!"), Some("GettingStarted".to_string()));
    assert_eq!(alias_fragment("Über uns"), Some("Ueberuns".to_string()));
    assert_eq!(alias_fragment("1.2 Setup"), Some("12Setup".to_string()));
}

#[test]
fn test_alias_fragment_empty_title() {
    assert_eq!(alias_fragment("---"), None);
    assert_eq!(alias_fragment("日本語"), None);
}

#[test]
fn test_strip_markup_keeps_visible_words() {
    let text = strip_markup("See **[the guide](guide.md)** and <em>this</em> `code`");
    assert_eq!(normalize_text(&text), "see the guide and this code");
}
