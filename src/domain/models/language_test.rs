use super::KnownLanguage;
use super::Language;

#[test]
fn it_parses_known_languages_case_insensitively() {
    assert_eq!(
        Language::parse("Python"),
        Language::Known(KnownLanguage::Python)
    );
    assert_eq!(Language::parse(" CPP "), Language::Known(KnownLanguage::Cpp));
    assert_eq!(
        Language::parse("javascript"),
        Language::Known(KnownLanguage::Javascript)
    );
}

#[test]
fn it_keeps_unknown_languages() {
    let lang = Language::parse("Haskell");
    assert_eq!(lang, Language::Other("Haskell".to_string()));
    assert_eq!(lang.known(), None);
    assert_eq!(lang.to_string(), "Haskell");
}

#[test]
fn it_serializes_as_a_plain_string() -> anyhow::Result<()> {
    let json = serde_json::to_string(&Language::Known(KnownLanguage::Java))?;
    assert_eq!(json, "\"java\"");

    let lang: Language = serde_json::from_str("\"cpp\"")?;
    assert_eq!(lang, Language::Known(KnownLanguage::Cpp));

    return Ok(());
}
