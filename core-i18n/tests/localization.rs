//! End-to-end localization behavior across language switches.

use core_i18n::{I18nError, LocaleTable, MessageValue, PluralFamily, Translator};

fn spanish() -> LocaleTable {
    LocaleTable::new()
        .with_plural_family(PluralFamily::new(1).unwrap())
        .with("player.play", "Reproducción")
        .with("player.fullscreen-off", "Desconectar pantalla completa")
        .with(
            "player.time-jump-forward",
            ["Adelantar %1 segundo", "Adelantar %1 segundos"],
        )
}

fn english() -> LocaleTable {
    LocaleTable::new()
        .with_plural_family(PluralFamily::new(1).unwrap())
        .with("player.play", "Play")
        .with(
            "player.time-jump-forward",
            ["Jump forward %1 second", "Jump forward %1 seconds"],
        )
}

#[test]
fn switching_languages_switches_catalogs() {
    let translator = Translator::new();
    translator.add_catalog("en", english()).unwrap();
    translator.set_locale("es", spanish()).unwrap();

    assert_eq!(
        translator.translate("player.play", None).unwrap(),
        "Reproducción"
    );

    translator.set_language("en").unwrap();
    assert_eq!(translator.translate("player.play", None).unwrap(), "Play");
}

#[test]
fn pluralization_respects_the_active_catalog_family() {
    let translator = Translator::new();
    translator.add_catalog("en", english()).unwrap();
    translator.set_locale("es", spanish()).unwrap();

    assert_eq!(
        translator
            .translate("player.time-jump-forward", Some(1))
            .unwrap(),
        "Adelantar 1 segundo"
    );
    assert_eq!(
        translator
            .translate("player.time-jump-forward", Some(30))
            .unwrap(),
        "Adelantar 30 segundos"
    );
    // A plural count against a plain string entry leaves the string intact.
    assert_eq!(
        translator
            .translate("player.fullscreen-off", Some(400))
            .unwrap(),
        "Desconectar pantalla completa"
    );
    // A plural count against an unknown key falls back to the key.
    assert_eq!(translator.translate("Hola", Some(400)).unwrap(), "Hola");
}

#[test]
fn unknown_locale_falls_back_to_default_then_key() {
    let translator = Translator::new();
    translator.add_catalog("en", english()).unwrap();
    translator.set_locale("ar", LocaleTable::new()).unwrap();

    assert_eq!(
        translator
            .translate("player.time-jump-forward", Some(1))
            .unwrap(),
        "Jump forward 1 second"
    );
    assert_eq!(
        translator.translate("This is a test", Some(1)).unwrap(),
        "This is a test"
    );
    assert_eq!(
        translator.translate("This is test #%1", Some(30)).unwrap(),
        "This is test #30"
    );
}

#[test]
fn catalog_loaded_from_json_behaves_like_a_built_one() {
    let json = r#"{
        "plural-form": 7,
        "player.skip-seconds": ["%1 секунда", "%1 секунды", "%1 секунд"]
    }"#;
    let table: LocaleTable = serde_json::from_str(json).unwrap();
    assert!(matches!(
        table.get("player.skip-seconds"),
        Some(MessageValue::Forms(forms)) if forms.len() == 3
    ));

    let translator = Translator::new();
    translator.set_locale("ru", table).unwrap();

    assert_eq!(
        translator.translate("player.skip-seconds", Some(3)).unwrap(),
        "3 секунды"
    );
}

#[test]
fn invalid_language_codes_are_configuration_errors() {
    let translator = Translator::new();
    assert_eq!(
        translator.set_locale("bad-code", LocaleTable::new()),
        Err(I18nError::InvalidLanguageCode("bad-code".into()))
    );
}
