//! Browser-only checks of the platform layer; run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use cinnamon_core::{KeyValueStore, Theme, ThemeController};
use cinnamon_ui::platform::document::THEME_ATTRIBUTE;
use cinnamon_ui::platform::{DocumentTheme, LocalStorage};
use leptos::prelude::*;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

fn root_theme() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE))
}

#[wasm_bindgen_test]
fn local_storage_keeps_saved_values() -> Result<(), String> {
    let store = LocalStorage;
    store
        .save("cinnamon-test", "dark")
        .map_err(|e| e.to_string())?;

    let loaded = store.load("cinnamon-test").map_err(|e| e.to_string())?;
    assert_eq!(loaded.as_deref(), Some("dark"));
    Ok(())
}

#[wasm_bindgen_test]
fn theme_toggle_updates_root_attribute_and_icon() -> Result<(), String> {
    LocalStorage
        .save("cinnamon-toggle", "light")
        .map_err(|e| e.to_string())?;
    let (icon, set_icon) = signal("");
    let mut controller =
        ThemeController::load(LocalStorage, DocumentTheme::new(set_icon), "cinnamon-toggle");
    assert_eq!(controller.current(), Theme::Light);
    assert_eq!(root_theme().as_deref(), Some("light"));

    let next = controller.toggle().map_err(|e| e.to_string())?;

    assert_eq!(next, Theme::Dark);
    assert_eq!(root_theme().as_deref(), Some("dark"));
    assert_eq!(icon.get_untracked(), Theme::Dark.toggle_icon());
    Ok(())
}
