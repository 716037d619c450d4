//! TOML tree merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub(crate) fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set `section.key` to `value` when it is absent or an empty string.
/// Returns whether the tree changed.
pub(crate) fn fill_if_unset(root: &mut toml::Value, section: &str, key: &str, value: &str) -> bool {
    let Some(root) = root.as_table_mut() else {
        return false;
    };
    let table = root
        .entry(section)
        .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    let Some(table) = table.as_table_mut() else {
        return false;
    };
    let unset = table
        .get(key)
        .is_none_or(|v| v.as_str().is_some_and(|s| s.trim().is_empty()));
    if unset {
        table.insert(key.to_owned(), toml::Value::String(value.to_owned()));
    }
    unset
}
