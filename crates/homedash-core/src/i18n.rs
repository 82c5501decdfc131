// ── Translation lookup ──
//
// Keys follow the dash. module's namespace (`card.title`,
// `card.graphs.<id>.title`, ...). Resolution is a plain table lookup; an
// unknown key resolves to itself so missing strings stay visible.

use std::collections::HashMap;

/// Resolves a translation key to display text.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

const ENGLISH: &[(&str, &str)] = &[
    ("card.title", "Dash."),
    ("card.errors.noService", "No dash. service found. Add one in the tile settings."),
    ("card.errors.noInformation", "Cannot acquire information from dash. Are you running the latest version?"),
    ("card.graphs.cpu.title", "CPU"),
    ("card.graphs.storage.title", "Storage"),
    ("card.graphs.memory.title", "RAM"),
    ("card.graphs.network.title", "Network"),
    ("card.graphs.gpu.title", "GPU"),
    ("card.graphs.storage.label", "Storage:"),
    ("card.graphs.network.label", "Network:"),
    ("card.graphs.network.metrics.upload", "Up"),
    ("card.graphs.network.metrics.download", "Down"),
    ("descriptor.settings.cpuMultiView.label", "CPU multi-core view"),
    ("descriptor.settings.storageMultiView.label", "Storage multi-drive view"),
    ("descriptor.settings.useCompactView.label", "Use compact view"),
    ("descriptor.settings.graphs.label", "Graphs"),
    ("descriptor.settings.url.label", "dash. URL"),
];

/// Key → text table: built-in English plus operator overrides.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// The built-in English strings.
    pub fn english() -> Self {
        Self {
            entries: ENGLISH
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    /// Layer `overrides` on top; later entries win.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_owned()
    }
}
