//! Storage strategy seam shared by intake and completion handling.

use tracing::debug;

use crate::config::{Config, Mode};
use crate::error::{Result, SnipError};
use crate::registry::{FileState, Registry, StateStore};
use crate::snippet::CompletionEntry;
use crate::store::LanguageStore;

/// Where a saved snippet ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub shortcut: String,
    /// Bundle language; `None` for the global registry.
    pub language: Option<String>,
}

/// Operations every storage strategy provides.
pub trait SnippetBackend {
    /// Persist a snippet. `language` is ignored by global backends.
    fn save(&mut self, language: Option<&str>, shortcut: &str, code: &str) -> Result<Saved>;

    /// Completion entries visible to a document in `language`.
    fn completions(&self, language: Option<&str>) -> Result<Vec<CompletionEntry>>;

    /// Delete one snippet.
    fn remove(&mut self, language: Option<&str>, shortcut: &str) -> Result<()>;
}

impl<S: StateStore> SnippetBackend for Registry<S> {
    fn save(&mut self, language: Option<&str>, shortcut: &str, code: &str) -> Result<Saved> {
        if let Some(language) = language {
            debug!(language, "Registry is global; ignoring language");
        }
        Self::save(self, shortcut, code)?;
        Ok(Saved {
            shortcut: shortcut.to_string(),
            language: None,
        })
    }

    fn completions(&self, _language: Option<&str>) -> Result<Vec<CompletionEntry>> {
        Ok(Self::completions(self))
    }

    fn remove(&mut self, _language: Option<&str>, shortcut: &str) -> Result<()> {
        Self::remove(self, shortcut).map(drop)
    }
}

/// A [`LanguageStore`] plus the language assumed when a request names none.
#[derive(Debug, Clone)]
pub struct StoreBackend {
    pub store: LanguageStore,
    pub default_language: Option<String>,
}

impl StoreBackend {
    pub fn new(store: LanguageStore, default_language: Option<String>) -> Self {
        Self {
            store,
            default_language,
        }
    }

    fn language<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str> {
        requested
            .filter(|l| !l.trim().is_empty())
            .or(self.default_language.as_deref())
            .ok_or_else(|| {
                SnipError::validation("language", "required when storing snippets per language")
            })
    }
}

impl SnippetBackend for StoreBackend {
    fn save(&mut self, language: Option<&str>, shortcut: &str, code: &str) -> Result<Saved> {
        let language = self.language(language)?;
        self.store.save(language, shortcut, code)?;
        Ok(Saved {
            shortcut: shortcut.to_string(),
            language: Some(language.to_string()),
        })
    }

    fn completions(&self, language: Option<&str>) -> Result<Vec<CompletionEntry>> {
        self.store.list_for_language(self.language(language)?)
    }

    fn remove(&mut self, language: Option<&str>, shortcut: &str) -> Result<()> {
        let language = self.language(language)?.to_string();
        self.store.remove(&language, shortcut)
    }
}

/// The strategy selected by configuration.
#[derive(Debug)]
pub enum Backend {
    Registry(Registry<FileState>),
    Store(StoreBackend),
}

impl Backend {
    /// Open the backend named by `config.mode`; the registry loads its
    /// snapshot here, once.
    pub fn open(config: &Config) -> Result<Self> {
        match config.mode {
            Mode::Registry => Ok(Self::Registry(Registry::open(FileState::new(
                config.state_path(),
            ))?)),
            Mode::Store => Ok(Self::Store(StoreBackend::new(
                LanguageStore::new(config.snippets_dir()),
                config.default_language.clone(),
            ))),
        }
    }

    pub const fn mode(&self) -> Mode {
        match self {
            Self::Registry(_) => Mode::Registry,
            Self::Store(_) => Mode::Store,
        }
    }

    fn inner(&self) -> &dyn SnippetBackend {
        match self {
            Self::Registry(registry) => registry,
            Self::Store(store) => store,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SnippetBackend {
        match self {
            Self::Registry(registry) => registry,
            Self::Store(store) => store,
        }
    }
}

impl SnippetBackend for Backend {
    fn save(&mut self, language: Option<&str>, shortcut: &str, code: &str) -> Result<Saved> {
        self.inner_mut().save(language, shortcut, code)
    }

    fn completions(&self, language: Option<&str>) -> Result<Vec<CompletionEntry>> {
        self.inner().completions(language)
    }

    fn remove(&mut self, language: Option<&str>, shortcut: &str) -> Result<()> {
        self.inner_mut().remove(language, shortcut)
    }
}
