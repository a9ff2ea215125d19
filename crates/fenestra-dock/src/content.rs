//! Content registration: the pluggable leaves of the dock tree.
//!
//! The dock system never looks inside a panel; it only tracks handles.
//! External code registers a prototype per content type and the manager
//! consults the registry when a window is created or a layout is loaded.

use std::fmt;

use fenestra_core::alloc::HashMap;

/// Unique id of one live content window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

/// Handle to a live content window: its id plus the registry key it was
/// instantiated from. The key is what layouts persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentHandle {
    pub id: ContentId,
    pub content_type: String,
}

impl ContentHandle {
    pub fn new(id: ContentId, content_type: impl Into<String>) -> Self {
        Self {
            id,
            content_type: content_type.into(),
        }
    }
}

/// A registered content type.
///
/// Widget instantiation itself happens outside the dock system; the
/// prototype only supplies the identity and the tab label.
pub trait ContentPrototype {
    /// Unique registry key, persisted in layout files.
    fn content_type(&self) -> &str;

    /// Label shown on the tab.
    fn title(&self) -> &str;
}

/// Errors from content registration and lookup.
#[derive(Debug)]
pub enum ContentError {
    /// A prototype with the same key is already registered.
    Duplicate(String),
    /// The requested content type is not registered.
    NotRegistered(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Duplicate(key) => {
                write!(f, "content type '{key}' is already registered")
            }
            ContentError::NotRegistered(key) => {
                write!(f, "content type '{key}' is not registered")
            }
        }
    }
}

impl std::error::Error for ContentError {}

/// Registry mapping content-type keys to prototypes.
#[derive(Default)]
pub struct ContentRegistry {
    prototypes: HashMap<String, Box<dyn ContentPrototype>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prototype under its own key.
    ///
    /// Keys must be unique; layouts store them and a second registration
    /// would make restored tabs ambiguous.
    pub fn register(&mut self, prototype: Box<dyn ContentPrototype>) -> Result<(), ContentError> {
        let key = prototype.content_type().to_owned();
        if self.prototypes.contains_key(&key) {
            return Err(ContentError::Duplicate(key));
        }
        self.prototypes.insert(key, prototype);
        Ok(())
    }

    pub fn get(&self, content_type: &str) -> Result<&dyn ContentPrototype, ContentError> {
        self.prototypes
            .get(content_type)
            .map(|proto| proto.as_ref())
            .ok_or_else(|| ContentError::NotRegistered(content_type.to_owned()))
    }

    pub fn contains(&self, content_type: &str) -> bool {
        self.prototypes.contains_key(content_type)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
