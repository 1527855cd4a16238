use crate::value::{Value, ValueKind};
use std::{fmt, sync::Arc};

/// Row accessor for one sortable property. `None` is a null column value.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Option<Value> + Send + Sync>;

///
/// Property
///
/// One sortable column: codec kind, row accessor, uniqueness marker.
/// The accessor must produce values of the registered kind; the cursor
/// codec decodes segments positionally with that kind.
///

pub struct Property<R> {
    name: String,
    kind: ValueKind,
    accessor: Accessor<R>,
    unique: bool,
}

impl<R> Property<R> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Read this property's value from one row.
    #[must_use]
    pub fn value_of(&self, row: &R) -> Option<Value> {
        (self.accessor)(row)
    }
}

impl<R> Clone for Property<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            accessor: Arc::clone(&self.accessor),
            unique: self.unique,
        }
    }
}

impl<R> fmt::Debug for Property<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("unique", &self.unique)
            .finish_non_exhaustive()
    }
}

///
/// PropertySet
///
/// Registered sortable properties for one result-set type. Registered once,
/// immutable after the fetcher is built. Re-registering a name replaces the
/// earlier entry.
///

pub struct PropertySet<R> {
    properties: Vec<Property<R>>,
}

impl<R> PropertySet<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Register a non-unique property.
    #[must_use]
    pub fn property(
        self,
        name: impl Into<String>,
        kind: ValueKind,
        accessor: impl Fn(&R) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.register(name.into(), kind, Arc::new(accessor), false)
    }

    /// Register a unique property. At least one is required; the first one
    /// registered becomes the mandatory sort tiebreaker.
    #[must_use]
    pub fn unique_property(
        self,
        name: impl Into<String>,
        kind: ValueKind,
        accessor: impl Fn(&R) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.register(name.into(), kind, Arc::new(accessor), true)
    }

    fn register(mut self, name: String, kind: ValueKind, accessor: Accessor<R>, unique: bool) -> Self {
        let property = Property {
            name,
            kind,
            accessor,
            unique,
        };

        if let Some(slot) = self
            .properties
            .iter_mut()
            .find(|existing| existing.name == property.name)
        {
            *slot = property;
        } else {
            self.properties.push(property);
        }

        self
    }

    /// Look up a property by name. A miss on caller-supplied input is a
    /// client error, not a configuration error.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Property<R>> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// First registered unique property, the mandatory tiebreaker.
    #[must_use]
    pub fn first_unique(&self) -> Option<&Property<R>> {
        self.properties.iter().find(|property| property.unique)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<R> Clone for PropertySet<R> {
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
        }
    }
}

impl<R> Default for PropertySet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for PropertySet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySet")
            .field("properties", &self.properties)
            .finish()
    }
}
