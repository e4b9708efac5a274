//! In-memory dataset of objects and their binary attributes
//!
//! Objects keep insertion order, which is the order they are persisted in
//! and the order candidates appear in tree leaves.

use indexmap::IndexMap;

/// Attribute values for one object.
///
/// An attribute the record does not define reads as `false` (0).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: IndexMap<String, bool>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record::default()
    }

    /// Value of `attribute`, 0 when undefined
    pub fn value(&self, attribute: &str) -> bool {
        self.values.get(attribute).copied().unwrap_or(false)
    }

    /// Whether the record explicitly defines `attribute`
    pub fn defines(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub fn set(&mut self, attribute: impl Into<String>, value: bool) {
        self.values.insert(attribute.into(), value);
    }

    /// Builder-style variant of [`Record::set`]
    pub fn with(mut self, attribute: impl Into<String>, value: bool) -> Self {
        self.set(attribute, value);
        self
    }

    /// Number of explicitly defined attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Objects by name plus the ordered attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    attributes: Vec<String>,
    objects: IndexMap<String, Record>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Create a dataset with the given attribute columns and no objects
    pub fn with_attributes<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dataset {
            attributes: attributes.into_iter().map(Into::into).collect(),
            objects: IndexMap::new(),
        }
    }

    /// Attribute names in column order
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    /// Iterate objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.objects.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Object names in insertion order
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Insert or replace an object.
    ///
    /// The record is padded with 0 for every known attribute it lacks. A
    /// replaced object keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, mut record: Record) {
        for attribute in &self.attributes {
            if !record.defines(attribute) {
                record.set(attribute.clone(), false);
            }
        }
        self.objects.insert(name.into(), record);
    }

    /// Append a new attribute column, defaulting it to 0 for every object.
    ///
    /// Returns `false` (and changes nothing) when the attribute is already known.
    pub fn add_attribute(&mut self, attribute: impl Into<String>) -> bool {
        let attribute = attribute.into();
        if self.has_attribute(&attribute) {
            return false;
        }
        for record in self.objects.values_mut() {
            record.set(attribute.clone(), false);
        }
        self.attributes.push(attribute);
        true
    }

    /// Set one value of an existing object. Returns `false` if the object is unknown.
    pub fn set(&mut self, name: &str, attribute: &str, value: bool) -> bool {
        match self.objects.get_mut(name) {
            Some(record) => {
                record.set(attribute, value);
                true
            }
            None => false,
        }
    }
}
