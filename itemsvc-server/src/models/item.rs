//! Item input types
//!
//! Handlers only reach storage with these validated values.

use super::ValidationError;

/// Validated item name (present and non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName(String);

impl ItemName {
    /// Create a new item name.
    ///
    /// # Example
    /// ```
    /// use itemsvc_server::models::ItemName;
    ///
    /// assert!(ItemName::new("widget").is_ok());
    /// assert!(ItemName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Validate a name field that may be absent from the request body.
    pub fn required(value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            Some(s) if !s.is_empty() => Ok(Self(s)),
            Some(_) => Err(ValidationError::Empty { field: "name" }),
            None => Err(ValidationError::Missing { field: "name" }),
        }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fields for a row about to be inserted
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: ItemName,
    pub description: Option<String>,
}

impl NewItem {
    /// An empty description is stored as NULL, same as an absent one.
    pub fn new(name: ItemName, description: Option<String>) -> Self {
        Self {
            name,
            description: description.filter(|d| !d.is_empty()),
        }
    }
}

/// Replacement values for an existing row.
///
/// Both columns are always written as given; there is no partial update.
/// The name only has to be present (the column is NOT NULL), an empty
/// string is stored as is.
#[derive(Debug, Clone)]
pub struct ItemChanges {
    pub name: String,
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn new(name: Option<String>, description: Option<String>) -> Result<Self, ValidationError> {
        let name = name.ok_or(ValidationError::Missing { field: "name" })?;
        Ok(Self { name, description })
    }
}
