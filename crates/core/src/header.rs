//! Table header for relq.

use crate::error::{Error, Result};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The ordered attribute names of a table.
///
/// Attributes are looked up by exact name; when a header carries a name twice the
/// first position wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    attributes: Vec<String>,
}

impl Header {
    /// Creates a header from attribute names.
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes }
    }

    /// Creates a header from anything yielding attribute names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Into::into).collect())
    }

    /// Returns the position of an attribute.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.find(name)
            .ok_or_else(|| Error::attribute_not_found(name))
    }

    /// Returns the position of an attribute, if present.
    #[inline]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == name)
    }

    /// Returns true if the header carries the attribute.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns the attribute names.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.attributes
    }

    /// Returns the attribute name at a position.
    pub fn name(&self, position: usize) -> Option<&str> {
        self.attributes.get(position).map(String::as_str)
    }

    /// Returns the number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if the header has no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the positions, in header order, of the header attributes that
    /// appear in `requested`. Requested names absent from the header are dropped.
    pub fn subset_positions<S: AsRef<str>>(&self, requested: &[S]) -> Vec<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| requested.iter().any(|r| r.as_ref() == a.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Builds a header holding the names at the given positions, in that order.
    pub fn pick(&self, positions: &[usize]) -> Header {
        Header::new(positions.iter().map(|&i| self.attributes[i].clone()).collect())
    }

    /// Builds a header holding this header's names followed by `name`.
    pub fn extended(&self, name: impl Into<String>) -> Header {
        let mut attributes = self.attributes.clone();
        attributes.push(name.into());
        Header::new(attributes)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
