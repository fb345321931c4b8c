//! Named numeric columns
//!
//! Models refer to variables by name; a [`Dataset`] resolves those names by
//! explicit lookup. Column order is the insertion order.

use bootstats_core::{Error, Result};

/// Table of equally long, named `f64` columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.add_column(name, values)?;
        Ok(self)
    }

    /// Add a column
    ///
    /// Fails when the name is taken or the length differs from the columns
    /// already present.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(Error::InvalidInput(format!("Duplicate column '{name}'")));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != values.len() {
                return Err(Error::size_mismatch(first.len(), values.len(), &format!("column '{name}'")));
            }
        }
        self.names.push(name);
        self.columns.push(values);
        Ok(())
    }

    /// Values of the column called `name`
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
