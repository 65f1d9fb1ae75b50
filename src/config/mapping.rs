use crate::utils::error::{CorrectorError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};

/// Ordered mother brand -> child brands table.
///
/// Built once at startup and handed to the driver; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrandMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl BrandMapping {
    pub fn new<M, C, I>(entries: I) -> Self
    where
        M: Into<String>,
        C: Into<String>,
        I: IntoIterator<Item = (M, Vec<C>)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(mother, children)| {
                    (
                        mother.into(),
                        children.into_iter().map(Into::into).collect(),
                    )
                })
                .collect(),
        }
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        Self::new([
            ("Blédina", vec!["Blédichef", "Blédilait"]),
            ("Ferrero", vec!["Kinder"]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(mother, children)| (mother.as_str(), children.as_slice()))
    }

    /// `(mother, child)` pairs in table order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().flat_map(|(mother, children)| {
            children.iter().map(move |child| (mother, child.as_str()))
        })
    }
}

impl Validate for BrandMapping {
    fn validate(&self) -> Result<()> {
        for (mother, children) in self.iter() {
            validate_non_empty_string("mapping.mother", mother)?;
            for child in children {
                validate_non_empty_string("mapping.child", child).map_err(|_| {
                    CorrectorError::ValidationError {
                        message: format!("empty child brand under mother '{}'", mother),
                    }
                })?;
            }
        }
        Ok(())
    }
}
