use super::error::ModelError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainOrigin {
    StructurePrediction, // Inferred from a predicted aligned error matrix
    Annotation,          // Taken from an annotation database (e.g. UniProt features)
    Manual,              // Supplied by the user
}

impl DomainOrigin {
    /// Prefix used when generating sequential identifiers for domains of this origin.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            DomainOrigin::StructurePrediction => "AF",
            DomainOrigin::Annotation => "UniProt",
            DomainOrigin::Manual => "manual",
        }
    }

    pub fn sequential_id(&self, number: usize) -> String {
        format!("{}_D{}", self.id_prefix(), number)
    }
}

#[derive(Debug, Error)]
#[error("Invalid domain origin string: '{0}'")]
pub struct ParseDomainOriginError(String);

impl FromStr for DomainOrigin {
    type Err = ParseDomainOriginError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "af" | "alphafold" | "structure-prediction" => Ok(DomainOrigin::StructurePrediction),
            "uniprot" | "annotation" => Ok(DomainOrigin::Annotation),
            "manual" | "manually_defined" => Ok(DomainOrigin::Manual),
            _ => Err(ParseDomainOriginError(s.to_string())),
        }
    }
}

impl fmt::Display for DomainOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DomainOrigin::StructurePrediction => "StructurePrediction",
                DomainOrigin::Annotation => "Annotation",
                DomainOrigin::Manual => "Manual",
            }
        )
    }
}

/// A contiguous, inclusive residue interval that must never be split by a fragment boundary.
///
/// Positions are 0-based and inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    pub id: String,
    start: usize,
    end: usize,
    pub origin: DomainOrigin,
}

impl Domain {
    pub fn new(
        id: impl Into<String>,
        start: usize,
        end: usize,
        origin: DomainOrigin,
    ) -> Result<Self, ModelError> {
        if start > end {
            return Err(ModelError::InvertedDomain { start, end });
        }
        Ok(Self {
            id: id.into(),
            start,
            end,
            origin,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of residues covered by the domain.
    pub fn span(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, residue: usize) -> bool {
        self.start <= residue && residue <= self.end
    }

    /// Builds a domain from bounds the caller already knows to be ordered.
    pub(crate) fn from_ordered(
        id: impl Into<String>,
        start: usize,
        end: usize,
        origin: DomainOrigin,
    ) -> Self {
        debug_assert!(start <= end);
        Self {
            id: id.into(),
            start,
            end,
            origin,
        }
    }

    /// Returns a copy of this domain covering `start..=end`. Used by merge steps, which
    /// never mutate a domain in place.
    pub(crate) fn with_bounds(&self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            id: self.id.clone(),
            start,
            end,
            origin: self.origin,
        }
    }

    pub(crate) fn extend_end(&mut self, end: usize) {
        self.end = self.end.max(end);
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.start, self.end)
    }
}
