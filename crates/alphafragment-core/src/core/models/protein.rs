use super::domain::Domain;
use super::error::ModelError;
use super::fragment::Fragment;
use std::fmt;

/// A protein sequence together with the domains that must stay intact and the
/// fragments produced for it.
///
/// `first_res` and `last_res` describe the inclusive residue window this protein is
/// responsible for; by default the window spans the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protein {
    pub name: String,
    pub accession_id: String,
    sequence: String,
    first_res: usize,
    last_res: usize,
    domains: Vec<Domain>,
    fragments: Vec<Fragment>,
}

impl Protein {
    pub fn new(
        name: impl Into<String>,
        accession_id: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let sequence = sequence.into();
        if sequence.is_empty() {
            return Err(ModelError::EmptySequence { name });
        }
        if !sequence.is_ascii() {
            return Err(ModelError::InvalidSequence { name });
        }
        let last_res = sequence.len() - 1;
        Ok(Self {
            name,
            accession_id: accession_id.into(),
            sequence,
            first_res: 0,
            last_res,
            domains: Vec::new(),
            fragments: Vec::new(),
        })
    }

    /// Restricts the residue window to `first_res..=last_res`.
    pub fn with_window(mut self, first_res: usize, last_res: usize) -> Result<Self, ModelError> {
        if first_res > last_res || last_res >= self.sequence.len() {
            return Err(ModelError::InvalidWindow {
                first_res,
                last_res,
                sequence_len: self.sequence.len(),
            });
        }
        self.first_res = first_res;
        self.last_res = last_res;
        Ok(self)
    }

    pub fn with_domains(mut self, domains: impl IntoIterator<Item = Domain>) -> Self {
        self.domains.extend(domains);
        self
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn first_res(&self) -> usize {
        self.first_res
    }

    pub fn last_res(&self) -> usize {
        self.last_res
    }

    /// Number of residues in the residue window.
    pub fn len(&self) -> usize {
        self.last_res - self.first_res + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn add_domain(&mut self, domain: Domain) {
        self.domains.push(domain);
    }

    /// Appends a fragment, enforcing window bounds and non-decreasing starts.
    pub fn add_fragment(&mut self, fragment: impl Into<Fragment>) -> Result<(), ModelError> {
        let fragment = fragment.into();
        let Fragment { start, end } = fragment;
        if start >= end {
            return Err(ModelError::EmptyFragment { start, end });
        }
        if start < self.first_res || end > self.last_res + 1 {
            return Err(ModelError::FragmentOutOfBounds {
                start,
                end,
                first_res: self.first_res,
                last_res: self.last_res,
            });
        }
        if let Some(previous) = self.fragments.last() {
            if start < previous.start {
                return Err(ModelError::FragmentOutOfOrder {
                    start,
                    previous_start: previous.start,
                });
            }
        }
        self.fragments.push(fragment);
        Ok(())
    }

    /// Replaces the fragment list, validating every entry. On error the previous list
    /// is left untouched.
    pub fn set_fragments(&mut self, fragments: &[Fragment]) -> Result<(), ModelError> {
        let previous = std::mem::take(&mut self.fragments);
        for &fragment in fragments {
            if let Err(e) = self.add_fragment(fragment) {
                self.fragments = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Sequence of a fragment, or `None` if it does not fit the sequence.
    pub fn fragment_sequence(&self, fragment: &Fragment) -> Option<&str> {
        self.sequence.get(fragment.start..fragment.end)
    }

    /// A view over this protein's whole residue window.
    pub fn full_view(&self) -> ProteinSubsection<'_> {
        ProteinSubsection {
            parent: self,
            first_res: self.first_res,
            last_res: self.last_res,
        }
    }

    pub fn subsection(
        &self,
        first_res: usize,
        last_res: usize,
    ) -> Result<ProteinSubsection<'_>, ModelError> {
        ProteinSubsection::new(self, first_res, last_res)
    }
}

impl fmt::Display for Protein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Protein Name: {}, Accession ID: {}, Domains: {}, Fragments: {}",
            self.name,
            self.accession_id,
            self.domains.len(),
            self.fragments.len()
        )
    }
}

/// A read-only view over a residue range of a parent [`Protein`].
///
/// The view borrows the parent's sequence, domains and fragments; it never copies them.
#[derive(Debug, Clone, Copy)]
pub struct ProteinSubsection<'a> {
    parent: &'a Protein,
    first_res: usize,
    last_res: usize,
}

impl<'a> ProteinSubsection<'a> {
    pub fn new(parent: &'a Protein, first_res: usize, last_res: usize) -> Result<Self, ModelError> {
        if first_res >= last_res || last_res >= parent.sequence.len() {
            return Err(ModelError::InvalidWindow {
                first_res,
                last_res,
                sequence_len: parent.sequence.len(),
            });
        }
        Ok(Self {
            parent,
            first_res,
            last_res,
        })
    }

    pub fn parent(&self) -> &'a Protein {
        self.parent
    }

    pub fn first_res(&self) -> usize {
        self.first_res
    }

    pub fn last_res(&self) -> usize {
        self.last_res
    }

    /// Slicing index one past the last residue of the window.
    pub fn end(&self) -> usize {
        self.last_res + 1
    }

    pub fn len(&self) -> usize {
        self.last_res - self.first_res + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sequence(&self) -> &'a str {
        &self.parent.sequence[self.first_res..=self.last_res]
    }

    pub fn domains(&self) -> &'a [Domain] {
        &self.parent.domains
    }

    pub fn fragments(&self) -> &'a [Fragment] {
        &self.parent.fragments
    }

    /// Parent domains that share at least one residue with this window.
    pub fn domains_in_window(&self) -> impl Iterator<Item = &'a Domain> + use<'a> {
        let (first, last) = (self.first_res, self.last_res);
        self.parent
            .domains
            .iter()
            .filter(move |d| d.end() >= first && d.start() <= last)
    }

    /// A further subsection of the same parent.
    pub fn subsection(&self, first_res: usize, last_res: usize) -> Result<Self, ModelError> {
        Self::new(self.parent, first_res, last_res)
    }
}

impl PartialEq for ProteinSubsection<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.parent, other.parent)
            && self.first_res == other.first_res
            && self.last_res == other.last_res
    }
}

impl Eq for ProteinSubsection<'_> {}
