use crate::core::models::domain::{Domain, DomainOrigin};
use crate::core::models::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ManualDomainError {
    #[error("Syntax error at position {position}: expected {expected}")]
    Syntax {
        position: usize,
        expected: &'static str,
    },
    #[error("Invalid residue number '{value}'")]
    InvalidNumber { value: String },
    #[error("Residue numbers are 1-based; got 0 in domain '{id}'")]
    ZeroResidue { id: String },
    #[error("Domains must all be (start, end) pairs or all be (name, (start, end)) entries")]
    MixedForms,
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryForm {
    Pair,
    Named,
}

struct Entry {
    name: Option<String>,
    start: usize,
    end: usize,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ManualDomainError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.syntax(expected))
        }
    }

    fn syntax(&self, expected: &'static str) -> ManualDomainError {
        ManualDomainError::Syntax {
            position: self.pos,
            expected,
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// A run of word characters, used for both numbers and bare names.
    fn word(&mut self) -> &'a str {
        self.skip_whitespace();
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.')))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn number(&mut self) -> Result<usize, ManualDomainError> {
        let word = self.word();
        if word.is_empty() {
            return Err(self.syntax("a residue number"));
        }
        word.parse().map_err(|_| ManualDomainError::InvalidNumber {
            value: word.to_string(),
        })
    }

    fn name(&mut self) -> Result<String, ManualDomainError> {
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                let input = self.input;
                let rest = &input[self.pos..];
                let len = rest
                    .find(quote)
                    .ok_or_else(|| self.syntax("a closing quote"))?;
                self.pos += len + 1;
                Ok(rest[..len].to_string())
            }
            _ => {
                let word = self.word();
                if word.is_empty() {
                    Err(self.syntax("a domain name"))
                } else {
                    Ok(word.to_string())
                }
            }
        }
    }

    fn bounds(&mut self) -> Result<(usize, usize), ManualDomainError> {
        let start = self.number()?;
        self.expect(',', "','")?;
        let end = self.number()?;
        self.expect(')', "')'")?;
        Ok((start, end))
    }

    fn entry(&mut self) -> Result<(EntryForm, Entry), ManualDomainError> {
        self.expect('(', "'('")?;
        if self.peek().is_some_and(|c| c.is_ascii_digit()) {
            let (start, end) = self.bounds()?;
            return Ok((
                EntryForm::Pair,
                Entry {
                    name: None,
                    start,
                    end,
                },
            ));
        }
        let name = self.name()?;
        self.expect(',', "','")?;
        self.expect('(', "'('")?;
        let (start, end) = self.bounds()?;
        self.expect(')', "')'")?;
        Ok((
            EntryForm::Named,
            Entry {
                name: Some(name),
                start,
                end,
            },
        ))
    }

    fn entries(&mut self) -> Result<Vec<Entry>, ManualDomainError> {
        self.expect('[', "'['")?;
        let mut form = None;
        let mut entries = Vec::new();
        while !self.eat(']') {
            let (entry_form, entry) = self.entry()?;
            if *form.get_or_insert(entry_form) != entry_form {
                return Err(ManualDomainError::MixedForms);
            }
            entries.push(entry);
            if !self.eat(',') {
                self.expect(']', "',' or ']'")?;
                break;
            }
        }
        if !self.is_at_end() {
            return Err(self.syntax("end of input"));
        }
        Ok(entries)
    }
}

/// Parses manually specified domains.
///
/// The text is a list literal of either `(start, end)` pairs or `(name, (start, end))`
/// entries with 1-based inclusive residue numbers, e.g. `[(1, 120), (200, 310)]` or
/// `[('kinase', (1, 120))]`. Names may be quoted or bare. Unnamed domains get sequential
/// `manual_D{n}` ids. Blank text yields no domains. The returned domains are 0-based.
pub fn parse_manual_domains(text: &str) -> Result<Vec<Domain>, ManualDomainError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let origin = DomainOrigin::Manual;
    Parser::new(text)
        .entries()?
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = entry
                .name
                .unwrap_or_else(|| origin.sequential_id(index + 1));
            if entry.start == 0 || entry.end == 0 {
                return Err(ManualDomainError::ZeroResidue { id });
            }
            Ok(Domain::new(id, entry.start - 1, entry.end - 1, origin)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(domains: &[Domain]) -> Vec<(usize, usize)> {
        domains.iter().map(|d| (d.start(), d.end())).collect()
    }

    #[test]
    fn blank_text_yields_no_domains() {
        assert!(parse_manual_domains("").unwrap().is_empty());
        assert!(parse_manual_domains("   ").unwrap().is_empty());
        assert!(parse_manual_domains("[]").unwrap().is_empty());
    }

    #[test]
    fn pairs_are_converted_to_zero_based_with_sequential_ids() {
        let domains = parse_manual_domains("[(1, 120), (200, 310)]").unwrap();
        assert_eq!(bounds(&domains), vec![(0, 119), (199, 309)]);
        assert_eq!(domains[0].id, "manual_D1");
        assert_eq!(domains[1].id, "manual_D2");
        assert!(domains.iter().all(|d| d.origin == DomainOrigin::Manual));
    }

    #[test]
    fn named_entries_keep_their_names() {
        let domains = parse_manual_domains("[('kinase', (5, 90)), (\"SH2\", (100,180)),]").unwrap();
        assert_eq!(bounds(&domains), vec![(4, 89), (99, 179)]);
        assert_eq!(domains[0].id, "kinase");
        assert_eq!(domains[1].id, "SH2");
    }

    #[test]
    fn bare_names_from_written_tables_are_accepted() {
        let domains = parse_manual_domains("[(AF_D1, (1, 150)), (AF_D1_2, (160, 200))]").unwrap();
        assert_eq!(domains[0].id, "AF_D1");
        assert_eq!(domains[1].id, "AF_D1_2");
        assert_eq!(bounds(&domains), vec![(0, 149), (159, 199)]);
    }

    #[test]
    fn mixed_forms_are_rejected() {
        let result = parse_manual_domains("[(1, 10), ('D2', (20, 30))]");
        assert_eq!(result, Err(ManualDomainError::MixedForms));
    }

    #[test]
    fn non_integer_bounds_are_rejected() {
        let result = parse_manual_domains("[(1.5, 10)]");
        assert_eq!(
            result,
            Err(ManualDomainError::InvalidNumber {
                value: "1.5".to_string()
            })
        );
    }

    #[test]
    fn malformed_brackets_are_rejected() {
        assert!(matches!(
            parse_manual_domains("[(1, 10)"),
            Err(ManualDomainError::Syntax { .. })
        ));
        assert!(matches!(
            parse_manual_domains("(1, 10)"),
            Err(ManualDomainError::Syntax { .. })
        ));
        assert!(matches!(
            parse_manual_domains("[(1, 10)] trailing"),
            Err(ManualDomainError::Syntax { .. })
        ));
    }

    #[test]
    fn zero_residue_is_rejected() {
        let result = parse_manual_domains("[(0, 10)]");
        assert_eq!(
            result,
            Err(ManualDomainError::ZeroResidue {
                id: "manual_D1".to_string()
            })
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let result = parse_manual_domains("[(30, 10)]");
        assert!(matches!(
            result,
            Err(ManualDomainError::Model(ModelError::InvertedDomain { .. }))
        ));
    }
}
