use std::fmt;

use validator::{Validate, ValidationErrors};

use crate::errors::OrderError;

/// Ordered list of human-readable problems found by `validate()`.
///
/// An empty report means the entity is valid. Parents merge the reports of
/// their children before adding their own cross-field findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: impl Into<String>) {
        let finding = finding.into();
        if !finding.is_empty() {
            self.findings.push(finding);
        }
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.findings.extend(other.findings);
    }

    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.findings.iter()
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<String> {
        self.findings
    }

    /// Returns true when any finding contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.findings.iter().any(|finding| finding.contains(needle))
    }

    /// Turns a non-empty report into a hard [`OrderError::Validation`].
    pub fn into_result(self) -> Result<(), OrderError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(OrderError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.findings.join("; "))
    }
}

impl IntoIterator for ValidationReport {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut report = ValidationReport::new();
        for finding in iter {
            report.push(finding);
        }
        report
    }
}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let mut report = ValidationReport::new();
        for (field, field_errors) in fields {
            for error in field_errors {
                match &error.message {
                    Some(message) => report.push(message.to_string()),
                    None => report.push(format!("Field '{}' failed check '{}'", field, error.code)),
                }
            }
        }
        report
    }
}

/// Runs the declarative field checks of `input` and folds them into findings.
pub fn field_findings<T: Validate>(input: &T) -> ValidationReport {
    match input.validate() {
        Ok(()) => ValidationReport::new(),
        Err(errors) => errors.into(),
    }
}
