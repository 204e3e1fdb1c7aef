use std::io;
use std::path::PathBuf;
use thiserror::Error;
use xml::attribute::OwnedAttribute;

/// Summary of one `<testsuite>` element.
///
/// `tests` and `time` are carried as the raw attribute text, they are never parsed as numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteRecord {
    pub name: String,
    pub tests: String,
    pub time: String,
}

impl Default for SuiteRecord {
    fn default() -> Self {
        SuiteRecord {
            name: String::from("Unknown"),
            tests: String::from("0"),
            time: String::from("0"),
        }
    }
}

impl SuiteRecord {
    /// Build a record from the attributes of a suite element, keeping the defaults for
    /// anything missing. Namespaced attributes are ignored.
    pub fn from_attributes(attributes: &[OwnedAttribute]) -> Self {
        let mut record = SuiteRecord::default();
        for attribute in attributes {
            if attribute.name.namespace.is_some() || attribute.name.prefix.is_some() {
                continue;
            }
            let slot = match attribute.name.local_name.as_str() {
                "name" => &mut record.name,
                "tests" => &mut record.tests,
                "time" => &mut record.time,
                _ => continue,
            };
            *slot = normalize_attribute(&attribute.value);
        }
        record
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.name, &self.tests, &self.time]
    }
}

/// Attribute-value normalization of XML 1.0: every literal tab, CR, LF or CRLF becomes one space.
fn normalize_attribute(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\t', '\r', '\n'], " ")
}

/// Why a report file produced no record.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Xml(#[from] xml::reader::Error),

    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),

    #[error("junk after document element: second top-level element <{0}>")]
    MultipleRoots(String),

    #[error("no <testsuite> element under <testsuites>")]
    MissingSuite,
}

impl ExtractError {
    /// The document parsed but does not have a recognised JUnit shape.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            ExtractError::UnexpectedRoot(_) | ExtractError::MissingSuite
        )
    }
}

/// Why a directory could not be listed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Directory '{}' does not exist", .0.display())]
    Missing(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Unable to read directory '{}': {source}", .path.display())]
    Unreadable { path: PathBuf, source: io::Error },
}
