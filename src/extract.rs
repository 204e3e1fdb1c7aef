use crate::model::{ExtractError, SuiteRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xml::name::OwnedName;
use xml::reader::{EventReader, XmlEvent};

const SUITE_TAG: &str = "testsuite";
const SUITES_TAG: &str = "testsuites";

/// Read the JUnit report at `path` and summarise its suite.
pub fn extract_suite(path: &Path) -> Result<SuiteRecord, ExtractError> {
    let file = File::open(path)?;
    read_suite(BufReader::new(file))
}

/**
Summarise the suite of a JUnit document.

The root must be `<testsuite>`, or `<testsuites>` with a `<testsuite>` child; in the latter case the
first child wins. The whole document is read, so a report that is malformed after the suite element
is still rejected.
*/
pub fn read_suite<R: Read>(source: R) -> Result<SuiteRecord, ExtractError> {
    let mut reader = EventReader::new(source);
    let mut depth = 0usize;
    let mut root: Option<OwnedName> = None;
    let mut record: Option<SuiteRecord> = None;

    loop {
        match reader.next()? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                depth += 1;
                match depth {
                    1 if root.is_some() => {
                        return Err(ExtractError::MultipleRoots(name.to_string()));
                    }
                    1 => {
                        if is_plain(&name, SUITE_TAG) {
                            record = Some(SuiteRecord::from_attributes(&attributes));
                        }
                        root = Some(name);
                    }
                    2 if record.is_none()
                        && root.as_ref().map_or(false, |r| is_plain(r, SUITES_TAG))
                        && is_plain(&name, SUITE_TAG) =>
                    {
                        record = Some(SuiteRecord::from_attributes(&attributes));
                    }
                    _ => {}
                }
            }
            XmlEvent::EndElement { .. } => depth -= 1,
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }

    match (record, root) {
        (Some(record), _) => Ok(record),
        (None, Some(root)) if is_plain(&root, SUITES_TAG) => Err(ExtractError::MissingSuite),
        (None, Some(root)) => Err(ExtractError::UnexpectedRoot(root.to_string())),
        // the reader refuses documents without a root element
        (None, None) => Err(ExtractError::UnexpectedRoot(String::new())),
    }
}

fn is_plain(name: &OwnedName, tag: &str) -> bool {
    name.namespace.is_none() && name.prefix.is_none() && name.local_name == tag
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn read(doc: &str) -> Result<SuiteRecord, ExtractError> {
        read_suite(doc.as_bytes())
    }

    fn record(name: &str, tests: &str, time: &str) -> SuiteRecord {
        SuiteRecord {
            name: name.to_string(),
            tests: tests.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_testsuite_root() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="Foo" tests="12" time="3.4" failures="0">
  <testcase classname="a" name="b" time="0.1"/>
</testsuite>"#;
        assert_eq!(read(doc).unwrap(), record("Foo", "12", "3.4"));
    }

    #[test]
    fn test_testsuites_root_uses_first_child() {
        let doc = r#"<testsuites name="all" tests="9">
  <properties/>
  <testsuite name="Bar" tests="5" time="1.0"/>
  <testsuite name="Baz" tests="4" time="2.0"/>
</testsuites>"#;
        assert_eq!(read(doc).unwrap(), record("Bar", "5", "1.0"));
    }

    #[test]
    fn test_nested_suite_is_not_a_direct_child() {
        let doc = r#"<testsuites><group><testsuite name="Deep"/></group></testsuites>"#;
        assert!(matches!(read(doc), Err(ExtractError::MissingSuite)));
    }

    #[test]
    fn test_testsuites_without_suite() {
        assert!(matches!(read("<testsuites/>"), Err(ExtractError::MissingSuite)));
    }

    #[test]
    fn test_missing_attributes_use_defaults() {
        assert_eq!(read("<testsuite/>").unwrap(), record("Unknown", "0", "0"));
        assert_eq!(
            read(r#"<testsuite tests="3"/>"#).unwrap(),
            record("Unknown", "3", "0")
        );
    }

    #[test]
    fn test_unexpected_root() {
        match read(r#"<html><testsuite name="x"/></html>"#) {
            Err(ExtractError::UnexpectedRoot(tag)) => assert_eq!(tag, "html"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_namespaced_root_is_not_a_suite() {
        let doc = r#"<testsuite xmlns="urn:junit" name="Foo"/>"#;
        let err = read(doc).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_malformed_documents() {
        for doc in ["", "not xml at all", "<testsuite name=\"Foo\">"] {
            let err = read(doc).unwrap_err();
            assert!(matches!(err, ExtractError::Xml(_)), "{:?} gave {:?}", doc, err);
            assert!(!err.is_shape_mismatch());
        }
    }

    #[test]
    fn test_second_top_level_element_is_rejected() {
        for doc in [
            r#"<testsuite name="A"/><testsuite name="B"/>"#,
            r#"<coverage/><testsuite name="B"/>"#,
        ] {
            let err = read(doc).unwrap_err();
            assert!(
                matches!(err, ExtractError::MultipleRoots(ref tag) if tag == "testsuite"),
                "{:?} gave {:?}",
                doc,
                err
            );
            assert!(!err.is_shape_mismatch());
        }
    }

    #[test]
    fn test_attribute_whitespace_is_normalized() {
        let doc = "<testsuite name=\"a\tb\nc\r\nd\" tests=\"1\n\" time=\"\t2\"/>";
        assert_eq!(read(doc).unwrap(), record("a b c d", "1 ", " 2"));
    }

    #[test]
    fn test_extract_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xml");
        fs::write(&path, r#"<testsuite name="Foo" tests="12" time="3.4"/>"#).unwrap();

        assert_eq!(extract_suite(&path).unwrap(), record("Foo", "12", "3.4"));
        assert!(matches!(
            extract_suite(&dir.path().join("gone.xml")),
            Err(ExtractError::Io(_))
        ));
    }
}
