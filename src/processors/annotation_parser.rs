use std::collections::BTreeMap;

use thiserror::Error;

use crate::{data_types::annotation::PointAnnotation, logvbln};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseIssue {
    #[error("line {line}: '{entry}' has no value")]
    MissingValue { line: usize, entry: String },
    #[error("line {line}: entry has an empty key")]
    EmptyKey { line: usize },
    #[error("line {line}: compound key '{key}' has {keys} parts but {values} values")]
    CompoundMismatch {
        line: usize,
        key: String,
        keys: usize,
        values: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Field {
        key: String,
        value: String,
    },
    // "STW/SOG: 4.2/5.0" keeps the whole pair plus each sub pair
    Compound {
        key: String,
        value: String,
        parts: Vec<(String, String)>,
    },
}

impl Entry {
    // Every (key, value) pair the entry contributes to an annotation
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        match self {
            Entry::Field { key, value } => vec![(key.as_str(), value.as_str())],
            Entry::Compound { key, value, parts } => {
                let mut pairs = vec![(key.as_str(), value.as_str())];
                pairs.extend(parts.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                pairs
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Blank,
    Parsed(Entry),
    // Entry kept, but part of the line was dropped
    Recovered(Entry, ParseIssue),
    Rejected(ParseIssue),
}

pub struct AnnotationParser {}

impl AnnotationParser {
    const CC: &'static str = "AnnotationParser";

    pub fn parse(comment: Option<&str>) -> PointAnnotation {
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        let mut issues: Vec<ParseIssue> = Vec::new();

        let mut insert_entry = |entry: &Entry| {
            for (key, value) in entry.pairs() {
                values.insert(key.to_string(), value.to_string());
            }
        };

        for (index, line) in comment.unwrap_or_default().lines().enumerate() {
            match AnnotationParser::tokenize_line(index + 1, line) {
                LineOutcome::Blank => {}
                LineOutcome::Parsed(entry) => insert_entry(&entry),
                LineOutcome::Recovered(entry, issue) => {
                    logvbln!("{}", issue);
                    insert_entry(&entry);
                    issues.push(issue);
                }
                LineOutcome::Rejected(issue) => {
                    logvbln!("{}", issue);
                    issues.push(issue);
                }
            }
        }

        PointAnnotation::new(values, issues)
    }

    pub fn tokenize_line(line_no: usize, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineOutcome::Blank;
        }

        let (key, value) = match trimmed.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            // TWD is logged as "TWD 180", without a colon
            None => match trimmed.split_once(char::is_whitespace) {
                Some((key, value)) => (key.trim(), value.trim()),
                None => {
                    return LineOutcome::Rejected(ParseIssue::MissingValue {
                        line: line_no,
                        entry: trimmed.to_string(),
                    })
                }
            },
        };

        if key.is_empty() {
            return LineOutcome::Rejected(ParseIssue::EmptyKey { line: line_no });
        }

        if !key.contains('/') {
            return LineOutcome::Parsed(Entry::Field {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        let keys: Vec<&str> = key.split('/').map(str::trim).collect();
        let values: Vec<&str> = value.split('/').map(str::trim).collect();

        let entry = Entry::Compound {
            key: key.to_string(),
            value: value.to_string(),
            parts: keys
                .iter()
                .zip(values.iter())
                .filter(|(k, _)| !k.is_empty())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };

        if keys.len() != values.len() {
            return LineOutcome::Recovered(
                entry,
                ParseIssue::CompoundMismatch {
                    line: line_no,
                    key: key.to_string(),
                    keys: keys.len(),
                    values: values.len(),
                },
            );
        }

        LineOutcome::Parsed(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_entry() {
        assert_eq!(
            AnnotationParser::tokenize_line(1, "SOG: 5.2 kts"),
            LineOutcome::Parsed(Entry::Field {
                key: "SOG".to_string(),
                value: "5.2 kts".to_string()
            })
        );
    }

    #[test]
    fn space_separated_entry() {
        assert_eq!(
            AnnotationParser::tokenize_line(1, "  TWD 180"),
            LineOutcome::Parsed(Entry::Field {
                key: "TWD".to_string(),
                value: "180".to_string()
            })
        );
    }

    #[test]
    fn value_keeps_later_colons() {
        let outcome = AnnotationParser::tokenize_line(1, "Time: 12:30");
        assert_eq!(
            outcome,
            LineOutcome::Parsed(Entry::Field {
                key: "Time".to_string(),
                value: "12:30".to_string()
            })
        );
    }

    #[test]
    fn compound_entry_splits_into_parts() {
        let outcome = AnnotationParser::tokenize_line(2, "STW/SOG: 4.2/5.0");
        match outcome {
            LineOutcome::Parsed(entry) => assert_eq!(
                entry.pairs(),
                vec![("STW/SOG", "4.2/5.0"), ("STW", "4.2"), ("SOG", "5.0")]
            ),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn uneven_compound_is_recovered() {
        match AnnotationParser::tokenize_line(3, "AWA/AWS: 45") {
            LineOutcome::Recovered(entry, issue) => {
                assert_eq!(entry.pairs(), vec![("AWA/AWS", "45"), ("AWA", "45")]);
                assert_eq!(
                    issue,
                    ParseIssue::CompoundMismatch {
                        line: 3,
                        key: "AWA/AWS".to_string(),
                        keys: 2,
                        values: 1
                    }
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(
            AnnotationParser::tokenize_line(4, "TWD"),
            LineOutcome::Rejected(ParseIssue::MissingValue {
                line: 4,
                entry: "TWD".to_string()
            })
        );
        assert_eq!(
            AnnotationParser::tokenize_line(5, ": 12"),
            LineOutcome::Rejected(ParseIssue::EmptyKey { line: 5 })
        );
        assert_eq!(AnnotationParser::tokenize_line(6, "   "), LineOutcome::Blank);
    }

    #[test]
    fn bad_lines_do_not_stop_the_rest() {
        let annotation = AnnotationParser::parse(Some("garbage\nSOG: 5.2 kts\n: 3"));
        assert_eq!(annotation.sog(), Some(5.2));
        assert_eq!(annotation.issues().len(), 2);
    }
}
