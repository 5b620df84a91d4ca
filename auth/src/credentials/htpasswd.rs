//! Line-oriented `username:hash` credential files.

use std::collections::HashMap;

use super::errors::LineError;
use super::errors::LineErrorKind;
use super::store::CredentialStore;
use crate::password::PasswordDigest;

/// Result of parsing a credential file.
#[derive(Debug)]
pub struct ParsedFile {
    pub store: CredentialStore,
    /// Lines that were skipped, in file order.
    pub rejected: Vec<LineError>,
}

/// Parse the contents of a credential file.
///
/// Blank lines and `#` comments are ignored. Malformed lines, including lines
/// that are not valid UTF-8, are collected in [`ParsedFile::rejected`] and do
/// not stop the rest of the file from loading. When a username appears more
/// than once the last record wins.
pub fn parse(contents: &[u8]) -> ParsedFile {
    let mut records: HashMap<String, PasswordDigest> = HashMap::new();
    let mut rejected = Vec::new();

    for (index, raw) in contents.split(|byte| *byte == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(_) => {
                rejected.push(LineError {
                    line: index + 1,
                    kind: LineErrorKind::InvalidUtf8,
                });
                continue;
            }
        };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok((username, digest)) => {
                if records.insert(username.to_string(), digest).is_some() {
                    tracing::warn!(
                        line = index + 1,
                        username = %username,
                        "Duplicate credential record, keeping the later one"
                    );
                }
            }
            Err(kind) => rejected.push(LineError {
                line: index + 1,
                kind,
            }),
        }
    }

    ParsedFile {
        store: CredentialStore::from_digests(records),
        rejected,
    }
}

fn parse_line(line: &str) -> Result<(&str, PasswordDigest), LineErrorKind> {
    let (username, hash) = line
        .split_once(':')
        .ok_or(LineErrorKind::MissingSeparator)?;

    let username = username.trim();
    let hash = hash.trim();

    if username.is_empty() {
        return Err(LineErrorKind::EmptyUsername);
    }
    if hash.is_empty() {
        return Err(LineErrorKind::EmptyHash);
    }

    let digest = PasswordDigest::parse(hash).map_err(LineErrorKind::MalformedHash)?;

    Ok((username, digest))
}

/// Render one credential file line.
pub fn format_record(username: &str, digest: &PasswordDigest) -> String {
    format!("{}:{}", username, digest.as_str())
}
