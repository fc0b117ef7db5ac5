// file: src/uri/components.rs
// description: percent encoding of individual uri components
// reference: https://www.ietf.org/rfc/rfc3986.txt (appendix A)

use crate::error::{CouchError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};
use std::str::FromStr;

// Each set lists the bytes that must be escaped; bytes removed from it pass through.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SUB_DELIMS: &AsciiSet = &UNRESERVED
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

const PCHAR: &AsciiSet = &SUB_DELIMS.remove(b':').remove(b'@');

// CouchDB reads a literal '+' in a path as a space (COUCHDB-1580).
const PCHAR_NO_PLUS: &AsciiSet = &PCHAR.add(b'+');

const SCHEME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'+').remove(b'-').remove(b'.');
const USER_INFO: &AsciiSet = &SUB_DELIMS.remove(b':');
const HOST_IPV6: &AsciiSet = &SUB_DELIMS.remove(b'[').remove(b']').remove(b':');
const PATH: &AsciiSet = &PCHAR_NO_PLUS.remove(b'/');
const QUERY: &AsciiSet = &PCHAR.remove(b'/').remove(b'?');
const QUERY_PARAM: &AsciiSet = &QUERY.add(b'=').add(b'+').add(b'&').add(b';');
const PORT: &AsciiSet = &with_letters(NON_ALPHANUMERIC);

const fn with_letters(base: &AsciiSet) -> AsciiSet {
    let mut set = base.add(b'A');
    let mut c = b'A';
    while c <= b'Z' {
        set = set.add(c).add(c + 32);
        c += 1;
    }
    set
}

/// The part of a URI a string is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Scheme,
    Authority,
    UserInfo,
    HostIpv4,
    HostIpv6,
    Port,
    Path,
    PathSegment,
    Query,
    /// A single `key` or `value` of a query string. `=`, `+`, `&` and `;` are
    /// escaped so the value survives form-style parsing on the server.
    QueryParam,
    Fragment,
    Uri,
}

impl ComponentType {
    fn escape_set(self) -> &'static AsciiSet {
        match self {
            ComponentType::Scheme => SCHEME,
            ComponentType::Authority => PCHAR,
            ComponentType::UserInfo => USER_INFO,
            ComponentType::HostIpv4 => SUB_DELIMS,
            ComponentType::HostIpv6 => HOST_IPV6,
            ComponentType::Port => PORT,
            ComponentType::Path => PATH,
            ComponentType::PathSegment => PCHAR_NO_PLUS,
            ComponentType::Query | ComponentType::Fragment => QUERY,
            ComponentType::QueryParam => QUERY_PARAM,
            ComponentType::Uri => UNRESERVED,
        }
    }
}

/// Character sets a source string can be transcoded to before escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    Ascii,
}

impl FromStr for Charset {
    type Err = CouchError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            "" => Err(CouchError::Validation("Encoding may not be empty.".to_string())),
            _ => Err(CouchError::UnsupportedEncoding(name.to_string())),
        }
    }
}

impl Charset {
    fn to_bytes(self, source: &str) -> Result<Vec<u8>> {
        let limit = match self {
            Charset::Utf8 => return Ok(source.as_bytes().to_vec()),
            Charset::Latin1 => 0xFF,
            Charset::Ascii => 0x7F,
        };

        source
            .chars()
            .map(|c| {
                let code = c as u32;
                if code <= limit {
                    Ok(code as u8)
                } else {
                    Err(CouchError::UnsupportedEncoding(format!(
                        "{:?} cannot represent character {:?}",
                        self, c
                    )))
                }
            })
            .collect()
    }
}

/// Escapes `source` for use as the given URI component, after transcoding it
/// to `charset`. Escapes use upper-case hex digits.
pub fn encode_uri_component(source: &str, charset: Charset, kind: ComponentType) -> Result<String> {
    let bytes = charset.to_bytes(source)?;
    Ok(percent_encode(&bytes, kind.escape_set()).to_string())
}

/// UTF-8 shorthand for [`encode_uri_component`].
pub fn encode(source: &str, kind: ComponentType) -> String {
    percent_encode(source.as_bytes(), kind.escape_set()).to_string()
}
