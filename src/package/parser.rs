//! Parser for `.pc` files.
//!
//! A file has two sections separated by the first blank line:
//!
//! ```text
//! libdir=${GOPATH}/lib/${GOOS}_${GOARCH}/libgit2
//! includedir=${GOPATH}/include/libgit2
//!
//! Name: libgit2
//! Libs: -L${libdir} -lgit2
//! Cflags: -I${includedir}
//! ```
//!
//! Variable lines are expanded against the variables defined before them and
//! extend the table. Keyword lines are expanded against the final table and
//! fill the [`PkgConfig`] fields; unknown keywords are ignored. List fields
//! are split on single spaces, so paths containing spaces are not supported.

use std::io::BufRead;

use log::debug;

use super::descriptor::PkgConfig;
use super::expand::{Variables, expand};
use crate::error::{Error, ParseState, Result};

/// Parse a `.pc` file with an empty variable table.
pub fn parse<R: BufRead>(reader: R) -> Result<PkgConfig> {
    parse_with_vars(reader, Variables::new())
}

/// Parse a `.pc` file with `vars` pre-seeded into the variable table.
pub fn parse_with_vars<R: BufRead>(mut reader: R, mut vars: Variables) -> Result<PkgConfig> {
    let mut pc = PkgConfig::default();
    let mut state = ParseState::Variable;
    let mut consumed = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            if consumed == 0 || state == ParseState::Variable {
                return Err(Error::UnexpectedEof);
            }
            return Ok(pc);
        }

        let line = buf.trim_ascii();
        if line.is_empty() {
            state = ParseState::Keyword;
            continue;
        }
        consumed += line.len();

        let malformed = || Error::Malformed {
            state,
            line: String::from_utf8_lossy(line).into_owned(),
        };
        let sep = line
            .iter()
            .position(|&b| b == state.separator())
            .ok_or_else(malformed)?;
        let name = line[..sep].trim_ascii();
        if name.is_empty() {
            return Err(malformed());
        }
        let name = String::from_utf8_lossy(name);
        let value = expand(line[sep + 1..].trim_ascii(), &vars);

        match state {
            ParseState::Variable => vars.insert(name, value),
            ParseState::Keyword => set_keyword(&mut pc, &name, &value),
        }
    }
}

fn set_keyword(pc: &mut PkgConfig, name: &str, value: &[u8]) {
    let value = String::from_utf8_lossy(value);
    match name.to_ascii_lowercase().as_str() {
        "name" => pc.name = value.into_owned(),
        "description" => pc.description = value.into_owned(),
        "version" => pc.version = value.into_owned(),
        "url" => pc.url = value.into_owned(),
        "libs" => pc.libs = split_flags(&value),
        "libs.private" => pc.libs_private = split_flags(&value),
        "cflags" => pc.cflags = split_flags(&value),
        other => debug!("Ignoring unknown keyword {:?}", other),
    }
}

fn split_flags(value: &str) -> Vec<String> {
    value
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
