//! `${name}` substitution over byte strings.

use std::collections::HashMap;

/// Variable table used while parsing one `.pc` file.
///
/// Values are stored already expanded, so later definitions only see what
/// was defined before them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: HashMap<String, Vec<u8>>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

/// Replace every `${name}` in `input` with its value from `vars`.
///
/// Unknown names and malformed references are copied verbatim. Scanning
/// resumes at the start of each inserted value, so a value is rescanned
/// together with the text that follows it. A name is not expanded again
/// while the scan is still inside its own replacement, which keeps
/// self-referencing tables from looping.
pub fn expand(input: &[u8], vars: &Variables) -> Vec<u8> {
    let mut out = input.to_vec();
    // Names being expanded, with the offset where their replacement ends.
    let mut active: Vec<(&str, usize)> = Vec::new();
    let mut pos = 0;

    while let Some(found) = out[pos..].iter().position(|&b| b == b'$') {
        let at = pos + found;
        active.retain(|&(_, end)| end > at);

        let hit = reference(&out[at..]).and_then(|(name, len)| {
            let (name, value) = vars.values.get_key_value(name)?;
            if active.iter().any(|(n, _)| *n == name.as_str()) {
                return None;
            }
            Some((name.as_str(), value.as_slice(), len))
        });

        match hit {
            Some((name, value, len)) => {
                let mut next = Vec::with_capacity(out.len() - len + value.len());
                next.extend_from_slice(&out[..at]);
                next.extend_from_slice(value);
                next.extend_from_slice(&out[at + len..]);
                out = next;

                for (_, end) in active.iter_mut() {
                    *end = (*end + value.len()).saturating_sub(len).max(at);
                }
                active.push((name, at + value.len()));
                pos = at;
            }
            None => pos = at + 1,
        }
    }

    out
}

/// Parse a `${name}` reference at the start of `tail`, returning the name and
/// the length of the whole reference.
fn reference(tail: &[u8]) -> Option<(&str, usize)> {
    let body = tail.strip_prefix(b"${")?;
    let end = body.iter().position(|&b| b == b'}')?;
    if end == 0 {
        return None;
    }
    let name = std::str::from_utf8(&body[..end]).ok()?;
    Some((name, end + 3))
}
