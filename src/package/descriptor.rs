use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Build metadata of one library, as read from its `.pc` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgConfig {
    pub name: String,
    pub description: String,
    pub version: String,
    pub url: String,
    /// `Cflags`, e.g. include-path flags.
    pub cflags: Vec<String>,
    /// `Libs`, the public link flags.
    pub libs: Vec<String>,
    /// `Libs.private`, only needed for static linking.
    pub libs_private: Vec<String>,
    /// Where the descriptor was loaded from. Set by lookups, never by the parser.
    pub file: Option<PathBuf>,
}

impl PkgConfig {
    /// Render the descriptor in the `.pc` keyword format.
    ///
    /// The output starts with a blank line (an empty variable section), so
    /// it parses back into the same recognized fields.
    pub fn to_pc_string(&self) -> Result<String> {
        if self.libs.is_empty() && self.cflags.is_empty() {
            return Err(Error::EmptyConfig);
        }

        let fields = [
            ("Name", self.name.trim().to_string()),
            ("Description", self.description.trim().to_string()),
            ("Version", self.version.trim().to_string()),
            ("URL", self.url.trim().to_string()),
            ("Libs.private", join_flags(&self.libs_private)),
            ("Libs", join_flags(&self.libs)),
            ("Cflags", join_flags(&self.cflags)),
        ];

        let mut out = String::from("\n");
        for (key, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }

        if out.len() == 1 {
            return Err(Error::EmptyConfig);
        }
        Ok(out)
    }

    /// Write [`to_pc_string`](Self::to_pc_string) to `w`, returning the byte count.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<usize> {
        let text = self.to_pc_string()?;
        w.write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

fn join_flags(flags: &[String]) -> String {
    flags.join(" ").trim().to_string()
}
