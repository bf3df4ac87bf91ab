use anyhow::{Context, Result};
use log::info;
use std::io::Write;

use crate::{lookup::Lookup, request::Request, runtime::Runtime, workspace::ProjectId};

pub mod config;

use config::Config;

/// Print the merged flags of the packages named in `args`.
#[tracing::instrument(skip(config, out))]
pub fn flags<R: Runtime, W: Write>(config: &Config<R>, args: &[String], out: &mut W) -> Result<()> {
    let mut request = Request::from_args(args, Box::new(config.default_lookup()));
    request.resolve()?;
    request
        .write_to(out)
        .context("Failed to write flags")?;
    Ok(())
}

/// Install `package` from the release archive of `project`.
#[tracing::instrument(skip(config, out))]
pub fn get<R: Runtime, W: Write>(
    config: &Config<R>,
    project: &str,
    package: &str,
    out: &mut W,
) -> Result<()> {
    let project: ProjectId = project.parse()?;
    let pc = config
        .remote_lookup()
        .with_project(project.clone())
        .lookup(package)
        .with_context(|| format!("Failed to get {} from {}", package, project))?;

    info!("Installed {} from {}", package, project);
    if let Some(file) = &pc.file {
        writeln!(out, "{}", file.display()).context("Failed to write output")?;
    }
    Ok(())
}

/// Print a descriptor for `package` derived from the workspace layout.
#[tracing::instrument(skip(config, out))]
pub fn generate<R: Runtime, W: Write>(config: &Config<R>, package: &str, out: &mut W) -> Result<()> {
    let pc = config.workspace_lookup().generate(package)?;
    pc.write_to(out)
        .with_context(|| format!("Failed to write descriptor for {}", package))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::HttpClient;
    use crate::platform::Platform;
    use crate::runtime::RealRuntime;
    use crate::workspace::Workspace;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn config(root: &Path, release_url: Option<String>) -> Config<RealRuntime> {
        Config {
            runtime: RealRuntime,
            workspace: Workspace::new(vec![root.to_path_buf()], Platform::new("linux", "amd64")),
            search_path: vec![],
            client: HttpClient::default(),
            release_url,
        }
    }

    fn install(root: &Path, package: &str, pc: Option<&str>) {
        fs::create_dir_all(root.join("include").join(package)).unwrap();
        let lib = root.join("lib/linux_amd64").join(package);
        fs::create_dir_all(&lib).unwrap();
        if let Some(pc) = pc {
            fs::write(lib.join(format!("{package}.pc")), pc).unwrap();
        }
    }

    fn workspace_with_two_packages() -> TempDir {
        let dir = tempdir().unwrap();
        install(
            dir.path(),
            "liba",
            Some("\nName: liba\nCflags: -I/a -DSHARED\nLibs: -L/a -la\n"),
        );
        install(
            dir.path(),
            "libb",
            Some("\nName: libb\nCflags: -I/b -DSHARED\nLibs: -L/b -lb\n"),
        );
        dir
    }

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flags_merges_packages() {
        let dir = workspace_with_two_packages();
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        flags(&config, &args(&["--cflags", "--libs", "liba", "libb", "liba"]), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-I/a -DSHARED -I/b -L/a -la -L/b -lb\n"
        );
    }

    #[test]
    fn test_flags_without_selector_is_empty() {
        let dir = workspace_with_two_packages();
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        let err = flags(&config, &args(&["liba"]), &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyConfig)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_flags_unknown_package_reports_every_strategy() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        let err = flags(&config, &args(&["--libs", "libnope"]), &mut out).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("error $GOPATH: "), "{msg}");
        assert!(msg.contains("error github.com: "), "{msg}");
        assert!(msg.contains("error $PKG_CONFIG_PATH: "), "{msg}");
    }

    #[test]
    fn test_flags_no_packages() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        let err = flags(&config, &args(&["--libs"]), &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoPackages)));
    }

    #[test]
    fn test_generate_prints_descriptor() {
        let dir = tempdir().unwrap();
        install(dir.path(), "libpng", None);
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        generate(&config, "libpng", &mut out).unwrap();

        let lib = dir.path().join("lib/linux_amd64/libpng");
        let include = dir.path().join("include/libpng");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "\nName: libpng\nLibs: -L{} -lpng -Wl,-rpath -Wl,$ORIGIN\nCflags: -I{}\n",
                lib.display(),
                include.display()
            )
        );
    }

    #[test]
    fn test_get_installs_archive() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<()> = FileOptions::default();
        zip.start_file("include/libz/zlib.h", options).unwrap();
        zip.write_all(b"/* zlib */").unwrap();
        zip.start_file("lib/linux_amd64/libz/libz.pc", options).unwrap();
        zip.write_all(b"\nName: libz\nLibs: -lz\n").unwrap();
        let body = zip.finish().unwrap().into_inner();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/madler/zlib/releases/download/pkg-config/libz.zip")
            .with_status(200)
            .with_body(body)
            .create();

        let dir = tempdir().unwrap();
        let config = config(dir.path(), Some(server.url()));
        let mut out = Vec::new();

        get(&config, "github.com/madler/zlib", "libz", &mut out).unwrap();

        mock.assert();
        let pc = dir.path().join("lib/linux_amd64/libz/libz.pc");
        assert!(pc.is_file());
        assert!(dir.path().join("include/libz/zlib.h").is_file());
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", pc.display()));
    }

    #[test]
    fn test_get_invalid_project() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), None);
        let mut out = Vec::new();

        let err = get(&config, "madler/zlib", "libz", &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidProject(_))));
    }
}
