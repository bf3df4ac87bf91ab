//! Workspace layout: candidate roots, per-package directory pairs and the
//! hosting project inferred from the working directory.
//!
//! A workspace root holds headers under `include/<pkg>` and libraries (plus
//! their `.pc` file) under `lib/<os>_<arch>/<pkg>`.

use std::env;
use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};
use crate::package::Variables;
use crate::platform::Platform;
use crate::runtime::Runtime;

/// Release tag under which prebuilt archives are published.
pub const RELEASE_TAG: &str = "pkg-config";

/// Host whose projects are inferred from the working directory.
pub const DEFAULT_HOST: &str = "github.com";

/// A hosting project, `host/owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectId {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl ProjectId {
    /// Download URL of the archive for `package`.
    ///
    /// `base` replaces the `http://<host>` part, e.g. for a mirror.
    pub fn archive_url(&self, base: Option<&str>, package: &str) -> String {
        let base = match base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("http://{}", self.host),
        };
        format!(
            "{}/{}/{}/releases/download/{}/{}.zip",
            base, self.owner, self.repo, RELEASE_TAG, package
        )
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.repo)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(Error::InvalidProject(s.to_string()));
        }
        Ok(ProjectId {
            host: parts[0].to_string(),
            owner: parts[1].to_string(),
            repo: parts[2].to_string(),
        })
    }
}

/// Directories searched by the workspace lookup, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    roots: Vec<PathBuf>,
    install_root: Option<PathBuf>,
    project: Option<ProjectId>,
    platform: Platform,
}

impl Workspace {
    /// A workspace over explicit roots. The first root receives fetched archives.
    pub fn new(roots: Vec<PathBuf>, platform: Platform) -> Self {
        let install_root = roots.first().cloned();
        Self {
            roots: dedup(roots),
            install_root,
            project: None,
            platform,
        }
    }

    pub fn with_project(mut self, project: Option<ProjectId>) -> Self {
        self.project = project;
        self
    }

    /// Build the workspace from `GOPATH` and the current directory.
    ///
    /// `GOPATH` defaults to `<home>/go`. When the current directory lies
    /// under a `src` directory, the path before it is searched first and the
    /// path after it may name the hosting project.
    #[tracing::instrument(skip(runtime))]
    pub fn detect<R: Runtime + ?Sized>(runtime: &R) -> Self {
        let configured: Vec<PathBuf> = match runtime.env_var("GOPATH") {
            Ok(value) if !value.is_empty() => env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            _ => runtime
                .home_dir()
                .map(|home| vec![home.join("go")])
                .unwrap_or_default(),
        };
        let install_root = configured.first().cloned();

        let cwd = runtime.current_dir().ok();
        let cwd = cwd.as_deref().and_then(Path::to_str);
        let inferred = cwd.and_then(|p| extract_root(p, MAIN_SEPARATOR));
        let project = cwd.and_then(|p| extract_project(p, MAIN_SEPARATOR));

        let roots = dedup(inferred.map(PathBuf::from).into_iter().chain(configured).collect());
        debug!("workspace roots: {:?}, project: {:?}", roots, project);

        Self {
            roots,
            install_root,
            project,
            platform: Platform::detect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Root that fetched archives are extracted into.
    pub fn install_root(&self) -> Result<&Path> {
        self.install_root.as_deref().ok_or(Error::NoWorkspace)
    }

    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Header and library directories of `package` under `root`.
    pub fn library_dirs(&self, root: &Path, package: &str) -> (PathBuf, PathBuf) {
        let include = root.join("include").join(package);
        let lib = root
            .join("lib")
            .join(self.platform.triple())
            .join(package);
        (include, lib)
    }

    /// Variables predefined for `.pc` files found under `root`.
    pub fn variables(&self, root: &Path) -> Variables {
        let gopath = root.to_string_lossy().replace('\\', "/");
        [
            ("GOPATH", gopath),
            ("GOOS", self.platform.os.clone()),
            ("GOARCH", self.platform.arch.clone()),
        ]
        .into_iter()
        .collect()
    }
}

fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = Vec::with_capacity(paths.len());
    for path in paths {
        if !seen.contains(&path) {
            seen.push(path);
        }
    }
    seen
}

fn src_marker(sep: char) -> String {
    format!("{sep}src{sep}")
}

/// Workspace root containing `path`: everything before the first `src` component.
pub fn extract_root(path: &str, sep: char) -> Option<&str> {
    let n = path.find(&src_marker(sep))?;
    if n == 0 {
        return None;
    }
    Some(&path[..n])
}

/// Hosting project named by the three components after the last `src`
/// component of `path`. Only projects on [`DEFAULT_HOST`] are recognised.
pub fn extract_project(path: &str, sep: char) -> Option<ProjectId> {
    let marker = src_marker(sep);
    let n = path.rfind(&marker)?;
    let mut parts = path[n + marker.len()..].split(sep);
    let (host, owner, repo) = (parts.next()?, parts.next()?, parts.next()?);
    if host != DEFAULT_HOST || owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(ProjectId {
        host: host.to_string(),
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn project(s: &str) -> Option<ProjectId> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_extract_project() {
        let cases: &[(&str, &str, Option<ProjectId>)] = &[
            (
                "/home/rjeczalik/workspace/src/github.com/libgit2/git2go",
                r"C:\Users\rjeczalik\My Workspace\src\github.com\libgit2\git2go",
                project("github.com/libgit2/git2go"),
            ),
            (
                "/Users/rjeczalik/src/github.com/rjeczalik/fakerpc/cmd/fakerpc",
                r"C:\Documents and Settings\src\github.com\rjeczalik\fakerpc\cmd\fakerpc",
                project("github.com/rjeczalik/fakerpc"),
            ),
            (
                "~/src/github.com/rjeczalik/crontz/cmd/crontz",
                r"%userprofile%\src\github.com\rjeczalik\crontz\cmd\crontz",
                project("github.com/rjeczalik/crontz"),
            ),
            (
                "~/src/github.com/gocircuit/circuit/src/github.com/codegangsta/cli",
                r"%userprofile%\src\github.com\gocircuit\circuit\src\github.com\codegangsta\cli",
                project("github.com/codegangsta/cli"),
            ),
            (
                "/Users/rjeczalik/src/bitbucket.org/rjeczalik/benchnosql",
                r"C:\Users\rjeczalik\src\bitbucker.org\rjeczalik\benchnosql",
                None,
            ),
            (
                "./src/codeplex.com/rjeczalik/casablanca",
                r".\src\codeplex.com\rjeczalik\casablanca",
                None,
            ),
            ("/home/user/src/github.com/owner", r"C:\src\github.com\owner", None),
            ("/home/user/project", r"C:\project", None),
        ];
        for (i, (unix, windows, expected)) in cases.iter().enumerate() {
            assert_eq!(&extract_project(unix, '/'), expected, "case {i} (/)");
            assert_eq!(&extract_project(windows, '\\'), expected, "case {i} (\\)");
        }
    }

    #[test]
    fn test_extract_root() {
        assert_eq!(
            extract_root("/home/user/go/src/github.com/a/b", '/'),
            Some("/home/user/go")
        );
        assert_eq!(
            extract_root("/ws/src/github.com/a/b/src/github.com/c/d", '/'),
            Some("/ws")
        );
        assert_eq!(extract_root(r"C:\go\src\github.com\a\b", '\\'), Some(r"C:\go"));
        assert_eq!(extract_root("/home/user/project", '/'), None);
        assert_eq!(extract_root("/src/github.com/a/b", '/'), None);
    }

    #[test]
    fn test_project_id_parse() {
        let id: ProjectId = "github.com/joe/png-wrapper".parse().unwrap();
        assert_eq!(id.host, "github.com");
        assert_eq!(id.owner, "joe");
        assert_eq!(id.repo, "png-wrapper");
        assert_eq!(id.to_string(), "github.com/joe/png-wrapper");

        for invalid in ["", "joe/png-wrapper", "github.com//x", "a/b/c/d", "/a/b"] {
            assert!(
                matches!(invalid.parse::<ProjectId>(), Err(Error::InvalidProject(_))),
                "{invalid:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_archive_url() {
        let id: ProjectId = "github.com/joe/png-wrapper".parse().unwrap();
        assert_eq!(
            id.archive_url(None, "libpng"),
            "http://github.com/joe/png-wrapper/releases/download/pkg-config/libpng.zip"
        );
        assert_eq!(
            id.archive_url(Some("http://127.0.0.1:1234/"), "libpng"),
            "http://127.0.0.1:1234/joe/png-wrapper/releases/download/pkg-config/libpng.zip"
        );
    }

    #[test]
    fn test_library_dirs_and_variables() {
        let root = PathBuf::from("ws");
        let ws = Workspace::new(vec![root.clone()], Platform::new("linux", "amd64"));
        let (include, lib) = ws.library_dirs(&root, "libgit2");
        assert_eq!(include, root.join("include").join("libgit2"));
        assert_eq!(
            lib,
            root.join("lib").join("linux_amd64").join("libgit2")
        );

        let vars = ws.variables(Path::new(r"C:\Users\joe\go"));
        assert_eq!(vars.get("GOPATH"), Some(&b"C:/Users/joe/go"[..]));
        assert_eq!(vars.get("GOOS"), Some(&b"linux"[..]));
        assert_eq!(vars.get("GOARCH"), Some(&b"amd64"[..]));
    }

    #[test]
    fn test_new_dedups_and_keeps_install_root() {
        let ws = Workspace::new(
            vec!["a".into(), "b".into(), "a".into()],
            Platform::new("linux", "amd64"),
        );
        assert_eq!(ws.roots(), &[PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(ws.install_root().unwrap(), Path::new("a"));

        let empty = Workspace::new(vec![], Platform::new("linux", "amd64"));
        assert!(matches!(empty.install_root(), Err(Error::NoWorkspace)));
    }

    #[cfg(unix)]
    #[test]
    fn test_detect_prepends_root_from_current_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("GOPATH"))
            .returning(|_| Ok("/opt/go:/ws".to_string()));
        runtime
            .expect_current_dir()
            .returning(|| Ok(PathBuf::from("/ws/src/github.com/joe/png-wrapper/cmd")));
        runtime.expect_home_dir().never();

        let ws = Workspace::detect(&runtime);
        assert_eq!(
            ws.roots(),
            &[PathBuf::from("/ws"), PathBuf::from("/opt/go")]
        );
        assert_eq!(ws.install_root().unwrap(), Path::new("/opt/go"));
        assert_eq!(ws.project(), project("github.com/joe/png-wrapper").as_ref());
    }

    #[cfg(unix)]
    #[test]
    fn test_detect_defaults_to_home_go() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq("GOPATH"))
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_home_dir()
            .returning(|| Some(PathBuf::from("/home/user")));
        runtime
            .expect_current_dir()
            .returning(|| Ok(PathBuf::from("/home/user/project")));

        let ws = Workspace::detect(&runtime);
        assert_eq!(ws.roots(), &[PathBuf::from("/home/user/go")]);
        assert_eq!(ws.install_root().unwrap(), Path::new("/home/user/go"));
        assert_eq!(ws.project(), None);
    }

    #[test]
    fn test_detect_without_home_or_gopath() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Ok(String::new()));
        runtime.expect_home_dir().returning(|| None);
        runtime
            .expect_current_dir()
            .returning(|| Err(std::io::Error::other("gone")));

        let ws = Workspace::detect(&runtime);
        assert!(ws.roots().is_empty());
        assert!(matches!(ws.install_root(), Err(Error::NoWorkspace)));
    }
}
