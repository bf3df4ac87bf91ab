use anyhow::Result;
use clap::Parser;
use pcfind::commands::{self, config::Config};
use std::io;

/// pkg-config - workspace-aware pkg-config replacement
///
/// Looks up a package's .pc file in the workspace ($GOPATH), in the release
/// archives of the current github.com project, and finally in $PKG_CONFIG_PATH.
///
/// Examples:
///   pkg-config --cflags --libs libpng       # Print compiler and linker flags
///   pkg-config get github.com/joe/png libpng # Install libpng from a release
///   pkg-config generate libpng               # Print a .pc file for libpng
#[derive(Parser, Debug)]
#[command(
    author,
    version = env!("PCFIND_VERSION"),
    about,
    arg_required_else_help = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// --cflags, --libs and package names; other flags are ignored
    #[arg(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Download and install a package from a project's "pkg-config" release
    Get(GetArgs),

    /// Print a .pc file for a package installed without one
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// The project in the format "github.com/user/project"
    #[arg(value_name = "HOST/USER/PROJ")]
    pub project: String,

    /// The package to install
    #[arg(value_name = "PKG")]
    pub package: String,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// The package to describe
    #[arg(value_name = "PKG")]
    pub package: String,
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(pcfind::runtime::RealRuntime)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Some(Commands::Get(args)) => {
            commands::get(&config, &args.project, &args.package, &mut stdout)
        }
        Some(Commands::Generate(args)) => commands::generate(&config, &args.package, &mut stdout),
        None => commands::flags(&config, &cli.args, &mut stdout),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_flags_parsing() {
        let cli = Cli::try_parse_from(["pkg-config", "--cflags", "--libs", "libpng"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.args, vec!["--cflags", "--libs", "libpng"]);
    }

    #[test]
    fn test_cli_unknown_flags_are_kept() {
        let cli = Cli::try_parse_from([
            "pkg-config",
            "--libs.private",
            "-XD",
            "liba",
            "--libs",
            "libb",
        ])
        .unwrap();
        assert_eq!(cli.args, vec!["--libs.private", "-XD", "liba", "--libs", "libb"]);
    }

    #[test]
    fn test_cli_get_parsing() {
        let cli =
            Cli::try_parse_from(["pkg-config", "get", "github.com/joe/png", "libpng"]).unwrap();
        match cli.command {
            Some(Commands::Get(args)) => {
                assert_eq!(args.project, "github.com/joe/png");
                assert_eq!(args.package, "libpng");
            }
            _ => panic!("Expected Get command"),
        }
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_cli_get_requires_package() {
        let result = Cli::try_parse_from(["pkg-config", "get", "github.com/joe/png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_generate_parsing() {
        let cli = Cli::try_parse_from(["pkg-config", "generate", "libpng"]).unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => assert_eq!(args.package, "libpng"),
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_no_arguments_fails() {
        let result = Cli::try_parse_from(["pkg-config"]);
        assert!(result.is_err());
    }
}
