use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "bootcfg",
    bin_name = "bootcfg",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Inspect and edit bootcfg groups, profiles and templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (groups and data path)
    #[arg(short, long, global = true, default_value = "bootcfg.toml")]
    pub config: PathBuf,

    /// Data directory; overrides the config file and BOOTCFG_DATA_PATH
    #[arg(short, long, global = true)]
    pub data_path: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Machine groups from the configuration file
    #[command(subcommand)]
    Group(GroupCommand),

    /// Boot profiles under profiles/
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Ignition templates under ignition/
    #[command(subcommand)]
    Ignition(TemplateCommand),

    /// Cloud-config templates under cloud/
    #[command(subcommand)]
    Cloud(TemplateCommand),
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// List all groups
    List,
    /// Show one group
    Get { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List all loadable profiles
    List,
    /// Show one profile
    Get { id: String },
    /// Store a profile from a JSON file ("-" reads stdin)
    Put { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Print a template verbatim
    Get { name: String },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_profile_get() {
        let cli = Cli::try_parse_from(["bootcfg", "profile", "get", "etcd"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("bootcfg.toml"));
        match cli.command {
            Commands::Profile(ProfileCommand::Get { id }) => assert_eq!(id, "etcd"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bootcfg",
            "cloud",
            "get",
            "etcd.yaml",
            "--data-path",
            "/srv/data",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_path, Some(PathBuf::from("/srv/data")));
        assert!(matches!(
            cli.command,
            Commands::Cloud(TemplateCommand::Get { ref name }) if name == "etcd.yaml"
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["bootcfg"]).is_err());
        assert!(Cli::try_parse_from(["bootcfg", "group"]).is_err());
    }
}
