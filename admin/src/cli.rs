use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::theme::color::hex_to_rgb;
use crate::theme::validation::HexColorValidator;
use crate::theme::{
    DerivedPalette, StylesheetFilePublisher, ThemeManager, ThemeMode, ThemeSnapshot,
    attach_publisher, render_stylesheet,
};
use crate::universe::Universe;
use crate::validation::Validator;
use catalog::{CascadeDriver, HttpTaxonomySource, Level, NodeId, TaxonomyNode, TaxonomySource};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "morjodi-admin",
    about = "Theme and taxonomy tooling for the MorJodi admin dashboard",
    version
)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of configuration.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and change the dashboard theme.
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Query religion, caste, sub-caste and gotra options.
    #[command(subcommand)]
    Taxonomy(TaxonomyCommand),
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Show the stored mode, the displayed mode and the derived palette.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Derive a palette for a color without storing it.
    Derive { hex: String },
    /// Store a new accent color.
    SetAccent { hex: String },
    /// Store a mode: light, dark or system.
    SetMode { mode: ThemeMode },
    /// Switch to the opposite of the displayed mode.
    Toggle,
    /// Print the root stylesheet.
    Css,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Universe file with `religions`, `castes` and `subCastes` arrays.
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long = "religion")]
    pub religions: Vec<String>,

    #[arg(long = "caste")]
    pub castes: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum TaxonomyCommand {
    /// Castes selectable for the chosen religions.
    Castes(FilterArgs),
    /// Sub-castes selectable for the chosen castes or religions.
    #[command(name = "sub-castes")]
    SubCastes(FilterArgs),
    /// Walk the single-select chain over a universe file.
    Chain {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        religion: Option<String>,
        #[arg(long)]
        caste: Option<String>,
        #[arg(long = "sub-caste")]
        sub_caste: Option<String>,
    },
    /// Fetch one level from the configured backend.
    Fetch {
        level: Level,
        #[arg(long)]
        parent: Option<String>,
    },
}

pub async fn run(cli: Cli, config: &AppConfig, out: &mut impl Write) -> AppResult<()> {
    match cli.command {
        Commands::Theme(command) => {
            ThemeManager::init_global(config.theme())?;
            let manager = ThemeManager::global()?;

            // Kept alive for the whole command so every change is published.
            let _publisher = config
                .theme()
                .stylesheet_path()
                .map(|path| attach_publisher(manager, StylesheetFilePublisher::new(path)));

            run_theme(command, manager, out)
        }
        Commands::Taxonomy(command) => run_taxonomy(command, config, out).await,
    }
}

pub fn run_theme(
    command: ThemeCommand,
    manager: &ThemeManager,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        ThemeCommand::Show { json } => {
            let snapshot = manager.snapshot();
            if json {
                let encoded = serde_json::to_string_pretty(&snapshot)
                    .map_err(|e| AppError::Io(format!("Failed to encode theme: {e}")))?;
                writeln!(out, "{encoded}")?;
            } else {
                write_snapshot(out, &snapshot)?;
            }
        }
        ThemeCommand::Derive { hex } => {
            HexColorValidator.validate(&hex)?;
            write_palette(out, &DerivedPalette::from_accent(hex_to_rgb(&hex)))?;
        }
        ThemeCommand::SetAccent { hex } => {
            HexColorValidator.validate(&hex)?;
            let changed = manager.set_accent(&hex)?;
            report_change(out, changed, &manager.snapshot())?;
        }
        ThemeCommand::SetMode { mode } => {
            let changed = manager.set_mode(mode)?;
            report_change(out, changed, &manager.snapshot())?;
        }
        ThemeCommand::Toggle => {
            let mode = manager.toggle_mode()?;
            writeln!(out, "mode: {mode}")?;
        }
        ThemeCommand::Css => {
            write!(out, "{}", render_stylesheet(&manager.snapshot()))?;
        }
    }
    Ok(())
}

pub async fn run_taxonomy(
    command: TaxonomyCommand,
    config: &AppConfig,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        TaxonomyCommand::Castes(args) => {
            let prefs = preferences_for(&args)?;
            write_nodes(out, &prefs.filtered_castes())
        }
        TaxonomyCommand::SubCastes(args) => {
            let prefs = preferences_for(&args)?;
            write_nodes(out, &prefs.filtered_sub_castes())
        }
        TaxonomyCommand::Chain {
            file,
            religion,
            caste,
            sub_caste,
        } => {
            let source = Universe::load(&file)?.into_source();
            let mut driver = CascadeDriver::new(source);
            driver.load_religions().await?;

            let picks = [
                (Level::Religion, religion),
                (Level::Caste, caste),
                (Level::SubCaste, sub_caste),
            ];
            for (level, pick) in picks {
                let Some(pick) = pick else { break };
                driver.select(level, Some(NodeId::new(pick))).await?;
            }

            for level in Level::ALL {
                let cascade = driver.cascade();
                let selected = cascade
                    .selected(level)
                    .map(NodeId::to_string)
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{level}: selected {selected}, {} options",
                    cascade.options(level).len()
                )?;
            }
            Ok(())
        }
        TaxonomyCommand::Fetch { level, parent } => {
            let api = config.api();
            let base_url = api.base_url().ok_or_else(|| {
                AppError::Config(
                    "No API base URL configured. Set base_url in the [api] section or API__BASE_URL."
                        .to_string(),
                )
            })?;

            let source =
                HttpTaxonomySource::new(base_url, api.token().map(String::from), api.timeout())?;
            let nodes = match parent {
                Some(parent) => source.fetch_children(level, &NodeId::new(parent)).await?,
                None => source.fetch_all(level).await?,
            };
            write_nodes(out, &nodes)
        }
    }
}

fn preferences_for(args: &FilterArgs) -> AppResult<catalog::PartnerPreferences> {
    let mut prefs = Universe::load(&args.file)?.into_preferences();
    prefs.set_religions(args.religions.iter().map(NodeId::new));

    let dropped = prefs.set_castes(args.castes.iter().map(NodeId::new));
    for id in &dropped.castes {
        log::warn!("Ignoring caste '{id}': not available for the selected religions");
    }
    Ok(prefs)
}

fn write_nodes(out: &mut impl Write, nodes: &[TaxonomyNode]) -> AppResult<()> {
    for node in nodes {
        match &node.parent_id {
            Some(parent) => writeln!(out, "{}\t{}\t(parent {parent})", node.id, node.name)?,
            None => writeln!(out, "{}\t{}", node.id, node.name)?,
        }
    }
    Ok(())
}

fn write_palette(out: &mut impl Write, palette: &DerivedPalette) -> AppResult<()> {
    for (name, value) in palette.style_variables() {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}

fn write_snapshot(out: &mut impl Write, snapshot: &ThemeSnapshot) -> AppResult<()> {
    writeln!(out, "mode: {}", snapshot.state.mode)?;
    writeln!(out, "displayed: {}", snapshot.resolved)?;
    writeln!(out, "accent: {}", snapshot.state.accent)?;
    write_palette(out, &snapshot.palette)
}

fn report_change(out: &mut impl Write, changed: bool, snapshot: &ThemeSnapshot) -> AppResult<()> {
    if !changed {
        writeln!(out, "unchanged")?;
    }
    write_snapshot(out, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{MemoryThemeStorage, ThemeState};
    use claims::*;
    use std::fs;

    const UNIVERSE: &str = r#"{
        "religions": [{"id": "r1", "name": "Hindu"}, {"id": "r2", "name": "Sikh"}],
        "castes": [
            {"id": "c1", "name": "Maratha", "religionId": "r1"},
            {"id": "c2", "name": "Jat", "religion": {"_id": "r2"}}
        ],
        "subCastes": [
            {"id": "s1", "name": "Deshmukh", "casteId": "c1"},
            {"id": "s2", "name": "Dhillon", "caste": {"id": "c2"}}
        ]
    }"#;

    fn universe_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("universe.json");
        fs::write(&path, UNIVERSE).unwrap();
        (dir, path)
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_cli_parses_theme_commands() {
        let cli = assert_ok!(Cli::try_parse_from(["morjodi-admin", "theme", "set-mode", "dark"]));
        assert!(matches!(
            cli.command,
            Commands::Theme(ThemeCommand::SetMode {
                mode: ThemeMode::Dark
            })
        ));

        assert_err!(Cli::try_parse_from(["morjodi-admin", "theme", "set-mode", "sepia"]));
    }

    #[test]
    fn test_set_accent_rejects_malformed_input() {
        let storage = MemoryThemeStorage::new();
        let manager = ThemeManager::new(Box::new(storage.clone()), ThemeState::default());
        let mut out = Vec::new();

        let command = ThemeCommand::SetAccent {
            hex: "#12345".to_string(),
        };
        let result = run_theme(command, &manager, &mut out);

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(storage.writes().is_empty());
    }

    #[test]
    fn test_set_accent_prints_palette() {
        let manager = ThemeManager::new(Box::new(MemoryThemeStorage::new()), ThemeState::default());
        let mut out = Vec::new();

        let command = ThemeCommand::SetAccent {
            hex: "#2563eb".to_string(),
        };
        assert_ok!(run_theme(command, &manager, &mut out));

        let printed = output(out);
        assert!(printed.contains("accent: #2563eb"));
        assert!(printed.contains("--primary-light: #619fff"));
    }

    #[tokio::test]
    async fn test_castes_filtered_by_religion() {
        let (_dir, file) = universe_file();
        let mut out = Vec::new();

        let command = TaxonomyCommand::Castes(FilterArgs {
            file,
            religions: vec!["r2".to_string()],
            castes: Vec::new(),
        });
        assert_ok!(run_taxonomy(command, &AppConfig::default(), &mut out).await);

        assert_eq!(output(out), "c2\tJat\t(parent r2)\n");
    }

    #[tokio::test]
    async fn test_sub_castes_without_filters_lists_all() {
        let (_dir, file) = universe_file();
        let mut out = Vec::new();

        let command = TaxonomyCommand::SubCastes(FilterArgs {
            file,
            religions: Vec::new(),
            castes: Vec::new(),
        });
        assert_ok!(run_taxonomy(command, &AppConfig::default(), &mut out).await);

        assert_eq!(output(out).lines().count(), 2);
    }

    #[tokio::test]
    async fn test_chain_walks_selected_levels() {
        let (_dir, file) = universe_file();
        let mut out = Vec::new();

        let command = TaxonomyCommand::Chain {
            file,
            religion: Some("r1".to_string()),
            caste: Some("c1".to_string()),
            sub_caste: None,
        };
        assert_ok!(run_taxonomy(command, &AppConfig::default(), &mut out).await);

        let printed = output(out);
        assert!(printed.contains("religion: selected r1, 2 options"));
        assert!(printed.contains("caste: selected c1, 1 options"));
        assert!(printed.contains("sub-caste: selected -, 1 options"));
        assert!(printed.contains("gotra: selected -, 0 options"));
    }

    #[tokio::test]
    async fn test_fetch_requires_base_url() {
        let mut out = Vec::new();
        let command = TaxonomyCommand::Fetch {
            level: Level::Religion,
            parent: None,
        };

        let result = run_taxonomy(command, &AppConfig::default(), &mut out).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
