//! folio CLI - render portfolio documents to HTML pages

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use folio::build::{self, BuildOptions, BuildReport};
use folio::{
    AssembleOptions, EscapePolicy, JsonFormat, RenderOptions, Section, UnknownTypePolicy,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Render structured portfolio documents to HTML pages", long_about = None)]
struct Cli {
    /// Directory of JSON documents
    #[arg(value_name = "INPUT", env = "FOLIO_INPUT")]
    input: Option<PathBuf>,

    /// Output root; each document is written to <OUTPUT>/<id>/index.html
    #[arg(value_name = "OUTPUT", env = "FOLIO_OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every document of a directory into pages
    Build {
        /// Directory of JSON documents
        #[arg(value_name = "INPUT", env = "FOLIO_INPUT")]
        input: PathBuf,

        /// Output root
        #[arg(value_name = "OUTPUT", env = "FOLIO_OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        #[command(flatten)]
        page: PageArgs,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Render a single document
    Render {
        /// Input JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a full page instead of the content fragment
        #[arg(long)]
        page: bool,

        #[command(flatten)]
        render: RenderArgs,

        #[command(flatten)]
        page_args: PageArgs,
    },

    /// Print the parsed document model as JSON
    Inspect {
        /// Input JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Load and render every document without writing anything
    Check {
        /// Directory of JSON documents
        #[arg(value_name = "INPUT", env = "FOLIO_INPUT")]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone, Copy)]
struct RenderArgs {
    /// Handling of block and inline types without a rendering rule
    #[arg(long, value_enum, default_value = "skip")]
    unknown: UnknownMode,

    /// HTML-escape author text instead of embedding it verbatim
    #[arg(long)]
    escape: bool,
}

impl RenderArgs {
    fn options(self) -> RenderOptions {
        let escape = if self.escape {
            EscapePolicy::Escape
        } else {
            EscapePolicy::Trusted
        };
        RenderOptions::new()
            .with_escape(escape)
            .with_unknown_types(self.unknown.into())
    }
}

#[derive(clap::Args, Clone)]
struct PageArgs {
    /// Logo path passed to the header partial
    #[arg(long, value_name = "PATH")]
    logo: Option<String>,

    /// Partials directory, relative to the written page
    #[arg(long, value_name = "DIR")]
    partials: Option<String>,

    /// Navigation section marked active
    #[arg(long, value_enum, default_value = "work")]
    active: ActiveSection,
}

impl PageArgs {
    fn options(self) -> AssembleOptions {
        let mut options = AssembleOptions::new().with_active_section(self.active.into());
        if let Some(logo) = self.logo {
            options = options.with_logo(logo);
        }
        if let Some(partials) = self.partials {
            options = options.with_partials_dir(partials);
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum UnknownMode {
    /// Emit nothing
    Skip,
    /// Emit nothing and log a warning
    Warn,
    /// Fail the document
    Reject,
}

impl From<UnknownMode> for UnknownTypePolicy {
    fn from(mode: UnknownMode) -> Self {
        match mode {
            UnknownMode::Skip => UnknownTypePolicy::Skip,
            UnknownMode::Warn => UnknownTypePolicy::Warn,
            UnknownMode::Reject => UnknownTypePolicy::Reject,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ActiveSection {
    /// Project pages
    Work,
    /// About pages
    About,
}

impl From<ActiveSection> for Section {
    fn from(section: ActiveSection) -> Self {
        match section {
            ActiveSection::Work => Section::Work,
            ActiveSection::About => Section::About,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            render,
            page,
            sequential,
        }) => {
            let options = BuildOptions::new()
                .with_render_options(render.options())
                .with_assemble_options(page.options())
                .with_parallel(!sequential);
            cmd_build(&input, &output, &options)
        }
        Some(Commands::Render {
            input,
            output,
            page,
            render,
            page_args,
        }) => {
            let options = BuildOptions::new()
                .with_render_options(render.options())
                .with_assemble_options(page_args.options());
            cmd_render(&input, output.as_deref(), page, &options)
        }
        Some(Commands::Inspect { input, compact }) => cmd_inspect(&input, compact),
        Some(Commands::Check { input, render }) => {
            let options = BuildOptions::new().with_render_options(render.options());
            cmd_check(&input, &options)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: build if both directories are provided
            match (cli.input, cli.output) {
                (Some(input), Some(output)) => {
                    cmd_build(&input, &output, &BuildOptions::default())
                }
                _ => {
                    println!("{}", "Usage: folio <INPUT> <OUTPUT>".yellow());
                    println!("       folio --help for more information");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_build(
    input: &Path,
    output: &Path,
    options: &BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = folio::discover(input)?;
    log::debug!("Found {} documents in {}", sources.len(), input.display());
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering...");

    let report = build::build_sources(sources, Some(output), options, |outcome| {
        pb.set_message(outcome.source.id.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    print_report(&report, true);
    finish(&report)
}

fn cmd_check(input: &Path, options: &BuildOptions) -> Result<(), Box<dyn std::error::Error>> {
    let report = build::check_dir(input, options)?;
    print_report(&report, false);
    finish(&report)
}

fn print_report(report: &BuildReport, wrote: bool) {
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(page) => {
                let target = page
                    .output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "ok".to_string());
                println!("  {} {} {}", "├─".dimmed(), page.id, target.dimmed());
            }
            Err(e) => {
                println!("  {} {} {}", "├─".dimmed(), outcome.source.id.red(), e);
            }
        }
    }

    let stats = report.stats();
    let built = report.succeeded().count();
    let verb = if wrote { "written" } else { "checked" };
    println!(
        "\n{} {} of {} pages {}",
        "Done!".green().bold(),
        built,
        report.len(),
        verb
    );
    if !stats.skipped.is_empty() {
        let mut kinds = stats.skipped.clone();
        kinds.sort();
        kinds.dedup();
        println!("{}: {}", "Skipped types".yellow(), kinds.join(", "));
    }
}

fn finish(report: &BuildReport) -> Result<(), Box<dyn std::error::Error>> {
    if report.is_success() {
        Ok(())
    } else {
        let failed = report.len() - report.succeeded().count();
        Err(format!("{} of {} documents failed", failed, report.len()).into())
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    page: bool,
    options: &BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = folio::load_file(input)?;

    let html = if page {
        build::render_page(&doc, options)?.0
    } else {
        folio::render::to_html(&doc, &options.render)?
    };

    if let Some(path) = output {
        fs::write(path, &html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", html);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = folio::to_json(input, format)?;
    println!("{}", json);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "folio".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Portfolio document renderer");
    println!();
    println!("License: MIT");
}
