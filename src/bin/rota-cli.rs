#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rota::{
    config::{load_config, RosterConfig},
    io::{self, RosterDocument},
    model::{Assignment, DaySlot, RosterGrid, RosterParameters, DAYS_PER_WEEK},
    pattern::{export_patterns_json, load_patterns_from_file, PatternTable, WorkPattern},
    scheduler::{ConflictKind, RuleOptions},
    warnings::{prepare_warnings, TextWarnings},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings par quarts
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`, filtre via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un planning
    Generate {
        /// Fichier JSON de configuration (remplace les options ci-dessous)
        #[arg(long)]
        config: Option<String>,
        /// Table de motifs JSON
        #[arg(long)]
        patterns: Option<String>,
        #[arg(long)]
        workers: Option<u32>,
        #[arg(long)]
        shifts: Option<u32>,
        #[arg(long, default_value_t = 8)]
        hours: u32,
        #[arg(long)]
        min_per_shift: Option<u32>,
        #[arg(long, default_value_t = 4)]
        weeks: u32,
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Jours travaillés par semaine, ex. "6,5,5,5"
        #[arg(long)]
        pattern: Option<WorkPattern>,
        #[arg(long, default_value_t = 2)]
        max_consecutive_sundays: u32,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Date du premier lundi (YYYY-MM-DD) pour les en-têtes CSV
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        report_csv: Option<String>,
        /// N'affiche pas la grille
        #[arg(long)]
        quiet: bool,
    },

    /// Contrôler un planning exporté en JSON
    Check {
        #[arg(long)]
        roster: String,
    },

    /// Afficher la table des motifs
    Patterns {
        #[arg(long)]
        patterns: Option<String>,
        /// Motif effectif pour une durée de quart
        #[arg(long)]
        hours: Option<u32>,
        #[arg(long, default_value_t = 4)]
        weeks: u32,
        /// Exporter la table en JSON
        #[arg(long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            config,
            patterns,
            workers,
            shifts,
            hours,
            min_per_shift,
            weeks,
            days,
            pattern,
            max_consecutive_sundays,
            out_json,
            out_csv,
            start_date,
            report_csv,
            quiet,
        } => {
            let mut config = match config {
                Some(path) => load_config(path)?,
                None => {
                    let (Some(workers), Some(shifts), Some(min)) = (workers, shifts, min_per_shift)
                    else {
                        bail!("--workers, --shifts and --min-per-shift are required without --config");
                    };
                    let mut params = RosterParameters::new(workers, shifts, hours, min, weeks, days);
                    params.work_pattern = pattern;
                    let mut config = RosterConfig::new(params);
                    config.rules = Some(RuleOptions {
                        max_consecutive_sundays,
                    });
                    config
                }
            };
            if let Some(path) = patterns {
                config.patterns = Some(load_patterns_from_file(path)?);
            }

            let builder = config.builder();
            let (grid, report) = builder.build(&config.parameters)?;

            if !quiet {
                print_grid(&grid);
            }
            for line in prepare_warnings(&grid, &report, &TextWarnings) {
                eprintln!("warning: {line}");
            }

            if let Some(path) = out_csv {
                io::export_grid_csv(path, &grid, start_date)?;
            }
            if let Some(path) = report_csv {
                io::export_report_csv(path, &grid, &report)?;
            }
            let incomplete = !report.is_empty();
            if let Some(path) = out_json {
                let doc = RosterDocument::new(
                    config.parameters.clone(),
                    builder.rules(),
                    grid,
                    report,
                    Utc::now(),
                );
                io::export_roster_json(&path, &doc)
                    .with_context(|| format!("writing roster {path}"))?;
            }

            // Code 2 = WARNING/INCOMPLETE
            if incomplete {
                2
            } else {
                0
            }
        }
        Commands::Check { roster } => {
            let doc = io::load_roster_json(&roster)?;
            let conflicts = rota::audit(
                &doc.grid,
                doc.parameters.min_operators_per_shift,
                doc.rules,
            );
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    let who = c.worker.as_ref().map(|w| w.as_str()).unwrap_or("-");
                    let what = match &c.kind {
                        ConflictKind::WeeklyShiftMismatch { expected, found } => {
                            format!("works shift {found}, week shift is {expected}")
                        }
                        ConflictKind::SundayCapExceeded { run } => {
                            format!("{run} consecutive Sundays worked")
                        }
                        ConflictKind::Undercovered { shift, shortfall } => {
                            format!("shift {shift} short by {shortfall}")
                        }
                        ConflictKind::WorkOutsideCoveredDays => "works an uncovered day".to_string(),
                    };
                    eprintln!("{who} | {} | {what}", c.slot);
                }
                2
            }
        }
        Commands::Patterns {
            patterns,
            hours,
            weeks,
            out,
        } => {
            let table = match patterns {
                Some(path) => load_patterns_from_file(path)?,
                None => PatternTable::default(),
            };
            match hours {
                Some(h) => println!("{h}h: {}", table.pattern_for(h, weeks)),
                None => {
                    println!("average: {}h/week", table.average_weekly_hours);
                    for (h, p) in &table.patterns {
                        println!("{h}h: {p}");
                    }
                }
            }
            if let Some(path) = out {
                export_patterns_json(path, &table)?;
            }
            0
        }
    };

    std::process::exit(code);
}

/// Impression compacte : une ligne par opérateur, un bloc par semaine.
fn print_grid(grid: &RosterGrid) {
    for worker in grid.workers() {
        let weeks: Vec<String> = (0..grid.weeks())
            .map(|week| {
                (0..DAYS_PER_WEEK)
                    .map(|day| match grid.get(worker.index, DaySlot::new(week, day)) {
                        Assignment::Working(s) => s.to_string(),
                        Assignment::Resting => "-".to_string(),
                    })
                    .collect()
            })
            .collect();
        println!("{:<6} [{}] {}", worker.id, worker.base_shift, weeks.join(" | "));
    }
}
