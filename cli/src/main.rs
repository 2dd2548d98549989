use clap::{Parser, Subcommand};
use gcdplan_cli::CliContext;
use gcdplan_cli::commands;
use gcdplan_cli::logging;
use gcdplan_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    logging::init();
    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok((output, quit)) => {
                writeln!(std::io::stdout(), "{}", output.trim_end()).map_err(|e| e.to_string())?;
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{}", err.trim_end()).map_err(|e| e.to_string())?;
            }
        }
        std::io::stdout().flush().map_err(|e| e.to_string())?;
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "GCD timeline planner")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the skill catalog
    Catalog,
    /// Place a skill on the timeline
    Add {
        #[arg(short, long, allow_negative_numbers = true)]
        time: f64,
        /// Skill id or name
        #[arg(short, long)]
        skill: String,
    },
    /// Remove an event by id
    Remove {
        #[arg(short, long)]
        id: u64,
    },
    /// Re-place an event at a new time
    Move {
        #[arg(short, long)]
        id: u64,
        #[arg(short, long, allow_negative_numbers = true)]
        time: f64,
    },
    /// Show every event with its diagnostics
    List,
    /// Skills usable at a time
    Available {
        #[arg(short, long, allow_negative_numbers = true)]
        time: f64,
        /// Query a copy of the catalog instead of the live one
        #[arg(long)]
        snapshot: bool,
    },
    Stats,
    SpellSpeed {
        #[arg(short, long)]
        value: u32,
    },
    TotalTime {
        #[arg(short, long)]
        value: f64,
    },
    Clear,
    Config,
    SaveConfig,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<(String, bool), String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "gcdplan".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let output = match &cli.command {
        Some(Commands::Catalog) => commands::show_catalog(ctx).await,
        Some(Commands::Add { time, skill }) => commands::add_event(ctx, *time, skill).await,
        Some(Commands::Remove { id }) => commands::remove_event(ctx, *id).await,
        Some(Commands::Move { id, time }) => commands::move_event(ctx, *id, *time).await,
        Some(Commands::List) => commands::list_events(ctx).await,
        Some(Commands::Available { time, snapshot }) => {
            commands::show_available(ctx, *time, *snapshot).await
        }
        Some(Commands::Stats) => commands::show_stats(ctx).await,
        Some(Commands::SpellSpeed { value }) => commands::set_spell_speed(ctx, *value).await,
        Some(Commands::TotalTime { value }) => commands::set_total_time(ctx, *value).await,
        Some(Commands::Clear) => commands::clear(ctx).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::SaveConfig) => commands::save_config(ctx).await,
        Some(Commands::Exit) => return commands::exit().map(|out| (out, true)),
        None => Ok(String::new()),
    }?;
    Ok((output, false))
}
