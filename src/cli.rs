use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    admin::AdminDashboard,
    catalog::Genre,
    commands::{self, Tab, View},
    db::{Member, Plan},
    timer::TimerState,
    AppState,
};

#[derive(Debug, Parser)]
#[command(name = "lovegrounds", version, about = "Love Grounds reading café")]
pub struct Cli {
    /// Where members and settings are kept
    #[arg(long, env = "LOVEGROUNDS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Subscribe a new member
    Subscribe {
        name: String,
        /// Bronze, Silver or Gold; defaults to the selected plan
        #[arg(long, value_parser = parse_plan_arg)]
        plan: Option<Plan>,
    },
    /// List members in sign-up order
    Members,
    /// Admin dashboard totals
    Stats,
    /// Books for a genre, or for the selected genre
    Recommend { genre: Option<String> },
    /// Remember the plan new subscriptions default to
    SelectPlan {
        #[arg(value_parser = parse_plan_arg)]
        plan: Plan,
    },
    /// Remember the genre used for recommendations
    SelectGenre {
        #[arg(value_parser = parse_genre_arg)]
        genre: Genre,
    },
    /// Interactive reading session driven from stdin
    Session,
}

fn parse_plan_arg(value: &str) -> Result<Plan, String> {
    value.parse().map_err(|err: anyhow::Error| err.to_string())
}

fn parse_genre_arg(value: &str) -> Result<Genre, String> {
    value.parse().map_err(|err: anyhow::Error| err.to_string())
}

pub async fn execute(cli: Cli) -> Result<()> {
    let state = open_state(&cli).await?;

    match cli.command {
        Command::Subscribe { name, plan } => {
            let member = commands::add_member(&state, &name, plan).await?;
            println!("Member added successfully: {}", format_member(&member));
        }
        Command::Members => {
            for member in commands::list_members(&state).await {
                println!("{}", format_member(&member));
            }
        }
        Command::Stats => print_dashboard(&commands::get_admin_dashboard(&state).await),
        Command::Recommend { genre } => {
            let titles = match genre {
                Some(genre) => commands::recommendations_for(&state, &genre),
                None => commands::get_recommendations(&state),
            };
            for title in titles {
                println!("{title}");
            }
        }
        Command::SelectPlan { plan } => {
            commands::select_plan(&state, plan)?;
            println!("New members default to the {plan} plan");
        }
        Command::SelectGenre { genre } => {
            for title in commands::select_genre(&state, genre)? {
                println!("{title}");
            }
        }
        Command::Session => run_session(&state).await?,
    }

    state.timer.shutdown().await;
    Ok(())
}

async fn open_state(cli: &Cli) -> Result<AppState> {
    if cli.in_memory {
        return Ok(AppState::in_memory());
    }

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => dirs_next::data_dir()
            .map(|dir| dir.join("lovegrounds"))
            .ok_or_else(|| anyhow!("no data directory available; pass --data-dir"))?,
    };

    AppState::open(&data_dir).await
}

const SESSION_HELP: &str = "commands: start | pause | reset | status | subscribe <name> | \
plan <plan> | genre <genre> | user | admin | quit";

async fn run_session(state: &AppState) -> Result<()> {
    println!("{SESSION_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "" => continue,
            "start" => print_timer(&commands::start_timer(state).await),
            "pause" => print_timer(&commands::pause_timer(state).await),
            "reset" => print_timer(&commands::reset_timer(state).await),
            "status" => print_timer(&commands::get_timer_state(state).await.state),
            "subscribe" => match commands::add_member(state, rest, None).await {
                Ok(member) => println!("Member added successfully: {}", format_member(&member)),
                Err(err) => println!("{err}"),
            },
            "plan" => match parse_plan_arg(rest) {
                Ok(plan) => {
                    commands::select_plan(state, plan)?;
                    println!("Plan: {plan}");
                }
                Err(err) => println!("{err}"),
            },
            "genre" => match parse_genre_arg(rest) {
                Ok(genre) => {
                    for title in commands::select_genre(state, genre)? {
                        println!("{title}");
                    }
                }
                Err(err) => println!("{err}"),
            },
            "user" => print_view(&commands::switch_tab(state, Tab::User).await),
            "admin" => print_view(&commands::switch_tab(state, Tab::Admin).await),
            "quit" | "exit" => break,
            _ => println!("{SESSION_HELP}"),
        }
    }

    Ok(())
}

fn format_member(member: &Member) -> String {
    format!("{} - {} - {} min", member.name, member.plan, member.minutes_read)
}

fn print_timer(state: &TimerState) {
    let label = if state.is_running() { "running" } else { "paused" };
    println!("{} minutes ({label})", state.elapsed_minutes);
}

fn print_dashboard(dashboard: &AdminDashboard) {
    let summary = &dashboard.summary;
    println!("Total Members: {}", summary.total_members);
    println!("Total Reading Minutes: {}", summary.total_minutes);
    for plan in Plan::ALL {
        println!("  {plan}: {}", summary.members_by_plan.get(plan));
    }
    for member in &dashboard.members {
        println!("{}", format_member(member));
    }
}

fn print_view(view: &View) {
    match view {
        View::User(user) => {
            print_timer(&user.timer.state);
            println!("Plan: {}", user.selected_plan);
            println!("Genre: {}", user.selected_genre);
            for title in &user.recommendations {
                println!("  {title}");
            }
        }
        View::Admin(dashboard) => print_dashboard(dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subscribe() {
        let cli = Cli::try_parse_from(["lovegrounds", "--in-memory", "subscribe", "Alice", "--plan", "gold"])
            .unwrap();
        assert!(cli.in_memory);
        match cli.command {
            Command::Subscribe { name, plan } => {
                assert_eq!(name, "Alice");
                assert_eq!(plan, Some(Plan::Gold));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_plan() {
        assert!(Cli::try_parse_from(["lovegrounds", "select-plan", "Platinum"]).is_err());
    }

    #[test]
    fn test_format_member() {
        let member = Member::subscribe("Alice", Plan::Gold);
        assert_eq!(format_member(&member), "Alice - Gold - 0 min");
    }
}
