//! Skylight CLI - household calendar, chores, lists, and rewards.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use skylight::api::calendar::CalendarEventQuery;
use skylight::api::chores::{ChoreQuery, NewChore};
use skylight::api::taskbox::NewTaskBoxItem;
use skylight::types::{display_attributes, ItemStatus, ListKind};
use skylight::{dates, AuthMode, Config, SkylightClient};

/// Skylight CLI - talk to the household frame.
#[derive(Parser)]
#[command(name = "skylight")]
#[command(about = "Manage chores, lists, calendar and rewards on a Skylight frame")]
struct Cli {
    /// API token (or set `SKYLIGHT_TOKEN` env var).
    #[arg(long, env = "SKYLIGHT_TOKEN")]
    token: String,

    /// Frame (household) ID (or set `SKYLIGHT_FRAME_ID` env var).
    #[arg(long, env = "SKYLIGHT_FRAME_ID")]
    frame_id: String,

    /// Authorization scheme: bearer or basic.
    #[arg(long, env = "SKYLIGHT_AUTH_TYPE", default_value = "bearer")]
    auth: AuthMode,

    /// Zone for resolving date phrases.
    #[arg(long, env = "SKYLIGHT_TIMEZONE", default_value = "America/New_York")]
    timezone: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusFilter {
    Pending,
    Completed,
    All,
}

#[derive(Subcommand)]
enum Commands {
    /// List chores in a date window.
    Chores {
        /// Start date (YYYY-MM-DD, 'today', 'tomorrow', or a weekday).
        #[arg(long, default_value = "today")]
        date: String,

        /// End date. Defaults to 7 days after the start.
        #[arg(long)]
        date_end: Option<String>,

        /// Include overdue chores from past dates.
        #[arg(long, default_value = "true")]
        include_late: bool,

        /// Filter by family member name.
        #[arg(long)]
        assignee: Option<String>,

        /// Filter by completion status.
        #[arg(long, value_enum, default_value = "pending")]
        status: StatusFilter,
    },

    /// Add a chore.
    AddChore {
        /// Chore description.
        summary: String,

        /// Due date phrase.
        #[arg(long, default_value = "today")]
        date: String,

        /// Due time, e.g. '10:00 AM' or '14:30'.
        #[arg(long)]
        time: Option<String>,

        /// Family member to assign.
        #[arg(long)]
        assignee: Option<String>,

        /// Recurrence: 'daily', 'weekly', 'weekdays', or an RRULE string.
        #[arg(long)]
        repeat: Option<String>,

        /// Reward points for completion.
        #[arg(long)]
        points: Option<i64>,
    },

    /// Mark a chore completed.
    CompleteChore {
        /// Chore ID.
        #[arg(long)]
        id: String,
    },

    /// Delete a chore.
    DeleteChore {
        /// Chore ID.
        #[arg(long)]
        id: String,
    },

    /// Show all lists.
    Lists,

    /// Show the items on a list.
    Items {
        /// List name; 'shopping' or 'todo' pick the default of that kind.
        list: String,
    },

    /// Add an item to a list.
    AddItem {
        /// List name (or 'shopping' / 'todo').
        list: String,

        /// Item label.
        label: String,

        /// Display section, e.g. 'Produce'.
        #[arg(long)]
        section: Option<String>,
    },

    /// Mark a list item completed.
    CompleteItem {
        /// List name (or 'shopping' / 'todo').
        list: String,

        /// Item label to complete.
        label: String,
    },

    /// Show family members.
    Members,

    /// Park an unscheduled task in the task box.
    AddTask {
        /// Task description.
        summary: String,

        /// Reward points for completion.
        #[arg(long)]
        points: Option<i64>,

        /// Mark as a routine.
        #[arg(long, default_value = "false")]
        routine: bool,
    },

    /// Show redeemable rewards.
    Rewards,

    /// Show reward point balances.
    Points,

    /// List calendar events in a date window.
    Events {
        /// Start date phrase.
        #[arg(long, default_value = "today")]
        from: String,

        /// End date phrase. Defaults to 7 days after the start.
        #[arg(long)]
        to: Option<String>,
    },

    /// Show devices in the household.
    Devices,

    /// Show frame details.
    Frame,
}

/// Expand recurrence shorthand into an RRULE string.
fn recurrence_rule(pattern: &str) -> String {
    match pattern.to_lowercase().as_str() {
        "daily" => "RRULE:FREQ=DAILY".to_string(),
        "weekly" => "RRULE:FREQ=WEEKLY".to_string(),
        "weekdays" => "RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR".to_string(),
        _ => pattern.to_string(),
    }
}

/// Resolve a list argument: the kind keywords pick the default list of that
/// kind, anything else is matched by name.
async fn resolve_list(client: &SkylightClient, name: &str) -> Result<skylight::types::List> {
    let found = match name.to_lowercase().as_str() {
        "shopping" | "grocery" | "groceries" => {
            client.find_list_by_kind(ListKind::Shopping, true).await?
        }
        "todo" | "to-do" | "to_do" => client.find_list_by_kind(ListKind::ToDo, true).await?,
        _ => client.find_list(name).await?,
    };
    found.with_context(|| format!("no list matching {name:?}; run `skylight lists` to see them"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::new(cli.token, cli.frame_id, cli.auth, &cli.timezone)?;
    let tz = config.timezone;
    let client = SkylightClient::new(config).context("Failed to create Skylight client")?;

    match cli.command {
        Commands::Chores {
            date,
            date_end,
            include_late,
            assignee,
            status,
        } => {
            let after = dates::resolve(&date, tz)?;
            let before = match date_end {
                Some(phrase) => dates::resolve(&phrase, tz)?,
                None => after + chrono::Days::new(7),
            };

            let page = client
                .chores(&ChoreQuery {
                    after: Some(after),
                    before: Some(before),
                    include_late: Some(include_late),
                    linked_to_profile: false,
                })
                .await?;

            let needle = assignee.as_deref().map(str::to_lowercase);
            let mut shown = 0;
            for chore in &page.chores {
                let attrs = &chore.attributes;
                match status {
                    StatusFilter::Pending if attrs.status != "pending" => continue,
                    StatusFilter::Completed if attrs.status != "completed" => continue,
                    _ => {}
                }
                let assignee_label = page.assignee_label(chore);
                if let Some(needle) = &needle {
                    let matches = assignee_label
                        .is_some_and(|label| label.to_lowercase().contains(needle));
                    if !matches {
                        continue;
                    }
                }

                shown += 1;
                let when = attrs
                    .start_time
                    .as_deref()
                    .map_or_else(|| attrs.start.clone(), |t| format!("{} {t}", attrs.start));
                let mut line = format!("- {} [{}] {}", attrs.summary, attrs.status, when);
                if let Some(label) = assignee_label {
                    line.push_str(&format!("  ({label})"));
                }
                if attrs.recurring {
                    line.push_str("  (recurring)");
                }
                if let Some(points) = attrs.reward_points {
                    line.push_str(&format!("  {points}pt"));
                }
                println!("{line}");
            }
            if shown == 0 {
                println!("No matching chores.");
            }
        }

        Commands::AddChore {
            summary,
            date,
            time,
            assignee,
            repeat,
            points,
        } => {
            let category_id = match assignee {
                Some(name) => match client.find_category(&name).await? {
                    Some(category) => Some(category.id),
                    None => bail!(
                        "no family member matching {name:?}; run `skylight members` to see them"
                    ),
                },
                None => None,
            };

            let chore = client
                .create_chore(NewChore {
                    summary,
                    start: dates::resolve(&date, tz)?,
                    start_time: time.as_deref().and_then(dates::resolve_time),
                    recurring: repeat.is_some(),
                    recurrence_set: repeat.as_deref().map(recurrence_rule),
                    reward_points: points,
                    category_id,
                    ..Default::default()
                })
                .await?;

            println!(
                "Created chore \"{}\" on {} (id {})",
                chore.attributes.summary, chore.attributes.start, chore.id
            );
        }

        Commands::CompleteChore { id } => {
            client
                .update_chore(
                    &id,
                    skylight::api::chores::ChoreUpdate {
                        status: Some("completed".to_string()),
                        ..Default::default()
                    },
                )
                .await?;
            println!("Chore {id} completed.");
        }

        Commands::DeleteChore { id } => {
            client.delete_chore(&id).await?;
            println!("Chore {id} deleted.");
        }

        Commands::Lists => {
            let lists = client.lists().await?;
            for list in lists {
                let kind = match list.attributes.list_kind {
                    ListKind::Shopping => "shopping",
                    ListKind::ToDo => "to-do",
                };
                let default = if list.attributes.default_grocery_list {
                    "  (default grocery list)"
                } else {
                    ""
                };
                println!(
                    "- {} [{kind}] {} items{default}",
                    list.attributes.label,
                    list.item_count()
                );
            }
        }

        Commands::Items { list } => {
            let list = resolve_list(&client, &list).await?;
            let page = client.list_with_items(&list.id).await?;
            println!("{}:", page.list.attributes.label);
            for item in &page.items {
                let mark = match item.attributes.status {
                    ItemStatus::Completed => "x",
                    ItemStatus::Pending => " ",
                };
                let section = item
                    .attributes
                    .section
                    .as_deref()
                    .map(|s| format!("  [{s}]"))
                    .unwrap_or_default();
                println!("  [{mark}] {}{section}", item.attributes.label);
            }
        }

        Commands::AddItem {
            list,
            label,
            section,
        } => {
            let list = resolve_list(&client, &list).await?;
            let item = client.add_list_item(&list.id, &label, section).await?;
            println!(
                "Added \"{}\" to {} (id {})",
                item.attributes.label, list.attributes.label, item.id
            );
        }

        Commands::CompleteItem { list, label } => {
            let list = resolve_list(&client, &list).await?;
            let page = client.list_with_items(&list.id).await?;
            let needle = label.to_lowercase();
            let item = page
                .items
                .iter()
                .find(|i| i.attributes.label.to_lowercase().contains(&needle))
                .with_context(|| {
                    format!(
                        "no item matching {label:?} on {}",
                        list.attributes.label
                    )
                })?;

            client
                .update_list_item(
                    &list.id,
                    &item.id,
                    skylight::api::lists::ListItemUpdate {
                        status: Some(ItemStatus::Completed),
                        ..Default::default()
                    },
                )
                .await?;
            println!("Completed \"{}\".", item.attributes.label);
        }

        Commands::Members => {
            let members = client.family_members().await?;
            for member in members {
                let label = member.attributes.label.as_deref().unwrap_or("(unnamed)");
                println!("- {label} (id {})", member.id);
            }
        }

        Commands::AddTask {
            summary,
            points,
            routine,
        } => {
            let item = client
                .create_task_box_item(NewTaskBoxItem {
                    summary,
                    reward_points: points,
                    routine,
                    ..Default::default()
                })
                .await?;
            println!(
                "Parked \"{}\" in the task box (id {})",
                item.attributes.summary, item.id
            );
        }

        Commands::Rewards => {
            let rewards = client.rewards(None).await?;
            for reward in rewards {
                println!("- reward {}\n{}", reward.id, display_attributes(&reward.attributes));
            }
        }

        Commands::Points => {
            let points = client.reward_points().await?;
            for balance in points {
                println!(
                    "- balance {}\n{}",
                    balance.id,
                    display_attributes(&balance.attributes)
                );
            }
        }

        Commands::Events { from, to } => {
            let date_min = dates::resolve(&from, tz)?;
            let date_max = match to {
                Some(phrase) => dates::resolve(&phrase, tz)?,
                None => date_min + chrono::Days::new(7),
            };
            let events = client
                .calendar_events(&CalendarEventQuery {
                    date_min,
                    date_max,
                    timezone: None,
                    include: None,
                })
                .await?;
            for event in events {
                println!("- event {}\n{}", event.id, display_attributes(&event.attributes));
            }
        }

        Commands::Devices => {
            let devices = client.devices().await?;
            for device in devices {
                println!("- device {}\n{}", device.id, display_attributes(&device.attributes));
            }
        }

        Commands::Frame => {
            let frame = client.frame().await?;
            println!("frame {}\n{}", frame.id, display_attributes(&frame.attributes));
        }
    }

    Ok(())
}
