use std::sync::Arc;

use crate::cli::commands::*;
use crate::cli::output;
use crate::host::{HostApi, KernelClient};
use crate::io::FilterStore;
use crate::model::{
    BoxContext, DisplayMode, DocContext, FilterState, SortKey, TaskRange, TaskStatus,
};
use crate::ops::{process, today};
use crate::store::ConfigStore;
use crate::store::TaskStore;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Build the host client from the connection flags.
pub fn connect(cli: &Cli) -> Result<Arc<dyn HostApi>, Box<dyn std::error::Error>> {
    let client = KernelClient::new(&cli.url, &cli.token)?;
    Ok(Arc::new(client))
}

pub async fn dispatch(cli: Cli) -> CliResult {
    let host = connect(&cli)?;
    let json = cli.json;
    let context = context_from_flags(&cli);

    match cli.command {
        // The TUI path is handled in main.rs before dispatch.
        None => Ok(()),
        Some(Commands::List(args)) => cmd_list(host, &args, context, json).await,
        Some(Commands::Today(cmd)) => cmd_today(host, &cmd.action, json).await,
        Some(Commands::Notebooks) => cmd_notebooks(host, json).await,
        Some(Commands::Config(cmd)) => cmd_config(host, cmd.action.as_ref(), json).await,
    }
}

fn context_from_flags(cli: &Cli) -> (DocContext, BoxContext) {
    let doc = DocContext {
        id: cli.doc.clone().unwrap_or_default(),
        root_id: cli.doc.clone().unwrap_or_default(),
        name: String::new(),
    };
    let notebook = BoxContext {
        box_id: cli.notebook.clone().unwrap_or_default(),
        name: String::new(),
    };
    (doc, notebook)
}

async fn cmd_list(
    host: Arc<dyn HostApi>,
    args: &ListArgs,
    context: (DocContext, BoxContext),
    json: bool,
) -> CliResult {
    let saved = FilterStore::new()
        .map(|s| s.load())
        .unwrap_or_else(|_| FilterState::default());

    let range = match &args.range {
        Some(s) => TaskRange::parse(s).ok_or_else(|| format!("invalid range: {s}"))?,
        None => saved.range,
    };
    let status = match &args.status {
        Some(s) => TaskStatus::parse(s).ok_or_else(|| format!("invalid status: {s}"))?,
        None => saved.status,
    };
    let display_mode = match &args.display_mode {
        Some(s) => DisplayMode::parse(s).ok_or_else(|| format!("invalid display mode: {s}"))?,
        None => saved.display_mode,
    };

    let config_store = ConfigStore::new();
    config_store.load(&host).await;
    let config = config_store.get();
    let sort = match &args.sort {
        Some(s) => SortKey::parse(s).ok_or_else(|| format!("invalid sort key: {s}"))?,
        None => config.sort_by,
    };

    let store = TaskStore::new(host, config_store.subscribe());
    store.set_context(context.0, context.1);
    store.refresh_if_needed(true, Some(range), Some(status)).await;

    let state = store.snapshot();
    if let Some(err) = state.error {
        return Err(err.into());
    }

    let mut tasks = state.tasks;
    if !config.show_completed && !args.all {
        tasks.retain(|t| t.status != TaskStatus::Done);
    }
    let tasks = process::sort_tasks(&tasks, sort);
    let view = process::group_tasks(tasks, display_mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if view.is_empty() {
        println!("no tasks");
    } else {
        print!("{}", output::render_tasks(&view));
    }

    // Remember the filter for the next invocation, like the panel does.
    if let Ok(filter_store) = FilterStore::new() {
        let _ = filter_store.save(&FilterState {
            range,
            status,
            display_mode,
            timestamp: 0,
        });
    }
    Ok(())
}

async fn cmd_today(host: Arc<dyn HostApi>, action: &TodayAction, json: bool) -> CliResult {
    match action {
        TodayAction::List => {
            let ids = today::load_today_ids(host.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&ids)?);
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        TodayAction::Add { task_id } => {
            today::add(host.as_ref(), task_id).await?;
            if !json {
                println!("flagged {task_id} for today");
            }
        }
        TodayAction::Remove { task_id } => {
            today::remove(host.as_ref(), task_id).await?;
            if !json {
                println!("unflagged {task_id}");
            }
        }
        TodayAction::Toggle { task_id } => {
            let now = today::toggle(host.as_ref(), task_id).await?;
            if json {
                println!("{}", serde_json::json!({ "id": task_id, "isToday": now }));
            } else {
                println!("{task_id}: {}", if now { "today" } else { "not today" });
            }
        }
        TodayAction::Count => {
            println!("{}", today::count(host.as_ref()).await);
        }
    }
    Ok(())
}

async fn cmd_notebooks(host: Arc<dyn HostApi>, json: bool) -> CliResult {
    let notebooks = host.ls_notebooks().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&notebooks)?);
    } else {
        for nb in notebooks {
            let icon = if nb.icon.is_empty() {
                crate::ops::notebooks::DEFAULT_NOTEBOOK_ICON.to_string()
            } else {
                crate::ops::notebooks::emoji_from_codepoint(&nb.icon)
            };
            let closed = if nb.closed { " (closed)" } else { "" };
            println!("{icon} {} {}{closed}", nb.id, nb.name);
        }
    }
    Ok(())
}

async fn cmd_config(
    host: Arc<dyn HostApi>,
    action: Option<&ConfigAction>,
    json: bool,
) -> CliResult {
    let store = ConfigStore::new();
    store.load(&host).await;

    match action {
        None | Some(ConfigAction::Show) => {
            let config = store.get();
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("autoRefresh      {}", config.auto_refresh);
                println!("refreshInterval  {}", config.refresh_interval);
                println!("showCompleted    {}", config.show_completed);
                println!("maxTasks         {}", config.max_tasks);
                println!("sortBy           {}", config.sort_by.as_str());
                println!("displayMode      {}", config.display_mode.as_str());
                println!("showTodayTasks   {}", config.show_today_tasks);
            }
        }
        Some(ConfigAction::Set { key, value }) => {
            apply_setting(&store, key, value)?;
            store.save(&host).await?;
            if !json {
                println!("saved");
            }
        }
    }
    Ok(())
}

fn apply_setting(store: &ConfigStore, key: &str, value: &str) -> CliResult {
    match key {
        "autoRefresh" => store.set_auto_refresh(parse_bool(value)?),
        "refreshInterval" => store.set_refresh_interval(value.parse()?),
        "showCompleted" => store.set_show_completed(parse_bool(value)?),
        "maxTasks" => store.set_max_tasks(value.parse()?),
        "sortBy" => store.set_sort_by(
            SortKey::parse(value).ok_or_else(|| format!("invalid sort key: {value}"))?,
        ),
        "displayMode" => store.set_display_mode(
            DisplayMode::parse(value).ok_or_else(|| format!("invalid display mode: {value}"))?,
        ),
        "showTodayTasks" => store.set_show_today_tasks(parse_bool(value)?),
        _ => return Err(format!("unknown setting: {key}").into()),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match value {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(format!("expected true/false, got: {value}").into()),
    }
}
