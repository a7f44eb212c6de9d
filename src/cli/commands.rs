use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[t] taskdock v", env!("CARGO_PKG_VERSION"), " - your notebook tasks in a panel"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Kernel API base URL
    #[arg(long, env = "SIYUAN_API_URL", default_value = "http://127.0.0.1:6806", global = true)]
    pub url: String,

    /// Kernel API token (Settings → About → API token)
    #[arg(long, env = "SIYUAN_API_TOKEN", default_value = "", global = true)]
    pub token: String,

    /// Current document id, for doc-scoped queries
    #[arg(long, global = true)]
    pub doc: Option<String>,

    /// Current notebook id, for notebook-scoped queries
    #[arg(long, global = true)]
    pub notebook: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Manage per-task today flags
    Today(TodayCmd),
    /// List notebooks
    Notebooks,
    /// Show or change panel settings
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct ListArgs {
    /// Scope: doc, notebook, or workspace (default: last used)
    #[arg(short, long)]
    pub range: Option<String>,

    /// Status filter: all, todo, or done (default: last used)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Sort key: created, updated, priority, or content
    #[arg(long)]
    pub sort: Option<String>,

    /// Layout: only-tasks, notebook-tasks, or notebook-document-tasks
    #[arg(long = "group")]
    pub display_mode: Option<String>,

    /// Include completed tasks even when settings hide them
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct TodayCmd {
    #[command(subcommand)]
    pub action: TodayAction,
}

#[derive(Subcommand)]
pub enum TodayAction {
    /// List task ids flagged for today
    List,
    /// Flag a task for today
    Add { task_id: String },
    /// Unflag a task
    Remove { task_id: String },
    /// Flip a task's today flag
    Toggle { task_id: String },
    /// Count flagged tasks
    Count,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Show,
    /// Change one setting (autoRefresh, refreshInterval, showCompleted,
    /// maxTasks, sortBy, displayMode, showTodayTasks)
    Set { key: String, value: String },
}
