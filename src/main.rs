use clap::Parser;
use taskdock::cli::commands::Cli;
use taskdock::cli::handlers;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr and are opt-in via RUST_LOG so they never paint
    // over the panel.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch the panel
            let host = match handlers::connect(&cli) {
                Ok(host) => host,
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            };
            let doc = taskdock::model::DocContext {
                id: cli.doc.clone().unwrap_or_default(),
                root_id: cli.doc.clone().unwrap_or_default(),
                name: String::new(),
            };
            let notebook = taskdock::model::BoxContext {
                box_id: cli.notebook.clone().unwrap_or_default(),
                name: String::new(),
            };
            if let Err(e) = taskdock::tui::run(host, (doc, notebook)).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
