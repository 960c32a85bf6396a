use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process;

use pages_publish::boundary::BoundaryWarning;
use pages_publish::config;
use pages_publish::git::Git2Repository;
use pages_publish::publish;
use pages_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "pages-publish",
    about = "Publish a built site directory to a branch of a remote git repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Directory to publish (overrides config)")]
    source: Option<String>,

    #[arg(short, long, help = "Target branch on the remote (overrides config)")]
    branch: Option<String>,

    #[arg(short, long, help = "Remote repository URL (overrides config)")]
    repo: Option<String>,

    #[arg(short, long, help = "Commit message (overrides config)")]
    message: Option<String>,

    #[arg(long, help = "Force push, replacing remote branch history")]
    force: bool,

    #[arg(short = 'y', long, help = "Skip confirmation prompts")]
    yes: bool,

    #[arg(long, help = "Preview what would happen without publishing")]
    dry_run: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("pages-publish {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    // Command-line flags win over the config file
    if let Some(source) = args.source {
        config.source = source;
    }
    if let Some(branch) = args.branch {
        config.branch = branch;
    }
    if let Some(repo) = args.repo {
        config.repo = repo;
    }
    if let Some(message) = args.message {
        config.message = message;
    }
    if args.force {
        config.push.force = true;
    }

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        process::exit(1);
    }

    // Inspect the source directory before touching the remote
    let stats = match publish::scan_source(Path::new(&config.source)) {
        Ok(stats) => stats,
        Err(e) => {
            ui::display_error(&e.to_string());
            process::exit(1);
        }
    };

    if stats.file_count == 0 {
        let warning = BoundaryWarning::EmptySourceDir {
            path: config.source.clone(),
        };
        ui::display_boundary_warning(&warning);

        if !args.yes && !args.dry_run && !ui::confirm_action("Publish an empty site anyway?")? {
            println!("Operation cancelled by user.");
            return Ok(());
        }
    }

    if config.push.force {
        let warning = BoundaryWarning::ForcedUpdate {
            branch: config.branch.clone(),
        };
        ui::display_boundary_warning(&warning);

        if !args.yes && !args.dry_run && !ui::confirm_action("Replace the remote branch history?")?
        {
            println!("Operation cancelled by user.");
            return Ok(());
        }
    }

    if args.dry_run {
        ui::display_status("Dry run:");
        ui::display_success(&format!(
            "  Step 1: would snapshot '{}' ({} files)",
            config.source, stats.file_count
        ));
        ui::display_success(&format!(
            "  Step 2: would commit as {} <{}>",
            config.user.name, config.user.email
        ));
        ui::display_success(&format!(
            "  Step 3: would push '{}' to {}",
            config.branch, config.repo
        ));
        return Ok(());
    }

    // Open the clone cache backing this repository URL
    let cache_dir = config.cache_dir();
    let repo = match Git2Repository::open(
        &cache_dir,
        &config.repo,
        config.push.token_path.as_deref(),
    ) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            process::exit(1);
        }
    };

    let request = publish::PublishRequest::from_config(&config);

    ui::display_status(&format!(
        "Publishing '{}' to '{}' on {}",
        config.source, config.branch, config.repo
    ));

    let receipt = match publish::run_publish_workflow(&repo, &request) {
        Ok(receipt) => receipt,
        Err(e) => {
            ui::display_error(&e.to_string());
            process::exit(1);
        }
    };

    if receipt.first_publish {
        ui::display_status(&format!(
            "Created branch '{}' on the remote",
            receipt.branch
        ));
    }

    ui::display_publish_summary(&receipt.branch, &receipt.commit, receipt.file_count);
    ui::display_success("Deploy Complete!");

    Ok(())
}
