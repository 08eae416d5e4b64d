use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use projectsync::core::projects::{
    CreateProjectRequest, InMemoryProjectService, InMemoryResourceStores, ProjectsError,
    ProjectsStore, ProjectsView, Route, ScopeOracle, Seed,
};

#[derive(Parser)]
#[command(name = "projectsync")]
#[command(about = "Replay navigation against a project cache and print the derived views")]
struct Cli {
    /// Path to a JSON seed file (actor, config, projects)
    #[arg(value_name = "SEED")]
    seed_path: PathBuf,

    /// Route to navigate to, e.g. /projects/p1/workflows?projectId=p2 (repeatable)
    #[arg(short, long = "route", value_name = "URL")]
    routes: Vec<String>,

    /// Create a team project with this name before navigating
    #[arg(long, value_name = "NAME")]
    create: Option<String>,

    /// Print the views as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let seed = Seed::from_path(&args.seed_path)?;
    let store = ProjectsStore::new(
        InMemoryProjectService::from_seed(&seed),
        ScopeOracle,
        InMemoryResourceStores::new(),
        seed.actor.clone(),
        seed.config.clone(),
    );

    store.load_all().await.context("Failed to load projects")?;
    store.load_mine().await.context("Failed to load my projects")?;
    store.load_counts().await.context("Failed to load project counts")?;
    match store.load_personal().await {
        Err(ProjectsError::NotFound { .. }) => {
            tracing::warn!(actor = %seed.actor.id, "seed has no personal project for actor");
        }
        other => {
            other.context("Failed to load personal project")?;
        }
    }

    if let Some(name) = args.create {
        let request = CreateProjectRequest { name, icon: None };
        store
            .create_project(&request)
            .await
            .with_context(|| format!("Failed to create project {:?}", request.name))?;
    }

    print_view("initial", &store.view(), args.json)?;

    for url in &args.routes {
        store
            .on_route_change(Route::parse(url))
            .await
            .with_context(|| format!("Failed to navigate to {}", url))?;
        print_view(url, &store.view(), args.json)?;
    }

    Ok(())
}

fn print_view(label: &str, view: &ProjectsView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("\n=== {} ===", label);
    match &view.active_selection {
        Some(selection) => println!("Active selection: {}", selection),
        None => println!("Active selection: none"),
    }
    if let Some(id) = &view.current_project_id {
        println!("Current project: {}", id);
    }

    println!("Available projects ({}):", view.available_projects.len());
    for project in &view.available_projects {
        println!("  {} ({}) [{:?}]", project.name, project.id, project.project_type);
    }

    let count = view.projects_count;
    println!(
        "Counts: personal {}, team {}, public {}",
        count.personal, count.team, count.public
    );
    println!(
        "Can create projects: {} (limit {}, permission {})",
        view.can_create_projects, view.team_projects_limit.0, view.has_permission_to_create_projects
    );
    Ok(())
}
