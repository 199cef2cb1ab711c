use api_shared::{DeletedRes, PostRes, ProjectRes};
use clap::{Parser, Subcommand};
use folio_core::{
    config::{deployment_mode_from_env_value, number_from_env_value},
    constants::{DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_UPLOAD_DIR},
    CoreConfig, LocalFs, ResourceId, ResourceStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio content store CLI")]
struct Cli {
    /// Public directory holding `posts/` and `projects/` (overrides FOLIO_PUBLIC_DIR)
    #[arg(long, global = true)]
    public_dir: Option<PathBuf>,
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the posts and projects directories
    Init,
    /// Manage posts
    #[command(subcommand)]
    Posts(PostCommands),
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommands),
}

#[derive(Subcommand)]
enum PostCommands {
    /// List all posts
    List,
    /// Print one post
    Show {
        /// Post identifier
        id: String,
    },
    /// Delete one post
    Delete {
        /// Post identifier
        id: String,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List all projects
    List,
    /// Print one project
    Show {
        /// Project identifier
        id: String,
    },
    /// Delete one project and its logo
    Delete {
        /// Project identifier
        id: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("No command given. Run `folio --help` for usage.");
        return Ok(());
    };

    let cfg = config_from_env(cli.public_dir)?;
    // Opening the store creates any missing collection roots.
    let store = ResourceStore::open(Arc::new(LocalFs::new()), &cfg)?;

    match command {
        Commands::Init => {
            println!("Initialised {}", cfg.public_dir().display());
        }
        Commands::Posts(PostCommands::List) => {
            let posts: Vec<PostRes> = store
                .posts()
                .list()?
                .into_iter()
                .map(PostRes::from)
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else if posts.is_empty() {
                println!("No posts found.");
            } else {
                for post in posts {
                    println!("{} ({} bytes)", post.id, post.content.len());
                }
            }
        }
        Commands::Posts(PostCommands::Show { id }) => {
            let post = PostRes::from(store.posts().get(&ResourceId::parse(&id)?)?);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&post)?);
            } else {
                println!("{}", post.content);
            }
        }
        Commands::Posts(PostCommands::Delete { id }) => {
            let deleted = DeletedRes::from(store.posts().delete(&ResourceId::parse(&id)?)?);
            print_deleted("post", &deleted, cli.json)?;
        }
        Commands::Projects(ProjectCommands::List) => {
            let projects: Vec<ProjectRes> = store
                .projects()
                .list()?
                .into_iter()
                .map(ProjectRes::from)
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else if projects.is_empty() {
                println!("No projects found.");
            } else {
                for project in projects {
                    println!("{}: {}", project.id, first_line(&project.description));
                }
            }
        }
        Commands::Projects(ProjectCommands::Show { id }) => {
            let project = ProjectRes::from(store.projects().get(&ResourceId::parse(&id)?)?);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                println!("ID: {}", project.id);
                println!("Logo: {}", project.images);
                println!();
                println!("{}", project.description);
            }
        }
        Commands::Projects(ProjectCommands::Delete { id }) => {
            let deleted = DeletedRes::from(store.projects().delete(&ResourceId::parse(&id)?)?);
            print_deleted("project", &deleted, cli.json)?;
        }
    }

    Ok(())
}

/// Resolves configuration the same way the server does, so both agree on image URLs.
fn config_from_env(public_dir: Option<PathBuf>) -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let public_dir = public_dir.unwrap_or_else(|| {
        std::env::var("FOLIO_PUBLIC_DIR")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.into())
            .into()
    });
    let upload_dir =
        std::env::var("FOLIO_UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into());
    let mode = deployment_mode_from_env_value(std::env::var("FOLIO_ENV").ok());
    let port = number_from_env_value("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)?;

    Ok(CoreConfig::new(public_dir, PathBuf::from(upload_dir), mode, port))
}

fn print_deleted(
    kind: &str,
    deleted: &DeletedRes,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(deleted)?);
    } else {
        println!("Deleted {kind} {}", deleted.id);
    }
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
