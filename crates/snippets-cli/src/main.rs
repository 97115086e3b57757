use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use snippets_cli::admin::{self, NewAdmin};
use snippets_cli::seeder::{self, SeedConfig};
use snippets_config::DatabaseConfig;
use snippets_db::init_db_pool;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "snippets-cli")]
#[command(about = "Study Snippets CLI - Administrative tools for Study Snippets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// University
        #[arg(short = 'u', long)]
        university: Option<String>,
    },
    /// Grant admin privileges to an existing user
    Promote {
        /// Email of the user
        email: String,
    },
    /// Revoke admin privileges from an existing user
    Demote {
        /// Email of the user
        email: String,
    },
    /// Seed the database with fake courses and notes
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "10")]
        courses: usize,

        /// Number of notes per course
        #[arg(short = 'n', long, default_value = "5")]
        notes_per_course: usize,

        /// Number of students uploading notes
        #[arg(long, default_value = "10")]
        uploaders: usize,
    },
    /// Clear all seeded users, courses and notes
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config).await?;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
            university,
        } => handle_create_admin(&pool, first_name, last_name, email, password, university).await,
        Commands::Promote { email } => handle_set_admin(&pool, &email, true).await,
        Commands::Demote { email } => handle_set_admin(&pool, &email, false).await,
        Commands::Seed {
            courses,
            notes_per_course,
            uploaders,
        } => {
            let config = SeedConfig::new(courses)
                .with_notes_per_course(notes_per_course)
                .with_uploaders(uploaders);
            seeder::seed_all(&pool, config).await.map(|_| ())
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await.map(|_| ()),
    }
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    university: Option<String>,
) -> anyhow::Result<()> {
    let first_name = prompt_if_missing(first_name, "First name")?;
    let last_name = prompt_if_missing(last_name, "Last name")?;
    let email = prompt_if_missing(email, "Email address")?;

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let new_admin = NewAdmin {
        first_name,
        last_name,
        email,
        password,
        university,
    };

    admin::create_admin(pool, &new_admin).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", new_admin.email);
    println!("   Name: {} {}", new_admin.first_name, new_admin.last_name);

    Ok(())
}

async fn handle_set_admin(pool: &PgPool, email: &str, is_admin: bool) -> anyhow::Result<()> {
    admin::set_admin(pool, email, is_admin).await?;

    if is_admin {
        println!("✅ {} is now an admin", email);
    } else {
        println!("✅ {} is no longer an admin", email);
    }

    Ok(())
}
