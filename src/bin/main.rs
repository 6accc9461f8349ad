//! grid-ops CLI - bootstrap, seed and inspect the grid_ops schema
//!
//! Usage:
//!   grid-ops [demo]
//!   grid-ops drop [--schema <name>]
//!   grid-ops init | seed | verify | ddl | tools
//!   grid-ops tool <name> [--args <json>]
//!
//! Examples:
//!   grid-ops --database ./data/grid.duckdb demo
//!   grid-ops tool list_columns --args '{"table_name": "generators"}'

use clap::{Parser, Subcommand};
use grid_ops::config::Settings;
use grid_ops::metadata::{CatalogRow, MetadataInspector, MetadataProvider};
use grid_ops::schema::{self, SchemaManager, GRID_OPS_SCHEMA};
use grid_ops::seed::SeedLoader;
use grid_ops::telemetry::init_tracing;
use grid_ops::tools::{self, invoke_json};
use grid_ops::Database;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "grid-ops")]
#[command(about = "Bootstrap, seed and inspect the grid_ops DuckDB schema")]
#[command(version)]
struct Cli {
    /// DuckDB file to use (overrides the configured path)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Settings file to load instead of the default search
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop, initialize and seed the schema, then list the catalog
    Demo,

    /// Drop a schema and everything in it
    Drop {
        /// Schema to drop
        #[arg(short, long, default_value = GRID_OPS_SCHEMA)]
        schema: String,
    },

    /// Create the grid_ops schema and its tables
    Init,

    /// Insert the sample rows
    Seed,

    /// Compare the live catalog with the declared tables
    Verify,

    /// Print the DDL script without touching the database
    Ddl,

    /// Print the registered tool descriptors as JSON
    Tools,

    /// Invoke one registered tool and print its rows as JSON
    Tool {
        /// Tool name
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&settings.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: &Settings) -> CliResult {
    let command = cli.command.unwrap_or(Commands::Demo);

    // Commands that never open the database.
    match &command {
        Commands::Ddl => {
            print!("{}", schema::ddl_script());
            return Ok(());
        }
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&tools::descriptors())?);
            return Ok(());
        }
        _ => {}
    }

    let path = match cli.database {
        Some(path) => path,
        None => settings.database_path()?,
    };
    let db = Database::open(&path)?;

    match command {
        Commands::Demo => cmd_demo(&db)?,
        Commands::Drop { schema } => {
            SchemaManager::new(&db).drop_schema(&schema)?;
            println!("Dropped schema {}", schema);
        }
        Commands::Init => {
            SchemaManager::new(&db).init_schema()?;
            println!("Initialized schema {}", GRID_OPS_SCHEMA);
        }
        Commands::Seed => {
            let summary = SeedLoader::new(&db).insert_sample_data()?;
            println!("Inserted {} sample rows", summary.total());
        }
        Commands::Verify => {
            let drift = SchemaManager::new(&db).verify_schema()?;
            if drift.is_empty() {
                println!("Schema {} matches its definition", GRID_OPS_SCHEMA);
            } else {
                for difference in &drift {
                    println!("{}", difference);
                }
                db.close()?;
                return Err(format!("{} schema differences", drift.len()).into());
            }
        }
        Commands::Tool { name, args } => {
            let args: serde_json::Value = match args {
                Some(raw) => serde_json::from_str(&raw)?,
                None => serde_json::Value::Null,
            };
            let inspector = MetadataInspector::new(&db);
            let rows = invoke_json(&inspector, &name, &args)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Ddl | Commands::Tools => {}
    }

    db.close()?;
    Ok(())
}

fn cmd_demo(db: &Database) -> CliResult {
    let manager = SchemaManager::new(db);
    manager.drop_schema(GRID_OPS_SCHEMA)?;
    println!("Dropped schema {}", GRID_OPS_SCHEMA);
    manager.init_schema()?;
    println!("Initialized schema {}", GRID_OPS_SCHEMA);

    SeedLoader::new(db).insert_sample_data()?;

    let inspector = MetadataInspector::new(db);
    print_rows("Schemas:", &inspector.list_schemas()?);
    print_rows("Tables:", &inspector.list_tables()?);
    print_rows("Columns in substations:", &inspector.list_columns("substations", None)?);
    println!("Inserted sample data");
    Ok(())
}

fn print_rows(label: &str, rows: &[CatalogRow]) {
    println!("{}", label);
    for row in rows {
        println!("  - {}", row);
    }
}
