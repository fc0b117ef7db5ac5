// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use cloudant_client::util::logging::{format_field, format_info, format_success, format_warning};
use cloudant_client::{ClientBuilder, Config, CouchClient, Params};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "cloudant")]
#[command(version)]
#[command(about = "Command line access to a CouchDB compatible database", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Overrides server.url from the configuration
    #[arg(long, env = "CLOUDANT_URL")]
    url: Option<String>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the server version
    Version,

    /// List all databases
    AllDbs,

    CreateDb {
        name: String,

        #[arg(long)]
        partitioned: bool,
    },

    DeleteDb {
        name: String,

        #[arg(long)]
        confirm: bool,
    },

    /// Show database metadata
    Info { db: String },

    /// Show metadata of one partition
    PartitionInfo { db: String, partition: String },

    /// Print a document as JSON
    Find { db: String, id: String },

    /// List document ids and revisions
    AllDocs {
        db: String,

        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Invoke a design document update handler
    UpdateHandler {
        db: String,

        /// In the form designDoc/handler
        handler: String,

        #[arg(long)]
        doc_id: Option<String>,

        /// Query parameter as key=value, may be repeated
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Ask the server for fresh UUIDs
    Uuids {
        #[arg(short, long, default_value_t = 1)]
        count: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    cloudant_client::util::logging::init_logger(cli.color, cli.verbose);

    let mut config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(url) = cli.url {
        config.server.url = url;
        config.validate().context("Invalid --url")?;
    }

    let client = ClientBuilder::from_config(&config.server)
        .and_then(|b| b.build())
        .context("Failed to create client")?;

    run(&client, cli.command).await
}

async fn run(client: &CouchClient, command: Commands) -> Result<()> {
    match command {
        Commands::Version => cmd_version(client).await,
        Commands::AllDbs => cmd_all_dbs(client).await,
        Commands::CreateDb { name, partitioned } => cmd_create_db(client, &name, partitioned).await,
        Commands::DeleteDb { name, confirm } => cmd_delete_db(client, &name, confirm).await,
        Commands::Info { db } => cmd_info(client, &db).await,
        Commands::PartitionInfo { db, partition } => {
            cmd_partition_info(client, &db, &partition).await
        }
        Commands::Find { db, id } => cmd_find(client, &db, &id).await,
        Commands::AllDocs { db, limit } => cmd_all_docs(client, &db, limit).await,
        Commands::UpdateHandler {
            db,
            handler,
            doc_id,
            params,
        } => cmd_update_handler(client, &db, &handler, doc_id.as_deref(), &params).await,
        Commands::Uuids { count } => cmd_uuids(client, count).await,
    }
}

async fn cmd_version(client: &CouchClient) -> Result<()> {
    let version = client
        .server_version()
        .await
        .context("Failed to read server version")?;
    println!("{}", format_info(&format!("{} is running {}", client.base_uri(), version)));
    Ok(())
}

async fn cmd_all_dbs(client: &CouchClient) -> Result<()> {
    let dbs = client.all_dbs().await.context("Failed to list databases")?;
    for db in &dbs {
        println!("{}", db);
    }
    info!("{} database(s)", dbs.len());
    Ok(())
}

async fn cmd_create_db(client: &CouchClient, name: &str, partitioned: bool) -> Result<()> {
    let created = if partitioned {
        client.create_partitioned_db(name).await
    } else {
        client.create_db(name).await
    };
    created.with_context(|| format!("Failed to create database {}", name))?;

    println!("{}", format_success(&format!("Database {} is ready", name)));
    Ok(())
}

async fn cmd_delete_db(client: &CouchClient, name: &str, confirm: bool) -> Result<()> {
    if !confirm {
        println!(
            "{}",
            format_warning("This will delete the database and all its documents. Use --confirm to proceed")
        );
        return Ok(());
    }

    client
        .delete_db(name)
        .await
        .with_context(|| format!("Failed to delete database {}", name))?;
    println!("{}", format_success(&format!("Deleted database {}", name)));
    Ok(())
}

async fn cmd_info(client: &CouchClient, db: &str) -> Result<()> {
    let database = client.database(db, false).await?;
    let info = database
        .info()
        .await
        .with_context(|| format!("Failed to read info of {}", db))?;

    println!("{}", format_info(&info.db_name));
    println!("{}", format_field("doc_count", info.doc_count));
    println!("{}", format_field("doc_del_count", info.doc_del_count));
    println!("{}", format_field("update_seq", info.update_seq()));
    println!("{}", format_field("purge_seq", info.string_purge_seq()));
    println!("{}", format_field("disk_size", info.disk_size));
    println!("{}", format_field("partitioned", info.is_partitioned()));
    if let Some(sizes) = info.sizes {
        println!("{}", format_field("sizes.active", sizes.active));
        println!("{}", format_field("sizes.external", sizes.external));
    }
    Ok(())
}

async fn cmd_partition_info(client: &CouchClient, db: &str, partition: &str) -> Result<()> {
    let database = client.database(db, false).await?;
    let info = database
        .partition_info(partition)
        .await
        .with_context(|| format!("Failed to read partition {} of {}", partition, db))?;

    println!("{}", format_info(info.partition.as_deref().unwrap_or(partition)));
    println!("{}", format_field("doc_count", info.doc_count));
    println!("{}", format_field("doc_del_count", info.doc_del_count));
    println!("{}", format_field("sizes.active", info.sizes.active));
    println!("{}", format_field("sizes.external", info.sizes.external));
    Ok(())
}

async fn cmd_find(client: &CouchClient, db: &str, id: &str) -> Result<()> {
    let database = client.database(db, false).await?;
    let document = database
        .find_json(id)
        .await
        .with_context(|| format!("Failed to read document {}", id))?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

async fn cmd_all_docs(client: &CouchClient, db: &str, limit: Option<u64>) -> Result<()> {
    let params = match limit {
        Some(limit) => Params::new().limit(limit),
        None => Params::new(),
    };
    let database = client.database(db, false).await?;
    let response = database
        .all_docs(&params)
        .await
        .with_context(|| format!("Failed to list documents of {}", db))?;

    for row in &response.rows {
        let rev = row.value.as_ref().map(|v| v.rev.as_str()).unwrap_or_default();
        println!("{} {}", row.id.as_deref().unwrap_or_default(), rev);
    }
    info!("{} of {} document(s)", response.rows.len(), response.total_rows);
    Ok(())
}

async fn cmd_update_handler(
    client: &CouchClient,
    db: &str,
    handler: &str,
    doc_id: Option<&str>,
    raw_params: &[String],
) -> Result<()> {
    let params = parse_params(raw_params)?;
    let database = client.database(db, false).await?;
    let output = database
        .invoke_update_handler(handler, doc_id, &params)
        .await
        .with_context(|| format!("Update handler {} failed", handler))?;
    println!("{}", output);
    Ok(())
}

async fn cmd_uuids(client: &CouchClient, count: u64) -> Result<()> {
    for uuid in client.uuids(count).await.context("Failed to fetch UUIDs")? {
        println!("{}", uuid);
    }
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for pair in raw {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => params.push(key, value),
            _ => bail!("Invalid parameter {:?}, expected KEY=VALUE", pair),
        }
    }
    Ok(params)
}
