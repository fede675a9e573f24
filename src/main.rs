use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use module_registry::config::ServerConfig;
use module_registry::http;
use module_registry::publish;
use module_registry::registry::{
    InMemoryCatalog, Module, ModuleDescriptor, ModuleService, StorageModuleService,
};
use module_registry::storage::MemoryObjectStore;

#[derive(Parser)]
#[command(name = "module-registry")]
#[command(version, about = "Terraform-compatible module registry")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the registry HTTP server
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long)]
        bind: Option<String>,
        /// Catalog backend to serve from
        #[arg(long, value_enum, default_value_t = Backend::Storage)]
        backend: Backend,
        /// Path to a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON file with modules to seed the memory catalog
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Package a module directory and push it to a registry
    Upload {
        /// Directory containing the module
        #[arg(long, default_value = ".")]
        module_dir: PathBuf,
        /// Base URL of the target registry
        #[arg(long, default_value = "http://localhost:1323")]
        registry: String,
        #[arg(long)]
        namespace: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        system: String,
        #[arg(long)]
        version: String,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Backend {
    /// In-memory catalog (list/search over a seeded module index)
    Memory,
    /// Object-store-backed service (versions, downloads, uploads)
    Storage,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            bind,
            backend,
            config,
            seed,
        } => serve(bind, backend, config, seed).await,
        Command::Upload {
            module_dir,
            registry,
            namespace,
            name,
            system,
            version,
        } => {
            let descriptor = ModuleDescriptor::new(namespace, name, system);
            publish::upload_dir(&module_dir, &registry, &descriptor, &version).await?;
            Ok(())
        }
    }
}

async fn serve(
    bind: Option<String>,
    backend: Backend,
    config: Option<PathBuf>,
    seed: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    };
    let bind_addr = bind.unwrap_or(config.bind_addr);

    let service: Arc<dyn ModuleService> = match backend {
        Backend::Memory => {
            let modules: Vec<Module> = match seed {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => Vec::new(),
            };
            info!("serving in-memory catalog with {} modules", modules.len());
            Arc::new(InMemoryCatalog::new(modules))
        }
        Backend::Storage => {
            let store = Arc::new(MemoryObjectStore::new(
                config.public_base_url,
                config.signing_secret,
            ));
            info!("serving object-store-backed registry");
            Arc::new(StorageModuleService::new(store))
        }
    };

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("registry listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
