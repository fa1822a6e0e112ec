use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Map, Value};

use resource_service::resources::{ResourceStatus, ResourceType};
use resource_service::security::{UserRole, ROLE_HEADER};

#[derive(Parser)]
#[command(name = "resource-cli")]
#[command(about = "Management CLI for the Resource Service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Role sent in the role header on every request.
    #[arg(short, long, default_value = "ADMIN")]
    role: UserRole,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resources page by page
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Show one resource
    Get { id: String },
    /// List resources that are currently available
    Available {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// List resources of one type
    ByType {
        resource_type: ResourceType,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// List every resource owned by a user
    ByOwner { owner_id: String },
    /// Register a new resource
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        resource_type: ResourceType,
        #[arg(long)]
        owner_id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        capacity: Option<i32>,
        #[arg(long)]
        responsible_person: Option<String>,
    },
    /// Change the status of a resource
    SetStatus { id: String, status: ResourceStatus },
    /// Remove a resource
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/resources", cli.url.trim_end_matches('/'));

    let mut headers = HeaderMap::new();
    headers.insert(ROLE_HEADER, HeaderValue::from_static(cli.role.as_str()));

    let request = match cli.command {
        Commands::List { page, size } => client
            .get(&base)
            .query(&[("page", page), ("size", size)]),
        Commands::Get { id } => client.get(format!("{base}/{id}")),
        Commands::Available { page, size } => client
            .get(format!("{base}/available"))
            .query(&[("page", page), ("size", size)]),
        Commands::ByType {
            resource_type,
            page,
            size,
        } => client
            .get(format!("{base}/type/{resource_type}"))
            .query(&[("page", page), ("size", size)]),
        Commands::ByOwner { owner_id } => client.get(format!("{base}/owner/{owner_id}")),
        Commands::Create {
            name,
            resource_type,
            owner_id,
            description,
            location,
            capacity,
            responsible_person,
        } => {
            let mut body = Map::new();
            body.insert("name".into(), json!(name));
            body.insert("type".into(), json!(resource_type));
            body.insert("ownerId".into(), json!(owner_id));
            if let Some(v) = description {
                body.insert("description".into(), json!(v));
            }
            if let Some(v) = location {
                body.insert("location".into(), json!(v));
            }
            if let Some(v) = capacity {
                body.insert("capacity".into(), json!(v));
            }
            if let Some(v) = responsible_person {
                body.insert("responsiblePerson".into(), json!(v));
            }
            client.post(&base).json(&Value::Object(body))
        }
        Commands::SetStatus { id, status } => client
            .patch(format!("{base}/{id}/status"))
            .query(&[("status", status.as_str())]),
        Commands::Delete { id } => client.delete(format!("{base}/{id}")),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Resource API returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
