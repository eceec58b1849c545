use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "member-groups-cli")]
#[command(about = "Management CLI for the member groups API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/api/member-groups")]
    base_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service status
    Status,
    /// Get a member group by integer id, GUID or UDI
    Get { id: String },
    /// Look up several groups by integer id
    GetMany {
        #[arg(required = true)]
        ids: Vec<i32>,
    },
    /// List all member groups
    List,
    /// Show the blank creation template
    Empty,
    /// Delete a member group by integer id
    Delete { id: i32 },
    /// Rename an existing member group
    Save { id: i32, name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let groups = format!("{}{}", cli.url.trim_end_matches('/'), cli.base_path);

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/status", cli.url.trim_end_matches('/'))).send().await?,
        Commands::Get { id } => {
            let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
            client.get(format!("{}/{}", groups, encoded)).send().await?
        }
        Commands::GetMany { ids } => {
            let query: Vec<(&str, String)> = ids.iter().map(|id| ("ids", id.to_string())).collect();
            client
                .get(format!("{}/by-ids", groups))
                .query(&query)
                .send()
                .await?
        }
        Commands::List => client.get(&groups).send().await?,
        Commands::Empty => client.get(format!("{}/empty", groups)).send().await?,
        Commands::Delete { id } => client.delete(format!("{}/{}", groups, id)).send().await?,
        Commands::Save { id, name } => {
            client
                .post(&groups)
                .json(&json!({ "id": id, "name": name }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
