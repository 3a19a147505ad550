//! Leadboard CLI
//!
//! Command-line interface for the lead store:
//! - List and inspect leads
//! - Add, update and remove leads
//! - Seed sample data
//! - Resolve dashboard routes and print map data

use clap::{Parser, Subcommand};
use leadboard::config::{generate_default_config, Config};
use leadboard::geo::{bounds_for, lead_markers, MapOptions};
use leadboard::routes::{Resolution, Route};
use leadboard::seed::add_sample_leads;
use leadboard::store::{Lead, LeadInput, LeadStore, LeadUpdate, OutreachMethod};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "leadboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lead store for outreach dashboards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all leads
    List,

    /// Show one lead
    Show {
        /// Lead id or slug
        lead: String,
    },

    /// Add a lead, or merge into the lead with the same id
    Add {
        /// Display name
        name: String,
        /// Lead id (default: random UUID)
        #[arg(long)]
        id: Option<String>,
        /// Navigation target (default: /leads/<slug>)
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Pipeline stage
        #[arg(long)]
        stage: Option<u32>,
        /// Outreach method (email, call)
        #[arg(long)]
        outreach: Option<OutreachMethod>,
        /// Latitude (requires --lng)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude (requires --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Update a lead from a JSON object; null clears a field
    Update {
        /// Lead id or slug
        lead: String,
        /// JSON object, e.g. '{"stage": 3, "notes": null}'
        updates: String,
    },

    /// Remove a lead
    Remove {
        /// Lead id or slug
        lead: String,
    },

    /// Add the sample leads
    Seed,

    /// Resolve a dashboard path
    Route {
        /// Path, e.g. /leads/tech-startup-nyc
        path: String,
    },

    /// Print map options and markers for all leads
    Map,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Flat CSV row for a lead
#[derive(Serialize)]
struct LeadRow<'a> {
    id: &'a str,
    name: &'a str,
    slug: &'a str,
    url: &'a str,
    stage: Option<u32>,
    outreach_method: Option<OutreachMethod>,
    address: Option<&'a str>,
    phone_number: Option<&'a str>,
    email: Option<&'a str>,
    website: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a Lead> for LeadRow<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            id: &lead.id,
            name: &lead.name,
            slug: &lead.slug,
            url: &lead.url,
            stage: lead.stage,
            outreach_method: lead.outreach_method,
            address: lead.address.as_deref(),
            phone_number: lead.phone_number.as_deref(),
            email: lead.email.as_deref(),
            website: lead.website.as_deref(),
            latitude: lead.coordinates.map(|c| c.latitude),
            longitude: lead.coordinates.map(|c| c.longitude),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.store.data_dir = dir.to_string_lossy().to_string();
    }
    leadboard::logging::init(&config.logging);

    match cli.command {
        Commands::List => {
            let store = LeadStore::from_config(&config.store);
            let leads: Vec<&Lead> = store.iter().collect();
            if leads.is_empty() && cli.format == "table" {
                println!("No leads yet.");
                println!();
                println!("Add sample data with:");
                println!("  leadboard seed");
            } else {
                print_leads(&leads, &cli.format)?;
            }
        }

        Commands::Show { lead } => {
            let store = LeadStore::from_config(&config.store);
            match store.get(&lead) {
                Some(found) => match cli.format.as_str() {
                    "table" => print_detail(found),
                    _ => print_leads(&[found], &cli.format)?,
                },
                None => {
                    eprintln!("Lead not found: {}", lead);
                    std::process::exit(1);
                }
            }
        }

        Commands::Add {
            name,
            id,
            url,
            address,
            email,
            phone,
            website,
            stage,
            outreach,
            lat,
            lng,
        } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let mut input = LeadInput::new(id.clone(), name);
            input.url = url;
            input.address = address.map(Some);
            input.email = email.map(Some);
            input.phone_number = phone.map(Some);
            input.website = website.map(Some);
            input.stage = stage.map(Some);
            input.outreach_method = outreach.map(Some);
            if let (Some(lat), Some(lng)) = (lat, lng) {
                input = input.coordinates(lat, lng);
            }

            let mut store = LeadStore::from_config(&config.store);
            let existed = store.get(&id).is_some();
            store.add(input);

            if let Some(lead) = store.get(&id) {
                let verb = if existed { "Merged" } else { "Added" };
                println!("{} {} ({})", verb, lead.name, lead.slug);
            }
        }

        Commands::Update { lead, updates } => {
            let updates: LeadUpdate = serde_json::from_str(&updates)?;
            let mut store = LeadStore::from_config(&config.store);
            if store.update(&lead, updates) {
                println!("Updated {}", lead);
            } else {
                eprintln!("Lead not found: {}", lead);
                std::process::exit(1);
            }
        }

        Commands::Remove { lead } => {
            let mut store = LeadStore::from_config(&config.store);
            match store.remove(&lead) {
                Some(removed) => println!("Removed {} ({})", removed.name, removed.id),
                None => println!("No lead matching {}", lead),
            }
        }

        Commands::Seed => {
            let mut store = LeadStore::from_config(&config.store);
            add_sample_leads(&mut store);
            println!("Store now holds {} leads", store.len());
        }

        Commands::Route { path } => match Route::resolve(&path) {
            Resolution::Matched(route) => println!("{}", route),
            Resolution::Redirect(route) => println!("Redirect to {}", route),
            Resolution::NotFound => {
                eprintln!("No route for {}", path);
                std::process::exit(1);
            }
        },

        Commands::Map => {
            let store = LeadStore::from_config(&config.store);
            let body = serde_json::json!({
                "map": MapOptions::centered_on(&bounds_for(&store)),
                "markers": lead_markers(&store),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn print_leads(leads: &[&Lead], format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(leads)?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for lead in leads {
                writer.serialize(LeadRow::from(*lead))?;
            }
            writer.flush()?;
        }
        _ => {
            println!(
                "{:<12} {:<28} {:<28} {:<6} {}",
                "ID", "Name", "Slug", "Stage", "Outreach"
            );
            println!("{}", "-".repeat(86));
            for lead in leads {
                println!(
                    "{:<12} {:<28} {:<28} {:<6} {}",
                    truncate(&lead.id, 12),
                    truncate(&lead.name, 28),
                    truncate(&lead.slug, 28),
                    lead.stage.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                    lead.outreach_method
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "-".into())
                );
            }
        }
    }
    Ok(())
}

fn print_detail(lead: &Lead) {
    println!("{}", lead.name);
    println!("{}", "-".repeat(lead.name.chars().count().max(20)));
    println!("ID:       {}", lead.id);
    println!("Slug:     {}", lead.slug);
    println!("URL:      {}", lead.url);
    println!("Icon:     {}", lead.icon);
    print_field("Stage", lead.stage.map(|s| s.to_string()));
    print_field("Outreach", lead.outreach_method.map(|m| m.to_string()));
    print_field("Address", lead.address.clone());
    print_field("Phone", lead.phone_number.clone());
    print_field("Email", lead.email.clone());
    print_field("Website", lead.website.clone());
    print_field(
        "Rating",
        lead.review_rate.map(|r| match lead.number_of_reviews {
            Some(n) => format!("{:.1} ({} reviews)", r, n),
            None => format!("{:.1}", r),
        }),
    );
    print_field(
        "Location",
        lead.coordinates
            .map(|c| format!("{:.4}, {:.4}", c.latitude, c.longitude)),
    );
    print_field("About", lead.description.clone());
    print_field("Notes", lead.notes.clone());
    print_field("Email log", lead.email_transcript.clone());
    print_field("Call log", lead.call_transcript.clone());
}

fn print_field(label: &str, value: Option<String>) {
    if let Some(value) = value {
        println!("{:<9} {}", format!("{}:", label), value);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
