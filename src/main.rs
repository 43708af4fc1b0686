//! # Faro CLI
//!
//! Command-line client for a remote QR generation service.
//!
//! ## Usage
//!
//! ```bash
//! # List available content types
//! faro types
//!
//! # Show the form fields for a type
//! faro fields wifi
//!
//! # Generate and save a QR image
//! faro generate wifi -f ssid=Home -f password=secret -f encryption=WPA
//!
//! # Also emit the SVG container wrap
//! faro generate url -f url=https://example.com --out qr.png --svg qr.svg
//!
//! # Inspect or change persisted common options
//! faro options
//! faro options --set style=ROUNDED_MODULE --set fill_color='#202020'
//!
//! # Run the local preview server
//! faro serve --listen 127.0.0.1:8080
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use faro::FaroError;
use faro::client::Dispatcher;
use faro::media::FailurePolicy;
use faro::options::{FileStore, OptionsStore};
use faro::schema::{self, QrType};
use faro::server::{self, ServerConfig};
use faro::studio::Studio;

/// Faro - QR code generation client
#[derive(Parser, Debug)]
#[command(name = "faro")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available content types
    Types,

    /// Show the input fields for a content type
    Fields {
        /// Content type (e.g. url, wifi, vcard)
        qr_type: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a QR image and save it
    Generate {
        /// Content type (e.g. url, wifi, vcard)
        qr_type: String,

        /// Field value, repeatable (name=value)
        #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Common option override, repeatable (name=value)
        #[arg(long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,

        /// Generation service base URL
        #[arg(long, default_value = "http://localhost:8000")]
        base_url: String,

        /// Output PNG path
        #[arg(long, default_value = "qr-code.png")]
        out: PathBuf,

        /// Also write the SVG container wrap to this path
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Persisted common-options file
        #[arg(long, default_value = "faro-options.json")]
        options_file: PathBuf,
    },

    /// Show or update persisted common options
    Options {
        /// Set an option (name=value), repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Persisted common-options file
        #[arg(long, default_value = "faro-options.json")]
        options_file: PathBuf,
    },

    /// Run the local preview server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Generation service base URL
        #[arg(long, default_value = "http://localhost:8000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), FaroError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Types => {
            for ty in schema::QR_TYPES {
                println!("{:<10} {}", ty.as_str(), ty.label());
            }
            Ok(())
        }

        Commands::Fields { qr_type, json } => {
            let ty = parse_type(&qr_type)?;
            let fields = schema::fields(ty);
            if json {
                let text = serde_json::to_string_pretty(&fields)
                    .map_err(|e| FaroError::Store(e.to_string()))?;
                println!("{text}");
            } else {
                for field in &fields {
                    let marker = if field.required { "*" } else { " " };
                    print!("{marker} {:<22} {}", field.name, field.label);
                    if !field.options.is_empty() {
                        let values: Vec<&str> =
                            field.options.iter().map(|o| o.value).collect();
                        print!("  [{}]", values.join(", "));
                    }
                    println!();
                }
            }
            Ok(())
        }

        Commands::Generate {
            qr_type,
            fields,
            options,
            base_url,
            out,
            svg,
            options_file,
        } => {
            let ty = parse_type(&qr_type)?;
            let dispatcher = Dispatcher::over_http(&base_url);
            let mut studio = Studio::new(
                ty,
                dispatcher,
                FileStore::new(options_file),
                FailurePolicy::default(),
            );

            for raw in &fields {
                let (name, value) = parse_pair(raw)?;
                studio.set_field(name, value);
            }
            for raw in &options {
                let (name, value) = parse_pair(raw)?;
                studio.set_option(&name, &value)?;
            }

            studio.submit().await?;

            if let Some(image) = studio.media().current() {
                std::fs::write(&out, image.bytes())?;
                println!("Wrote {}", out.display());
                if let Some(svg_path) = svg {
                    std::fs::write(&svg_path, image.to_svg()?)?;
                    println!("Wrote {}", svg_path.display());
                }
            }
            Ok(())
        }

        Commands::Options { set, options_file } => {
            let mut store = OptionsStore::new(FileStore::new(options_file));
            if set.is_empty() {
                let current = store.load();
                if current.is_empty() {
                    println!("No saved options.");
                }
                for (name, value) in current {
                    println!("{name} = {value}");
                }
            } else {
                let mut current = store.load();
                for raw in &set {
                    let (name, value) = parse_pair(raw)?;
                    if !schema::common_fields().iter().any(|f| f.name == name) {
                        return Err(FaroError::Validation {
                            field: name,
                            message: "unknown common option".to_string(),
                        });
                    }
                    current.insert(name, value);
                }
                store.save(&current)?;
                println!("Saved {} option(s).", set.len());
            }
            Ok(())
        }

        Commands::Serve { listen, base_url } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                upstream_url: base_url,
            })
            .await
        }
    }
}

fn parse_type(name: &str) -> Result<QrType, FaroError> {
    QrType::parse(name).ok_or_else(|| FaroError::Validation {
        field: "type".to_string(),
        message: format!("unknown content type '{name}'. Run 'faro types' to see what's available."),
    })
}

fn parse_pair(raw: &str) -> Result<(String, String), FaroError> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| FaroError::Validation {
            field: raw.to_string(),
            message: "expected NAME=VALUE".to_string(),
        })
}
