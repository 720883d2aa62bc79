use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uwb_config_lib::pack::{decode_hex, parse_hex_field};
use uwb_config_lib::{DeviceConfig, PhoneConfig, RangingRole, UpdateRate};

/// Encode and decode UWB accessory and phone ranging configuration blobs.
#[derive(Parser, Debug)]
#[command(name = "uwbcfg", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Print records as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Phone-side configuration (30 bytes).
    #[command(subcommand)]
    Phone(PhoneCommand),
    /// Device-side (accessory) configuration.
    #[command(subcommand)]
    Device(DeviceCommand),
}

#[derive(Subcommand, Debug)]
enum PhoneCommand {
    /// Encode the default ranging profile with optional overrides.
    Encode(PhoneEncodeArgs),
    /// Decode a hex blob.
    Decode {
        /// Hex-encoded config, separators allowed.
        hex: String,
    },
}

#[derive(Args, Debug)]
struct PhoneEncodeArgs {
    /// Session ID, decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_u32, default_value = "0")]
    session_id: u32,
    /// UWB channel.
    #[arg(long)]
    channel: Option<u8>,
    /// Preamble code index.
    #[arg(long)]
    preamble_id: Option<u8>,
    /// Phone MAC address (2 bytes hex).
    #[arg(long)]
    mac: Option<String>,
    /// Static STS IV (6 bytes hex, wire order).
    #[arg(long)]
    sts_iv: Option<String>,
}

#[derive(Subcommand, Debug)]
enum DeviceCommand {
    /// Encode a device config with a standard payload.
    Encode(DeviceEncodeArgs),
    /// Decode a hex blob.
    Decode {
        /// Hex-encoded config, separators allowed.
        hex: String,
    },
}

#[derive(Args, Debug)]
struct DeviceEncodeArgs {
    /// Device MAC address (2 bytes hex).
    #[arg(long)]
    mac: String,
    #[arg(long, value_enum, default_value_t = Role::Controlee)]
    role: Role,
    /// Preferred update rate: 0 automatic, 10 infrequent, 20 user interactive.
    #[arg(long, default_value_t = 20)]
    update_rate: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Role {
    Controlee,
    Controller,
}

impl From<Role> for RangingRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Controlee => RangingRole::Controlee,
            Role::Controller => RangingRole::Controller,
        }
    }
}

fn parse_u32(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex_digits) => u32::from_str_radix(hex_digits, 16),
        None => text.parse(),
    };
    parsed.map_err(|e| format!("invalid u32 '{}': {}", text, e))
}

fn setup_logging(log_file_path: Option<PathBuf>, verbosity: &Verbosity<InfoLevel>) -> Result<Option<WorkerGuard>> {
    // stdout carries the encoded/decoded output
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time();

    let (file_layer, guard) = if let Some(ref path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

fn run_phone(command: PhoneCommand, json: bool) -> Result<()> {
    match command {
        PhoneCommand::Encode(args) => {
            let mut config = PhoneConfig::default().with_session_id(args.session_id);
            if let Some(channel) = args.channel {
                config.channel = channel;
            }
            if let Some(preamble_id) = args.preamble_id {
                config.preamble_id = preamble_id;
            }
            if let Some(mac) = args.mac {
                config = config.with_phone_mac_address(parse_hex_field("mac", &mac)?);
            }
            if let Some(iv) = args.sts_iv {
                config = config.with_static_sts_iv(parse_hex_field("sts-iv", &iv)?);
            }

            let bytes = config.to_bytes();
            debug!(len = bytes.len(), "encoded phone config");
            if json {
                let out = serde_json::json!({ "hex": hex::encode(&bytes), "config": config });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", hex::encode(&bytes));
            }
        }
        PhoneCommand::Decode { hex } => {
            let bytes = decode_hex(&hex).context("Invalid hex input")?;
            let config = PhoneConfig::from_bytes(&bytes).context("Failed to decode phone config")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{}", config);
                println!("  Round duration: {} RSTU", config.round_duration_rstu());
                println!("  Static STS IV:  {}", hex::encode_upper(config.static_sts_iv));
            }
        }
    }
    Ok(())
}

fn run_device(command: DeviceCommand, json: bool) -> Result<()> {
    match command {
        DeviceCommand::Encode(args) => {
            let mut config = DeviceConfig::new(args.role.into(), parse_hex_field("mac", &args.mac)?);
            config.preferred_update_rate = UpdateRate::from(args.update_rate);

            let bytes = config.to_bytes().context("Failed to encode device config")?;
            debug!(len = bytes.len(), "encoded device config");
            if json {
                let out = serde_json::json!({ "hex": hex::encode(&bytes), "config": config });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", hex::encode(&bytes));
            }
        }
        DeviceCommand::Decode { hex } => {
            let bytes = decode_hex(&hex).context("Invalid hex input")?;
            let config = DeviceConfig::from_bytes(&bytes).context("Failed to decode device config")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{}", config);
                println!("  RFU: {}", hex::encode_upper(config.reserved));
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Must outlive every log call; dropping it flushes the file writer
    let _guard = match setup_logging(cli.log_file, &cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Phone(command) => run_phone(command, cli.json),
        Command::Device(command) => run_device(command, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
