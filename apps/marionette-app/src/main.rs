//! Marionette retargeting CLI.
//!
//! Provides three modes of operation:
//! - `validate`: Parse and validate a retarget configuration file
//! - `apply`: Run the mapping list against the configured armatures and
//!   print the generated constraint stacks
//! - `info`: Print workspace crate versions

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use marionette_armature::{Constraint, ConstraintParams};
use marionette_core::config::RetargetConfig;
use marionette_core::error::MarionetteError;
use marionette_retarget::{MappingList, Session};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Marionette armature retargeting.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a retarget configuration file.
    Validate {
        /// Path to the TOML configuration.
        config: PathBuf,
    },

    /// Apply the configured mappings and print the constraint stacks.
    Apply {
        /// Path to the TOML configuration.
        config: PathBuf,
    },

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_validate(path: &Path) -> Result<(), MarionetteError> {
    let config = RetargetConfig::from_file(path)?;
    println!(
        "ok: {} mapping(s), owner '{}' ({} bones), target '{}' ({} bones)",
        config.mappings.len(),
        config.owner.name,
        config.owner.bones.len(),
        config.target.name,
        config.target.bones.len()
    );
    Ok(())
}

fn describe(constraint: &Constraint) -> String {
    let state = if constraint.enabled {
        "enabled"
    } else {
        "disabled"
    };
    let target = constraint
        .target
        .as_ref()
        .map_or_else(|| "-".to_string(), |t| format!("{}/{}", t.armature, t.bone));
    let params = match &constraint.params {
        ConstraintParams::CopyRotation => String::new(),
        ConstraintParams::RotationOffset { angles } => {
            format!(
                " offset=[{:.3}, {:.3}, {:.3}]",
                angles.x, angles.y, angles.z
            )
        }
        ConstraintParams::CopyLocation { axes } => {
            format!(" axes=[{}, {}, {}]", axes.x, axes.y, axes.z)
        }
        ConstraintParams::Ik {
            influence,
            chain_length,
            use_tail,
        } => format!(" influence={influence:.2} chain={chain_length} use_tail={use_tail}"),
    };
    format!("{:<16} {state:<8} -> {target}{params}", constraint.name)
}

fn run_apply(path: &Path) -> Result<(), MarionetteError> {
    let config = RetargetConfig::from_file(path)?;
    let mut session = Session::from_config(&config);
    let list = MappingList::from_config(&mut session, &config)?;

    println!(
        "session: preview={} calc_offset={} ortho_offset={}",
        session.preview, session.calc_offset, session.ortho_offset
    );
    println!("mapped {} bone(s) on '{}':", list.len(), session.owner.name);

    for entry in list.iter() {
        let validity = if entry.is_valid(&session) {
            "valid"
        } else {
            "unresolved"
        };
        println!("  {} -> {} ({validity})", entry.owner(), entry.target());
        if let Some(bone) = session.owner.bone(entry.owner()) {
            for constraint in bone.constraints.iter() {
                println!("    {}", describe(constraint));
            }
        }
    }
    Ok(())
}

fn run_info() {
    println!("marionette v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  marionette-core      {}", env!("CARGO_PKG_VERSION"));
    println!("  marionette-armature  {}", env!("CARGO_PKG_VERSION"));
    println!("  marionette-solver    {}", env!("CARGO_PKG_VERSION"));
    println!("  marionette-retarget  {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config } => run_validate(&config),
        Commands::Apply { config } => run_apply(&config),
        Commands::Info => {
            run_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
