use clap::Parser;
use triplereplay::{compute_ruleset_id, RulesetRegistry};

#[derive(Debug, Parser)]
#[command(name = "ruleset", about = "Resolve a ruleset preset and print its identity")]
struct Args {
    /// Preset key: v1 | v2 | shadow | classic_custom
    key: String,

    /// Classic toggle mask (two hex digits), only for classic_custom
    #[arg(long)]
    mask: Option<String>,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let registry = RulesetRegistry::builtin();
    let config = registry.resolve(&args.key, args.mask.as_deref()).map_err(|e| {
        format!("{e} (known keys: {})", registry.keys().join(", "))
    })?;

    println!("{}", compute_ruleset_id(&config));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
