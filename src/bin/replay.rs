use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use triplereplay::{
    board_advantage, compute_ruleset_id, load_catalog_from_json, simulate, Board, Deck,
    MatchReplay, MatchSetup, RulesetRegistry, Side, Transcript,
};

#[derive(Debug, Parser)]
#[command(name = "replay", about = "Replay a hex transcript and print the board history")]
struct Args {
    /// Hex transcript, optionally 0x-prefixed (4 bytes per turn)
    transcript: String,

    /// Cards JSON path
    #[arg(long, default_value = "data/cards.json")]
    cards: PathBuf,

    /// Ruleset preset key: v1 | v2 | shadow | classic_custom
    #[arg(long, default_value = "v2")]
    ruleset: String,

    /// Classic toggle mask (two hex digits), only for classic_custom
    #[arg(long)]
    mask: Option<String>,

    /// Side A deck as five comma-separated card ids
    #[arg(long, default_value = "1,2,3,4,5")]
    deck_a: String,

    /// Side B deck as five comma-separated card ids
    #[arg(long, default_value = "6,7,8,9,10")]
    deck_b: String,

    /// Seed for random elemental terrain (omit for no terrain)
    #[arg(long)]
    terrain_seed: Option<u64>,

    /// Emit the full replay as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ReplayOut<'a> {
    ruleset_id: String,
    replay: &'a MatchReplay,
}

fn parse_deck(label: &str, s: &str) -> Result<Deck, String> {
    let ids: Vec<u32> = s
        .split(',')
        .map(|x| x.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid card id in deck {label} '{s}': {e}"))?;
    if ids.len() != 5 {
        return Err(format!("Expected 5 card ids for deck {label}, got {}", ids.len()));
    }
    Ok([ids[0], ids[1], ids[2], ids[3], ids[4]])
}

fn print_board(board: &Board) {
    for r in 0..3u8 {
        for c in 0..3u8 {
            match board.get(r * 3 + c) {
                Some(slot) => {
                    let owner = match slot.owner {
                        Side::A => 'A',
                        Side::B => 'B',
                    };
                    print!("{owner}:{:>4}  ", slot.card_id);
                }
                None => print!("  .     "),
            }
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let cards = load_catalog_from_json(&args.cards).map_err(|e| format!("Cards load error: {e}"))?;
    let ruleset = RulesetRegistry::builtin()
        .resolve(&args.ruleset, args.mask.as_deref())
        .map_err(|e| format!("Ruleset error: {e}"))?;
    let transcript =
        Transcript::from_hex(&args.transcript).map_err(|e| format!("Transcript error: {e}"))?;

    let mut setup = MatchSetup::new(parse_deck("A", &args.deck_a)?, parse_deck("B", &args.deck_b)?);
    if let Some(seed) = args.terrain_seed {
        setup = setup.with_random_terrain(seed);
    }

    let replay = simulate(&cards, &setup, &transcript, &ruleset)
        .map_err(|e| format!("Replay failed at {e}"))?;
    let ruleset_id = compute_ruleset_id(&ruleset);

    if args.json {
        let out = ReplayOut {
            ruleset_id,
            replay: &replay,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Ruleset {} ({ruleset_id})", args.ruleset);
    for t in &replay.turns {
        println!(
            "Turn {}: {:?} plays card {} at cell {}, flipped {:?}",
            t.turn + 1,
            t.side,
            t.card_id,
            t.mv.cell,
            t.flipped
        );
        print_board(&t.board);
    }
    if let Some(last) = replay.board_history.last() {
        let adv = board_advantage(last, &cards);
        println!("Advantage {} ({:?})", adv.score, adv.label);
    }
    println!("Tiles A={} B={}", replay.tiles.a, replay.tiles.b);
    if let Some(outcome) = replay.outcome {
        println!("Outcome {outcome:?}");
    }
    Ok(())
}
