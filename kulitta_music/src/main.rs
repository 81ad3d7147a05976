// Kulitta chord-progression generator: CLI entry point.
//
// Builds one of the stock rule tables, runs it from a single start symbol,
// and prints the resolved chords, one per line or as JSON.
//
// Usage:
//   cargo run -p kulitta_music --bin generate -- [--config FILE] [--seed N]
//     [--iterations N] [--grammar tsd|roman] [--mode NAME] [--key N]
//     [--dur D] [--json]
//
// Settings come from the config file (if any), then flags override them.
// Without --seed, a seed is drawn from the OS generator and logged so the run
// can be replayed.
// Log verbosity follows RUST_LOG and defaults to `info`.

use anyhow::Context;
use clap::Parser;
use kulitta_music::MusicRules;
use kulitta_music::alphabet::{CType, RTerm, ScaleDegree};
use kulitta_music::config::{GenerateConfig, GrammarKind, Overrides};
use kulitta_music::grammars::{roman_rules, tsd_rules};
use kulitta_music::mode::pitch_name;
use kulitta_music::pipeline::compose;
use kulitta_music::resolve::Chord;
use kulitta_prng::KulittaRng;
use log::{error, info, warn};
use std::fmt;

#[derive(Parser, Debug)]
#[command(name = "generate", about = "Generate a chord progression with a PTGG")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,
    /// Print the chords as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GenerateConfig::assemble(&cli.overrides)?;
    let seed = config.seed_or_random();
    info!(
        "{:?} grammar, {} passes, {} {:?}, seed {seed}",
        config.grammar,
        config.iterations,
        pitch_name(config.key),
        config.mode
    );

    let mut rng = KulittaRng::new(seed);
    match config.grammar {
        GrammarKind::Tsd => {
            let rules = tsd_rules(config.min_duration)?;
            emit(&rules, &mut rng, &config, RTerm::T, cli.json)
        }
        GrammarKind::Roman => {
            let rules = roman_rules(config.min_duration)?;
            emit(&rules, &mut rng, &config, CType::I, cli.json)
        }
    }
}

fn emit<S>(
    rules: &MusicRules<S>,
    rng: &mut KulittaRng,
    config: &GenerateConfig,
    start: S,
    json: bool,
) -> anyhow::Result<()>
where
    S: PartialEq + Clone + fmt::Debug + fmt::Display + ScaleDegree + serde::Serialize,
{
    for symbol in rules.unnormalized(1e-6) {
        warn!(
            "rules for {symbol:?} sum to {}, not 1",
            rules.total_probability(symbol)
        );
    }
    let chords = compose(rules, rng, config.iterations, start, config.start_param())?;
    info!("{} chords", chords.len());

    if json {
        let out = serde_json::to_string_pretty(&chords).context("serializing chords")?;
        println!("{out}");
    } else {
        for chord in &chords {
            println!("{}", describe(chord));
        }
    }
    Ok(())
}

fn describe<S: fmt::Display + ScaleDegree>(chord: &Chord<S>) -> String {
    let root = chord.root_pitch_class().map_or("-", pitch_name);
    format!(
        "{:>7.4}  {:<4} {:<3} in {} {:?}  ({} measures)",
        chord.param.onset,
        chord.symbol,
        root,
        pitch_name(chord.param.key),
        chord.param.mode,
        chord.param.dur
    )
}
