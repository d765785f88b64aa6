//! tp: CLI binary for the ten-pin bowling scorer.
//!
//! Subcommands:
//! - score
//! - sim

use std::collections::HashMap;
use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use tp_core::{random_game, total_score, Frame, Game};
use tp_logging::{now_ms, GameScoredEventV1, NdjsonError, NdjsonWriter, RollEventV1};

/// Score a completed game given as roll operands (or on stdin).
fn cmd_score(args: &[String]) {
    let mut show_frames = false;
    let mut log_path: Option<PathBuf> = None;
    let mut operands: Vec<String> = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"tp score

USAGE:
    tp score [ROLLS...] [--frames] [--log FILE]

Rolls are pin counts (0-10) in delivery order, including any tenth-frame
bonus rolls. With no roll operands, rolls are read whitespace-separated
from stdin.

OPTIONS:
    --frames     Print the per-frame scorecard
    --log FILE   Append NDJSON roll/score events to FILE
"#
                );
                return;
            }
            "--frames" => {
                show_frames = true;
                i += 1;
            }
            "--log" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --log");
                    process::exit(1);
                }
                log_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option for `tp score`: {}", other);
                eprintln!("Run `tp score --help` for usage.");
                process::exit(1);
            }
            _ => {
                operands.push(args[i].clone());
                i += 1;
            }
        }
    }

    let words: Vec<String> = if operands.is_empty() {
        let mut buf = String::new();
        if std::io::stdin().read_to_string(&mut buf).is_err() {
            eprintln!("Failed to read rolls from stdin");
            process::exit(1);
        }
        buf.split_whitespace().map(|s| s.to_string()).collect()
    } else {
        operands
    };

    if words.is_empty() {
        eprintln!("No rolls given (pass them as arguments or on stdin)");
        process::exit(1);
    }

    let mut game = Game::new();
    for w in &words {
        let pins: u8 = w.parse().unwrap_or_else(|_| {
            eprintln!("Invalid roll value: {}", w);
            process::exit(1);
        });
        if let Err(e) = game.record(pins) {
            eprintln!("Rejected roll: {}", e);
            process::exit(1);
        }
    }

    let total = game.total_score().unwrap_or_else(|e| {
        eprintln!("Cannot score: {}", e);
        process::exit(1);
    });

    if let Some(path) = &log_path {
        if let Err(e) = log_scored_game(path, 0, game.rolls(), total) {
            eprintln!("Failed to write log: {}", e);
            process::exit(1);
        }
    }

    if show_frames {
        let frames = game.frame_scores().unwrap_or_else(|e| {
            eprintln!("Cannot score: {}", e);
            process::exit(1);
        });
        println!("Frame  Rolls  Score  Total");
        for (idx, fs) in frames.iter().enumerate() {
            println!(
                "{:>5}  {:<5}  {:>5}  {:>5}",
                idx + 1,
                format_frame(fs.frame),
                fs.score,
                fs.running_total
            );
        }
    }

    println!("Total score: {}", total);
}

/// Short scorecard notation for one frame.
fn format_frame(frame: Frame) -> String {
    match frame {
        Frame::Strike => "X".to_string(),
        Frame::Spare { first } => format!("{} /", first),
        Frame::Open { first, second } => format!("{} {}", first, second),
    }
}

fn log_scored_game(
    path: &Path,
    game_id: u64,
    rolls: &[u8],
    total: u16,
) -> Result<(), NdjsonError> {
    let mut w = NdjsonWriter::open_append(path)?;
    let ts_ms = now_ms();
    for (idx, &pins) in rolls.iter().enumerate() {
        w.write_event(&RollEventV1 {
            event: "roll",
            ts_ms,
            game_id,
            roll_index: idx as u32,
            pins,
        })?;
    }
    w.write_event(&GameScoredEventV1 {
        event: "game_scored",
        ts_ms,
        game_id,
        rolls: rolls.to_vec(),
        total_score: total,
    })?;
    w.flush()
}

/// Simulate random complete games and report the score distribution.
fn cmd_sim(args: &[String]) {
    let mut games: usize = 10_000;
    let mut seed: u64 = 0;
    let mut no_hist = false;
    let mut log_path: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"tp sim

USAGE:
    tp sim [--games N] [--seed S] [--no-hist] [--log FILE]

OPTIONS:
    --games N    Number of games to simulate (default: 10000)
    --seed S     RNG seed (default: 0)
    --no-hist    Skip printing histogram
    --log FILE   Append an NDJSON game_scored event per game to FILE
"#
                );
                return;
            }
            "--games" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --games");
                    process::exit(1);
                }
                games = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --games value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--seed" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --seed");
                    process::exit(1);
                }
                seed = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {}", args[i + 1]);
                    process::exit(1);
                });
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            "--log" => {
                if i + 1 >= args.len() {
                    eprintln!("Missing value for --log");
                    process::exit(1);
                }
                log_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `tp sim`: {}", other);
                eprintln!("Run `tp sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    if games == 0 {
        eprintln!("--games must be at least 1");
        process::exit(1);
    }

    let mut writer = match &log_path {
        Some(path) => match NdjsonWriter::open_append_with_flush(path, 1024) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!("Failed to open log file: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scores = Vec::with_capacity(games);

    for game_id in 0..games as u64 {
        let rolls = random_game(&mut rng);
        let total = total_score(&rolls).unwrap_or_else(|e| {
            eprintln!("Generated an unscorable game: {}", e);
            process::exit(1);
        });

        if let Some(w) = writer.as_mut() {
            let res = w.write_event(&GameScoredEventV1 {
                event: "game_scored",
                ts_ms: now_ms(),
                game_id,
                rolls: rolls.clone(),
                total_score: total,
            });
            if let Err(e) = res {
                eprintln!("Failed to write log: {}", e);
                process::exit(1);
            }
        }

        scores.push(total);
    }

    if let Some(w) = writer.as_mut() {
        if let Err(e) = w.flush() {
            eprintln!("Failed to flush log: {}", e);
            process::exit(1);
        }
    }

    let s = summarize_scores(&scores);

    println!("Simulation:");
    println!("  - Games: {}", games);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );

    if !no_hist {
        print_histogram(&scores);
    }
}

struct ScoreSummary {
    mean: f64,
    median: u16,
    std_dev: f64,
    min: u16,
    max: u16,
}

fn summarize_scores(scores: &[u16]) -> ScoreSummary {
    // Single pass for min/max/mean/std + a frequency table for exact median.
    let mut min = u16::MAX;
    let mut max = u16::MIN;
    let mut sum = 0f64;
    let mut sum_sq = 0f64;

    for &s in scores {
        min = min.min(s);
        max = max.max(s);
        let sf = f64::from(s);
        sum += sf;
        sum_sq += sf * sf;
    }

    let n = scores.len() as f64;
    let mean = sum / n;
    let var = (sum_sq / n) - mean * mean;
    let std_dev = var.max(0.0).sqrt();

    // Median via frequency table over [min..max].
    let range = (max - min) as usize + 1;
    let mut freq = vec![0usize; range];
    for &s in scores {
        freq[(s - min) as usize] += 1;
    }
    let target = scores.len() / 2;
    let mut cum = 0usize;
    let mut median = min;
    for (i, &c) in freq.iter().enumerate() {
        cum += c;
        if cum > target {
            median = min + i as u16;
            break;
        }
    }

    ScoreSummary {
        mean,
        median,
        std_dev,
        min,
        max,
    }
}

/// Print a histogram of scores (bucket size = 10).
fn print_histogram(scores: &[u16]) {
    let s = summarize_scores(scores);

    let bucket_size = 10u16;
    let min_bucket = (s.min / bucket_size) * bucket_size;
    let max_bucket = (s.max / bucket_size) * bucket_size;

    let mut buckets: HashMap<u16, usize> = HashMap::new();
    for &score in scores {
        let bucket = (score / bucket_size) * bucket_size;
        *buckets.entry(bucket).or_insert(0) += 1;
    }

    let max_count = *buckets.values().max().unwrap_or(&1);
    let bar_width = 50usize;

    println!("\nScore histogram (N={}, bin=10):", scores.len());
    println!("{}", "─".repeat(70));

    let mut bucket = min_bucket;
    while bucket <= max_bucket {
        let count = *buckets.get(&bucket).unwrap_or(&0);
        let bar_len = (count * bar_width) / max_count.max(1);
        let bar: String = "█".repeat(bar_len);

        println!(
            "{:3}-{:3} │{:<50} {:4} ({:.1}%)",
            bucket,
            bucket + bucket_size - 1,
            bar,
            count,
            (count as f64 / scores.len() as f64) * 100.0
        );

        bucket += bucket_size;
    }

    println!("{}", "─".repeat(70));
}

fn print_help() {
    eprintln!(
        r#"tp - ten-pin bowling scorer

USAGE:
    tp <COMMAND> [OPTIONS]

COMMANDS:
    score       Score a completed game from a list of rolls
    sim         Simulate random complete games and report score stats

OPTIONS:
    -h, --help      Print this help message
    -V, --version   Print version
"#
    );
}

fn print_version() {
    println!("tp {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "score" => {
            cmd_score(&args[2..]);
        }
        "sim" => {
            cmd_sim(&args[2..]);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run `tp --help` for usage.");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_constant_scores() {
        let s = summarize_scores(&[42, 42, 42, 42]);
        assert_eq!(s.min, 42);
        assert_eq!(s.max, 42);
        assert_eq!(s.median, 42);
        assert!((s.mean - 42.0).abs() < 1e-9);
        assert!(s.std_dev.abs() < 1e-9);
    }

    #[test]
    fn summary_median_is_exact() {
        let s = summarize_scores(&[0, 10, 20, 30, 300]);
        assert_eq!(s.median, 20);
        assert_eq!(s.min, 0);
        assert_eq!(s.max, 300);
    }

    #[test]
    fn frame_notation() {
        assert_eq!(format_frame(Frame::Strike), "X");
        assert_eq!(format_frame(Frame::Spare { first: 7 }), "7 /");
        assert_eq!(format_frame(Frame::Open { first: 3, second: 4 }), "3 4");
    }
}
