use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vocab_trainer::config::Config;
use vocab_trainer::logging::{init_tracing, LogConfig};
use vocab_trainer::session::{MatchSession, PickOutcome, Side};
use vocab_trainer::store::operations::settings::Direction;
use vocab_trainer::store::Store;
use vocab_trainer::transfer::{self, ImportMode};

const USAGE: &str = "\
vocab-trainer — adaptive word-pair matching trainer

USAGE:
    vocab-trainer <command> [args]

COMMANDS:
    list                         show all word pairs, newest first
    add <native> <target> [--hard]
    delete <id>
    toggle-hard <id>
    reset                        reset all weights and counters
    direction [flip]             show or flip the practice direction
    export <file>                write the collection as CSV
    import <file> [--replace]    merge (default) or replace from CSV
    play                         run matching rounds in the terminal
";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });

    let store = match Store::open(&config.sled_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open store at {}: {e}", config.sled_path);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("list") => cmd_list(&store),
        Some("add") => cmd_add(&store, &args[1..]),
        Some("delete") => cmd_delete(&store, &args[1..]),
        Some("toggle-hard") => cmd_toggle_hard(&store, &args[1..]),
        Some("reset") => cmd_reset(&store),
        Some("direction") => cmd_direction(&store, &args[1..]),
        Some("export") => cmd_export(&store, &args[1..]),
        Some("import") => cmd_import(&store, &args[1..]),
        Some("play") => cmd_play(&store, &config),
        _ => {
            eprint!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn cmd_list(store: &Store) -> CmdResult {
    let entries = store.load_entries()?;
    println!("{} pair(s)", entries.len());
    for entry in entries {
        let hard_mark = if entry.hard { " ★" } else { "" };
        println!(
            "{}  {} — {}{}  (weight {:.2}, {}✓/{}✗)",
            entry.id,
            entry.native,
            entry.target,
            hard_mark,
            entry.weight,
            entry.correct_count,
            entry.incorrect_count
        );
    }
    Ok(())
}

fn cmd_add(store: &Store, args: &[String]) -> CmdResult {
    let (pair, hard) = match args {
        [native, target] => ((native, target), false),
        [native, target, flag] if flag == "--hard" => ((native, target), true),
        _ => return Err("usage: add <native> <target> [--hard]".into()),
    };
    let entry = store.add_entry(pair.0, pair.1, hard)?;
    println!("added {}", entry.id);
    Ok(())
}

fn cmd_delete(store: &Store, args: &[String]) -> CmdResult {
    let [id] = args else {
        return Err("usage: delete <id>".into());
    };
    store.delete_entry(id)?;
    Ok(())
}

fn cmd_toggle_hard(store: &Store, args: &[String]) -> CmdResult {
    let [id] = args else {
        return Err("usage: toggle-hard <id>".into());
    };
    store.toggle_hard(id)?;
    Ok(())
}

fn cmd_reset(store: &Store) -> CmdResult {
    store.reset_all_weights()?;
    println!("weights and counters reset");
    Ok(())
}

fn cmd_direction(store: &Store, args: &[String]) -> CmdResult {
    let direction = match args.first().map(String::as_str) {
        Some("flip") => {
            let flipped = store.get_direction()?.flipped();
            store.set_direction(flipped)?;
            flipped
        }
        None => store.get_direction()?,
        Some(other) => return Err(format!("unknown direction argument: {other}").into()),
    };
    match direction {
        Direction::NativeToTarget => println!("native → target"),
        Direction::TargetToNative => println!("target → native"),
    }
    Ok(())
}

fn cmd_export(store: &Store, args: &[String]) -> CmdResult {
    let [path] = args else {
        return Err("usage: export <file>".into());
    };
    let entries = store.load_entries()?;
    let csv_text = transfer::export_csv(&entries)?;
    fs::write(path, csv_text)?;
    println!("exported {} pair(s) to {path}", entries.len());
    Ok(())
}

fn cmd_import(store: &Store, args: &[String]) -> CmdResult {
    let (path, mode) = match args {
        [path] => (path, ImportMode::Merge),
        [path, flag] if flag == "--replace" => (path, ImportMode::Replace),
        _ => return Err("usage: import <file> [--replace]".into()),
    };
    let text = fs::read_to_string(path)?;
    let rows = transfer::parse_csv(&text)?;
    let stats = transfer::apply_import(store, &rows, mode)?;
    println!("imported {} pair(s), skipped {}", stats.added, stats.skipped);
    Ok(())
}

/// 终端版配对练习：纯粹的 UI 胶水，所有规则都在库里。
fn cmd_play(store: &Store, config: &Config) -> CmdResult {
    if store.count_entries()? == 0 {
        return Err("no word pairs yet — add some first".into());
    }

    let mut rng = StdRng::from_entropy();
    let mut session = MatchSession::new(config.round_size);
    session.start_round(store, &mut rng)?;

    let stdin = io::stdin();
    println!("Match the columns. Pick like `l2` then `r5`; `q` quits.");

    loop {
        print_board(&session);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim().to_lowercase();
        if input == "q" || input == "quit" {
            break;
        }

        let Some((side, index)) = parse_pick(&input) else {
            println!("pick like `l2` or `r5`");
            continue;
        };
        let pool = match side {
            Side::Left => session.left(),
            Side::Right => session.right(),
        };
        let Some(tile) = pool.get(index) else {
            println!("no such tile");
            continue;
        };
        let pair_id = tile.pair_id.clone();

        match session.pick_tile(store, side, &pair_id)? {
            PickOutcome::Ignored => println!("(ignored)"),
            PickOutcome::Selected => {}
            PickOutcome::Evaluated(feedback) => {
                println!("{}", if feedback.correct { "✓ match!" } else { "✗ no match" });
                thread::sleep(Duration::from_millis(config.feedback_delay_ms));
                session.resolve_feedback(store, &mut rng, feedback.token)?;
            }
        }
    }

    Ok(())
}

fn parse_pick(input: &str) -> Option<(Side, usize)> {
    let side = match input.chars().next()? {
        'l' => Side::Left,
        'r' => Side::Right,
        _ => return None,
    };
    let index: usize = input[1..].parse().ok()?;
    index.checked_sub(1).map(|i| (side, i))
}

fn print_board(session: &MatchSession) {
    println!();
    let rows = session.left().len().max(session.right().len());
    for i in 0..rows {
        let left = session
            .left()
            .get(i)
            .map(|t| format!("l{}  {}", i + 1, t.text))
            .unwrap_or_default();
        let right = session
            .right()
            .get(i)
            .map(|t| format!("r{}  {}", i + 1, t.text))
            .unwrap_or_default();
        println!("{left:<32}{right}");
    }
}
