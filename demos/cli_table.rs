//! CLI scorekeeper example.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bankroll::{
    HandOutcome, HandReport, LedgerError, Money, Player, PlayerId, Table, TableOptions, TableState,
};

fn main() {
    println!("Bank table scorekeeper (type 'quit' to leave)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = TableOptions::default();
    let table = Table::new(options, seed);

    loop {
        let Some(names) = prompt_line("Players, comma separated, in turn order: ") else {
            return;
        };
        if names == "quit" {
            return;
        }
        let names: Vec<&str> = names.split(',').map(str::trim).collect();

        let Some(ante_text) = prompt_line(&format!("Ante (enter for {}): ", options.default_ante))
        else {
            return;
        };
        let ante = if ante_text.is_empty() {
            Ok(options.default_ante)
        } else {
            ante_text.parse::<Money>()
        };

        match ante.and_then(|ante| table.initialize(&names, ante)) {
            Ok(()) => break,
            Err(err) => println!("Setup error: {err}"),
        }
    }

    let mut hint: Option<PlayerId> = None;

    loop {
        let Some(state) = table.snapshot() else {
            return;
        };
        print_table(&table, &state, hint);

        let Some(line) = prompt_line("> ") else {
            table.exit();
            return;
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        let result = match words.as_slice() {
            ["start" | "s"] => table.start_round().map(|first| hint = first),
            ["hand" | "h", seat, amount, who] => {
                let Some(outcome) = parse_outcome(who) else {
                    println!("Winner must be 'b' (bank) or 'c' (challenger).");
                    continue;
                };
                parse_seat(&state, seat)
                    .and_then(|challenger| amount.parse::<Money>().map(|amount| (challenger, amount)))
                    .and_then(|(challenger, amount)| {
                        table
                            .record_hand(challenger, amount, outcome)
                            .map(|report| hint = report_hand(&state, &report))
                    })
            }
            ["all-in" | "a", seat] => match (table.all_in_amount(), parse_seat(&state, seat)) {
                (Some(pot), Ok(challenger)) => table
                    .record_hand(challenger, pot, HandOutcome::ChallengerWins)
                    .map(|report| hint = report_hand(&state, &report)),
                (None, _) => {
                    println!("All-in is not available yet.");
                    Ok(())
                }
                (_, Err(err)) => Err(err),
            },
            ["close" | "c"] => table.close_bank().map(|amount| {
                println!("{} collects {amount}.", state.dealer().name());
                hint = table.suggested_challenger(None);
            }),
            ["log" | "l"] => {
                print_log(&state);
                Ok(())
            }
            ["standings" | "t"] => {
                print_standings(&state);
                Ok(())
            }
            ["quit" | "q"] => {
                table.exit();
                println!("Goodbye.");
                return;
            }
            _ => {
                println!(
                    "Commands: start | hand <seat> <amount> <b|c> | all-in <seat> | close | log | standings | quit"
                );
                Ok(())
            }
        };

        if let Err(err) = result {
            println!("Error: {err}");
        }
    }
}

fn report_hand(state: &TableState, report: &HandReport) -> Option<PlayerId> {
    if let Some(dealer) = report.busted_to {
        println!("The bank is broken! {} takes the bank.", name(state, dealer));
    }
    if let Some(orbit) = report.orbit_completed {
        println!("Everyone has played; orbit {orbit} begins.");
    }
    report.next_challenger
}

fn parse_outcome(who: &str) -> Option<HandOutcome> {
    match who {
        "b" | "bank" => Some(HandOutcome::DealerWins),
        "c" | "challenger" => Some(HandOutcome::ChallengerWins),
        _ => None,
    }
}

fn parse_seat(state: &TableState, seat: &str) -> Result<PlayerId, LedgerError> {
    seat.parse::<usize>()
        .ok()
        .and_then(|seat| seat.checked_sub(1))
        .and_then(|index| state.players().get(index))
        .map(Player::id)
        .ok_or(LedgerError::InvalidChallenger)
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    read_line(&mut io::stdin().lock())
}

/// Reads one trimmed line; `None` once input is closed.
fn read_line(reader: &mut impl BufRead) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn name(state: &TableState, id: PlayerId) -> &str {
    state.player(id).map_or("?", Player::name)
}

fn print_table(table: &Table, state: &TableState, hint: Option<PlayerId>) {
    println!();
    println!(
        "Dealer: {} | pot {} | orbit {} | {}",
        state.dealer().name(),
        state.pot(),
        state.dealer_round(),
        if state.is_round_active() {
            colorize("round active", "32")
        } else {
            colorize("waiting for antes", "90")
        }
    );

    for (seat, player) in state.players().iter().enumerate() {
        if player.is_dealer() {
            continue;
        }
        let marker = if Some(player.id()) == hint { "*" } else { " " };
        let played = if state.has_played(player.id()) {
            " (played)"
        } else {
            ""
        };
        println!("{marker} {}: {}{played}", seat + 1, player.name());
    }

    if table.all_in_available() {
        println!("{}", colorize("[a]ll-in available", "32"));
    }
}

fn print_log(state: &TableState) {
    for entry in state.logs_recent_first() {
        let amount = entry
            .amount()
            .map(|amount| format!(" [{amount}]"))
            .unwrap_or_default();
        println!("{:?}: {}{amount}", entry.kind(), state.describe(entry));
    }
}

fn print_standings(state: &TableState) {
    for standing in state.standings() {
        println!("{}: {}", name(state, standing.player), standing.net);
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
