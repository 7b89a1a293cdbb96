//! Table integration tests.

use std::sync::Arc;

use bankroll::{
    HandOutcome, LedgerError, LedgerEvent, LogKind, ManualClock, Money, PlayerId, SetupProblem,
    Table, TableOptions, TableState, Timestamp,
};

const fn cents(amount: i64) -> Money {
    Money::from_cents(amount)
}

fn id_of(state: &TableState, name: &str) -> PlayerId {
    state
        .players()
        .iter()
        .find(|player| player.name() == name)
        .map(bankroll::Player::id)
        .unwrap()
}

fn dealer_name(state: &TableState) -> &str {
    state.dealer().name()
}

fn at(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn abc() -> TableState {
    TableState::initialize(&["A", "B", "C"], cents(20), 1).unwrap()
}

#[test]
fn initialize_seats_players_in_order() {
    let state = abc();
    let names: Vec<&str> = state.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(dealer_name(&state), "A");
    assert!(state.players()[0].is_dealer());
    assert_eq!(state.pot(), Money::ZERO);
    assert!(!state.is_round_active());
    assert_eq!(state.dealer_round(), 1);
    assert!(state.played_this_round().is_empty());
    assert!(state.logs().is_empty());
    assert!(state.is_consistent());

    let ids: std::collections::HashSet<PlayerId> =
        state.players().iter().map(|p| p.id()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn initialize_rejects_bad_setup() {
    assert_eq!(
        TableState::initialize(&["A"], cents(20), 1).unwrap_err(),
        LedgerError::InvalidSetup(SetupProblem::TooFewPlayers)
    );
    assert_eq!(
        TableState::initialize(&["A", "  "], cents(20), 1).unwrap_err(),
        LedgerError::InvalidSetup(SetupProblem::BlankName)
    );
    assert_eq!(
        TableState::initialize(&["A", "B"], Money::ZERO, 1).unwrap_err(),
        LedgerError::InvalidSetup(SetupProblem::NonPositiveAnte)
    );
    assert_eq!(
        TableState::initialize(&["A", "B"], cents(-5), 1).unwrap_err(),
        LedgerError::InvalidSetup(SetupProblem::NonPositiveAnte)
    );
}

#[test]
fn literal_three_player_scenario() {
    let state = abc();
    let b = id_of(&state, "B");
    let c = id_of(&state, "C");

    let state = state.start_round(at(1)).unwrap();
    assert_eq!(state.pot(), cents(60));
    assert_eq!(state.logs().len(), 1);
    assert_eq!(state.logs()[0].kind(), LogKind::Ante);
    assert_eq!(state.logs()[0].amount(), Some(cents(60)));

    let (state, report) = state
        .record_hand(b, cents(20), HandOutcome::DealerWins, at(2))
        .unwrap();
    assert_eq!(state.pot(), cents(80));
    assert_eq!(state.played_this_round(), vec![b]);
    assert!(!report.is_bust());
    assert_eq!(report.next_challenger, Some(c));

    let (state, report) = state
        .record_hand(c, cents(80), HandOutcome::ChallengerWins, at(3))
        .unwrap();
    assert_eq!(report.busted_to, Some(b));
    assert_eq!(dealer_name(&state), "B");
    assert_eq!(state.pot(), Money::ZERO);
    assert!(!state.is_round_active());
    assert_eq!(state.dealer_round(), 1);
    assert!(state.played_this_round().is_empty());

    let state = state.close_bank(at(4));
    assert_eq!(dealer_name(&state), "C");
    let last = state.logs().last().unwrap();
    assert_eq!(last.kind(), LogKind::Collect);
    assert_eq!(last.amount(), Some(Money::ZERO));
    assert!(state.is_consistent());
}

#[test]
fn bust_logs_hand_then_bust() {
    let state = abc().start_round(at(1)).unwrap();
    let a = id_of(&state, "A");
    let b = id_of(&state, "B");

    let (state, _) = state
        .record_hand(b, cents(60), HandOutcome::ChallengerWins, at(2))
        .unwrap();

    let events: Vec<LedgerEvent> = state.logs().iter().map(|e| *e.event()).collect();
    assert_eq!(
        events[1..],
        [
            LedgerEvent::HandSettled {
                dealer: a,
                challenger: b,
                outcome: HandOutcome::ChallengerWins,
                amount: cents(60),
            },
            LedgerEvent::BankBusted {
                dealer: a,
                challenger: b,
                amount: cents(60),
                next_dealer: b,
            },
        ]
    );
    assert_eq!(state.logs()[1].amount(), Some(cents(-60)));
    assert_eq!(state.logs()[2].kind(), LogKind::Loss);
    assert_eq!(state.logs()[2].amount(), Some(cents(-60)));
}

#[test]
fn bust_skips_orbit_bookkeeping() {
    let state = TableState::initialize(&["A", "B"], cents(50), 9)
        .unwrap()
        .start_round(at(1))
        .unwrap();
    let b = id_of(&state, "B");

    let (state, report) = state
        .record_hand(b, cents(100), HandOutcome::ChallengerWins, at(2))
        .unwrap();
    assert_eq!(report.orbit_completed, None);
    assert_eq!(report.next_challenger, None);
    assert_eq!(state.dealer_round(), 1);
    assert!(
        state
            .logs()
            .iter()
            .all(|entry| entry.kind() != LogKind::Info)
    );
}

#[test]
fn challenger_win_below_pot_is_a_loss_entry() {
    let state = abc().start_round(at(1)).unwrap();
    let c = id_of(&state, "C");

    let (state, report) = state
        .record_hand(c, cents(25), HandOutcome::ChallengerWins, at(2))
        .unwrap();
    assert_eq!(report.pot_after, cents(35));
    assert_eq!(state.pot(), cents(35));
    assert!(state.is_round_active());
    let last = state.logs().last().unwrap();
    assert_eq!(last.kind(), LogKind::Loss);
    assert_eq!(last.amount(), Some(cents(-25)));
}

#[test]
fn conservation_of_win_then_loss() {
    let mut state = abc().start_round(at(1)).unwrap();
    let b = id_of(&state, "B");
    let before = state.pot();

    for amount in [1, 7, 33, 59] {
        let (after_win, _) = state
            .record_hand(b, cents(amount), HandOutcome::ChallengerWins, at(2))
            .unwrap();
        let (after_loss, _) = after_win
            .record_hand(b, cents(amount), HandOutcome::DealerWins, at(3))
            .unwrap();
        assert_eq!(after_loss.pot(), before);
        state = after_loss;
    }
}

#[test]
fn orbit_completes_in_any_order() {
    let state = TableState::initialize(&["A", "B", "C", "D"], cents(10), 4)
        .unwrap()
        .start_round(at(1))
        .unwrap();
    let b = id_of(&state, "B");
    let c = id_of(&state, "C");
    let d = id_of(&state, "D");

    let (state, report) = state
        .record_hand(d, cents(5), HandOutcome::DealerWins, at(2))
        .unwrap();
    assert_eq!(report.orbit_completed, None);
    let (state, _) = state
        .record_hand(b, cents(5), HandOutcome::ChallengerWins, at(3))
        .unwrap();
    // Playing twice does not count twice.
    let (state, report) = state
        .record_hand(d, cents(5), HandOutcome::DealerWins, at(4))
        .unwrap();
    assert_eq!(report.orbit_completed, None);
    assert_eq!(state.dealer_round(), 1);

    let (state, report) = state
        .record_hand(c, cents(5), HandOutcome::DealerWins, at(5))
        .unwrap();
    assert_eq!(report.orbit_completed, Some(2));
    assert_eq!(state.dealer_round(), 2);
    assert!(state.played_this_round().is_empty());

    let last = state.logs().last().unwrap();
    assert_eq!(last.kind(), LogKind::Info);
    assert_eq!(last.amount(), None);
    assert_eq!(
        *last.event(),
        LedgerEvent::OrbitCompleted {
            dealer: id_of(&state, "A"),
            orbit: 2,
        }
    );
}

#[test]
fn record_hand_validation() {
    let state = abc();
    let a = id_of(&state, "A");
    let b = id_of(&state, "B");

    assert_eq!(
        state
            .record_hand(b, cents(10), HandOutcome::DealerWins, at(1))
            .unwrap_err(),
        LedgerError::NoActiveRound
    );

    let state = state.start_round(at(1)).unwrap();
    assert_eq!(
        state
            .record_hand(a, cents(10), HandOutcome::DealerWins, at(2))
            .unwrap_err(),
        LedgerError::InvalidChallenger
    );
    let stranger = TableState::initialize(&["X", "Y"], cents(1), 99)
        .unwrap()
        .players()[1]
        .id();
    assert_eq!(
        state
            .record_hand(stranger, cents(10), HandOutcome::DealerWins, at(2))
            .unwrap_err(),
        LedgerError::InvalidChallenger
    );
    assert_eq!(
        state
            .record_hand(b, Money::ZERO, HandOutcome::DealerWins, at(2))
            .unwrap_err(),
        LedgerError::InvalidAmount
    );
    assert_eq!(
        state
            .record_hand(b, cents(-1), HandOutcome::ChallengerWins, at(2))
            .unwrap_err(),
        LedgerError::InvalidAmount
    );
    assert_eq!(
        state
            .record_hand(b, cents(i64::MAX), HandOutcome::DealerWins, at(2))
            .unwrap_err(),
        LedgerError::InvalidAmount
    );
}

#[test]
fn insufficient_pot_leaves_state_untouched() {
    let table = Table::new(TableOptions::default(), 5);
    table.initialize(&["A", "B", "C"], cents(20)).unwrap();
    let b = table.start_round().unwrap().unwrap();
    let before = table.snapshot().unwrap();

    assert_eq!(
        table
            .record_hand(b, cents(61), HandOutcome::ChallengerWins)
            .unwrap_err(),
        LedgerError::InsufficientPot
    );
    assert_eq!(table.snapshot().unwrap(), before);

    // The exact pot is fine and busts the bank.
    let report = table
        .record_hand(b, cents(60), HandOutcome::ChallengerWins)
        .unwrap();
    assert!(report.is_bust());
}

#[test]
fn start_round_twice_is_rejected() {
    let state = abc().start_round(at(1)).unwrap();
    assert_eq!(
        state.start_round(at(2)).unwrap_err(),
        LedgerError::RoundAlreadyActive
    );
}

#[test]
fn close_bank_collects_and_rotates() {
    let state = abc().start_round(at(1)).unwrap();
    let a = id_of(&state, "A");
    let b = id_of(&state, "B");
    let (state, _) = state
        .record_hand(b, cents(40), HandOutcome::DealerWins, at(2))
        .unwrap();

    let state = state.close_bank(at(3));
    assert_eq!(dealer_name(&state), "B");
    assert_eq!(state.pot(), Money::ZERO);
    assert!(!state.is_round_active());
    assert_eq!(
        *state.logs().last().unwrap().event(),
        LedgerEvent::BankClosed {
            dealer: a,
            amount: cents(100),
            next_dealer: b,
        }
    );
}

#[test]
fn rotation_wraps_around_and_keeps_one_dealer() {
    let mut state = abc();
    let mut seen = Vec::new();
    for step in 0..6 {
        seen.push(dealer_name(&state).to_owned());
        state = state.start_round(at(step)).unwrap().close_bank(at(step));
        assert!(state.is_consistent());
        assert_eq!(
            state.players().iter().filter(|p| p.is_dealer()).count(),
            1
        );
        assert_eq!(state.dealer().id(), state.dealer_id());
    }
    assert_eq!(seen, ["A", "B", "C", "A", "B", "C"]);
}

#[test]
fn dealer_round_resets_on_rotation() {
    let state = TableState::initialize(&["A", "B"], cents(10), 2)
        .unwrap()
        .start_round(at(1))
        .unwrap();
    let b = id_of(&state, "B");
    let (state, report) = state
        .record_hand(b, cents(5), HandOutcome::DealerWins, at(2))
        .unwrap();
    assert_eq!(report.orbit_completed, Some(2));
    assert_eq!(state.dealer_round(), 2);

    let state = state.close_bank(at(3));
    assert_eq!(state.dealer_round(), 1);
}

#[test]
fn standings_balance_against_pot() {
    let state = abc().start_round(at(1)).unwrap();
    let a = id_of(&state, "A");
    let b = id_of(&state, "B");
    let c = id_of(&state, "C");
    let (state, _) = state
        .record_hand(b, cents(15), HandOutcome::DealerWins, at(2))
        .unwrap();
    let (state, _) = state
        .record_hand(c, cents(30), HandOutcome::ChallengerWins, at(3))
        .unwrap();

    let total: i64 = state.standings().iter().map(|s| s.net.cents()).sum();
    assert_eq!(total + state.pot().cents(), 0);

    let state = state.close_bank(at(4));
    let standings = state.standings();
    let net = |id| standings.iter().find(|s| s.player == id).unwrap().net;
    assert_eq!(net(a), cents(-20 + 45));
    assert_eq!(net(b), cents(-20 - 15));
    assert_eq!(net(c), cents(-20 + 30));
    let total: i64 = standings.iter().map(|s| s.net.cents()).sum();
    assert_eq!(total, 0);
}

#[test]
fn timestamps_never_go_backwards() {
    let state = abc().start_round(at(100)).unwrap();
    let b = id_of(&state, "B");
    let (state, _) = state
        .record_hand(b, cents(5), HandOutcome::DealerWins, at(50))
        .unwrap();
    assert_eq!(state.logs()[1].timestamp(), at(100));
    assert!(state.is_consistent());

    let first = state.logs()[0].id();
    assert_ne!(first, state.logs()[1].id());
}

#[test]
fn logs_display_newest_first() {
    let state = abc().start_round(at(1)).unwrap().close_bank(at(2));
    let kinds: Vec<LogKind> = state.logs_recent_first().map(|e| e.kind()).collect();
    assert_eq!(kinds, [LogKind::Collect, LogKind::Ante]);
    let text = state.describe(&state.logs()[1]);
    assert_eq!(text, "A closes the bank and collects 0.60; B takes the bank");
}

#[test]
fn table_requires_a_game() {
    let table = Table::new(TableOptions::default(), 1);
    assert!(!table.is_active());
    assert_eq!(table.start_round().unwrap_err(), LedgerError::GameNotActive);
    assert_eq!(table.close_bank().unwrap_err(), LedgerError::GameNotActive);

    table.initialize(&["A", "B"], cents(10)).unwrap();
    table.exit();
    assert!(!table.is_active());
    assert!(table.snapshot().is_none());
    assert_eq!(table.close_bank().unwrap_err(), LedgerError::GameNotActive);
}

#[test]
fn table_uses_the_clock() {
    let clock = Arc::new(ManualClock::new(at(1_000)));
    let table = Table::with_clock(TableOptions::default(), 3, Arc::clone(&clock));
    table.initialize(&["A", "B"], cents(10)).unwrap();

    table.start_round().unwrap();
    clock.advance(250);
    table.close_bank().unwrap();

    let state = table.snapshot().unwrap();
    let stamps: Vec<Timestamp> = state.logs().iter().map(|e| e.timestamp()).collect();
    assert_eq!(stamps, [at(1_000), at(1_250)]);
}

#[test]
fn all_in_waits_for_first_orbit_by_default() {
    let table = Table::new(TableOptions::default(), 8);
    table.initialize(&["A", "B", "C"], cents(20)).unwrap();
    assert!(!table.all_in_available());

    let b = table.start_round().unwrap().unwrap();
    assert!(!table.all_in_available());
    assert_eq!(table.all_in_amount(), None);

    let report = table
        .record_hand(b, cents(10), HandOutcome::DealerWins)
        .unwrap();
    let c = report.next_challenger.unwrap();
    table
        .record_hand(c, cents(10), HandOutcome::DealerWins)
        .unwrap();
    assert!(table.all_in_available());
    assert_eq!(table.all_in_amount(), Some(cents(80)));

    // The rule is advisory: the whole pot may still be taken in orbit one.
    let relaxed = Table::new(TableOptions::default().with_all_in_requires_orbit(false), 8);
    relaxed.initialize(&["A", "B", "C"], cents(20)).unwrap();
    let b = relaxed.start_round().unwrap().unwrap();
    assert_eq!(relaxed.all_in_amount(), Some(cents(60)));
    assert!(
        relaxed
            .record_hand(b, cents(60), HandOutcome::ChallengerWins)
            .unwrap()
            .is_bust()
    );
}

#[test]
fn hint_can_skip_players_who_already_played() {
    let options = TableOptions::default().with_hint_skips_played(true);
    let table = Table::new(options, 2);
    table.initialize(&["A", "B", "C", "D"], cents(10)).unwrap();
    let state = table.snapshot().unwrap();
    let b = id_of(&state, "B");
    let c = id_of(&state, "C");
    let d = id_of(&state, "D");

    assert_eq!(table.start_round().unwrap(), Some(b));
    table
        .record_hand(c, cents(5), HandOutcome::DealerWins)
        .unwrap();
    let report = table
        .record_hand(b, cents(5), HandOutcome::DealerWins)
        .unwrap();
    // Plain scanning would suggest C; C has already played.
    assert_eq!(report.next_challenger, Some(d));
    assert_eq!(table.snapshot().unwrap().next_challenger(Some(b)), Some(c));
}

#[test]
fn same_seed_gives_same_ids() {
    let one = TableState::initialize(&["A", "B"], cents(10), 77).unwrap();
    let two = TableState::initialize(&["A", "B"], cents(10), 77).unwrap();
    assert_eq!(one, two);
    let other = TableState::initialize(&["A", "B"], cents(10), 78).unwrap();
    assert_ne!(one.players()[0].id(), other.players()[0].id());
}

#[test]
fn table_hint_matches_state_hint() {
    for skip_played in [false, true] {
        let options = TableOptions::default().with_hint_skips_played(skip_played);
        let table = Table::new(options, 6);
        assert_eq!(table.suggested_challenger(None), None);

        table.initialize(&["A", "B", "C", "D"], cents(10)).unwrap();
        table.start_round().unwrap();
        let state = table.snapshot().unwrap();
        let c = id_of(&state, "C");
        table
            .record_hand(c, cents(5), HandOutcome::DealerWins)
            .unwrap();

        let state = table.snapshot().unwrap();
        for after in [None, Some(id_of(&state, "B")), Some(c), Some(id_of(&state, "D"))] {
            assert_eq!(
                table.suggested_challenger(after),
                state.suggest_challenger(after, skip_played)
            );
        }
    }

    // After C has played, B's successor depends on the setting.
    let plain = Table::new(TableOptions::default(), 6);
    let skipping = Table::new(TableOptions::default().with_hint_skips_played(true), 6);
    for table in [&plain, &skipping] {
        table.initialize(&["A", "B", "C", "D"], cents(10)).unwrap();
        table.start_round().unwrap();
        let c = id_of(&table.snapshot().unwrap(), "C");
        table
            .record_hand(c, cents(5), HandOutcome::DealerWins)
            .unwrap();
    }
    let b = id_of(&plain.snapshot().unwrap(), "B");
    assert_eq!(
        plain.suggested_challenger(Some(b)),
        Some(id_of(&plain.snapshot().unwrap(), "C"))
    );
    let b = id_of(&skipping.snapshot().unwrap(), "B");
    assert_eq!(
        skipping.suggested_challenger(Some(b)),
        Some(id_of(&skipping.snapshot().unwrap(), "D"))
    );
}

#[test]
fn describe_renders_every_event() {
    let state = abc().start_round(at(1)).unwrap();
    let b = id_of(&state, "B");
    let c = id_of(&state, "C");

    let (state, _) = state
        .record_hand(b, cents(20), HandOutcome::DealerWins, at(2))
        .unwrap();
    let (state, _) = state
        .record_hand(c, cents(10), HandOutcome::DealerWins, at(3))
        .unwrap();
    let (state, _) = state
        .record_hand(b, cents(30), HandOutcome::ChallengerWins, at(4))
        .unwrap();
    let (state, report) = state
        .record_hand(c, cents(60), HandOutcome::ChallengerWins, at(5))
        .unwrap();
    assert!(report.is_bust());
    let state = state.close_bank(at(6));

    let lines: Vec<String> = state
        .logs()
        .iter()
        .map(|entry| state.describe(entry))
        .collect();
    assert_eq!(
        lines,
        [
            "A opens the bank: 3 antes of 0.20, 0.60 in the pot",
            "A beats B and takes 0.20",
            "A beats C and takes 0.10",
            "Everyone has played A; orbit 2 begins",
            "B beats A and takes 0.30 from the pot",
            "C beats A and takes 0.60 from the pot",
            "C broke A's bank with 0.60; B takes the bank",
            "B closes the bank and collects 0.00; C takes the bank",
        ]
    );
}
