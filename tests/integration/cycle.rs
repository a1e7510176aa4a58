//! End-to-end cycle behaviour: discovery, concurrent fetches, detection
//! and notification, with the retained state threaded between cycles.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use rusk_monitor::engine::{Monitor, MonitorSettings};
use rusk_monitor::types::{AggregateTotals, MonitorState};
use rusk_monitor::wallet::WalletCli;

use crate::stubs::{RecordingNotifier, StubWallet};

const LISTING: &str = "\
> Profile 1 (Default)
  Shielded account - s1
  Public account - p1
> Profile 2
  Shielded account - s2
  Public account - p2";

fn setup(stub: StubWallet, monitor_balance: bool) -> (Monitor, Arc<StubWallet>, Arc<RecordingNotifier>) {
    let stub = Arc::new(stub);
    let notifier = Arc::new(RecordingNotifier::new());
    let wallet = WalletCli::new(
        stub.clone(),
        "rusk-wallet",
        true,
        SecretString::new("correct horse".to_string()),
    );
    let monitor = Monitor::new(
        wallet,
        notifier.clone(),
        MonitorSettings {
            monitor_balance,
            check_interval: Duration::from_secs(60),
        },
    );
    (monitor, stub, notifier)
}

fn seed(stub: &StubWallet, p1: f64, p2: f64, s1: f64, s2: f64) {
    stub.set_balance("p1", &format!("Total: {p1}"));
    stub.set_balance("p2", &format!("Total: {p2}"));
    stub.set_balance("s1", &format!("Total: {s1}"));
    stub.set_balance("s2", &format!("Total: {s2}"));
}

fn steady(public: f64, shielded: f64) -> MonitorState {
    MonitorState {
        previous: AggregateTotals::new(public, shielded),
        first_cycle: false,
        announced: true,
    }
}

#[tokio::test]
async fn test_public_change_scenario() {
    let (monitor, stub, notifier) =
        setup(StubWallet::new("Public account - p1\nShielded account - s1"), true);
    stub.set_balance("p1", "Total: 12.0");
    stub.set_balance("s1", "Total: 5.0");

    let (state, report) = monitor.run_cycle(steady(10.0, 5.0), 1).await.unwrap();

    assert_eq!(notifier.messages(), vec!["Public balance changed: 10.0 → 12.0"]);
    assert_eq!(state, steady(12.0, 5.0));
    assert_eq!(report.totals, AggregateTotals::new(12.0, 5.0));
}

#[tokio::test]
async fn test_multi_cycle_sequence() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), true);

    // Cycle 1: baseline only.
    seed(&stub, 1.0, 2.0, 3.0, 4.0);
    let (state, report) = monitor.run_cycle(MonitorState::new(), 1).await.unwrap();
    assert_eq!(notifier.take(), vec!["Starting up!"]);
    assert_eq!(report.totals, AggregateTotals::new(3.0, 7.0));
    assert_eq!(report.public_addresses, 2);
    assert_eq!(report.shielded_addresses, 2);

    // Cycle 2: nothing moved.
    let (state, _) = monitor.run_cycle(state, 2).await.unwrap();
    assert!(notifier.take().is_empty());

    // Cycle 3: shielded received funds.
    seed(&stub, 1.0, 2.0, 3.0, 6.0);
    let (state, _) = monitor.run_cycle(state, 3).await.unwrap();
    assert_eq!(notifier.take(), vec!["Shielded balance changed: 7.0 → 9.0"]);

    // Cycle 4: 4.0 shielded → public; combined total unchanged, so silent.
    seed(&stub, 5.0, 2.0, 3.0, 2.0);
    let (state, _) = monitor.run_cycle(state, 4).await.unwrap();
    assert!(notifier.take().is_empty());
    assert_eq!(state, steady(7.0, 5.0));

    // Cycle 5: both classes moved and the combined total changed.
    seed(&stub, 5.0, 4.0, 3.0, 3.0);
    let (state, _) = monitor.run_cycle(state, 5).await.unwrap();
    assert_eq!(
        notifier.take(),
        vec![
            "Public balance changed: 7.0 → 9.0",
            "Shielded balance changed: 5.0 → 6.0",
        ]
    );
    assert_eq!(state, steady(9.0, 6.0));
}

#[tokio::test]
async fn test_monitoring_disabled_only_announces_startup() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), false);
    seed(&stub, 1.0, 1.0, 1.0, 1.0);
    let (state, _) = monitor.run_cycle(MonitorState::new(), 1).await.unwrap();

    seed(&stub, 9.0, 1.0, 1.0, 1.0);
    let (state, _) = monitor.run_cycle(state, 2).await.unwrap();

    assert_eq!(notifier.messages(), vec!["Starting up!"]);
    assert_eq!(state, steady(10.0, 2.0));
}

#[tokio::test]
async fn test_failed_fetch_degrades_to_zero() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), true);
    seed(&stub, 1.0, 2.0, 3.0, 4.0);
    stub.remove_balance("p2");
    stub.set_balance("s2", "N/A");

    let (state, report) = monitor.run_cycle(steady(3.0, 7.0), 1).await.unwrap();

    assert_eq!(report.unavailable, 2);
    assert_eq!(report.totals, AggregateTotals::new(1.0, 3.0));
    assert_eq!(
        notifier.messages(),
        vec![
            "Public balance changed: 3.0 → 1.0",
            "Shielded balance changed: 7.0 → 3.0",
        ]
    );
    assert_eq!(state, steady(1.0, 3.0));
}

#[tokio::test]
async fn test_discovery_failure_keeps_previous_state() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), true);
    seed(&stub, 1.0, 2.0, 3.0, 4.0);
    let before = steady(3.0, 7.0);

    stub.fail_profiles();
    assert!(monitor.run_cycle(before, 1).await.is_err());
    assert!(notifier.messages().is_empty());

    // The next good cycle still compares against the retained totals.
    stub.restore_profiles(LISTING);
    let (state, _) = monitor.run_cycle(before, 2).await.unwrap();
    assert!(notifier.messages().is_empty());
    assert_eq!(state, before);
}

#[tokio::test(start_paused = true)]
async fn test_fetches_run_concurrently() {
    let (monitor, stub, _) = setup(
        StubWallet::new(LISTING).with_delay(Duration::from_secs(5)),
        true,
    );
    seed(&stub, 1.0, 1.0, 1.0, 1.0);

    let started = tokio::time::Instant::now();
    monitor.run_cycle(MonitorState::new(), 1).await.unwrap();

    // All four queries were in flight at once, so the cycle took one delay.
    assert_eq!(stub.max_in_flight(), 4);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(10));
}

#[tokio::test]
async fn test_commands_are_elevated_and_redacted() {
    let (monitor, stub, _) = setup(StubWallet::new("Public account - p1"), true);
    stub.set_balance("p1", "Total: 1.0");

    monitor.run_cycle(MonitorState::new(), 1).await.unwrap();

    let commands = stub.commands();
    assert_eq!(
        commands,
        vec![
            "sudo rusk-wallet --password *** profiles",
            "sudo rusk-wallet --password *** balance --spendable --address p1",
        ]
    );
    assert!(commands.iter().all(|c| !c.contains("correct horse")));
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_survives_failed_cycles() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), true);
    seed(&stub, 1.0, 1.0, 1.0, 1.0);
    stub.fail_profiles();

    // Every cycle fails: t=0, 60, 120. Shutdown arrives during the last sleep.
    let state = monitor.run(tokio::time::sleep(Duration::from_secs(130))).await;

    // Startup goes out before the first listing, so a locked wallet still
    // gets it, exactly once. No baseline was ever recorded.
    assert_eq!(notifier.messages(), vec!["Starting up!"]);
    assert_eq!(
        state,
        MonitorState {
            announced: true,
            ..MonitorState::new()
        }
    );
    assert_eq!(stub.commands().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_startup_not_repeated_after_wallet_recovers() {
    let (monitor, stub, notifier) = setup(StubWallet::new(LISTING), true);
    seed(&stub, 1.0, 1.0, 1.0, 1.0);
    stub.fail_profiles();

    // t=0 fails, the wallet is unlocked at t=30, t=60 records the baseline
    // and t=120 sees the public deposit.
    let unlock = async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        stub.restore_profiles(LISTING);
        tokio::time::sleep(Duration::from_secs(60)).await;
        seed(&stub, 4.0, 1.0, 1.0, 1.0);
    };
    let (state, ()) = tokio::join!(
        monitor.run(tokio::time::sleep(Duration::from_secs(150))),
        unlock
    );

    assert_eq!(
        notifier.messages(),
        vec!["Starting up!", "Public balance changed: 2.0 → 5.0"]
    );
    assert_eq!(state, steady(5.0, 2.0));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_mid_cycle_discards_the_cycle() {
    let (monitor, stub, notifier) = setup(
        StubWallet::new(LISTING).with_delay(Duration::from_secs(5)),
        true,
    );
    // Every class differs from the retained totals.
    seed(&stub, 2.0, 2.0, 2.0, 2.0);
    let before = steady(3.0, 7.0);

    // Balance queries answer at t=5; shutdown lands at t=2.
    let state = monitor
        .run_from(before, tokio::time::sleep(Duration::from_secs(2)))
        .await;

    assert_eq!(stub.max_in_flight(), 4);
    assert_eq!(state, before);
    assert!(notifier.messages().is_empty());
}
