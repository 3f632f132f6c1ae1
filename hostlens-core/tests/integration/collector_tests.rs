//! Collector behavior against scripted gateways

use std::sync::Arc;
use std::time::Duration;

use hostlens_core::gateway::ExecError;
use hostlens_core::telemetry::{CollectError, CollectorSettings, SystemCollector};

use super::mock_gateway::{MockGateway, healthy_detail_rules, healthy_host_rules};

fn collector_over(gateway: MockGateway) -> (Arc<SystemCollector>, Arc<MockGateway>) {
    let gateway = Arc::new(gateway);
    let collector = Arc::new(SystemCollector::new(gateway.clone()));
    (collector, gateway)
}

#[tokio::test]
async fn collect_assembles_a_complete_snapshot() {
    let (collector, gateway) = collector_over(MockGateway::new(healthy_host_rules()));

    let snapshot = collector.collect().await.expect("collection failed");

    assert_eq!(snapshot.hostname, "web01");
    assert_eq!(snapshot.uptime, "up 3 days, 4 hours");
    assert_eq!(snapshot.load_average, ["0.52", "0.34", "0.28"]);
    assert_eq!(snapshot.memory.total, "7.63 GB");
    assert_eq!(snapshot.memory.used, "5.72 GB");
    assert_eq!(snapshot.disk.percentage, "46%");
    assert_eq!(snapshot.partitions.len(), 1);
    assert_eq!(snapshot.cpu.cores, 8);
    assert_eq!(snapshot.network.interfaces.len(), 1);
    assert_eq!(snapshot.network.interfaces[0].ip, "10.0.0.5");
    assert_eq!(snapshot.network.gateway, "10.0.0.1");
    assert_eq!(snapshot.network.rx_bytes, 1_000_000);
    assert_eq!(snapshot.connection_count, 12);
    assert_eq!(snapshot.process_count, 184);
    assert_eq!(snapshot.user_count, 2);
    assert!(snapshot.detailed.is_none());

    // one call per battery command, fallback resolved on its first source
    assert_eq!(gateway.call_count(), 14);

    let cached = collector.cached_snapshot().await.expect("nothing cached");
    assert_eq!(cached, snapshot);
}

#[tokio::test]
async fn overlapping_collect_is_rejected_then_accepted_after_settle() {
    let (collector, gateway) = collector_over(MockGateway::new(healthy_host_rules()));

    // hold the gateway shut so the first cycle stays in flight
    let held = gateway.hold().await;

    let first = {
        let collector = collector.clone();
        tokio::spawn(async move { collector.collect().await })
    };
    // let the spawned cycle take the single-flight slot
    tokio::time::sleep(Duration::from_millis(20)).await;

    let overlap = collector.collect().await;
    assert!(matches!(overlap, Err(CollectError::AlreadyInProgress)));

    drop(held);
    first.await.unwrap().expect("first cycle should succeed");

    // the slot is free again once the first cycle settled
    collector.collect().await.expect("post-settle cycle");
}

#[tokio::test]
async fn failed_batch_keeps_last_known_good_and_frees_the_slot() {
    let (collector, gateway) = collector_over(MockGateway::new(healthy_host_rules()));

    let good = collector.collect().await.expect("initial collection");
    gateway.fail_from_now_on();

    let err = collector.collect().await;
    assert!(matches!(err, Err(CollectError::Transport(_))));

    // no partial snapshot was published; the previous one survives
    let cached = collector.cached_snapshot().await.expect("cache emptied");
    assert_eq!(cached, good);

    // and the failure path released the in-flight flag
    let again = collector.collect().await;
    assert!(matches!(again, Err(CollectError::Transport(_))));
}

#[tokio::test]
async fn detailed_is_cache_first_with_zero_extra_commands() {
    let mut rules = healthy_host_rules();
    rules.extend(healthy_detail_rules());
    let (collector, gateway) = collector_over(MockGateway::new(rules));

    let first = collector.detailed().await.expect("detail fetch");
    assert_eq!(first.processes.len(), 1);
    assert_eq!(first.cron_jobs[0].command, "/usr/bin/backup.sh --full");
    let after_first = gateway.call_count();

    let second = collector.detailed().await.expect("cached detail");
    assert_eq!(second, first);
    assert_eq!(gateway.call_count(), after_first, "cache hit must not touch the remote");

    // clearing the detail cache forces a refetch
    collector.clear_detail_cache().await;
    collector.detailed().await.expect("refetched detail");
    assert!(gateway.call_count() > after_first);
}

#[tokio::test]
async fn detail_attaches_to_the_cached_snapshot() {
    let mut rules = healthy_host_rules();
    rules.extend(healthy_detail_rules());
    let (collector, _gateway) = collector_over(MockGateway::new(rules));

    collector.collect().await.expect("snapshot");
    assert!(collector.cached_snapshot().await.unwrap().detailed.is_none());

    collector.detailed().await.expect("detail");
    let cached = collector.cached_snapshot().await.unwrap();
    let detailed = cached.detailed.expect("detail should be attached");
    assert_eq!(detailed.services[0].name, "ssh");

    // the next collect carries the cached detail forward
    let next = collector.collect().await.expect("second snapshot");
    assert!(next.detailed.is_some());
}

#[tokio::test]
async fn connection_detail_degrades_to_unattributed_rows() {
    let mut rules = vec![
        (
            "ss -tunap",
            Err(ExecError::Transport("ss: command not found".into())),
        ),
        (
            "netstat -tunap",
            Err(ExecError::Transport("netstat: command not found".into())),
        ),
        (
            "ss -tuna ",
            Ok("tcp,10.0.0.5:443,10.0.0.7:40112,ESTAB,unknown,-\n".to_string()),
        ),
    ];
    rules.extend(healthy_detail_rules().into_iter().skip(2));
    let (collector, _gateway) = collector_over(MockGateway::new(rules));

    let detail = collector.detailed().await.expect("degraded detail");
    assert_eq!(detail.connections.len(), 1);
    assert_eq!(detail.connections[0].process, "unknown");
    assert_eq!(detail.connections[0].pid, "-");
}

#[tokio::test]
async fn exhausted_connection_chain_yields_no_data_not_an_error() {
    let (collector, _gateway) = collector_over(MockGateway::new(vec![
        (
            "ss -tun state established",
            Err(ExecError::Transport("no ss".into())),
        ),
        (
            "netstat -tun",
            Err(ExecError::Transport("no netstat".into())),
        ),
        // remaining snapshot commands fall through to empty-output default
    ]));

    let snapshot = collector.collect().await.expect("collection must survive");
    assert_eq!(snapshot.connection_count, 0);
}

#[tokio::test]
async fn detail_batch_failure_aborts_without_caching() {
    let mut rules = healthy_detail_rules();
    // cron source dies mid-battery
    rules.retain(|(needle, _)| *needle != "crontabs");
    rules.push((
        "crontabs",
        Err(ExecError::Transport("connection reset".into())),
    ));
    let (collector, gateway) = collector_over(MockGateway::new(rules));

    assert!(matches!(
        collector.detailed().await,
        Err(CollectError::Transport(_))
    ));

    // nothing was cached, so a retry issues the battery again
    let before_retry = gateway.call_count();
    let _ = collector.detailed().await;
    assert!(gateway.call_count() > before_retry);
}

#[tokio::test(start_paused = true)]
async fn auto_refresh_ticks_survive_failures_and_stop_on_demand() {
    let (collector, gateway) = collector_over(MockGateway::new(healthy_host_rules()));

    collector.clone().start_auto_refresh(Duration::from_secs(5)).await;

    tokio::time::sleep(Duration::from_secs(11)).await;
    let after_two_ticks = gateway.calls_matching("hostname");
    assert!(
        after_two_ticks >= 2,
        "expected at least two refresh cycles, saw {after_two_ticks}"
    );

    // a failing cycle must not kill the timer
    gateway.fail_from_now_on();
    tokio::time::sleep(Duration::from_secs(6)).await;

    collector.stop_auto_refresh().await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let after_stop = gateway.calls_matching("hostname");
    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(
        gateway.calls_matching("hostname"),
        after_stop,
        "timer kept firing after stop"
    );
}

#[tokio::test(start_paused = true)]
async fn restarting_auto_refresh_replaces_the_previous_timer() {
    let (collector, gateway) = collector_over(MockGateway::new(healthy_host_rules()));

    collector.clone().start_auto_refresh(Duration::from_secs(60)).await;
    collector.clone().start_auto_refresh(Duration::from_secs(5)).await;

    tokio::time::sleep(Duration::from_secs(21)).await;
    collector.stop_auto_refresh().await;

    // only the 5s timer was live: four-ish cycles, not dozens and not one
    let cycles = gateway.calls_matching("hostname");
    assert!(
        (2..=6).contains(&cycles),
        "unexpected cycle count {cycles} after restart"
    );
}

#[tokio::test]
async fn shutdown_clears_both_caches() {
    let mut rules = healthy_host_rules();
    rules.extend(healthy_detail_rules());
    let (collector, _gateway) = collector_over(MockGateway::new(rules));

    collector.collect().await.expect("snapshot");
    collector.detailed().await.expect("detail");

    collector.shutdown().await;
    assert!(collector.cached_snapshot().await.is_none());
}

#[tokio::test]
async fn settings_row_caps_reach_the_remote_commands() {
    let mut rules = healthy_host_rules();
    rules.extend(healthy_detail_rules());
    let gateway = Arc::new(MockGateway::new(rules));
    let collector = Arc::new(SystemCollector::with_settings(
        gateway.clone(),
        CollectorSettings {
            process_rows: 7,
            service_rows: 11,
            ..Default::default()
        },
    ));

    collector.detailed().await.expect("detail");
    assert_eq!(gateway.calls_matching("head -7 "), 1);
    assert_eq!(gateway.calls_matching("head -11 "), 1);
}
