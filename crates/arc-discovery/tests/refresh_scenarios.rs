mod common;

use std::time::Duration;

use arc_config::ArcConfig;
use arc_core::Principal;
use arc_discovery::DiscoveryError;
use common::{
    Reply, StubRest, computes_in, computes_of, harness, harness_with, list, pool_json,
    pool_names, subscriptions, workspace_json, workspace_json_in, workspace_names, workspaces_of,
};
use pretty_assertions::assert_eq;

fn one_workspace_one_pool() -> StubRest {
    StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![workspace_json("sub-1", "wsA", "Running")])),
        )
        .route(
            &computes_of("wsA"),
            Reply::Body(list(vec![pool_json("poolA", "Running")])),
        )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_account_publishes_empty_snapshot() {
    let h = harness(StubRest::new(), &[]);

    h.manager.refresh_blocking();

    assert!(h.manager.snapshot().is_empty());
    assert!(h.manager.current_clusters().is_empty());
    assert_eq!(h.rest.hits(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn single_workspace_exposes_its_pool() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);

    let clusters = h.manager.refresh_blocking().current_clusters();

    assert_eq!(clusters.len(), 1);
    let pool = clusters.first().unwrap();
    assert_eq!(pool.name, "poolA");
    assert_eq!(pool.workspace_name(), "wsA");
    assert_eq!(pool.tenant_id(), "t-1");
    assert_eq!(pool.node_count, Some(3));

    let parent = h.manager.workspace_of(pool).unwrap();
    assert_eq!(parent.name(), "wsA");
    assert_eq!(parent.subscription().id, "sub-1");
    assert!(parent.refreshed_at().is_some());
}

#[tokio::test]
async fn refresh_async_resolves_to_same_manager() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);

    let manager = h.manager.refresh_async().await;

    assert!(std::ptr::eq(manager, &h.manager));
    assert_eq!(pool_names(manager), vec!["poolA"]);
}

#[tokio::test]
async fn non_running_workspaces_are_filtered() {
    let rest = StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![
                workspace_json("sub-1", "wsA", "Running"),
                workspace_json("sub-1", "wsB", "Provisioning"),
            ])),
        )
        .route(
            &computes_of("wsA"),
            Reply::Body(list(vec![pool_json("poolA", "Running")])),
        )
        .route(
            &computes_of("wsB"),
            Reply::Body(list(vec![pool_json("poolB", "Running")])),
        );
    let h = harness(rest, &["sub-1"]);
    h.manager.refresh_async().await;

    assert_eq!(workspace_names(&h.manager), vec!["wsA", "wsB"]);
    assert_eq!(pool_names(&h.manager), vec!["poolA"]);

    let running: Vec<_> = h
        .manager
        .workspaces()
        .iter()
        .map(|w| w.name().to_string())
        .collect();
    assert_eq!(running, vec!["wsA"]);
    // The filtered set is written back.
    assert_eq!(workspace_names(&h.manager), vec!["wsA"]);
    // Computes of a non-running workspace are never fetched: two GETs only.
    assert_eq!(h.rest.hits(), 2);
}

#[tokio::test]
async fn workspaces_is_idempotent() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);
    h.manager.refresh_async().await;

    let first = h.manager.workspaces();
    let second = h.manager.workspaces();

    assert_eq!(first, second);
}

#[tokio::test]
async fn sign_out_clears_snapshot() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);
    h.manager.refresh_async().await;
    assert_eq!(pool_names(&h.manager), vec!["poolA"]);

    h.auth.sign_out();

    assert!(h.manager.current_clusters().is_empty());
    assert!(h.manager.snapshot().is_empty());

    h.auth
        .sign_in(Principal::new("dev@contoso.com", "t-1"), "opaque-token");
    assert!(h.manager.current_clusters().is_empty());
}

#[tokio::test]
async fn subscription_change_clears_snapshot() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);
    h.manager.refresh_async().await;
    assert_eq!(h.manager.snapshot().len(), 1);

    h.auth.select_subscriptions(subscriptions(&["sub-2"]));

    assert!(h.manager.snapshot().is_empty());
}

#[tokio::test]
async fn explicit_invalidate_clears_snapshot() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);
    h.manager.refresh_async().await;

    h.manager.invalidate();

    assert!(h.manager.snapshot().is_empty());
}

#[tokio::test]
async fn listener_is_registered_while_signed_out() {
    let h = harness(one_workspace_one_pool(), &[]);
    h.auth.sign_out();
    assert_eq!(h.auth.listener_count(), 1);

    h.auth
        .sign_in(Principal::new("dev@contoso.com", "t-1"), "opaque-token");
    h.auth.select_subscriptions(subscriptions(&["sub-1"]));
    h.manager.refresh_async().await;
    assert_eq!(pool_names(&h.manager), vec!["poolA"]);

    h.auth.select_subscriptions(Vec::new());
    assert!(h.manager.current_clusters().is_empty());
}

#[tokio::test]
async fn dropping_manager_unsubscribes() {
    let h = harness(StubRest::new(), &[]);
    assert_eq!(h.auth.listener_count(), 1);

    let auth = h.auth.clone();
    drop(h);

    assert_eq!(auth.listener_count(), 0);
    auth.sign_out();
}

#[tokio::test]
async fn refresh_is_idempotent_for_unchanged_backend() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);

    h.manager.refresh_async().await;
    let first = h.manager.snapshot();
    h.manager.refresh_async().await;
    let second = h.manager.snapshot();

    assert_eq!(*first, *second);
}

#[tokio::test]
async fn failing_compute_listing_keeps_workspace_with_empty_cache() {
    let rest = StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![
                workspace_json("sub-1", "wsA", "Running"),
                workspace_json("sub-1", "wsB", "Running"),
            ])),
        )
        .route(&computes_of("wsA"), Reply::Status(500))
        .route(
            &computes_of("wsB"),
            Reply::Body(list(vec![pool_json("poolB", "Running")])),
        );
    let h = harness(rest, &["sub-1"]);

    h.manager.try_refresh().await.unwrap();

    assert_eq!(workspace_names(&h.manager), vec!["wsA", "wsB"]);
    let snapshot = h.manager.snapshot();
    let ws_a = snapshot.iter().find(|w| w.name() == "wsA").unwrap();
    assert!(ws_a.list_computes().is_empty());
    assert!(ws_a.refreshed_at().is_none());
    assert_eq!(pool_names(&h.manager), vec!["poolB"]);
}

#[tokio::test]
async fn duplicate_ids_collapse_and_same_names_across_subscriptions_coexist() {
    let rest = StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![
                workspace_json("sub-1", "wsA", "Provisioning"),
                workspace_json("sub-1", "wsA", "Running"),
            ])),
        )
        .route(
            &workspaces_of("sub-2"),
            Reply::Body(list(vec![workspace_json("sub-2", "wsA", "Running")])),
        )
        .route("/sparkComputes", Reply::Body(list(Vec::new())));
    let h = harness(rest, &["sub-1", "sub-2"]);

    h.manager.refresh_async().await;

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.iter().all(|w| w.is_running()));
    let subs: Vec<_> = snapshot.iter().map(|w| w.subscription().id.clone()).collect();
    assert_eq!(subs, vec!["sub-1", "sub-2"]);
}

#[tokio::test]
async fn signed_out_refresh_is_silent_but_try_refresh_surfaces_it() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);
    h.auth.sign_out();

    h.manager.refresh_async().await;
    assert!(h.manager.snapshot().is_empty());
    assert_eq!(h.rest.hits(), 0);

    assert!(matches!(
        h.manager.try_refresh().await,
        Err(DiscoveryError::NotSignedIn)
    ));
}

#[tokio::test]
async fn blocking_refresh_on_current_thread_runtime_is_skipped() {
    let h = harness(one_workspace_one_pool(), &["sub-1"]);

    h.manager.refresh_blocking();

    assert!(h.manager.snapshot().is_empty());
    assert_eq!(h.rest.hits(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_refresh_timeout_keeps_prior_snapshot() {
    let mut config = ArcConfig::default();
    config.discovery.refresh_timeout_secs = 1;
    let h = harness_with(config, one_workspace_one_pool(), &["sub-1"]);
    h.manager.refresh_blocking();
    assert_eq!(pool_names(&h.manager), vec!["poolA"]);

    h.rest.replace(
        &workspaces_of("sub-1"),
        Reply::Slow(Duration::from_secs(10), list(Vec::new())),
    );
    let started = std::time::Instant::now();
    h.manager.refresh_blocking();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(pool_names(&h.manager), vec!["poolA"]);
}

/// Two resource groups holding a workspace of the same name; `slow_group`
/// answers its compute listing last.
async fn same_name_winner(slow_group: &str) -> (String, Vec<String>) {
    let reply = |group: &str| {
        let body = list(vec![pool_json(&format!("pool-{group}"), "Running")]);
        if group == slow_group {
            Reply::Slow(Duration::from_millis(200), body)
        } else {
            Reply::Body(body)
        }
    };
    let rest = StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![
                workspace_json_in("sub-1", "rg1", "wsA", "Running"),
                workspace_json_in("sub-1", "rg2", "wsA", "Running"),
            ])),
        )
        .route(&computes_in("rg1", "wsA"), reply("rg1"))
        .route(&computes_in("rg2", "wsA"), reply("rg2"));
    let h = harness(rest, &["sub-1"]);

    h.manager.try_refresh().await.unwrap();

    let snapshot = h.manager.snapshot();
    assert_eq!(snapshot.len(), 1);
    let winner = snapshot.iter().next().unwrap().model().id.clone();
    (winner, pool_names(&h.manager))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn same_name_workspaces_resolve_by_resource_id_not_completion_order() {
    let rg1_slow = same_name_winner("rg1").await;
    let rg2_slow = same_name_winner("rg2").await;

    assert_eq!(rg1_slow, rg2_slow);
    assert!(rg1_slow.0.contains("/resourceGroups/rg2/"));
    assert_eq!(rg1_slow.1, vec!["pool-rg2"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn current_clusters_filters_on_workspace_state_only() {
    let rest = StubRest::new()
        .route(
            &workspaces_of("sub-1"),
            Reply::Body(list(vec![workspace_json("sub-1", "wsA", "Running")])),
        )
        .route(
            &computes_of("wsA"),
            Reply::Body(list(vec![
                pool_json("busy", "Running"),
                pool_json("idle", "Paused"),
            ])),
        );
    let h = harness(rest, &["sub-1"]);

    h.manager.refresh_async().await;

    assert_eq!(pool_names(&h.manager), vec!["busy", "idle"]);
}
