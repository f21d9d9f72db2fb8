mod common;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use zonewatch::db::{buy_zone_repo, price_repo, stock_repo};
use zonewatch::ingestion::pipeline::{self, StockPatch};
use zonewatch::models::Status;
use zonewatch::valuation::BuyZoneEvent;

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

#[tokio::test]
async fn test_price_sequence_produces_single_closed_entry() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    // 130 -> extended, 95 -> buy_zone, 108 -> watch_zone
    let out = pipeline::apply_price_update(&pool, stock.id, Some(dec(130)), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::Extended);
    assert!(out.event.is_none());

    let out = pipeline::apply_price_update(&pool, stock.id, Some(dec(95)), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::BuyZone);
    assert!(matches!(out.event, Some(BuyZoneEvent::Enter { .. })));

    let out = pipeline::apply_price_update(&pool, stock.id, Some(dec(108)), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::WatchZone);
    assert!(matches!(out.event, Some(BuyZoneEvent::Exit { .. })));

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_price, Some(dec(95)));
    assert_eq!(entries[0].exit_price, Some(dec(108)));
    assert_eq!(entries[0].outcome.as_deref(), Some("win"));
    assert!(entries[0].exited_at.is_some());
}

#[tokio::test]
async fn test_oscillation_never_leaves_more_than_one_open_entry() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    for price in [95, 108, 92, 120, 99] {
        pipeline::apply_price_update(&pool, stock.id, Some(dec(price)), Utc::now())
            .await
            .unwrap();
    }

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert_eq!(entries.len(), 3);
    let open: Vec<_> = entries.iter().filter(|e| e.exited_at.is_none()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].entry_price, Some(dec(99)));
}

#[tokio::test]
async fn test_null_price_clears_stored_price_and_closes_interval() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    let out = pipeline::apply_price_update(&pool, stock.id, Some(dec(95)), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::BuyZone);

    let out = pipeline::apply_price_update(&pool, stock.id, None, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::Extended);
    assert!(matches!(out.event, Some(BuyZoneEvent::Exit { price: None })));

    let refreshed = stock_repo::get_by_id(&pool, stock.id).await.unwrap().unwrap();
    assert_eq!(refreshed.current_price, None);
    assert_eq!(refreshed.status, Status::Extended);

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].exit_price, None);
    assert_eq!(entries[0].outcome, None);
    assert!(entries[0].exited_at.is_some());
}

#[tokio::test]
async fn test_null_price_appends_no_history_point() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    pipeline::apply_price_update(&pool, stock.id, Some(dec(110)), Utc::now())
        .await
        .unwrap();
    pipeline::apply_price_update(&pool, stock.id, None, Utc::now())
        .await
        .unwrap();

    let points = price_repo::get_recent(&pool, stock.id, 30).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].price, dec(110));
}

#[tokio::test]
async fn test_watch_extended_moves_write_no_history() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    for price in [110, 130, 105, 140] {
        pipeline::apply_price_update(&pool, stock.id, Some(dec(price)), Utc::now())
            .await
            .unwrap();
    }

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_gated_stock_never_opens_entry() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, true).await;

    let out = pipeline::apply_price_update(&pool, stock.id, Some(dec(90)), Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(out.new_status, Status::Avoid);
    assert!(out.event.is_none());

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_gating_while_in_zone_closes_interval() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    pipeline::apply_price_update(&pool, stock.id, Some(dec(95)), Utc::now())
        .await
        .unwrap();

    let patch = StockPatch {
        macro_gated: Some(true),
        ..StockPatch::default()
    };
    let saved = pipeline::apply_stock_edit(&pool, stock.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.status, Status::Avoid);

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].exit_price, Some(dec(95)));
    assert!(entries[0].exited_at.is_some());
}

#[tokio::test]
async fn test_target_edit_can_open_entry() {
    let pool = common::setup_test_db().await;
    let stock = common::seed_stock(&pool, &common::unique_ticker(), 100, None, false).await;

    pipeline::apply_price_update(&pool, stock.id, Some(dec(108)), Utc::now())
        .await
        .unwrap();

    // Raising the target past the price flips watch_zone -> buy_zone.
    let patch = StockPatch {
        buy_target: Some(dec(110)),
        ..StockPatch::default()
    };
    let saved = pipeline::apply_stock_edit(&pool, stock.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.status, Status::BuyZone);

    let entries = buy_zone_repo::get_by_stock(&pool, stock.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry_price, Some(dec(108)));
    assert!(entries[0].exited_at.is_none());
}

#[tokio::test]
async fn test_unknown_stock_is_a_noop() {
    let pool = common::setup_test_db().await;

    let out = pipeline::apply_price_update(&pool, Uuid::new_v4(), Some(dec(50)), Utc::now())
        .await
        .unwrap();
    assert!(out.is_none());
}
