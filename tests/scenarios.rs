//! The eight concrete scenarios from the matching-core design doc, one test
//! each: add/match/cancel/reduce behavior against a fresh book per test.

use itchbook::{OrderBook, Side};

fn book() -> OrderBook {
    OrderBook::new(0.0, 100.0)
}

#[test]
fn add_order_inserts_correctly() {
    let mut book = book();
    book.submit_limit(1, Side::Buy, 25.50, 100).unwrap();
    let best = book.best_bid();
    assert!(best.valid);
    assert_eq!(best.price, 25.50);
    assert_eq!(best.qty, 100);
}

#[test]
fn match_buy_against_sell() {
    let mut book = book();
    book.submit_limit(1, Side::Sell, 10.00, 100).unwrap();
    book.submit_limit(2, Side::Buy, 10.00, 100).unwrap();
    assert!(!book.best_bid().valid);
    assert!(!book.best_ask().valid);
    assert_eq!(book.total_trades(), 1);
}

#[test]
fn cancel_removes_order() {
    let mut book = book();
    book.submit_limit(1, Side::Buy, 10.00, 100).unwrap();
    book.cancel(1);
    assert!(!book.best_bid().valid);
    assert_eq!(book.order_count(), 0);
}

#[test]
fn reduce_order_decreases_quantity() {
    let mut book = book();
    book.submit_limit(1, Side::Buy, 10.00, 100).unwrap();
    book.reduce(1, 40);
    assert_eq!(book.best_bid().qty, 60);
}

#[test]
fn reduce_order_cancels_when_too_large() {
    let mut book = book();
    book.submit_limit(1, Side::Buy, 10.00, 100).unwrap();
    book.reduce(1, 500);
    assert!(!book.best_bid().valid);
}

#[test]
fn buy_order_sweeps_multiple_asks() {
    let mut book = book();
    book.submit_limit(1, Side::Sell, 10.00, 50).unwrap();
    book.submit_limit(2, Side::Sell, 10.05, 50).unwrap();
    book.submit_limit(3, Side::Sell, 10.10, 50).unwrap();
    book.submit_limit(4, Side::Buy, 10.10, 130).unwrap();

    let best_ask = book.best_ask();
    assert!(best_ask.valid);
    assert_eq!(best_ask.price, 10.10);
    assert_eq!(best_ask.qty, 20);
}

#[test]
fn partial_fill_leaves_resting_order() {
    let mut book = book();
    book.submit_limit(1, Side::Sell, 10.00, 100).unwrap();
    book.submit_limit(2, Side::Buy, 10.00, 40).unwrap();

    let best_ask = book.best_ask();
    assert!(best_ask.valid);
    assert_eq!(best_ask.qty, 60);
    assert!(!book.best_bid().valid);
}

#[test]
fn replace_preserves_side_but_loses_priority() {
    let mut book = book();
    book.submit_limit(1, Side::Buy, 10.00, 100).unwrap();
    book.submit_limit(2, Side::Buy, 10.00, 100).unwrap();
    book.replace(1, 3, 10.00, 100).unwrap();
    book.submit_limit(4, Side::Sell, 10.00, 100).unwrap();
    // order 2 still had time priority over the replaced order 3.
    assert_eq!(book.best_bid().qty, 100);
    book.submit_limit(5, Side::Sell, 10.00, 100).unwrap();
    assert!(!book.best_bid().valid);
}
