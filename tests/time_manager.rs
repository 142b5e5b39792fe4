use isobot::board::{Board, Player};
use isobot::search::{SearchParams, Searcher};
use std::time::{Duration, Instant};

#[test]
fn movetime_returns_quickly_with_move() {
    let b = Board::corners(7).unwrap();
    let mut s = Searcher::new(SearchParams { depth: 8, movetime: Some(Duration::from_millis(20)), ..Default::default() });
    let t0 = Instant::now();
    let r = s.search(&b, Player::One).unwrap();
    let elapsed = t0.elapsed();
    let m = r.best.expect("no move under movetime");
    assert!(b.is_legal(Player::One, m));
    assert!(r.aborted);
    assert!(r.depth < 8);
    assert!(elapsed < Duration::from_millis(2_000), "search exceeded time: {:?}", elapsed);
}

#[test]
fn node_limit_stops_early_and_returns_move() {
    let b = Board::corners(6).unwrap();
    let mut s = Searcher::new(SearchParams { depth: 6, max_nodes: Some(5_000), ..Default::default() });
    let r = s.search(&b, Player::Two).unwrap();
    assert!(r.best.is_some(), "no move under node limit");
    assert!(r.aborted);
    // Leaves below the last checked node are still counted, so allow one expansion of slack.
    assert!(r.nodes <= 5_000 + 1_000, "node limit exceeded: {}", r.nodes);
}

#[test]
fn unbudgeted_search_is_not_aborted() {
    let b = Board::corners(4).unwrap();
    let r = Searcher::new(SearchParams { depth: 2, ..Default::default() }).search(&b, Player::One).unwrap();
    assert!(!r.aborted);
    assert_eq!(r.depth, 2);
}
