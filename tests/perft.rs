use isobot::board::{Board, Player};
use isobot::perft::{perft, perft_copy};

#[test]
fn perft_two_by_two_corners() {
    let mut b = Board::corners(2).unwrap();
    assert_eq!(perft(&mut b, Player::One, 1), 4);
    assert_eq!(perft(&mut b, Player::One, 2), 4);
    // After two plies player one is walled in.
    assert_eq!(perft(&mut b, Player::One, 3), 0);
}

#[test]
fn perft_depth_one_counts() {
    let mut b3 = Board::corners(3).unwrap();
    assert_eq!(perft(&mut b3, Player::One, 1), 3 * 7);
    let mut b4 = Board::corners(4).unwrap();
    assert_eq!(perft(&mut b4, Player::One, 1), 3 * 14);
}

#[test]
fn make_unmake_matches_copies() {
    for (code, depth) in [("1../.#./..2", 3), ("1.../..../..../...2", 2), ("..1./#.../..2./....", 2)] {
        let mut b: Board = code.parse().unwrap();
        let before = b.clone();
        for mover in Player::BOTH {
            assert_eq!(perft(&mut b, mover, depth), perft_copy(&b, mover, depth), "{code} {mover}");
        }
        assert_eq!(b, before, "perft left {code} modified");
    }
}
