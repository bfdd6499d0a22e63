use std::path::Path;

use triplereplay::board::Slot;
use triplereplay::{
    apply_move, load_catalog_from_json, score, Board, Card, CardCatalog, Edge, FlipReason, Hand,
    MatchSetup, Move, MoveError, Side, DEFAULT_V1, DEFAULT_V2,
};

fn cards_db() -> CardCatalog {
    let path = Path::new("data/cards.json");
    load_catalog_from_json(path).expect("failed to load cards.json")
}

fn flat(id: u32, v: u8) -> Card {
    Card::new(id, [v, v, v, v], None)
}

fn test_catalog() -> CardCatalog {
    CardCatalog::from_cards(vec![
        flat(100, 5),
        flat(101, 1),
        flat(102, 5),
        flat(103, 9),
    ])
    .expect("catalog")
}

fn hand_a() -> Hand {
    Hand::new([100, 100, 100, 100, 100])
}

fn place_b(board: &mut Board, cell: u8, card_id: u32) {
    board
        .place(cell, Slot { card_id, owner: Side::B })
        .expect("empty cell");
}

#[test]
fn basic_flip_strictly_greater_only() {
    let cards = test_catalog();
    let mut board = Board::new();
    place_b(&mut board, 1, 101); // north of center, south edge 1
    place_b(&mut board, 5, 102); // east of center, west edge 5 (tie)
    place_b(&mut board, 7, 103); // south of center, north edge 9

    let out = apply_move(&board, Side::A, &hand_a(), Move::place(4, 0), &cards, &DEFAULT_V1)
        .expect("apply_move");

    assert_eq!(out.flipped, vec![1]);
    assert_eq!(out.board.get(1).unwrap().owner, Side::A);
    assert_eq!(out.board.get(5).unwrap().owner, Side::B, "tie must not flip");
    assert_eq!(out.board.get(7).unwrap().owner, Side::B);
    assert_eq!(out.card_id, 100);

    let ev = out.trace.events[0];
    assert_eq!(ev.reason, FlipReason::Basic);
    assert_eq!((ev.cell, ev.from_cell, ev.attack, ev.defense), (1, 4, 5, 1));
    assert_eq!(score(&out.board), 1);
}

#[test]
fn own_neighbors_are_never_compared() {
    let cards = test_catalog();
    let mut board = Board::new();
    board
        .place(1, Slot { card_id: 101, owner: Side::A })
        .expect("empty cell");

    let out = apply_move(&board, Side::A, &hand_a(), Move::place(4, 0), &cards, &DEFAULT_V2)
        .expect("apply_move");
    assert!(out.flipped.is_empty());
    assert!(out.trace.events.is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let cards = test_catalog();
    let mut board = Board::new();
    place_b(&mut board, 1, 101);
    let before = board.clone();
    let hand = hand_a();

    let out = apply_move(&board, Side::A, &hand, Move::place(4, 2), &cards, &DEFAULT_V2)
        .expect("apply_move");
    assert_eq!(board, before);
    assert!(!hand.is_played(2));
    assert_ne!(out.board, before);
}

#[test]
fn occupied_cell_is_rejected() {
    let cards = test_catalog();
    let mut board = Board::new();
    place_b(&mut board, 4, 101);

    let err = apply_move(&board, Side::A, &hand_a(), Move::place(4, 0), &cards, &DEFAULT_V1)
        .unwrap_err();
    assert_eq!(err, MoveError::CellOccupied(4));
}

#[test]
fn out_of_range_move_fields_are_rejected() {
    let cards = test_catalog();
    let board = Board::new();
    let err = apply_move(&board, Side::A, &hand_a(), Move::place(9, 0), &cards, &DEFAULT_V1)
        .unwrap_err();
    assert_eq!(err, MoveError::CellOutOfRange(9));
    let err = apply_move(&board, Side::A, &hand_a(), Move::place(0, 5), &cards, &DEFAULT_V1)
        .unwrap_err();
    assert_eq!(err, MoveError::CardIndexOutOfRange(5));
}

#[test]
fn unknown_card_is_rejected() {
    let cards = test_catalog();
    let hand = Hand::new([999, 100, 100, 100, 100]);
    let err = apply_move(&Board::new(), Side::A, &hand, Move::place(0, 0), &cards, &DEFAULT_V1)
        .unwrap_err();
    assert_eq!(err, MoveError::UnknownCard(999));
}

#[test]
fn match_state_tracks_played_indices() {
    let cards = test_catalog();
    let setup = MatchSetup::new([100; 5], [101; 5]);
    let s0 = setup.initial_state();

    let (s1, _) = s0.apply(Move::place(0, 3), &cards, &DEFAULT_V1).expect("A move");
    assert!(s1.hand(Side::A).is_played(3));
    assert_eq!(s1.next, Side::B);

    let (s2, _) = s1.apply(Move::place(1, 3), &cards, &DEFAULT_V1).expect("B move");
    let err = s2.apply(Move::place(2, 3), &cards, &DEFAULT_V1).unwrap_err();
    assert_eq!(err, MoveError::CardAlreadyPlayed(3));
}

#[test]
fn sequential_playout_fills_board() {
    let cards = cards_db();
    let setup = MatchSetup::new([1, 2, 3, 4, 5], [6, 7, 8, 9, 10]);
    let mut state = setup.initial_state();
    assert!(!state.is_terminal());

    for t in 0u8..9 {
        let mv = Move::place(t, t / 2);
        state = state.apply(mv, &cards, &DEFAULT_V2).expect("apply").0;
    }
    assert!(state.is_terminal());
    assert!(state.hand(Side::A).remaining().is_empty());
    assert_eq!(state.hand(Side::B).remaining(), vec![10]);
    let err = state.apply(Move::place(0, 0), &cards, &DEFAULT_V2).unwrap_err();
    assert_eq!(err, MoveError::MatchComplete);
}

#[test]
fn neighbors_follow_edge_order() {
    assert_eq!(Board::neighbors(4), [Some(1), Some(5), Some(7), Some(3)]);
    assert_eq!(Board::neighbors(0), [None, Some(1), Some(3), None]);
    assert_eq!(Board::neighbor(8, Edge::East), None);
    assert_eq!(Board::neighbors(9), [None; 4]);
    assert_eq!(Board::neighbors(u8::MAX), [None; 4]);
}
