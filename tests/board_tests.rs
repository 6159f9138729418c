use zugzwang::game::board::{Board, EN_PASSANT_BIT};
use zugzwang::game::pieces::{
    ColorExt, BISHOP, BLACK, KING, KNIGHT, PAWN, QUEEN, ROOK, WHITE,
};
use zugzwang::game::state::{
    en_passant_bits, ALL_CASTLING_RIGHTS, BLACK_CASTLING_RIGHTS, WHITE_CASTLING_RIGHTS,
    WHITE_HAS_CASTLED,
};
use zugzwang::utils::zobrist::ZOBRIST;

fn board_from_items(items: &[i8; 64], clock: u16, count: u16, state: u32) -> Board {
    let mut vector: Vec<i32> = items.iter().map(|&piece| piece as i32).collect();
    vector.push(clock as i32);
    vector.push(count as i32);
    vector.push(state as i32);

    Board::new(&vector).unwrap()
}

fn starting_position() -> Board {
    let back_rank = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];

    let mut items = [0i32; 67];
    for file in 0..8 {
        items[file] = -(back_rank[file] as i32);
        items[8 + file] = -(PAWN as i32);
        items[48 + file] = PAWN as i32;
        items[56 + file] = back_rank[file] as i32;
    }
    items[66] = ALL_CASTLING_RIGHTS as i32;

    Board::new(&items).unwrap()
}

fn snapshot(board: &Board) -> (u64, Vec<i8>, u32, u16, u16, i32, i32, i32) {
    (
        board.get_hash(),
        (0..64).map(|pos| board.get_item(pos)).collect(),
        board.get_state(),
        board.get_halfmove_clock(),
        board.get_halfmove_count(),
        board.find_king_position(WHITE),
        board.find_king_position(BLACK),
        board.get_score(),
    )
}

#[test]
fn the_starting_position_is_symmetric() {
    let board = starting_position();

    assert_eq!(board.get_score(), 0);
    assert_ne!(board.get_hash(), 0);
    assert_eq!(board.get_active_player(), WHITE);
    assert_eq!(board.get_state() & ALL_CASTLING_RIGHTS, ALL_CASTLING_RIGHTS);
    assert_eq!(board.get_state() & WHITE_HAS_CASTLED, 0);
    assert_eq!(board.get_full_move_count(), 1);
}

#[test]
fn the_kings_pawn_opening_updates_all_bookkeeping() {
    let mut board = starting_position();
    let initial_hash = board.get_hash();

    let removed = board.perform_move(PAWN, 52, 36);
    assert_eq!(removed, 0);

    assert_eq!(board.get_halfmove_count(), 1);
    assert_eq!(board.get_halfmove_clock(), 0);
    assert_eq!(board.get_active_player(), BLACK);

    // the double push flags file e for a Black en-passant capture
    assert_eq!(en_passant_bits(board.get_state()), 1 << (8 + 4));

    // the new hash differs exactly by the moved pawn, the side to move
    // and the en-passant file token
    let expected = initial_hash
        ^ ZOBRIST.piece_key(PAWN, 52)
        ^ ZOBRIST.piece_key(PAWN, 36)
        ^ ZOBRIST.player
        ^ ZOBRIST.en_passant[8 + 4];
    assert_eq!(board.get_hash(), expected);
}

#[test]
fn short_castling_moves_both_pieces_and_undoes_cleanly() {
    const P: i8 = PAWN;
    const R: i8 = ROOK;
    const K: i8 = KING;

    #[rustfmt::skip]
    let items: [i8; 64] = [
        -R,  0,  0,  0, -K,  0,  0, -R,
        -P, -P, -P, -P, -P, -P, -P, -P,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         P,  P,  P,  P,  P,  P,  P,  P,
         R,  0,  0,  0,  K,  0,  0,  R,
    ];

    let mut board = board_from_items(&items, 0, 0, ALL_CASTLING_RIGHTS);
    let before = snapshot(&board);

    let removed = board.perform_move(KING, 60, 62);

    assert_eq!(board.get_item(62), KING);
    assert_eq!(board.get_item(61), ROOK);
    assert_eq!(board.get_item(60), 0);
    assert_eq!(board.get_item(63), 0);
    assert_eq!(board.find_king_position(WHITE), 62);
    assert_ne!(board.get_state() & WHITE_HAS_CASTLED, 0);
    assert_eq!(board.get_state() & WHITE_CASTLING_RIGHTS, 0);
    assert_eq!(
        board.get_state() & BLACK_CASTLING_RIGHTS,
        BLACK_CASTLING_RIGHTS
    );

    board.undo_move(KING, 60, 62, removed);
    assert_eq!(snapshot(&board), before);
}

#[test]
fn en_passant_returns_its_marker_and_restores_the_pawn() {
    const P: i8 = PAWN;
    const K: i8 = KING;

    #[rustfmt::skip]
    let items: [i8; 64] = [
         0,  0,  0,  0, -K,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0, -P,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  P,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  K,  0,  0,  0,
    ];

    // Black double-pushes past the White pawn first
    let mut board = board_from_items(&items, 0, 1, 0);
    board.perform_move(PAWN, 20, 36);

    let before = snapshot(&board);
    let removed = board.perform_move(PAWN, 35, 28);

    assert_eq!(removed, EN_PASSANT_BIT);
    assert_eq!(board.get_item(28), PAWN);
    assert_eq!(board.get_item(36), 0);

    board.undo_move(PAWN, 35, 28, removed);
    assert_eq!(snapshot(&board), before);
    assert_eq!(board.get_item(36), -PAWN);
}

#[test]
fn capturing_a_defended_pawn_with_a_knight_loses_material() {
    const P: i8 = PAWN;
    const N: i8 = KNIGHT;
    const K: i8 = KING;

    #[rustfmt::skip]
    let items: [i8; 64] = [
         0,  0,  0,  0, -K,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0, -P,  0,  0,  0,  0,  0,
         0,  0,  0, -P,  0,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  N,  0,  0,  0,
         0,  0,  0,  0,  0,  0,  0,  0,
         0,  0,  0,  0,  K,  0,  0,  0,
    ];

    let board = board_from_items(&items, 0, 0, 0);
    assert_eq!(board.see_score(BLACK, 44, 27, KNIGHT, PAWN), 100 - 320);
}

#[test]
fn knight_shuffling_runs_into_the_repetition_rules() {
    let mut board = starting_position();
    let shuffle = [
        (KNIGHT, 62, 45),
        (KNIGHT, 6, 21),
        (KNIGHT, 45, 62),
        (KNIGHT, 21, 6),
    ];

    assert!(!board.is_engine_draw());

    for (piece_id, start, end) in shuffle {
        board.perform_move(piece_id, start, end);
    }
    assert!(board.is_engine_draw(), "one repetition is a draw for the search");
    assert!(!board.is_threefold_repetition());

    for (piece_id, start, end) in shuffle {
        board.perform_move(piece_id, start, end);
    }
    assert!(board.is_threefold_repetition());
    assert!(board.is_engine_draw());
}

#[test]
fn a_longer_game_unwinds_to_the_exact_starting_state() {
    let mut board = starting_position();
    let initial = snapshot(&board);

    let moves = [
        (PAWN, 52, 36),   // e4
        (PAWN, 11, 27),   // d5
        (PAWN, 36, 27),   // exd5
        (KNIGHT, 6, 21),  // Nf6
        (KNIGHT, 62, 45), // Nf3
        (KNIGHT, 21, 27), // Nxd5
        (BISHOP, 61, 52), // Be2
        (PAWN, 12, 20),   // e6
        (KING, 60, 62),   // O-O
        (BISHOP, 5, 12),  // Be7
    ];

    let mut undo_stack = Vec::new();
    for (piece_id, start, end) in moves {
        let moved_piece = board.get_item(start);
        let removed = board.perform_move(piece_id, start, end);
        undo_stack.push((moved_piece, start, end, removed));

        // the incremental hash must stay in sync with a full rebuild
        let incremental = board.get_hash();
        board.recalculate_hash();
        assert_eq!(incremental, board.get_hash());
    }

    for (piece, start, end, removed) in undo_stack.into_iter().rev() {
        board.undo_move(piece, start, end, removed);
    }

    assert_eq!(snapshot(&board), initial);
}

#[test]
fn null_moves_are_their_own_inverse() {
    let mut board = starting_position();
    board.perform_move(PAWN, 52, 36);

    let before = snapshot(&board);
    board.perform_null_move();
    board.undo_null_move();
    assert_eq!(snapshot(&board), before);
}

#[test]
fn the_active_player_follows_the_halfmove_count() {
    let mut board = starting_position();
    assert_eq!(board.get_active_player(), WHITE);

    board.perform_move(PAWN, 52, 36);
    assert_eq!(board.get_active_player(), BLACK);
    assert_eq!(board.get_active_player().flip(), WHITE);

    board.perform_null_move();
    assert_eq!(board.get_active_player(), WHITE);
}
