#![cfg(target_arch = "wasm32")]

use lines_core::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_clock_runs_in_browser() {
    let mut game = Game::new(GameConfig::classic(), 7).unwrap();
    game.start().unwrap();

    let before = game.elapsed_ms();
    assert!(game.elapsed_ms() >= before);
}

#[wasm_bindgen_test]
fn move_settles_in_browser() {
    let board = Board::from_ascii(&[
        "R........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
    ])
    .unwrap();
    let mut game = Game::with_board(GameConfig::classic(), board, 7).unwrap();

    assert_eq!(game.begin_move(Coords::new(0, 0), Coords::new(8, 8)), Ok(MoveOutcome::Moved));
    assert_eq!(game.complete_move(), Ok(MoveOutcome::Moved));
    assert_eq!(game.cell_at(Coords::new(8, 8)), Some(Color::Red));
    assert_eq!(game.board().count(Color::Trace), 0);
}
