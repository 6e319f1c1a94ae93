//! Tests for the wire contract: strict decoding of service JSON and the
//! display derivations built on it.

use othello_client::{Coord, Disc, HistoryItem, MatchState, OpponentKind, Side, Winner};

/// Board JSON for the standard opening position.
fn opening_board_json() -> serde_json::Value {
    let mut rows = vec![vec![0i8; 8]; 8];
    rows[3][3] = -1;
    rows[3][4] = 1;
    rows[4][3] = 1;
    rows[4][4] = -1;
    serde_json::json!(rows)
}

fn opening_state_json() -> serde_json::Value {
    serde_json::json!({
        "id": "7f7f3f4e-0000-4000-8000-000000000001",
        "board": opening_board_json(),
        "player": 1,
        "legal_moves": [[2, 3], [3, 2], [4, 5], [5, 4]],
        "over": false,
        "score": 0,
        "opponent": "random",
        "winner": null
    })
}

#[test]
fn decodes_opening_state() {
    let state: MatchState = serde_json::from_value(opening_state_json()).unwrap();

    assert_eq!(state.player, Side::Black);
    assert_eq!(state.opponent, OpponentKind::Random);
    assert!(!state.over);
    assert_eq!(state.winner, None);
    assert_eq!(state.score, 0);
    assert_eq!(state.legal_moves.len(), 4);
    assert!(state.legal_moves.contains(&Coord::new(2, 3).unwrap()));

    assert_eq!(state.board.get(Coord::new(3, 3).unwrap()), Disc::White);
    assert_eq!(state.board.get(Coord::new(3, 4).unwrap()), Disc::Black);
    assert_eq!(state.board.get(Coord::new(0, 0).unwrap()), Disc::Empty);
    assert_eq!(state.board.count(Disc::Black), 2);
    assert_eq!(state.board.count(Disc::White), 2);
}

#[test]
fn missing_winner_field_decodes_as_none() {
    let mut json = opening_state_json();
    json.as_object_mut().unwrap().remove("winner");
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.winner, None);
}

#[test]
fn winner_values_cover_both_sides_and_draw() {
    for (value, expected) in [(1, Winner::Black), (-1, Winner::White), (0, Winner::Draw)] {
        let mut json = opening_state_json();
        json["over"] = serde_json::json!(true);
        json["winner"] = serde_json::json!(value);
        let state: MatchState = serde_json::from_value(json).unwrap();
        assert_eq!(state.winner, Some(expected));
    }
}

#[test]
fn rejects_out_of_range_cell_value() {
    let mut json = opening_state_json();
    json["board"][0][0] = serde_json::json!(2);
    assert!(serde_json::from_value::<MatchState>(json).is_err());
}

#[test]
fn rejects_out_of_range_coordinate() {
    let mut json = opening_state_json();
    json["legal_moves"] = serde_json::json!([[8, 0]]);
    assert!(serde_json::from_value::<MatchState>(json).is_err());
}

#[test]
fn rejects_wrong_board_dimensions() {
    let mut json = opening_state_json();
    let rows = vec![vec![0i8; 8]; 7];
    json["board"] = serde_json::json!(rows);
    assert!(serde_json::from_value::<MatchState>(json).is_err());

    let mut json = opening_state_json();
    let rows = vec![vec![0i8; 9]; 8];
    json["board"] = serde_json::json!(rows);
    assert!(serde_json::from_value::<MatchState>(json).is_err());
}

#[test]
fn rejects_unknown_opponent_kind() {
    let mut json = opening_state_json();
    json["opponent"] = serde_json::json!("minimax");
    assert!(serde_json::from_value::<MatchState>(json).is_err());
}

#[test]
fn playable_requires_empty_cell_in_legal_set() {
    let state: MatchState = serde_json::from_value(opening_state_json()).unwrap();

    // Legal and empty.
    assert!(state.is_playable(Coord::new(2, 3).unwrap()));
    // Empty but not in the legal set.
    assert!(!state.is_playable(Coord::new(0, 0).unwrap()));
    // Occupied.
    assert!(!state.is_playable(Coord::new(3, 3).unwrap()));
}

#[test]
fn score_pair_floors_each_side_at_zero() {
    let mut json = opening_state_json();
    json["score"] = serde_json::json!(4);
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.score_pair(), (4, 0));

    let mut json = opening_state_json();
    json["score"] = serde_json::json!(-3);
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.score_pair(), (0, 3));
}

#[test]
fn outcome_summary_translates_winner_and_signed_score() {
    let mut json = opening_state_json();
    json["over"] = serde_json::json!(true);
    json["winner"] = serde_json::json!(1);
    json["score"] = serde_json::json!(4);
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.outcome_summary().unwrap(), "Black wins, 4-0");

    let mut json = opening_state_json();
    json["over"] = serde_json::json!(true);
    json["winner"] = serde_json::json!(-1);
    json["score"] = serde_json::json!(-3);
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.outcome_summary().unwrap(), "White wins, 0-3");

    let mut json = opening_state_json();
    json["over"] = serde_json::json!(true);
    json["winner"] = serde_json::json!(0);
    json["score"] = serde_json::json!(0);
    let state: MatchState = serde_json::from_value(json).unwrap();
    assert_eq!(state.outcome_summary().unwrap(), "Draw, 0-0");
}

#[test]
fn live_state_has_no_outcome_summary() {
    let state: MatchState = serde_json::from_value(opening_state_json()).unwrap();
    assert_eq!(state.outcome_summary(), None);
}

#[test]
fn decodes_history_items_with_and_without_completion() {
    let json = serde_json::json!([
        {
            "id": "m2",
            "opponent": "agent",
            "created_at": "2025-08-02T09:15:00+00:00",
            "finished_at": "2025-08-02T09:21:42+00:00",
            "winner": -1,
            "score": -12
        },
        {
            "id": "m1",
            "opponent": "pvp",
            "created_at": "2025-08-01T12:34:56Z",
            "finished_at": null,
            "winner": null,
            "score": 2
        }
    ]);
    let items: Vec<HistoryItem> = serde_json::from_value(json).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "m2");
    assert_eq!(items[0].winner, Some(Winner::White));
    assert!(items[0].finished_at.is_some());
    assert_eq!(items[1].id, "m1");
    assert_eq!(items[1].winner, None);
    assert_eq!(items[1].finished_at, None);
}

#[test]
fn history_result_labels() {
    let mut item: HistoryItem = serde_json::from_value(serde_json::json!({
        "id": "m1",
        "opponent": "random",
        "created_at": "2025-08-01T12:34:56Z",
        "score": 2
    }))
    .unwrap();
    assert_eq!(item.result_label(), "In progress");

    item.winner = Some(Winner::Black);
    item.score = 40;
    assert_eq!(item.result_label(), "Black won, 40-0");

    item.winner = Some(Winner::White);
    item.score = -12;
    assert_eq!(item.result_label(), "White won, 0-12");

    item.winner = Some(Winner::Draw);
    item.score = 0;
    assert_eq!(item.result_label(), "Draw, 0-0");
}

#[test]
fn opponent_kinds_match_wire_names() {
    for (kind, name) in [
        (OpponentKind::Random, "random"),
        (OpponentKind::Agent, "agent"),
        (OpponentKind::Pvp, "pvp"),
    ] {
        assert_eq!(serde_json::to_value(kind).unwrap(), serde_json::json!(name));
    }
    assert_eq!(OpponentKind::default(), OpponentKind::Random);
}
