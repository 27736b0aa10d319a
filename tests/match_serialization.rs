use battleships::{
    standard_fleet, CellState, Dimensions, FleetPlacer, Match, MatchId, Player,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn match_roundtrip_mid_game() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut game = Match::new(
        MatchId::generate(&mut rng),
        Player::new("alice"),
        Player::new("bob"),
    )
    .unwrap();
    game.initialize(
        &standard_fleet().unwrap(),
        Dimensions::new(10, 10),
        &FleetPlacer::default(),
        &mut rng,
    )
    .unwrap();
    let target = game
        .playing_field_of_next_mover()
        .unwrap()
        .cells()
        .iter()
        .find(|c| c.state == CellState::Ship)
        .map(|c| c.coordinate())
        .unwrap();
    game.fire(target.x as isize, target.y as isize).unwrap();

    let bytes = bincode::serialize(&game).expect("serialize");
    let restored: Match = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(restored, game);
    assert_eq!(
        restored.field_of(&Player::new("bob")).unwrap().count(CellState::Hit),
        1
    );

    let json = serde_json::to_string(&game).unwrap();
    let from_json: Match = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, game);
}
