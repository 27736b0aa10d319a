use battleships::{
    resolve_fire, CellState, Coordinate, Dimensions, FleetPlacer, Grid, GridError, HitState,
    ShipDefinition,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn populated(defs: &[ShipDefinition], seed: u64) -> Grid {
    let mut grid = Grid::new(Dimensions::new(10, 10)).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    FleetPlacer::default().place(&mut grid, defs, &mut rng).unwrap();
    grid
}

fn water_cell(grid: &Grid) -> Coordinate {
    grid.cells()
        .iter()
        .find(|c| c.state == CellState::Water)
        .map(|c| c.coordinate())
        .unwrap()
}

#[test]
fn miss_reports_water() {
    let mut grid = populated(&[ShipDefinition::line("Carrier", 5).unwrap()], 1);
    let target = water_cell(&grid);
    let outcome = resolve_fire(&mut grid, target.x as isize, target.y as isize).unwrap();
    assert_eq!(outcome.hit_state, HitState::Water);
    assert_eq!(outcome.cell.state, CellState::Miss);
    assert_eq!(outcome.ship_type, None);
    assert!(!outcome.fleet_destroyed);
}

#[test]
fn sinking_the_only_ship_destroys_the_fleet() {
    let mut grid = populated(&[ShipDefinition::line("Carrier", 5).unwrap()], 2);
    let position = grid.fleet()[0].position().to_vec();
    let (last, rest) = position.split_last().unwrap();
    for c in rest {
        let outcome = resolve_fire(&mut grid, c.x as isize, c.y as isize).unwrap();
        assert_eq!(outcome.hit_state, HitState::Hit);
        assert_eq!(outcome.ship_type.as_deref(), Some("Carrier"));
        assert!(!outcome.fleet_destroyed);
    }
    let outcome = resolve_fire(&mut grid, last.x as isize, last.y as isize).unwrap();
    assert_eq!(outcome.hit_state, HitState::WholeShipDestroyed);
    assert!(outcome.fleet_destroyed);
}

#[test]
fn sinking_one_of_several_ships() {
    let defs = [
        ShipDefinition::line("Boat", 2).unwrap(),
        ShipDefinition::line("Submarine", 1).unwrap(),
    ];
    let mut grid = populated(&defs, 3);
    let sub = grid.fleet()[1].position()[0];
    let outcome = resolve_fire(&mut grid, sub.x as isize, sub.y as isize).unwrap();
    assert_eq!(outcome.hit_state, HitState::WholeShipDestroyed);
    assert_eq!(outcome.ship_type.as_deref(), Some("Submarine"));
    assert!(!outcome.fleet_destroyed);
}

#[test]
fn grid_errors_propagate_unchanged() {
    let mut grid = populated(&[ShipDefinition::line("Boat", 2).unwrap()], 4);
    assert_eq!(
        resolve_fire(&mut grid, -1, 0).unwrap_err(),
        GridError::OutOfBounds { x: -1, y: 0 }
    );
    assert_eq!(
        resolve_fire(&mut grid, 10, 10).unwrap_err(),
        GridError::OutOfBounds { x: 10, y: 10 }
    );
    let target = grid.fleet()[0].position()[0];
    resolve_fire(&mut grid, target.x as isize, target.y as isize).unwrap();
    assert_eq!(
        resolve_fire(&mut grid, target.x as isize, target.y as isize).unwrap_err(),
        GridError::AlreadyFired {
            x: target.x,
            y: target.y
        }
    );
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repeated_shot_changes_nothing(seed in any::<u64>(), x in 0usize..10, y in 0usize..10) {
            let defs = battleships::standard_fleet().unwrap();
            let mut grid = populated(&defs, seed);
            let first = resolve_fire(&mut grid, x as isize, y as isize).unwrap();
            prop_assert!(first.cell.state.is_resolved());
            let snapshot = grid.clone();
            prop_assert_eq!(
                resolve_fire(&mut grid, x as isize, y as isize).unwrap_err(),
                GridError::AlreadyFired { x, y }
            );
            prop_assert_eq!(grid, snapshot);
        }
    }
}
