use battleships::{
    CellState, Dimensions, FleetPlacer, Grid, GridError, ShipDefinition,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn new_grid_is_open_water() {
    for (x, y) in [(1, 1), (10, 10), (13, 20), (20, 11)] {
        let grid = Grid::new(Dimensions::new(x, y)).unwrap();
        assert_eq!(grid.cells().len(), x * y);
        assert!(grid.fleet().is_empty());
        for cell in grid.cells() {
            assert_eq!(cell.state, CellState::Water);
        }
        let cell = grid.cell_at(x as isize - 1, y as isize - 1).unwrap();
        assert_eq!((cell.x, cell.y), (x - 1, y - 1));
    }
}

#[test]
fn zero_dimensions_rejected() {
    let d = Dimensions::new(0, 10);
    assert_eq!(Grid::new(d).unwrap_err(), GridError::InvalidDimensions(d));
}

#[test]
fn out_of_bounds() {
    let mut grid = Grid::new(Dimensions::new(10, 12)).unwrap();
    assert_eq!(
        grid.fire(-1, 0).unwrap_err(),
        GridError::OutOfBounds { x: -1, y: 0 }
    );
    assert_eq!(
        grid.fire(10, 12).unwrap_err(),
        GridError::OutOfBounds { x: 10, y: 12 }
    );
    assert_eq!(
        grid.cell_at(0, 12).unwrap_err(),
        GridError::OutOfBounds { x: 0, y: 12 }
    );
    assert!(grid.cell_at(9, 11).is_ok());
}

#[test]
fn fire_at_water_misses_and_cannot_repeat() {
    let mut grid = Grid::new(Dimensions::new(10, 10)).unwrap();
    let cell = grid.fire(3, 4).unwrap();
    assert_eq!((cell.x, cell.y, cell.state), (3, 4, CellState::Miss));
    assert!(grid.ship_containing(&cell).is_none());

    let before = grid.clone();
    assert_eq!(
        grid.fire(3, 4).unwrap_err(),
        GridError::AlreadyFired { x: 3, y: 4 }
    );
    assert_eq!(grid, before);
}

#[test]
fn fire_at_ship_hits_exactly_one_ship() {
    let mut grid = Grid::new(Dimensions::new(10, 10)).unwrap();
    let defs = [
        ShipDefinition::line("Carrier", 5).unwrap(),
        ShipDefinition::line("Boat", 2).unwrap(),
    ];
    let mut rng = SmallRng::seed_from_u64(11);
    FleetPlacer::default().place(&mut grid, &defs, &mut rng).unwrap();

    let target = grid.fleet()[1].position()[0];
    let cell = grid.fire(target.x as isize, target.y as isize).unwrap();
    assert_eq!(cell.state, CellState::Hit);
    let ship = grid.ship_containing(&cell).unwrap();
    assert_eq!(ship.ship_type(), "Boat");
    let owners = grid.fleet().iter().filter(|s| s.occupies(target)).count();
    assert_eq!(owners, 1);
    assert!(!grid.is_ship_fully_sunk(ship));
    assert!(!grid.is_fleet_annihilated());

    let before = grid.clone();
    assert_eq!(
        grid.fire(target.x as isize, target.y as isize).unwrap_err(),
        GridError::AlreadyFired {
            x: target.x,
            y: target.y
        }
    );
    assert_eq!(grid, before);
}

#[test]
fn sunk_and_annihilated() {
    let mut grid = Grid::new(Dimensions::new(10, 10)).unwrap();
    let defs = [
        ShipDefinition::line("Cruiser", 3).unwrap(),
        ShipDefinition::line("Boat", 2).unwrap(),
    ];
    let mut rng = SmallRng::seed_from_u64(5);
    FleetPlacer::default().place(&mut grid, &defs, &mut rng).unwrap();

    let fleet: Vec<_> = grid.fleet().to_vec();
    for c in fleet[0].position() {
        grid.fire(c.x as isize, c.y as isize).unwrap();
    }
    assert!(grid.is_ship_fully_sunk(&grid.fleet()[0]));
    assert!(!grid.is_ship_fully_sunk(&grid.fleet()[1]));
    assert!(!grid.is_fleet_annihilated());

    for c in fleet[1].position() {
        grid.fire(c.x as isize, c.y as isize).unwrap();
    }
    assert!(grid.is_fleet_annihilated());
    assert_eq!(grid.count(CellState::Hit), 5);
    assert_eq!(grid.count(CellState::Ship), 0);
}

#[test]
fn rendering() {
    let mut grid = Grid::new(Dimensions::new(2, 2)).unwrap();
    assert_eq!(grid.render().to_string(), " | |\n | |\n");
    grid.fire(1, 0).unwrap();
    assert_eq!(grid.render().to_string(), " |-|\n | |\n");

    let mut single = Grid::new(Dimensions::new(3, 1)).unwrap();
    let defs = [ShipDefinition::line("Tug", 1).unwrap()];
    let mut rng = SmallRng::seed_from_u64(0);
    FleetPlacer::default().place(&mut single, &defs, &mut rng).unwrap();
    let ship_x = single.fleet()[0].position()[0].x;
    let revealed = single.render().to_string();
    assert_eq!(revealed.chars().nth(ship_x * 2), Some('O'));
    assert_eq!(single.render_hidden().to_string(), " | | |\n");

    single.fire(ship_x as isize, 0).unwrap();
    assert_eq!(single.render_hidden().to_string().chars().nth(ship_x * 2), Some('X'));
}

fn grid_with_boat() -> Grid {
    let mut grid = Grid::new(Dimensions::new(10, 10)).unwrap();
    let mut rng = SmallRng::seed_from_u64(21);
    FleetPlacer::default()
        .place(&mut grid, &[ShipDefinition::line("Boat", 2).unwrap()], &mut rng)
        .unwrap();
    grid
}

#[test]
fn deserialize_roundtrip() {
    let grid = grid_with_boat();
    let json = serde_json::to_string(&grid).unwrap();
    let restored: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, grid);
}

#[test]
fn deserialize_rejects_missing_cells() {
    let err = serde_json::from_str::<Grid>(
        r#"{"dimensions":{"x":10,"y":10},"cells":[],"fleet":[]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("holds 0 cells, expected 100"), "{}", err);

    let err = serde_json::from_str::<Grid>(
        r#"{"dimensions":{"x":0,"y":3},"cells":[],"fleet":[]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("positive"), "{}", err);
}

#[test]
fn deserialize_rejects_inconsistent_cells() {
    let mut value = serde_json::to_value(grid_with_boat()).unwrap();
    value["cells"][5]["x"] = serde_json::json!(7);
    let err = serde_json::from_value::<Grid>(value).unwrap_err();
    assert!(err.to_string().contains("index 5"), "{}", err);
}

#[test]
fn deserialize_rejects_stray_fleet() {
    let grid = grid_with_boat();
    let mut value = serde_json::to_value(&grid).unwrap();
    value["fleet"][0]["position"][0]["x"] = serde_json::json!(40);
    let err = serde_json::from_value::<Grid>(value).unwrap_err();
    assert!(err.to_string().contains("outside"), "{}", err);

    let water = grid
        .cells()
        .iter()
        .position(|c| c.state == CellState::Water)
        .unwrap();
    let mut value = serde_json::to_value(&grid).unwrap();
    value["fleet"][0]["position"][0]["x"] = serde_json::json!(water % 10);
    value["fleet"][0]["position"][0]["y"] = serde_json::json!(water / 10);
    let err = serde_json::from_value::<Grid>(value).unwrap_err();
    assert!(err.to_string().contains("not marked as a ship"), "{}", err);

    // a restored out-of-range grid still answers with errors, never panics
    let restored: Grid = serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
    assert_eq!(
        restored.cell_at(3, 10).unwrap_err(),
        GridError::OutOfBounds { x: 3, y: 10 }
    );
}
