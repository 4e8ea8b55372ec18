use goal_sort_terminal::viz::{Entry, Geometry, SIDE_PAD, SUBCELLS, VizState, plot_rows};

fn dataset(values: &[u32]) -> Vec<Entry> {
    values
        .iter()
        .map(|goals| Entry::new(format!("P{goals}"), *goals))
        .collect()
}

#[test]
fn derives_width_scale_and_origin() {
    let state = VizState::initialize(104, 24, dataset(&[2, 12, 7, 5]));
    let geo = state.geometry();
    assert_eq!(geo.bar_width, 25);
    assert_eq!(geo.min_value, 2);
    assert_eq!(geo.max_value, 12);
    // (24 - 4 - 1) rows * 8 / range 10
    assert_eq!(geo.bar_height_scale, 15);
    assert_eq!(geo.start_x, SIDE_PAD / 2);
    assert_eq!(geo.bar_x(3), 2 + 3 * 25);
}

#[test]
fn tallest_bar_fits_the_plot() {
    let state = VizState::initialize(80, 30, dataset(&[0, 3, 17, 29, 8]));
    let geo = state.geometry();
    let plot_units = plot_rows(30) as u32 * SUBCELLS;
    assert!(geo.bar_units(29) <= plot_units);
    assert_eq!(geo.bar_units(0), SUBCELLS);
}

#[test]
fn zero_range_gives_equal_visible_bars() {
    let state = VizState::initialize(60, 20, dataset(&[4, 4, 4]));
    let geo = state.geometry();
    assert!(geo.bar_height_scale >= 1);
    let heights: Vec<u32> = state.entries().iter().map(|e| geo.bar_units(e.goals)).collect();
    assert!(heights.iter().all(|h| *h == heights[0]));
    assert!(heights[0] > 0);
}

#[test]
fn derivation_is_repeatable() {
    let data = dataset(&[9, 1, 4, 4, 13]);
    let mut state = VizState::initialize(90, 25, data.clone());
    let first = state.geometry();
    state.update_dataset(data.clone());
    assert_eq!(state.geometry(), first);
    assert_eq!(Geometry::derive(90, 25, &data), first);
}

#[test]
fn update_dataset_recomputes_range() {
    let mut state = VizState::initialize(90, 25, dataset(&[1, 2]));
    state.update_dataset(dataset(&[10, 30, 20]));
    let geo = state.geometry();
    assert_eq!((geo.min_value, geo.max_value), (10, 30));
    assert_eq!(geo.bar_width, (90 - SIDE_PAD) / 3);
}

#[test]
fn reordering_keeps_geometry() {
    let mut state = VizState::initialize(70, 22, dataset(&[5, 1, 9]));
    let before = state.geometry();
    state.entries_mut().reverse();
    assert_eq!(state.geometry(), before);
}

#[test]
fn resize_only_rebuilds_on_change() {
    let mut state = VizState::initialize(70, 22, dataset(&[5, 1, 9]));
    assert!(!state.resize(70, 22));
    assert!(state.resize(40, 12));
    assert_eq!(state.geometry(), Geometry::derive(40, 12, state.entries()));
}

#[test]
fn tiny_areas_do_not_panic() {
    let geo = Geometry::derive(2, 1, &dataset(&[3, 100]));
    assert_eq!(geo.bar_width, 1);
    assert_eq!(geo.bar_height_scale, 1);
    let empty = Geometry::derive(50, 20, &[]);
    assert_eq!(empty.min_value, 0);
}

#[test]
fn more_bars_than_u16_still_get_one_cell() {
    let data: Vec<Entry> = (0..65_536u32).map(|idx| Entry::new("P", idx % 5)).collect();
    let geo = Geometry::derive(120, 40, &data);
    assert_eq!(geo.bar_width, 1);
    assert_eq!(geo.bar_x(65_535), 2 + 65_535);
}

#[test]
fn extreme_goal_totals_saturate() {
    let data = goal_sort_terminal::offline::parse_offline_json(
        r#"{"players":[{"name":"A","goals":0},{"name":"B","goals":4294967295}]}"#,
    )
    .expect("valid offline json");
    let geo = Geometry::derive(80, 24, &data);
    assert_eq!(geo.bar_height_scale, 1);
    assert_eq!(geo.bar_units(u32::MAX), u32::MAX);
    assert_eq!(geo.bar_units(0), SUBCELLS);
}
