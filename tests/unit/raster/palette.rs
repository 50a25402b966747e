use super::*;

fn full_gray_ramp() -> ColorTable {
    ColorTable::from_colors((0..=255u8).map(|v| Rgb8::new(v, v, v))).unwrap()
}

#[test]
fn exact_match_returns_existing_index_without_growth() {
    let mut table = ColorTable::from_colors([
        Rgb8::BLACK,
        Rgb8::from_hex(0xDDDDDD),
        Rgb8::WHITE,
    ])
    .unwrap();

    let idx = resolve(&mut table, Rgb8::new(0xDD, 0xDD, 0xDD));
    assert_eq!(idx, 1);
    assert_eq!(table.len(), 3);
}

#[test]
fn resolving_twice_is_idempotent() {
    let mut table = ColorTable::from_colors([Rgb8::BLACK]).unwrap();
    let a = resolve(&mut table, Rgb8::new(1, 2, 3));
    let len_after_first = table.len();
    let b = resolve(&mut table, Rgb8::new(1, 2, 3));
    assert_eq!(a, b);
    assert_eq!(a, 1);
    assert_eq!(table.len(), len_after_first);
    assert_eq!(table.len(), 2);
}

#[test]
fn spare_capacity_appends_new_color() {
    let mut table = ColorTable::new();
    assert_eq!(resolve(&mut table, Rgb8::WHITE), 0);
    assert_eq!(resolve(&mut table, Rgb8::BLACK), 1);
    assert_eq!(table.entries(), &[Rgb8::WHITE, Rgb8::BLACK]);
}

#[test]
fn full_table_falls_back_to_nearest_entry() {
    let mut table = full_gray_ramp();
    assert!(table.is_full());

    let idx = resolve(&mut table, Rgb8::new(200, 202, 201));
    assert_eq!(table.len(), ColorTable::CAPACITY);
    assert_eq!(table.get(idx), Some(Rgb8::new(201, 201, 201)));
}

#[test]
fn nearest_ties_prefer_first_entry() {
    let mut colors: Vec<Rgb8> = vec![Rgb8::new(10, 0, 0), Rgb8::new(0, 10, 0)];
    // Pad to capacity with colors far away from the target.
    let mut v = 0u8;
    while colors.len() < ColorTable::CAPACITY {
        let c = Rgb8::new(200, 200, v);
        colors.push(c);
        v = v.wrapping_add(1);
    }
    let mut table = ColorTable::from_colors(colors).unwrap();

    // (0, 0, 0) is equally far (100) from both leading entries.
    assert_eq!(resolve(&mut table, Rgb8::BLACK), 0);
}

#[test]
fn push_unique_rejects_overflow_but_finds_existing() {
    let mut table = full_gray_ramp();
    assert_eq!(table.push_unique(Rgb8::new(1, 2, 3)), None);
    assert_eq!(table.push_unique(Rgb8::new(7, 7, 7)), Some(7));
}

#[test]
fn from_colors_rejects_duplicates_and_overflow() {
    assert!(ColorTable::from_colors([Rgb8::WHITE, Rgb8::WHITE]).is_err());

    let too_many = (0..=256u32).map(Rgb8::from_hex);
    assert!(ColorTable::from_colors(too_many).is_err());
}
