use super::*;

#[test]
fn catalog_is_sorted_by_threshold() {
    let thresholds: Vec<i64> = STICKER_CATALOG.iter().map(|k| k.unlock_likes).collect();
    let mut sorted = thresholds.clone();
    sorted.sort_unstable();
    assert_eq!(thresholds, sorted);
}

#[test]
fn catalog_names_are_unique() {
    for (i, a) in STICKER_CATALOG.iter().enumerate() {
        for b in &STICKER_CATALOG[i + 1..] {
            assert_ne!(a.name, b.name);
        }
    }
}

#[test]
fn first_kind_is_free() {
    assert!(STICKER_CATALOG[0].is_unlocked(0));
}

#[test]
fn unlock_is_inclusive_at_threshold() {
    let sun = find_kind("sun").unwrap();
    assert!(!sun.is_unlocked(9));
    assert!(sun.is_unlocked(10));
}

#[test]
fn find_kind_unknown_is_none() {
    assert!(find_kind("unicorn").is_none());
}

#[test]
fn catalog_for_marks_unlocks() {
    let entries = catalog_for(5);
    let unlocked: Vec<&str> = entries.iter().filter(|e| e.unlocked).map(|e| e.kind.name).collect();
    assert_eq!(unlocked, vec!["star", "heart", "snowflake"]);
}

#[test]
fn catalog_entry_serializes_flat() {
    let entries = catalog_for(0);
    let json = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(json["name"], "star");
    assert_eq!(json["unlock_likes"], 0);
    assert_eq!(json["unlocked"], true);
}
