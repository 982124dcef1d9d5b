use csvbind_core::HeaderIndex;

#[test]
fn positions_follow_file_order() {
    let header: HeaderIndex = ["a", "b", "c"].into_iter().collect();
    assert_eq!(header.position("a"), Some(0));
    assert_eq!(header.position("c"), Some(2));
    assert_eq!(header.position("d"), None);
    assert_eq!(header.len(), 3);
    assert!(header.duplicates().is_empty());
}

#[test]
fn names_are_case_sensitive() {
    let header: HeaderIndex = ["Name"].into_iter().collect();
    assert_eq!(header.position("Name"), Some(0));
    assert_eq!(header.position("name"), None);
}

#[test]
fn duplicate_names_resolve_to_last_occurrence() {
    let header: HeaderIndex = ["id", "x", "id", "x", "id"].into_iter().collect();
    assert_eq!(header.position("id"), Some(4));
    assert_eq!(header.position("x"), Some(3));
    assert_eq!(header.duplicates(), ["id", "x"]);
    assert_eq!(header.names().len(), 5);
}
