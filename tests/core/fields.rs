use registrar::core::error::RegistrarError;
use registrar::core::fields::{Access, FIELD_MAX, FIELD_MIN, FIELDS, Table, lookup};

#[test]
fn every_index_in_range_resolves_exactly_once() {
    for index in FIELD_MIN..=FIELD_MAX {
        let spec = lookup(index).unwrap();
        assert_eq!(spec.index, index);
        assert_eq!(FIELDS.iter().filter(|f| f.index == index).count(), 1);
    }
}

#[test]
fn out_of_range_indices_are_invalid_field() {
    for index in [0, FIELD_MAX + 1, 99] {
        let err = lookup(index).unwrap_err();
        assert!(matches!(err, RegistrarError::InvalidField(i) if i == index));
    }
}

#[test]
fn identifier_indices_are_reserved() {
    let reserved: Vec<u32> = FIELDS
        .iter()
        .filter(|f| matches!(f.access, Access::Identifier))
        .map(|f| f.index)
        .collect();
    assert_eq!(reserved, vec![1, 3]);
}

#[test]
fn every_mapping_names_a_label_and_at_least_one_column() {
    for spec in &FIELDS {
        assert!(!spec.label.is_empty());
        assert!(!spec.columns.is_empty());
        for column in spec.columns {
            assert!(!column.is_empty());
        }
    }
}

#[test]
fn postal_composite_is_the_only_multi_column_mapping() {
    for spec in &FIELDS {
        if spec.index == 9 {
            assert_eq!(spec.table, Table::Address);
            assert_eq!(
                spec.columns,
                &["postal_code", "region", "locality", "district", "street"]
            );
        } else {
            assert_eq!(spec.columns.len(), 1, "field {}", spec.index);
        }
    }
}

#[test]
fn owning_tables_split_as_declared() {
    let by_table = |table: Table| -> Vec<u32> {
        FIELDS
            .iter()
            .filter(|f| f.table == table)
            .map(|f| f.index)
            .collect::<Vec<_>>()
    };
    assert_eq!(by_table(Table::Entity), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(by_table(Table::Credential), vec![7, 8]);
    assert_eq!(by_table(Table::Address), vec![9, 10, 11, 12, 13, 14, 15, 16]);
}
