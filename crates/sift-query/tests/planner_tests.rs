use std::rc::Rc;

use ahash::AHashMap;
use roaring::RoaringBitmap;
use sift_core::{Declaration, EntityType, Operand, RelationshipType};
use sift_query::{
    sort_clauses_by_result_size, sort_tables_by_size, Clause, ClauseResult, ResultTable,
};

fn syn(name: &str) -> Operand {
    Operand::Declaration(Declaration::new(name, EntityType::Stmt))
}

fn evaluated_set(card: u32) -> Rc<Clause> {
    let clause = Clause::relationship(RelationshipType::Follows, syn("s"), Operand::Wildcard);
    let set: RoaringBitmap = (0..card).collect();
    assert!(clause.record_result(ClauseResult::Set(set)));
    Rc::new(clause)
}

fn evaluated_map(cards: &[u32]) -> Rc<Clause> {
    let clause = Clause::relationship(RelationshipType::Parent, syn("s"), syn("t"));
    let mut map: AHashMap<u32, RoaringBitmap> = AHashMap::new();
    for (key, &card) in cards.iter().enumerate() {
        map.insert(key as u32, (0..card).collect());
    }
    assert!(clause.record_result(ClauseResult::Map(map)));
    Rc::new(clause)
}

fn sizes(clauses: &[Rc<Clause>]) -> Vec<u64> {
    clauses.iter().map(|c| c.result_size()).collect()
}

#[test]
fn clauses_sort_ascending_by_cardinality() {
    let mut clauses = vec![
        evaluated_set(5),
        evaluated_set(3),
        evaluated_set(15),
        evaluated_set(12),
    ];
    sort_clauses_by_result_size(&mut clauses);
    assert_eq!(sizes(&clauses), vec![3, 5, 12, 15]);
}

#[test]
fn map_cardinality_is_the_sum_over_keys() {
    let mut clauses = vec![evaluated_map(&[4, 4, 4]), evaluated_set(7)];
    sort_clauses_by_result_size(&mut clauses);
    assert_eq!(sizes(&clauses), vec![7, 12]);
}

#[test]
fn boolean_clauses_sort_first() {
    let boolean = Rc::new(Clause::relationship(
        RelationshipType::Follows,
        Operand::StmtNum(1),
        Operand::StmtNum(2),
    ));
    assert!(boolean.record_result(ClauseResult::Boolean(true)));

    let mut clauses = vec![evaluated_set(1), boolean.clone(), evaluated_set(2)];
    sort_clauses_by_result_size(&mut clauses);
    assert!(Rc::ptr_eq(&clauses[0], &boolean));
    assert_eq!(sizes(&clauses), vec![0, 1, 2]);
}

#[test]
fn ties_preserve_query_order() {
    let a = evaluated_set(4);
    let b = evaluated_set(4);
    let c = evaluated_set(4);
    let mut clauses = vec![a.clone(), b.clone(), c.clone()];
    sort_clauses_by_result_size(&mut clauses);
    assert!(Rc::ptr_eq(&clauses[0], &a));
    assert!(Rc::ptr_eq(&clauses[1], &b));
    assert!(Rc::ptr_eq(&clauses[2], &c));
}

#[test]
fn unevaluated_clauses_are_treated_as_empty() {
    let pending = Rc::new(Clause::relationship(
        RelationshipType::Next,
        syn("n"),
        Operand::Wildcard,
    ));
    let mut clauses = vec![evaluated_set(6), pending.clone()];
    sort_clauses_by_result_size(&mut clauses);
    assert!(Rc::ptr_eq(&clauses[0], &pending));
}

#[test]
fn shared_clauses_see_one_recorded_result() {
    // The same clause appearing in two lists is evaluated once; the second
    // recording attempt is refused and both references see the first.
    let clause = evaluated_set(9);
    let other = clause.clone();
    assert!(!other.record_result(ClauseResult::Set(RoaringBitmap::new())));
    assert_eq!(clause.result_size(), 9);
    assert_eq!(other.result_size(), 9);
}

#[test]
fn tables_sort_ascending_by_row_count() {
    let mut wide = ResultTable::new(vec!["s".into(), "t".into()]);
    wide.push_row(vec![1, 2]);
    wide.push_row(vec![2, 3]);
    wide.push_row(vec![3, 4]);

    let mut narrow = ResultTable::new(vec!["v".into()]);
    narrow.push_row(vec![7]);

    let empty = ResultTable::new(vec!["c".into()]);

    let mut tables = vec![wide, narrow, empty];
    sort_tables_by_size(&mut tables);
    let sizes: Vec<usize> = tables.iter().map(ResultTable::size).collect();
    assert_eq!(sizes, vec![0, 1, 3]);
}
