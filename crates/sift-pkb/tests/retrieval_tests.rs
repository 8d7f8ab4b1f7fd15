use anyhow::Result;
use roaring::RoaringBitmap;
use sift_core::{Declaration, EntityType, Operand, PatternExpr, RelationshipType};
use sift_pkb::FactStore;

fn decl(name: &str, ty: EntityType) -> Operand {
    Operand::Declaration(Declaration::new(name, ty))
}

fn bitmap(values: &[u32]) -> RoaringBitmap {
    values.iter().copied().collect()
}

#[test]
fn boolean_retrieval_covers_all_operand_shapes() {
    let mut store = FactStore::new(5);
    store.insert_follows(1, 2);
    store.insert_follows(3, 4);

    let rel = RelationshipType::Follows;
    assert!(store.relation_holds(rel, &Operand::StmtNum(1), &Operand::StmtNum(2)));
    assert!(!store.relation_holds(rel, &Operand::StmtNum(1), &Operand::StmtNum(3)));
    assert!(store.relation_holds(rel, &Operand::StmtNum(3), &Operand::Wildcard));
    assert!(!store.relation_holds(rel, &Operand::StmtNum(2), &Operand::Wildcard));
    assert!(store.relation_holds(rel, &Operand::Wildcard, &Operand::StmtNum(4)));
    assert!(!store.relation_holds(rel, &Operand::Wildcard, &Operand::StmtNum(1)));
    assert!(store.relation_holds(rel, &Operand::Wildcard, &Operand::Wildcard));
    // No Parent fact exists at all.
    assert!(!store.relation_holds(
        RelationshipType::Parent,
        &Operand::Wildcard,
        &Operand::Wildcard
    ));
}

#[test]
fn uses_routes_to_procedure_table_for_idents_and_proc_synonyms() {
    let mut store = FactStore::new(3);
    store.set_statement_type(2, EntityType::Assign);
    store.insert_uses(2, "x");
    store.insert_proc_uses("main", "y");

    let rel = RelationshipType::Uses;
    // A statement-number left reads the statement table.
    assert!(store.relation_holds(rel, &Operand::StmtNum(2), &Operand::Ident("x".into())));
    // An identifier left reads the procedure table only.
    assert!(store.relation_holds(
        rel,
        &Operand::Ident("main".into()),
        &Operand::Ident("y".into())
    ));
    assert!(!store.relation_holds(
        rel,
        &Operand::Ident("main".into()),
        &Operand::Ident("x".into())
    ));

    // A Proc-typed synonym routes the same way.
    let procs = store.relation_set(rel, &decl("p", EntityType::Proc), &Operand::Ident("y".into()));
    let main_id = store.interner().id_of("main").unwrap().raw();
    assert_eq!(procs, bitmap(&[main_id]));

    // An unknown name never matches anything.
    assert!(!store.relation_holds(
        rel,
        &Operand::Ident("ghost".into()),
        &Operand::Wildcard
    ));
}

#[test]
fn set_retrieval_applies_subtype_filtering() -> Result<()> {
    let mut store = FactStore::new(3);
    anyhow::ensure!(store.set_statement_type(1, EntityType::Assign));
    anyhow::ensure!(store.set_statement_type(2, EntityType::While));
    anyhow::ensure!(store.insert_modifies(1, "x"));
    anyhow::ensure!(store.insert_modifies(2, "x"));

    let rel = RelationshipType::Modifies;
    // An Assign synonym keeps only statement 1.
    let assigns = store.relation_set(rel, &decl("a", EntityType::Assign), &Operand::Wildcard);
    assert_eq!(assigns, bitmap(&[1]));

    // The Stmt aggregate keeps both.
    let stmts = store.relation_set(rel, &decl("s", EntityType::Stmt), &Operand::Wildcard);
    assert_eq!(stmts, bitmap(&[1, 2]));

    // A literal right narrows to that variable's modifiers first.
    let by_x = store.relation_set(rel, &decl("w", EntityType::While), &Operand::Ident("x".into()));
    assert_eq!(by_x, bitmap(&[2]));

    // Right-side synonym: the variables statement 1 modifies.
    let vars = store.relation_set(rel, &Operand::StmtNum(1), &decl("v", EntityType::Var));
    let x_id = store.interner().id_of("x").unwrap().raw();
    assert_eq!(vars, bitmap(&[x_id]));
    Ok(())
}

#[test]
fn map_retrieval_filters_both_columns() {
    let mut store = FactStore::new(4);
    store.set_statement_type(1, EntityType::Assign);
    store.set_statement_type(2, EntityType::Assign);
    store.set_statement_type(3, EntityType::While);
    store.set_statement_type(4, EntityType::Assign);
    store.insert_follows(1, 2);
    store.insert_follows(2, 3);
    store.insert_follows(3, 4);

    let map = store.relation_map(
        RelationshipType::Follows,
        &decl("a1", EntityType::Assign),
        &decl("a2", EntityType::Assign),
    );
    // Only (1,2) has Assign on both sides; (2,3) loses its values and the
    // emptied entry disappears, (3,_) fails the key filter.
    assert_eq!(map.len(), 1);
    assert_eq!(map[&1], bitmap(&[2]));
}

#[test]
fn map_retrieval_same_synonym_keeps_reflexive_pairs_only() {
    let mut store = FactStore::new(3);
    store.insert_next(1, 2);
    store.insert_next(2, 2);
    store.insert_next(2, 3);

    let map = store.relation_map(
        RelationshipType::Next,
        &decl("n", EntityType::ProgLine),
        &decl("n", EntityType::ProgLine),
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map[&2], bitmap(&[2]));
}

#[test]
fn affects_map_skips_subtype_filtering() {
    let mut store = FactStore::new(3);
    store.set_statement_type(1, EntityType::Assign);
    store.set_statement_type(3, EntityType::Assign);
    store.insert_affects(1, 3);

    // Mistyped synonyms still see the raw table: the writer already
    // guaranteed both endpoints are assignments.
    let map = store.relation_map(
        RelationshipType::Affects,
        &decl("w", EntityType::While),
        &decl("i", EntityType::If),
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map[&1], bitmap(&[3]));
}

#[test]
fn assign_pattern_matching() {
    let mut store = FactStore::new(3);
    store.set_statement_type(1, EntityType::Assign);
    store.set_statement_type(2, EntityType::Assign);
    store.insert_expression(1, "(x + 1)");
    store.insert_expression(2, "((x + 1) * y)");
    store.insert_modifies(1, "a");
    store.insert_modifies(2, "b");

    let any = Operand::Wildcard;
    assert_eq!(store.pattern_assign(&any, &PatternExpr::Any), bitmap(&[1, 2]));
    assert_eq!(
        store.pattern_assign(&any, &PatternExpr::Exact("(x + 1)".into())),
        bitmap(&[1])
    );
    assert_eq!(
        store.pattern_assign(&any, &PatternExpr::Partial("(x + 1)".into())),
        bitmap(&[1, 2])
    );
    assert!(store
        .pattern_assign(&any, &PatternExpr::Exact("z".into()))
        .is_empty());

    // A literal left intersects with the statements modifying it.
    assert_eq!(
        store.pattern_assign(&Operand::Ident("b".into()), &PatternExpr::Partial("x".into())),
        bitmap(&[2])
    );
    assert!(store
        .pattern_assign(&Operand::Ident("ghost".into()), &PatternExpr::Any)
        .is_empty());
}

#[test]
fn container_pattern_matching() {
    let mut store = FactStore::new(4);
    store.set_statement_type(1, EntityType::While);
    store.set_statement_type(2, EntityType::If);
    store.set_statement_type(3, EntityType::While);
    store.insert_control_variable(1, "i");
    store.insert_control_variable(2, "i");
    store.insert_control_variable(3, "j");

    assert_eq!(
        store.pattern_container(EntityType::While, &Operand::Ident("i".into())),
        bitmap(&[1])
    );
    assert_eq!(
        store.pattern_container(EntityType::If, &Operand::Ident("i".into())),
        bitmap(&[2])
    );
    assert_eq!(
        store.pattern_container(EntityType::While, &Operand::Wildcard),
        bitmap(&[1, 3])
    );
    assert!(store
        .pattern_container(EntityType::While, &Operand::Ident("ghost".into()))
        .is_empty());
    assert!(store
        .pattern_container(EntityType::Assign, &Operand::Wildcard)
        .is_empty());
}

#[test]
fn attribute_identity_tables() {
    let mut store = FactStore::new(5);
    store.insert_procedure("x");
    store.insert_procedure("main");
    store.insert_variable("x");
    store.insert_variable("y");
    store.insert_constant(3);
    store.insert_constant(99);

    // "x" names both a procedure and a variable.
    let shared = store.proc_var_name_identity();
    let x_id = store.interner().id_of("x").unwrap().raw();
    assert_eq!(shared, bitmap(&[x_id]));

    // 3 is a valid statement number, 99 is not.
    assert_eq!(store.const_stmt_identity(), bitmap(&[3]));
}

#[test]
fn type_filters_pass_name_valued_types_through() {
    let mut store = FactStore::new(3);
    store.set_statement_type(1, EntityType::Assign);

    let set = bitmap(&[1, 2, 3]);
    assert_eq!(store.filter_set_of_type(&set, EntityType::Assign), bitmap(&[1]));
    assert_eq!(store.filter_set_of_type(&set, EntityType::Stmt), set);
    // Var/Const/Proc columns hold name ids, not statement indices.
    assert_eq!(store.filter_set_of_type(&set, EntityType::Var), set);
    assert!(store
        .filter_set_of_type(&set, EntityType::Call)
        .is_empty());
}

#[test]
fn reads_on_an_empty_store_return_empty_containers() {
    let store = FactStore::new(0);
    assert!(store
        .relation_set(
            RelationshipType::Parent,
            &decl("s", EntityType::Stmt),
            &Operand::Wildcard
        )
        .is_empty());
    assert!(store
        .relation_map(
            RelationshipType::Calls,
            &decl("p", EntityType::Proc),
            &decl("q", EntityType::Proc)
        )
        .is_empty());
    assert!(store.pattern_assign(&Operand::Wildcard, &PatternExpr::Any).is_empty());
    assert!(store.proc_var_name_identity().is_empty());
    assert!(store.const_stmt_identity().is_empty());
}
