//! Sift program knowledge base
//!
//! The fact store owns every fact derived from static analysis of one
//! program: statement typing, control/data relationships, assignment
//! expressions, condition variables, and referenced names. It is written
//! once by the extraction walker and then serves read-only retrieval to the
//! query evaluator.
//!
//! Key design points:
//!
//! 1. **Name interning**: variable/procedure names stored once, referenced
//!    by `u32` id, so every column is a [`RoaringBitmap`] of `u32`s
//! 2. **Bidirectional relation tables**: each relation keeps forward and
//!    backward adjacency plus flat key sets, kept mutually consistent on
//!    every insert
//! 3. **Stmt-granularity storage**: relation tables hold plain statement
//!    indices; declared-subtype narrowing happens at retrieval via
//!    [`FactStore::filter_set_of_type`] / [`FactStore::filter_map_of_type`]
//!
//! Writes return success flags and never panic; a `false` is an extractor
//! defect (logged via `tracing`), not a user-facing error. Reads never
//! fail: absent facts produce empty containers.

use ahash::AHashMap;
use roaring::RoaringBitmap;

use sift_core::{EntityType, Operand, PatternExpr, RelationshipType};

// ============================================================================
// Name Interning
// ============================================================================

/// Interned variable/procedure name id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NameId(u32);

impl NameId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Maps names to compact ids, insertion-ordered. Single writer, no locks:
/// the store is populated by one extraction pass and read-only afterwards.
#[derive(Debug, Default)]
pub struct NameInterner {
    ids: AHashMap<String, NameId>,
    names: Vec<String>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning its id.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = NameId(self.names.len() as u32);
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Look up an existing id without inserting.
    pub fn id_of(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    /// Look up the name for an id.
    pub fn resolve(&self, id: NameId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Relation Table (bidirectional, with flat key sets)
// ============================================================================

/// One directed binary relation, indexed both ways.
///
/// Invariants, maintained on every insert:
/// - `b ∈ forward[a]` iff `a ∈ backward[b]`
/// - `a ∈ lhs_keys` iff `forward[a]` is nonempty (and mirrored for
///   `rhs_keys`/`backward`)
#[derive(Debug, Default, Clone)]
pub struct RelationTable {
    forward: AHashMap<u32, RoaringBitmap>,
    backward: AHashMap<u32, RoaringBitmap>,
    lhs_keys: RoaringBitmap,
    rhs_keys: RoaringBitmap,
}

impl RelationTable {
    pub fn insert(&mut self, left: u32, right: u32) {
        self.forward.entry(left).or_default().insert(right);
        self.backward.entry(right).or_default().insert(left);
        self.lhs_keys.insert(left);
        self.rhs_keys.insert(right);
    }

    pub fn contains(&self, left: u32, right: u32) -> bool {
        self.forward.get(&left).is_some_and(|s| s.contains(right))
    }

    pub fn successors(&self, left: u32) -> Option<&RoaringBitmap> {
        self.forward.get(&left)
    }

    pub fn predecessors(&self, right: u32) -> Option<&RoaringBitmap> {
        self.backward.get(&right)
    }

    /// All left keys with at least one successor.
    pub fn lhs_keys(&self) -> &RoaringBitmap {
        &self.lhs_keys
    }

    /// All right keys with at least one predecessor.
    pub fn rhs_keys(&self) -> &RoaringBitmap {
        &self.rhs_keys
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> u64 {
        self.forward.values().map(RoaringBitmap::len).sum()
    }

    /// Iterate the forward adjacency (first column grouped).
    pub fn iter_forward(&self) -> impl Iterator<Item = (u32, &RoaringBitmap)> {
        self.forward.iter().map(|(&k, v)| (k, v))
    }
}

// ============================================================================
// FactStore
// ============================================================================

/// Repository of all facts derived from one analyzed program.
///
/// The statement universe `1..=N` is fixed at construction. One instance
/// exists per analyzed program; clustering/planning structures are built per
/// query and discarded.
#[derive(Debug)]
pub struct FactStore {
    stmt_count: u32,
    interner: NameInterner,
    /// Statement typing, write-once per index; slot 0 unused.
    stmt_types: Vec<Option<EntityType>>,
    /// `EntityType -> statement indices` (Stmt/ProgLine hold the universe).
    type_index: AHashMap<EntityType, RoaringBitmap>,
    /// Statement-level (and Calls: name-level) relation tables.
    relations: AHashMap<RelationshipType, RelationTable>,
    /// Procedure-level Uses/Modifies, distinct from the statement tables.
    proc_uses: RelationTable,
    proc_modifies: RelationTable,
    /// Assignment index -> canonicalized right-hand side.
    assign_exprs: AHashMap<u32, String>,
    /// If/While index -> variable ids in its controlling condition.
    control_vars: AHashMap<u32, RoaringBitmap>,
    /// Call/Print/Read index -> the single referenced name.
    used_names: AHashMap<u32, NameId>,
    /// Inverse of `used_names`, grouped per statement category.
    used_name_index: AHashMap<EntityType, AHashMap<u32, RoaringBitmap>>,
    /// Entity universes.
    variables: RoaringBitmap,
    procedures: RoaringBitmap,
    constants: RoaringBitmap,
}

impl FactStore {
    /// Create a store for a program with statements `1..=stmt_count`.
    pub fn new(stmt_count: u32) -> Self {
        let universe: RoaringBitmap = (1..=stmt_count).collect();
        let mut type_index = AHashMap::new();
        type_index.insert(EntityType::Stmt, universe.clone());
        type_index.insert(EntityType::ProgLine, universe);

        Self {
            stmt_count,
            interner: NameInterner::new(),
            stmt_types: vec![None; stmt_count as usize + 1],
            type_index,
            relations: AHashMap::new(),
            proc_uses: RelationTable::default(),
            proc_modifies: RelationTable::default(),
            assign_exprs: AHashMap::new(),
            control_vars: AHashMap::new(),
            used_names: AHashMap::new(),
            used_name_index: AHashMap::new(),
            variables: RoaringBitmap::new(),
            procedures: RoaringBitmap::new(),
            constants: RoaringBitmap::new(),
        }
    }

    pub fn stmt_count(&self) -> u32 {
        self.stmt_count
    }

    /// Resolve interned names in retrieval results.
    pub fn interner(&self) -> &NameInterner {
        &self.interner
    }

    fn in_range(&self, stmt: u32) -> bool {
        stmt >= 1 && stmt <= self.stmt_count
    }

    fn table_mut(&mut self, rel: RelationshipType) -> &mut RelationTable {
        self.relations.entry(rel).or_default()
    }

    // ========================================================================
    // Write API (Statement Typing and Entity Universes)
    // ========================================================================

    /// Record the concrete subtype of a statement. Write-once: succeeds
    /// exactly once per index, and only for a concrete statement subtype.
    pub fn set_statement_type(&mut self, stmt: u32, ty: EntityType) -> bool {
        if !ty.is_statement_subtype() {
            tracing::warn!(stmt, ?ty, "rejected statement typing: not a concrete subtype");
            return false;
        }
        if !self.in_range(stmt) {
            tracing::warn!(stmt, ?ty, "rejected statement typing: index out of range");
            return false;
        }
        if self.stmt_types[stmt as usize].is_some() {
            tracing::warn!(stmt, ?ty, "rejected statement typing: already typed");
            return false;
        }
        self.stmt_types[stmt as usize] = Some(ty);
        self.type_index.entry(ty).or_default().insert(stmt);
        true
    }

    /// The concrete subtype recorded for a statement, if any.
    pub fn statement_type(&self, stmt: u32) -> Option<EntityType> {
        self.stmt_types.get(stmt as usize).copied().flatten()
    }

    pub fn insert_variable(&mut self, name: &str) -> bool {
        let id = self.interner.intern(name);
        self.variables.insert(id.raw());
        true
    }

    pub fn insert_procedure(&mut self, name: &str) -> bool {
        let id = self.interner.intern(name);
        self.procedures.insert(id.raw());
        true
    }

    pub fn insert_constant(&mut self, value: u32) -> bool {
        self.constants.insert(value);
        true
    }

    // ========================================================================
    // Write API (Control-Flow Relations)
    // ========================================================================

    /// `Follows(first, later)`: `later` directly follows `first` in one
    /// statement list. A statement has at most one direct successor.
    pub fn insert_follows(&mut self, first: u32, later: u32) -> bool {
        if !self.in_range(first) || !self.in_range(later) || later <= first {
            tracing::warn!(first, later, "rejected Follows fact");
            return false;
        }
        let table = self.table_mut(RelationshipType::Follows);
        if table.successors(first).is_some() {
            tracing::warn!(first, later, "rejected Follows fact: first already has a successor");
            return false;
        }
        table.insert(first, later);
        true
    }

    /// `Follows*(first, later)`: transitive closure; many pairs per key.
    pub fn insert_follows_star(&mut self, first: u32, later: u32) -> bool {
        if !self.in_range(first) || !self.in_range(later) || later <= first {
            return false;
        }
        self.table_mut(RelationshipType::FollowsStar).insert(first, later);
        true
    }

    /// `Parent(parent, child)`: `child` is directly nested in `parent`.
    /// A statement has at most one parent.
    pub fn insert_parent(&mut self, parent: u32, child: u32) -> bool {
        if !self.in_range(parent) || !self.in_range(child) || child <= parent {
            tracing::warn!(parent, child, "rejected Parent fact");
            return false;
        }
        let table = self.table_mut(RelationshipType::Parent);
        if table.predecessors(child).is_some() {
            tracing::warn!(parent, child, "rejected Parent fact: child already has a parent");
            return false;
        }
        table.insert(parent, child);
        true
    }

    pub fn insert_parent_star(&mut self, parent: u32, child: u32) -> bool {
        if !self.in_range(parent) || !self.in_range(child) || child <= parent {
            return false;
        }
        self.table_mut(RelationshipType::ParentStar).insert(parent, child);
        true
    }

    /// `Next(a, b)`: control may flow from `a` directly to `b`. Loops flow
    /// backward, so no ordering constraint applies.
    pub fn insert_next(&mut self, from: u32, to: u32) -> bool {
        self.insert_flow(RelationshipType::Next, from, to)
    }

    pub fn insert_next_star(&mut self, from: u32, to: u32) -> bool {
        self.insert_flow(RelationshipType::NextStar, from, to)
    }

    pub fn insert_next_bip(&mut self, from: u32, to: u32) -> bool {
        self.insert_flow(RelationshipType::NextBip, from, to)
    }

    pub fn insert_next_bip_star(&mut self, from: u32, to: u32) -> bool {
        self.insert_flow(RelationshipType::NextBipStar, from, to)
    }

    fn insert_flow(&mut self, rel: RelationshipType, from: u32, to: u32) -> bool {
        if !self.in_range(from) || !self.in_range(to) {
            tracing::warn!(?rel, from, to, "rejected control-flow fact: index out of range");
            return false;
        }
        self.table_mut(rel).insert(from, to);
        true
    }

    /// `Affects(a, b)`: the value assigned at `a` reaches a use at `b`.
    /// Both operands must already be typed `Assign`.
    pub fn insert_affects(&mut self, from: u32, to: u32) -> bool {
        self.insert_affects_family(RelationshipType::Affects, from, to)
    }

    pub fn insert_affects_star(&mut self, from: u32, to: u32) -> bool {
        self.insert_affects_family(RelationshipType::AffectsStar, from, to)
    }

    pub fn insert_affects_bip(&mut self, from: u32, to: u32) -> bool {
        self.insert_affects_family(RelationshipType::AffectsBip, from, to)
    }

    pub fn insert_affects_bip_star(&mut self, from: u32, to: u32) -> bool {
        self.insert_affects_family(RelationshipType::AffectsBipStar, from, to)
    }

    fn insert_affects_family(&mut self, rel: RelationshipType, from: u32, to: u32) -> bool {
        let both_assign = self.statement_type(from) == Some(EntityType::Assign)
            && self.statement_type(to) == Some(EntityType::Assign);
        if !both_assign {
            tracing::warn!(?rel, from, to, "rejected Affects fact: operands not Assign-typed");
            return false;
        }
        self.table_mut(rel).insert(from, to);
        true
    }

    // ========================================================================
    // Write API (Data Relations)
    // ========================================================================

    /// Statement-level `Uses(stmt, var)`.
    pub fn insert_uses(&mut self, stmt: u32, var: &str) -> bool {
        self.insert_stmt_var(RelationshipType::Uses, stmt, var)
    }

    /// Statement-level `Modifies(stmt, var)`.
    pub fn insert_modifies(&mut self, stmt: u32, var: &str) -> bool {
        self.insert_stmt_var(RelationshipType::Modifies, stmt, var)
    }

    fn insert_stmt_var(&mut self, rel: RelationshipType, stmt: u32, var: &str) -> bool {
        if !self.in_range(stmt) {
            tracing::warn!(?rel, stmt, var, "rejected data fact: index out of range");
            return false;
        }
        let id = self.interner.intern(var);
        self.variables.insert(id.raw());
        self.table_mut(rel).insert(stmt, id.raw());
        true
    }

    /// Procedure-level `Uses(proc, var)`, aggregated across the procedure's
    /// body and callees.
    pub fn insert_proc_uses(&mut self, proc: &str, var: &str) -> bool {
        let pid = self.interner.intern(proc);
        let vid = self.interner.intern(var);
        self.procedures.insert(pid.raw());
        self.variables.insert(vid.raw());
        self.proc_uses.insert(pid.raw(), vid.raw());
        true
    }

    /// Procedure-level `Modifies(proc, var)`.
    pub fn insert_proc_modifies(&mut self, proc: &str, var: &str) -> bool {
        let pid = self.interner.intern(proc);
        let vid = self.interner.intern(var);
        self.procedures.insert(pid.raw());
        self.variables.insert(vid.raw());
        self.proc_modifies.insert(pid.raw(), vid.raw());
        true
    }

    /// `Calls(caller, callee)`. Both columns are procedure names; the
    /// analyzed language forbids recursion, so self-calls are rejected.
    pub fn insert_calls(&mut self, caller: &str, callee: &str) -> bool {
        self.insert_proc_pair(RelationshipType::Calls, caller, callee)
    }

    pub fn insert_calls_star(&mut self, caller: &str, callee: &str) -> bool {
        self.insert_proc_pair(RelationshipType::CallsStar, caller, callee)
    }

    fn insert_proc_pair(&mut self, rel: RelationshipType, caller: &str, callee: &str) -> bool {
        if caller == callee {
            tracing::warn!(?rel, caller, "rejected Calls fact: self-call");
            return false;
        }
        let caller_id = self.interner.intern(caller);
        let callee_id = self.interner.intern(callee);
        self.procedures.insert(caller_id.raw());
        self.procedures.insert(callee_id.raw());
        self.table_mut(rel).insert(caller_id.raw(), callee_id.raw());
        true
    }

    // ========================================================================
    // Write API (Expressions, Conditions, Referenced Names)
    // ========================================================================

    /// Record the canonicalized right-hand side of an assignment. One
    /// expression per assignment; the statement must be typed `Assign`.
    pub fn insert_expression(&mut self, stmt: u32, canonical_rhs: &str) -> bool {
        if self.statement_type(stmt) != Some(EntityType::Assign) {
            tracing::warn!(stmt, "rejected expression fact: statement not Assign-typed");
            return false;
        }
        if self.assign_exprs.contains_key(&stmt) {
            tracing::warn!(stmt, "rejected expression fact: already recorded");
            return false;
        }
        self.assign_exprs.insert(stmt, canonical_rhs.to_string());
        true
    }

    /// The canonical right-hand side recorded for an assignment.
    pub fn expression_of(&self, stmt: u32) -> Option<&str> {
        self.assign_exprs.get(&stmt).map(String::as_str)
    }

    /// Record one variable of an If/While statement's controlling condition.
    pub fn insert_control_variable(&mut self, stmt: u32, var: &str) -> bool {
        if !matches!(
            self.statement_type(stmt),
            Some(EntityType::If) | Some(EntityType::While)
        ) {
            tracing::warn!(stmt, var, "rejected condition fact: statement not a container");
            return false;
        }
        let id = self.interner.intern(var);
        self.variables.insert(id.raw());
        self.control_vars.entry(stmt).or_default().insert(id.raw());
        true
    }

    /// Variable ids in the controlling condition of an If/While statement.
    pub fn control_variables_of(&self, stmt: u32) -> Option<&RoaringBitmap> {
        self.control_vars.get(&stmt)
    }

    /// Record the single name referenced by a Call/Print/Read statement
    /// (the called procedure or the printed/read variable).
    pub fn insert_used_name(&mut self, stmt: u32, name: &str) -> bool {
        let category = match self.statement_type(stmt) {
            Some(ty @ (EntityType::Call | EntityType::Print | EntityType::Read)) => ty,
            _ => {
                tracing::warn!(stmt, name, "rejected name fact: statement not Call/Print/Read");
                return false;
            }
        };
        if self.used_names.contains_key(&stmt) {
            tracing::warn!(stmt, name, "rejected name fact: already recorded");
            return false;
        }
        let id = self.interner.intern(name);
        if category == EntityType::Call {
            self.procedures.insert(id.raw());
        } else {
            self.variables.insert(id.raw());
        }
        self.used_names.insert(stmt, id);
        self.used_name_index
            .entry(category)
            .or_default()
            .entry(id.raw())
            .or_default()
            .insert(stmt);
        true
    }

    // ========================================================================
    // Read API (Entity Retrieval and Subtype Filtering)
    // ========================================================================

    /// All entities of a type: statement indices for statement kinds,
    /// interned name ids for `Var`/`Proc`, raw values for `Const`.
    pub fn entities_of_type(&self, ty: EntityType) -> RoaringBitmap {
        match ty {
            EntityType::Var => self.variables.clone(),
            EntityType::Proc => self.procedures.clone(),
            EntityType::Const => self.constants.clone(),
            _ => self.type_index.get(&ty).cloned().unwrap_or_default(),
        }
    }

    /// Narrow a Stmt-granularity set to a declared subtype. Name-valued
    /// types pass through unchanged: their columns were never
    /// statement-indexed to begin with.
    pub fn filter_set_of_type(&self, set: &RoaringBitmap, ty: EntityType) -> RoaringBitmap {
        match ty {
            EntityType::Var | EntityType::Const | EntityType::Proc => set.clone(),
            _ => match self.type_index.get(&ty) {
                Some(members) => set & members,
                None => RoaringBitmap::new(),
            },
        }
    }

    /// Narrow a grouped map on both columns; keys failing the left type are
    /// dropped, values are filtered to the right type, and emptied entries
    /// disappear.
    pub fn filter_map_of_type(
        &self,
        map: &AHashMap<u32, RoaringBitmap>,
        left_ty: EntityType,
        right_ty: EntityType,
    ) -> AHashMap<u32, RoaringBitmap> {
        let mut out = AHashMap::new();
        for (&key, values) in map {
            if !self.key_has_type(key, left_ty) {
                continue;
            }
            let filtered = self.filter_set_of_type(values, right_ty);
            if !filtered.is_empty() {
                out.insert(key, filtered);
            }
        }
        out
    }

    fn key_has_type(&self, key: u32, ty: EntityType) -> bool {
        match ty {
            EntityType::Var | EntityType::Const | EntityType::Proc => true,
            _ => self
                .type_index
                .get(&ty)
                .is_some_and(|members| members.contains(key)),
        }
    }

    // ========================================================================
    // Read API (Relationship Retrieval: Boolean / Set / Map)
    // ========================================================================

    /// The table a retrieval routes through. Procedure identifiers and
    /// `Proc`-typed synonyms on the left of Uses/Modifies read the
    /// procedure-level tables; everything else reads the statement table.
    fn read_table(&self, rel: RelationshipType, left: &Operand) -> Option<&RelationTable> {
        let proc_level = matches!(rel, RelationshipType::Uses | RelationshipType::Modifies)
            && (matches!(left, Operand::Ident(_))
                || left
                    .as_declaration()
                    .is_some_and(|d| d.entity_type == EntityType::Proc));
        if proc_level {
            Some(match rel {
                RelationshipType::Uses => &self.proc_uses,
                _ => &self.proc_modifies,
            })
        } else {
            self.relations.get(&rel)
        }
    }

    /// Resolve a literal operand to a table key: a statement number as-is,
    /// an identifier through the interner. Unknown names resolve to `None`
    /// (the program never mentions them, so no fact can match).
    fn key_of(&self, operand: &Operand) -> Option<u32> {
        match operand {
            Operand::StmtNum(n) => Some(*n),
            Operand::Ident(name) => self.interner.id_of(name).map(NameId::raw),
            _ => None,
        }
    }

    /// Boolean retrieval: both operands literal or wildcard.
    pub fn relation_holds(&self, rel: RelationshipType, left: &Operand, right: &Operand) -> bool {
        let Some(table) = self.read_table(rel, left) else {
            return false;
        };
        match (left, right) {
            (Operand::Wildcard, Operand::Wildcard) => !table.is_empty(),
            (Operand::Wildcard, _) => self
                .key_of(right)
                .is_some_and(|k| table.rhs_keys().contains(k)),
            (_, Operand::Wildcard) => self
                .key_of(left)
                .is_some_and(|k| table.lhs_keys().contains(k)),
            _ => match (self.key_of(left), self.key_of(right)) {
                (Some(a), Some(b)) => table.contains(a, b),
                _ => false,
            },
        }
    }

    /// Set retrieval: exactly one operand is a synonym. Returns that
    /// column's matching values, narrowed to the synonym's declared type.
    pub fn relation_set(
        &self,
        rel: RelationshipType,
        left: &Operand,
        right: &Operand,
    ) -> RoaringBitmap {
        let Some(table) = self.read_table(rel, left) else {
            return RoaringBitmap::new();
        };
        if let Some(decl) = left.as_declaration() {
            let raw = match right {
                Operand::Wildcard => table.lhs_keys().clone(),
                other => self
                    .key_of(other)
                    .and_then(|k| table.predecessors(k).cloned())
                    .unwrap_or_default(),
            };
            self.filter_set_of_type(&raw, decl.entity_type)
        } else if let Some(decl) = right.as_declaration() {
            let raw = match left {
                Operand::Wildcard => table.rhs_keys().clone(),
                other => self
                    .key_of(other)
                    .and_then(|k| table.successors(k).cloned())
                    .unwrap_or_default(),
            };
            self.filter_set_of_type(&raw, decl.entity_type)
        } else {
            RoaringBitmap::new()
        }
    }

    /// Map retrieval: both operands are synonyms. Returns the forward
    /// relation grouped by first column, narrowed on both sides, except
    /// for the Affects family, which skips the subtype filter. A clause
    /// comparing a synonym against itself keeps only reflexive pairs.
    pub fn relation_map(
        &self,
        rel: RelationshipType,
        left: &Operand,
        right: &Operand,
    ) -> AHashMap<u32, RoaringBitmap> {
        let (Some(left_decl), Some(right_decl)) = (left.as_declaration(), right.as_declaration())
        else {
            return AHashMap::new();
        };
        let Some(table) = self.read_table(rel, left) else {
            return AHashMap::new();
        };

        let same_synonym = left_decl.synonym == right_decl.synonym;
        let mut raw: AHashMap<u32, RoaringBitmap> = AHashMap::new();
        for (key, values) in table.iter_forward() {
            if same_synonym {
                if !values.contains(key) {
                    continue;
                }
                let mut reflexive = RoaringBitmap::new();
                reflexive.insert(key);
                raw.insert(key, reflexive);
            } else {
                raw.insert(key, values.clone());
            }
        }

        if rel.is_affects_family() {
            raw
        } else {
            self.filter_map_of_type(&raw, left_decl.entity_type, right_decl.entity_type)
        }
    }

    // ========================================================================
    // Read API (Pattern Retrieval)
    // ========================================================================

    /// Assignments whose canonical right-hand side matches `expr`. A
    /// literal left operand additionally requires the statement to modify
    /// that variable; synonyms and wildcards impose no constraint here (the
    /// evaluator joins the variable column separately).
    pub fn pattern_assign(&self, left: &Operand, expr: &PatternExpr) -> RoaringBitmap {
        let mut out = RoaringBitmap::new();
        for (&stmt, rhs) in &self.assign_exprs {
            if expr.matches(rhs) {
                out.insert(stmt);
            }
        }
        if let Operand::Ident(var) = left {
            let modifiers = self
                .interner
                .id_of(var)
                .and_then(|id| {
                    self.relations
                        .get(&RelationshipType::Modifies)
                        .and_then(|t| t.predecessors(id.raw()).cloned())
                })
                .unwrap_or_default();
            out &= modifiers;
        }
        out
    }

    /// If/While statements whose controlling condition mentions the literal
    /// variable, or all container statements with a nonempty condition for
    /// a wildcard.
    pub fn pattern_container(&self, container: EntityType, left: &Operand) -> RoaringBitmap {
        if !matches!(container, EntityType::If | EntityType::While) {
            return RoaringBitmap::new();
        }
        let mut out = RoaringBitmap::new();
        match left {
            Operand::Ident(var) => {
                let Some(id) = self.interner.id_of(var) else {
                    return out;
                };
                for (&stmt, vars) in &self.control_vars {
                    if vars.contains(id.raw()) && self.key_has_type(stmt, container) {
                        out.insert(stmt);
                    }
                }
            }
            _ => {
                for (&stmt, vars) in &self.control_vars {
                    if !vars.is_empty() && self.key_has_type(stmt, container) {
                        out.insert(stmt);
                    }
                }
            }
        }
        out
    }

    // ========================================================================
    // Read API (Attribute Retrieval)
    // ========================================================================

    /// Names that denote both a procedure and a variable
    /// (`p.procName = v.varName`).
    pub fn proc_var_name_identity(&self) -> RoaringBitmap {
        &self.procedures & &self.variables
    }

    /// Constant values that are also valid statement numbers
    /// (`c.value = s.stmt#`).
    pub fn const_stmt_identity(&self) -> RoaringBitmap {
        self.constants
            .iter()
            .filter(|&v| v >= 1 && v <= self.stmt_count)
            .collect()
    }

    /// Statements of a category (Call/Print/Read) referencing `name`.
    pub fn statements_using_name(&self, category: EntityType, name: &str) -> RoaringBitmap {
        let Some(id) = self.interner.id_of(name) else {
            return RoaringBitmap::new();
        };
        self.used_name_index
            .get(&category)
            .and_then(|by_name| by_name.get(&id.raw()))
            .cloned()
            .unwrap_or_default()
    }

    /// The single name referenced by a Call/Print/Read statement.
    pub fn used_name_of(&self, stmt: u32) -> Option<&str> {
        self.used_names
            .get(&stmt)
            .and_then(|&id| self.interner.resolve(id))
    }

    /// The full inverse index for a category: `name id -> statements`.
    pub fn used_name_index(&self, category: EntityType) -> Option<&AHashMap<u32, RoaringBitmap>> {
        self.used_name_index.get(&category)
    }

    /// Direct access to a relation's table, if any fact of that kind exists.
    pub fn relation_table(&self, rel: RelationshipType) -> Option<&RelationTable> {
        self.relations.get(&rel)
    }
}
