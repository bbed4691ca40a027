/*!
A reference visitor which prints the resolution proof in TraceCheck form.

Each derivation is a line:

```text
<id> <literals> 0 <antecedent ids> 0
```

where literals are signed one-based atoms, an empty literal list is the empty clause, and a leaf (an input clause, or a unit taken as given) is introduced on first use with an empty antecedent list.

With a fixed configuration seed, two solves of the same formula produce byte-identical traces.
*/

use std::collections::HashMap;

use crate::{
    db::{ClauseRef, arena::Arena},
    proof::{ProofVisitor, ResolutionChain},
    structures::{
        atom::Atom,
        clause::Clause,
        literal::{CLiteral, Literal},
    },
};

/// A visitor which prints TraceCheck lines to a writer.
pub struct TraceVisitor<W: std::io::Write> {
    out: W,

    /// The next fresh identifier.
    ids: usize,

    /// The identifier given to each visited clause.
    clause_ids: HashMap<ClauseRef, usize>,

    /// The identifier given to each unit, by atom.
    unit_ids: HashMap<Atom, usize>,

    /// The first write error, if any.
    result: std::io::Result<()>,
}

impl<W: std::io::Write> TraceVisitor<W> {
    pub fn new(out: W) -> Self {
        TraceVisitor {
            out,
            ids: 0,
            clause_ids: HashMap::default(),
            unit_ids: HashMap::default(),
            result: Ok(()),
        }
    }

    /// The first write error of the trace, if any, and the writer.
    pub fn finish(self) -> (std::io::Result<()>, W) {
        (self.result, self.out)
    }

    fn note(&mut self, result: std::io::Result<()>) {
        if self.result.is_ok()
            && let Err(e) = result
        {
            self.result = Err(e);
        }
    }

    fn fresh_id(&mut self) -> usize {
        self.ids += 1;
        self.ids
    }

    /// The identifier of `clause`, printing a leaf line on first use.
    fn clause_id(&mut self, arena: &Arena, clause: ClauseRef) -> usize {
        if let Some(&id) = self.clause_ids.get(&clause) {
            return id;
        }
        let id = self.fresh_id();
        self.clause_ids.insert(clause, id);

        let literals = arena[clause].literals().as_dimacs(true);
        let result = writeln!(self.out, "{id} {literals} 0");
        self.note(result);

        id
    }

    /// The identifier of the unit `literal`, printing a leaf line on first use.
    fn unit_id(&mut self, literal: CLiteral) -> usize {
        if let Some(&id) = self.unit_ids.get(&literal.atom()) {
            return id;
        }
        let id = self.fresh_id();
        self.unit_ids.insert(literal.atom(), id);

        let result = writeln!(self.out, "{id} {} 0 0", literal.as_int());
        self.note(result);

        id
    }

    /// The identifiers of the antecedents of `chain`, leaves included, in resolution order.
    fn antecedent_ids(&mut self, arena: &Arena, chain: &ResolutionChain) -> Vec<usize> {
        let mut ids = Vec::with_capacity(chain.pivots.len() + 1);

        ids.push(self.clause_id(arena, chain.clauses[0]));
        for (index, &pivot) in chain.pivots.iter().enumerate() {
            match chain.clauses.get(index + 1) {
                Some(&clause) => ids.push(self.clause_id(arena, clause)),
                None => ids.push(self.unit_id(pivot)),
            }
        }

        ids
    }

    fn derived_line(&mut self, id: usize, literals: &[CLiteral], antecedents: &[usize]) {
        let mut line = format!("{id} ");
        if !literals.is_empty() {
            line.push_str(literals.as_dimacs(false).as_str());
            line.push(' ');
        }
        line.push_str("0 ");
        for antecedent in antecedents {
            line.push_str(format!("{antecedent} ").as_str());
        }
        line.push('0');
        let result = writeln!(self.out, "{line}");
        self.note(result);
    }
}

impl<W: std::io::Write> ProofVisitor for TraceVisitor<W> {
    fn visit_resolvent(&mut self, arena: &Arena, parent: CLiteral, unit: CLiteral, clause: ClauseRef) {
        let unit_antecedent = self.unit_id(unit);
        let clause_antecedent = self.clause_id(arena, clause);

        let id = self.fresh_id();
        self.unit_ids.insert(parent.atom(), id);
        self.derived_line(id, &[parent], &[unit_antecedent, clause_antecedent]);
    }

    fn visit_unit_chain(&mut self, arena: &Arena, chain: &ResolutionChain, parent: CLiteral) {
        let antecedents = self.antecedent_ids(arena, chain);

        let id = self.fresh_id();
        self.unit_ids.insert(parent.atom(), id);
        self.derived_line(id, &[parent], &antecedents);
    }

    fn visit_clause_chain(&mut self, arena: &Arena, chain: &ResolutionChain, parent: Option<ClauseRef>) {
        let antecedents = self.antecedent_ids(arena, chain);

        let id = self.fresh_id();
        match parent {
            Some(clause) => {
                self.clause_ids.insert(clause, id);
                let literals: Vec<CLiteral> = arena[clause].literals().to_vec();
                self.derived_line(id, &literals, &antecedents);
            }
            None => self.derived_line(id, &[], &antecedents),
        }
    }
}
