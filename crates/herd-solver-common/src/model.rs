//! MILP model representation sent to solver backends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::solution::Assignment;

/// Index of a variable within a [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl VarId {
    pub fn new(id: usize) -> Self {
        VarId(id)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Declaration of one decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDef {
    pub name: String,
    pub lower: f64,
    pub upper: Option<f64>,
    pub integer: bool,
}

impl VarDef {
    /// Integer variable bounded below by zero.
    pub fn non_negative_integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: 0.0,
            upper: None,
            integer: true,
        }
    }

    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }
}

/// Affine expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coef · var`. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
    }

    pub fn with_term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Sum of the listed variables with unit coefficients.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1.0);
        }
        expr
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `assignment`; unassigned variables count as zero.
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * assignment.value_or_zero(*var))
            .sum::<f64>()
            + self.constant
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "==")]
    Eq,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpOp::Le => write!(f, "<="),
            CmpOp::Ge => write!(f, ">="),
            CmpOp::Eq => write!(f, "=="),
        }
    }
}

/// Named linear constraint `expr op rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub op: CmpOp,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(name: impl Into<String>, expr: LinearExpr, op: CmpOp, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            op,
            rhs,
        }
    }

    /// Amount by which `assignment` violates the constraint (0 when satisfied).
    pub fn violation(&self, assignment: &Assignment) -> f64 {
        let lhs = self.expr.evaluate(assignment);
        match self.op {
            CmpOp::Le => (lhs - self.rhs).max(0.0),
            CmpOp::Ge => (self.rhs - lhs).max(0.0),
            CmpOp::Eq => (lhs - self.rhs).abs(),
        }
    }
}

/// A mixed-integer linear program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpModel {
    pub name: String,
    pub sense: Sense,
    pub variables: Vec<VarDef>,
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl MilpModel {
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            sense,
            variables: Vec::new(),
            objective: LinearExpr::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_variable(&mut self, def: VarDef) -> VarId {
        self.variables.push(def);
        VarId(self.variables.len() - 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn variable(&self, id: VarId) -> Option<&VarDef> {
        self.variables.get(id.0)
    }

    /// Look up a variable by name (linear scan).
    pub fn find_variable(&self, name: &str) -> Option<VarId> {
        self.variables.iter().position(|v| v.name == name).map(VarId)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.integer).count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Largest constraint violation under `assignment`, with the constraint name.
    pub fn max_violation(&self, assignment: &Assignment) -> Option<(&str, f64)> {
        self.constraints
            .iter()
            .map(|c| (c.name.as_str(), c.violation(assignment)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> (MilpModel, VarId, VarId) {
        let mut model = MilpModel::new("tiny", Sense::Maximize);
        let x = model.add_variable(VarDef::non_negative_integer("x"));
        let y = model.add_variable(VarDef::non_negative_integer("y").with_upper(3.0));
        model.objective = LinearExpr::new().with_term(x, 2.0).with_term(y, 1.0);
        model.add_constraint(Constraint::new("cap", LinearExpr::sum([x, y]), CmpOp::Le, 4.0));
        (model, x, y)
    }

    #[test]
    fn test_model_counts() {
        let (model, x, y) = tiny_model();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_integer_variables(), 2);
        assert_eq!(model.num_constraints(), 1);
        assert_eq!(model.find_variable("y"), Some(y));
        assert_eq!(model.variable(x).map(|v| v.name.as_str()), Some("x"));
        assert_eq!(model.find_variable("z"), None);
    }

    #[test]
    fn test_zero_coefficients_dropped() {
        let expr = LinearExpr::new().with_term(VarId(0), 0.0).with_term(VarId(1), 3.0);
        assert_eq!(expr.terms, vec![(VarId(1), 3.0)]);
    }

    #[test]
    fn test_evaluate_and_violation() {
        let (model, x, y) = tiny_model();
        let mut assignment = Assignment::new();
        assignment.set(x, 3.0);
        assignment.set(y, 2.0);

        assert_eq!(model.objective.evaluate(&assignment), 8.0);
        let (name, amount) = model.max_violation(&assignment).unwrap();
        assert_eq!(name, "cap");
        assert_eq!(amount, 1.0);

        // Missing values count as zero.
        let empty = Assignment::new();
        assert_eq!(model.objective.evaluate(&empty), 0.0);
        assert_eq!(model.constraints[0].violation(&empty), 0.0);
    }

    #[test]
    fn test_equality_violation_is_absolute() {
        let c = Constraint::new("d", LinearExpr::sum([VarId(0)]), CmpOp::Eq, 10.0);
        let mut a = Assignment::new();
        a.set(VarId(0), 12.0);
        assert_eq!(c.violation(&a), 2.0);
        a.set(VarId(0), 7.0);
        assert_eq!(c.violation(&a), 3.0);
    }

    #[test]
    fn test_cmp_op_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&CmpOp::Le).unwrap(), "\"<=\"");
        assert_eq!(CmpOp::Eq.to_string(), "==");
    }
}
