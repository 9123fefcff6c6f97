use super::SymExpr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: Option<&'a SymExpr>) -> bool {
        match (self.last_visited, expr) {
            (Some(last_visited), Some(expr)) => std::ptr::eq(last_visited, expr),
            _ => false,
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                SymExpr::Primary(_) => return self.visit(),
                SymExpr::Add(children) | SymExpr::Mul(children) => {
                    if children.is_empty() || self.is_last_visited(children.last()) {
                        return self.visit();
                    }
                    for child in children.iter().rev() {
                        self.stack.push(child);
                    }
                },
                SymExpr::Exp(lhs, rhs) => {
                    if self.is_last_visited(Some(rhs)) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let expr = SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::symbol("y"), SymExpr::num(2)),
        ]);
        let visited = expr.post_order_iter()
            .map(|expr| match expr {
                SymExpr::Primary(_) => expr.to_string(),
                SymExpr::Add(_) => "+".to_string(),
                SymExpr::Mul(_) => "*".to_string(),
                SymExpr::Exp(..) => "^".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "y", "2", "^", "+"]);
    }
}
