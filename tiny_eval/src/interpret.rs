use std::{cmp::Ordering, mem};

use log::{debug, warn};
use tiny_syntax::ast::{BinOp, Clause, Expr, Item, LogicalOp};

use crate::{
    controller::LoopController,
    dispatch::dispatch,
    error::{runtime_error, Diagnostic, ErrorMsg, Exception},
    symbols::SymbolTable,
    types::Value,
};

#[derive(Default, Debug)]
pub struct Interpreter {
    pub symbols: SymbolTable,
    probe: Option<Value>,
    diagnostics: Vec<Diagnostic>,
    output: Vec<Value>,
}

impl Interpreter {
    pub fn new(symbols: Option<SymbolTable>) -> Self {
        Self {
            symbols: symbols.unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Value that switch statements dispatch on. Without one, a switch
    /// dispatches on its subject variable.
    pub fn set_probe(&mut self, probe: Option<Value>) {
        self.probe = probe;
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Values produced by logging statements and switch reports.
    pub fn take_output(&mut self) -> Vec<Value> {
        mem::take(&mut self.output)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Runs the items in order and yields the value of the last one.
    pub fn interpret_all(&mut self, items: &[Item]) -> Result<Value, Exception> {
        let mut last = Value::Null;
        for item in items {
            last = self.interpret(item)?;
        }
        Ok(last)
    }

    pub fn interpret(&mut self, item: &Item) -> Result<Value, Exception> {
        match item {
            Item::LogStmt(expr) => self.interpret_log_stmt(expr),
            Item::SwitchStmt { subject, clauses } => self.interpret_switch_stmt(subject, clauses),
            Item::WhileStmt { condition, body } => self.interpret_while_stmt(condition, body),
            Item::Assignment { name, value } => self.interpret_assignment(name, value),
            Item::Increment(name) => self.interpret_increment(name),
            Item::ExprStmt(expr) => self.interpret_expr(expr),
        }
    }

    fn interpret_log_stmt(&mut self, expr: &Expr) -> Result<Value, Exception> {
        let value = self.interpret_expr(expr)?;
        self.output.push(value.clone());
        Ok(value)
    }

    fn interpret_switch_stmt(
        &mut self,
        subject: &str,
        clauses: &[Clause],
    ) -> Result<Value, Exception> {
        let probe = match &self.probe {
            Some(probe) => probe.clone(),
            None => self.symbols.get(subject),
        };
        let result = dispatch(clauses, &probe);
        debug!("Switch on {subject} = {probe:?}: {result}");
        self.output.push(Value::Str(result.to_string()));
        Ok(result
            .label()
            .map_or(Value::Null, |label| Value::Str(label.to_string())))
    }

    fn interpret_while_stmt(&mut self, condition: &Expr, body: &[Item]) -> Result<Value, Exception> {
        let initial = self.interpret_expr(condition)?;
        LoopController::default().run(self, &initial, body)?;
        Ok(Value::Null)
    }

    fn interpret_assignment(&mut self, name: &str, expr: &Expr) -> Result<Value, Exception> {
        let value = self.interpret_expr(expr)?;
        self.symbols.set(name, value.clone());
        Ok(value)
    }

    /// Unknown names are reported and left undefined.
    fn interpret_increment(&mut self, name: &str) -> Result<Value, Exception> {
        if !self.symbols.contains(name) {
            self.report(Diagnostic::Undefined(name.to_string()));
            return Ok(Value::Null);
        }
        let current = self.symbols.get(name);
        let Value::Number(n) = current else {
            return Err(runtime_error(ErrorMsg::ExpectedNumber, current.kind()));
        };
        let value = Value::Number(n + 1.0);
        self.symbols.set(name, value.clone());
        Ok(value)
    }

    pub fn interpret_expr(&mut self, expr: &Expr) -> Result<Value, Exception> {
        match expr {
            Expr::Literal(lit) => Ok(Value::from(lit)),
            Expr::Ident(name) => Ok(self.symbols.get(name)),
            Expr::Binary { lhs, op, rhs } => self.interpret_binary(lhs, *op, rhs),
            Expr::Logical { lhs, op, rhs } => self.interpret_logical(lhs, *op, rhs),
            Expr::Ternary {
                condition,
                then,
                otherwise,
            } => self.interpret_ternary(condition, then, otherwise),
            Expr::Group(e) => self.interpret_expr(e),
        }
    }

    /// Unlike `&&` and `||`, only the selected branch is evaluated.
    fn interpret_ternary(
        &mut self,
        condition: &Expr,
        then: &Expr,
        otherwise: &Expr,
    ) -> Result<Value, Exception> {
        if self.interpret_expr(condition)?.to_bool() {
            self.interpret_expr(then)
        } else {
            self.interpret_expr(otherwise)
        }
    }

    /// Both operands are always evaluated; `&&` and `||` do not
    /// short-circuit. The result is one of the operands.
    fn interpret_logical(
        &mut self,
        lhs: &Expr,
        op: LogicalOp,
        rhs: &Expr,
    ) -> Result<Value, Exception> {
        let left = self.interpret_expr(lhs)?;
        let right = self.interpret_expr(rhs)?;
        Ok(match (op, left.to_bool()) {
            (LogicalOp::Or, true) | (LogicalOp::And, false) => left,
            _ => right,
        })
    }

    fn interpret_binary(&mut self, lhs: &Expr, op: BinOp, rhs: &Expr) -> Result<Value, Exception> {
        let left = self.interpret_expr(lhs)?;
        let right = self.interpret_expr(rhs)?;

        match op {
            BinOp::EqualEqual => return Ok(Value::Boolean(is_eq(&left, &right)?)),
            BinOp::BangEqual => return Ok(Value::Boolean(!is_eq(&left, &right)?)),
            BinOp::Greater => return Ok(Value::Boolean(compare(&left, &right)? == Ordering::Greater)),
            BinOp::Less => return Ok(Value::Boolean(compare(&left, &right)? == Ordering::Less)),
            _ => (),
        }

        // A zero divisor is reported and recovered from, whatever the
        // dividend is
        if op == BinOp::Slash && right == Value::Number(0.0) {
            self.report(Diagnostic::DivisionByZero);
            return Ok(Value::Null);
        }

        let Value::Number(left_num) = left else {
            return Err(runtime_error(ErrorMsg::ExpectedNumber, left.kind()));
        };
        let Value::Number(right_num) = right else {
            return Err(runtime_error(ErrorMsg::ExpectedNumber, right.kind()));
        };

        Ok(Value::Number(match op {
            BinOp::Plus => left_num + right_num,
            BinOp::Minus => left_num - right_num,
            BinOp::Star => left_num * right_num,
            BinOp::Slash => left_num / right_num,
            _ => unreachable!("comparison operators are handled above"),
        }))
    }
}

/// Equality between values of the same kind. Mixed kinds are an error.
fn is_eq(left: &Value, right: &Value) -> Result<bool, Exception> {
    match (left, right) {
        (Value::Number(m), Value::Number(n)) => Ok(m == n),
        (Value::Str(m), Value::Str(n)) => Ok(m == n),
        (Value::Boolean(m), Value::Boolean(n)) => Ok(m == n),
        (Value::Null, Value::Null) => Ok(true),
        _ => Err(mismatch(left, right)),
    }
}

/// Natural ordering between values of the same kind.
fn compare(left: &Value, right: &Value) -> Result<Ordering, Exception> {
    match (left, right) {
        (Value::Number(m), Value::Number(n)) => m
            .partial_cmp(n)
            .ok_or_else(|| runtime_error(ErrorMsg::Unordered, format!("{m} and {n}"))),
        (Value::Str(m), Value::Str(n)) => Ok(m.cmp(n)),
        (Value::Boolean(m), Value::Boolean(n)) => Ok(m.cmp(n)),
        (Value::Null, Value::Null) => Err(runtime_error(ErrorMsg::Unordered, "null")),
        _ => Err(mismatch(left, right)),
    }
}

fn mismatch(left: &Value, right: &Value) -> Exception {
    runtime_error(
        ErrorMsg::MismatchedKinds,
        format!("{} and {}", left.kind(), right.kind()),
    )
}
