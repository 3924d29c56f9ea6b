//! Function-call name extraction from SQL text.
//!
//! Walks the parsed AST and collects the name of every function call, in
//! first-seen source order, without duplicates. The walk covers projection
//! lists, FROM clauses (including table-function calls and derived
//! subqueries), join constraints, WHERE/GROUP BY/HAVING/QUALIFY/ORDER BY,
//! CTEs, set operations and DML internals.

use sqlparser::ast::{
    Expr, FromTable, Function, FunctionArg, FunctionArgExpr, FunctionArgumentClause,
    FunctionArguments, GroupByExpr, HavingBound, JoinConstraint, JoinOperator, MergeAction,
    MergeInsertKind, ObjectName, OrderByKind, OutputClause, Query, SelectItem, SetExpr, Statement,
    TableFactor, TableWithJoins, UpdateTableFromKind,
};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Extracts the names of all function calls in `sql`.
///
/// Parsing is best-effort: text the parser rejects yields an empty result
/// rather than an error. Qualified call names contribute their final segment
/// (`public.f(x)` counts as `f`).
pub fn extract_function_names(sql: &str) -> Vec<String> {
    let statements = match Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        Ok(statements) => statements,
        Err(_) => return Vec::new(),
    };

    let mut names = Vec::new();
    for statement in &statements {
        visit_statement(statement, &mut names);
    }
    names
}

fn record(name: &ObjectName, names: &mut Vec<String>) {
    let simple = name
        .0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_else(|| name.to_string());
    if !names.contains(&simple) {
        names.push(simple);
    }
}

fn visit_statement(statement: &Statement, names: &mut Vec<String>) {
    match statement {
        Statement::Query(query) => visit_query(query, names),
        Statement::Insert(insert) => {
            if let Some(source) = &insert.source {
                visit_query(source, names);
            }
            for assignment in &insert.assignments {
                visit_expr(&assignment.value, names);
            }
            if let Some(partitioned) = &insert.partitioned {
                for expr in partitioned {
                    visit_expr(expr, names);
                }
            }
            if let Some(returning) = &insert.returning {
                for item in returning {
                    visit_select_item(item, names);
                }
            }
        }
        Statement::Update {
            table,
            assignments,
            from,
            selection,
            returning,
            ..
        } => {
            visit_table_with_joins(table, names);
            for assignment in assignments {
                visit_expr(&assignment.value, names);
            }
            if let Some(from) = from {
                match from {
                    UpdateTableFromKind::BeforeSet(tables)
                    | UpdateTableFromKind::AfterSet(tables) => {
                        for table in tables {
                            visit_table_with_joins(table, names);
                        }
                    }
                }
            }
            if let Some(selection) = selection {
                visit_expr(selection, names);
            }
            if let Some(returning) = returning {
                for item in returning {
                    visit_select_item(item, names);
                }
            }
        }
        Statement::Delete(delete) => {
            match &delete.from {
                FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => {
                    for table in tables {
                        visit_table_with_joins(table, names);
                    }
                }
            }
            if let Some(using) = &delete.using {
                for table in using {
                    visit_table_with_joins(table, names);
                }
            }
            if let Some(selection) = &delete.selection {
                visit_expr(selection, names);
            }
            if let Some(returning) = &delete.returning {
                for item in returning {
                    visit_select_item(item, names);
                }
            }
        }
        Statement::Merge {
            table,
            source,
            on,
            clauses,
            output,
            ..
        } => {
            visit_table_factor(table, names);
            visit_table_factor(source, names);
            visit_expr(on, names);
            for clause in clauses {
                if let Some(predicate) = &clause.predicate {
                    visit_expr(predicate, names);
                }
                match &clause.action {
                    MergeAction::Insert(insert) => {
                        if let MergeInsertKind::Values(values) = &insert.kind {
                            for row in &values.rows {
                                for expr in row {
                                    visit_expr(expr, names);
                                }
                            }
                        }
                    }
                    MergeAction::Update { assignments } => {
                        for assignment in assignments {
                            visit_expr(&assignment.value, names);
                        }
                    }
                    MergeAction::Delete => {}
                }
            }
            if let Some(output) = output {
                match output {
                    OutputClause::Output { select_items, .. }
                    | OutputClause::Returning { select_items } => {
                        for item in select_items {
                            visit_select_item(item, names);
                        }
                    }
                }
            }
        }
        Statement::CreateView { query, .. } => visit_query(query, names),
        Statement::CreateTable(create) => {
            if let Some(query) = &create.query {
                visit_query(query, names);
            }
        }
        _ => {}
    }
}

fn visit_query(query: &Query, names: &mut Vec<String>) {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            visit_query(&cte.query, names);
        }
    }
    visit_set_expr(&query.body, names);

    if let Some(order_by) = &query.order_by {
        if let OrderByKind::Expressions(exprs) = &order_by.kind {
            for order_expr in exprs {
                visit_expr(&order_expr.expr, names);
            }
        }
    }
}

fn visit_set_expr(body: &SetExpr, names: &mut Vec<String>) {
    match body {
        SetExpr::Select(select) => {
            // clause order mirrors the source text, so names surface in
            // first-seen order
            for item in &select.projection {
                visit_select_item(item, names);
            }
            for table_with_joins in &select.from {
                visit_table_with_joins(table_with_joins, names);
            }
            if let Some(selection) = &select.selection {
                visit_expr(selection, names);
            }
            if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
                for expr in exprs {
                    visit_expr(expr, names);
                }
            }
            if let Some(having) = &select.having {
                visit_expr(having, names);
            }
            if let Some(qualify) = &select.qualify {
                visit_expr(qualify, names);
            }
        }
        SetExpr::Query(query) => visit_query(query, names),
        SetExpr::SetOperation { left, right, .. } => {
            visit_set_expr(left, names);
            visit_set_expr(right, names);
        }
        SetExpr::Values(values) => {
            for row in &values.rows {
                for expr in row {
                    visit_expr(expr, names);
                }
            }
        }
        SetExpr::Insert(statement)
        | SetExpr::Update(statement)
        | SetExpr::Delete(statement)
        | SetExpr::Merge(statement) => visit_statement(statement, names),
        _ => {}
    }
}

fn visit_select_item(item: &SelectItem, names: &mut Vec<String>) {
    if let SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } = item {
        visit_expr(expr, names);
    }
}

fn visit_table_with_joins(table: &TableWithJoins, names: &mut Vec<String>) {
    visit_table_factor(&table.relation, names);
    for join in &table.joins {
        visit_table_factor(&join.relation, names);
        visit_join_constraint(&join.join_operator, names);
    }
}

fn visit_table_factor(table_factor: &TableFactor, names: &mut Vec<String>) {
    match table_factor {
        // a plain table reference carries no arguments; with arguments it is
        // a set-returning function call such as crosstab(...)
        TableFactor::Table { name, args, .. } => {
            if let Some(args) = args {
                record(name, names);
                for arg in &args.args {
                    visit_function_arg(arg, names);
                }
            }
        }
        TableFactor::Derived { subquery, .. } => visit_query(subquery, names),
        TableFactor::Function { name, args, .. } => {
            record(name, names);
            for arg in args {
                visit_function_arg(arg, names);
            }
        }
        TableFactor::TableFunction { expr, .. } => visit_expr(expr, names),
        TableFactor::UNNEST { array_exprs, .. } => {
            for expr in array_exprs {
                visit_expr(expr, names);
            }
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => visit_table_with_joins(table_with_joins, names),
        TableFactor::Pivot { table, .. }
        | TableFactor::Unpivot { table, .. }
        | TableFactor::MatchRecognize { table, .. } => visit_table_factor(table, names),
        _ => {}
    }
}

fn visit_join_constraint(op: &JoinOperator, names: &mut Vec<String>) {
    let constraint = match op {
        JoinOperator::Join(c)
        | JoinOperator::Inner(c)
        | JoinOperator::Left(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::Right(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c)
        | JoinOperator::CrossJoin(c)
        | JoinOperator::Semi(c)
        | JoinOperator::LeftSemi(c)
        | JoinOperator::RightSemi(c)
        | JoinOperator::Anti(c)
        | JoinOperator::LeftAnti(c)
        | JoinOperator::RightAnti(c)
        | JoinOperator::StraightJoin(c) => c,
        JoinOperator::AsOf { constraint, .. } => constraint,
        JoinOperator::CrossApply | JoinOperator::OuterApply => return,
    };
    if let JoinConstraint::On(expr) = constraint {
        visit_expr(expr, names);
    }
}

fn visit_expr(expr: &Expr, names: &mut Vec<String>) {
    match expr {
        Expr::Function(func) => visit_function(func, names),
        Expr::BinaryOp { left, right, .. } => {
            visit_expr(left, names);
            visit_expr(right, names);
        }
        Expr::UnaryOp { expr: inner, .. } => visit_expr(inner, names),
        Expr::Nested(inner) => visit_expr(inner, names),
        Expr::Cast { expr: inner, .. } => visit_expr(inner, names),
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(operand) = operand {
                visit_expr(operand, names);
            }
            for case_when in conditions {
                visit_expr(&case_when.condition, names);
                visit_expr(&case_when.result, names);
            }
            if let Some(else_result) = else_result {
                visit_expr(else_result, names);
            }
        }
        Expr::InSubquery {
            expr: inner,
            subquery,
            ..
        } => {
            visit_expr(inner, names);
            visit_query(subquery, names);
        }
        Expr::Subquery(subquery) => visit_query(subquery, names),
        Expr::Exists { subquery, .. } => visit_query(subquery, names),
        Expr::Between {
            expr: inner,
            low,
            high,
            ..
        } => {
            visit_expr(inner, names);
            visit_expr(low, names);
            visit_expr(high, names);
        }
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => visit_expr(inner, names),
        Expr::InList { expr: inner, list, .. } => {
            visit_expr(inner, names);
            for item in list {
                visit_expr(item, names);
            }
        }
        Expr::Like {
            expr: inner,
            pattern,
            ..
        }
        | Expr::ILike {
            expr: inner,
            pattern,
            ..
        }
        | Expr::SimilarTo {
            expr: inner,
            pattern,
            ..
        } => {
            visit_expr(inner, names);
            visit_expr(pattern, names);
        }
        Expr::AnyOp { left, right, .. } | Expr::AllOp { left, right, .. } => {
            visit_expr(left, names);
            visit_expr(right, names);
        }
        Expr::Tuple(exprs) => {
            for item in exprs {
                visit_expr(item, names);
            }
        }
        _ => {}
    }
}

fn visit_function(func: &Function, names: &mut Vec<String>) {
    record(&func.name, names);
    match &func.args {
        FunctionArguments::Subquery(query) => visit_query(query, names),
        FunctionArguments::List(arg_list) => {
            for arg in &arg_list.args {
                visit_function_arg(arg, names);
            }
            for clause in &arg_list.clauses {
                match clause {
                    FunctionArgumentClause::OrderBy(order_by_exprs) => {
                        for order_by_expr in order_by_exprs {
                            visit_expr(&order_by_expr.expr, names);
                        }
                    }
                    FunctionArgumentClause::Limit(expr) => visit_expr(expr, names),
                    FunctionArgumentClause::Having(HavingBound(_, expr)) => {
                        visit_expr(expr, names)
                    }
                    _ => {}
                }
            }
        }
        FunctionArguments::None => {}
    }
}

fn visit_function_arg(arg: &FunctionArg, names: &mut Vec<String>) {
    match arg {
        FunctionArg::Unnamed(FunctionArgExpr::Expr(expr))
        | FunctionArg::Named {
            arg: FunctionArgExpr::Expr(expr),
            ..
        } => visit_expr(expr, names),
        FunctionArg::ExprNamed { name, arg, .. } => {
            visit_expr(name, names);
            if let FunctionArgExpr::Expr(expr) = arg {
                visit_expr(expr, names);
            }
        }
        _ => {}
    }
}
