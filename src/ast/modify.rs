use super::{BlockStatement, Expression, Program, Statement};

/// Rewrites every expression in `program`, innermost first.
///
/// Children are rebuilt before their parent is handed to `modifier`, so the
/// modifier always sees a node whose subtrees were already rewritten. The
/// first `Err` aborts the whole traversal.
///
/// # Example
/// ```
/// use std::convert::Infallible;
///
/// use marmoset::{
///     ast::{Expression, modify::modify_program},
///     interpreter::parser::parse,
/// };
///
/// let (program, errors) = parse("1 + 2;");
/// assert!(errors.is_empty());
///
/// let doubled = modify_program(program, &mut |expr| {
///                   Ok::<_, Infallible>(match expr {
///                       Expression::IntegerLiteral { value, line } => {
///                           Expression::IntegerLiteral { value: value * 2,
///                                                        line }
///                       },
///                       other => other,
///                   })
///               }).unwrap();
/// assert_eq!(doubled.to_string(), "(2 + 4);");
/// ```
pub fn modify_program<E, F>(program: Program, modifier: &mut F) -> Result<Program, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    let statements = modify_statements(program.statements, modifier)?;
    Ok(Program { statements })
}

/// Rewrites every expression inside a single statement.
pub fn modify_statement<E, F>(statement: Statement, modifier: &mut F) -> Result<Statement, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    Ok(match statement {
        Statement::Let { name, value, line } => Statement::Let { name,
                                                                 value: modify_expression(value, modifier)?,
                                                                 line },
        Statement::Return { value, line } => Statement::Return { value: modify_expression(value, modifier)?,
                                                                 line },
        Statement::Expression { expression, line } => {
            Statement::Expression { expression: modify_expression(expression, modifier)?,
                                    line }
        },
        Statement::While { condition, body, line } => {
            Statement::While { condition: modify_expression(condition, modifier)?,
                               body: modify_block(body, modifier)?,
                               line }
        },
        Statement::For { init,
                         condition,
                         update,
                         body,
                         line, } => {
            let init = match init {
                Some(init) => Some(Box::new(modify_statement(*init, modifier)?)),
                None => None,
            };
            let condition = modify_expression(condition, modifier)?;
            let update = update.map(|update| modify_expression(update, modifier))
                               .transpose()?;
            Statement::For { init,
                             condition,
                             update,
                             body: modify_block(body, modifier)?,
                             line }
        },
        Statement::Break { line } => Statement::Break { line },
    })
}

/// Rewrites `expression` and everything below it.
///
/// Parameter lists are left alone; only expressions are handed to the
/// modifier.
pub fn modify_expression<E, F>(expression: Expression, modifier: &mut F) -> Result<Expression, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    let rebuilt = match expression {
        Expression::Prefix { operator, right, line } => {
            Expression::Prefix { operator,
                                 right: modify_boxed(right, modifier)?,
                                 line }
        },
        Expression::Infix { left,
                            operator,
                            right,
                            line, } => {
            let left = modify_boxed(left, modifier)?;
            Expression::Infix { left,
                                operator,
                                right: modify_boxed(right, modifier)?,
                                line }
        },
        Expression::Index { left, index, line } => {
            let left = modify_boxed(left, modifier)?;
            Expression::Index { left,
                                index: modify_boxed(index, modifier)?,
                                line }
        },
        Expression::If { condition,
                         consequence,
                         alternative,
                         line, } => {
            let condition = modify_boxed(condition, modifier)?;
            let consequence = modify_block(consequence, modifier)?;
            let alternative = alternative.map(|block| modify_block(block, modifier))
                                         .transpose()?;
            Expression::If { condition,
                             consequence,
                             alternative,
                             line }
        },
        Expression::Function { parameters, body, line } => {
            Expression::Function { parameters,
                                   body: modify_block(body, modifier)?,
                                   line }
        },
        Expression::Macro { parameters, body, line } => {
            Expression::Macro { parameters,
                                body: modify_block(body, modifier)?,
                                line }
        },
        Expression::Call { function,
                           arguments,
                           line, } => {
            let function = modify_boxed(function, modifier)?;
            Expression::Call { function,
                               arguments: modify_all(arguments, modifier)?,
                               line }
        },
        Expression::Assign { name, value, line } => {
            Expression::Assign { name,
                                 value: modify_boxed(value, modifier)?,
                                 line }
        },
        Expression::ArrayLiteral { elements, line } => {
            Expression::ArrayLiteral { elements: modify_all(elements, modifier)?,
                                       line }
        },
        Expression::HashLiteral { pairs, line } => {
            let pairs = pairs.into_iter()
                             .map(|(key, value)| {
                                 let key = modify_expression(key, modifier)?;
                                 Ok((key, modify_expression(value, modifier)?))
                             })
                             .collect::<Result<_, E>>()?;
            Expression::HashLiteral { pairs, line }
        },
        leaf @ (Expression::Identifier(_)
                | Expression::IntegerLiteral { .. }
                | Expression::FloatLiteral { .. }
                | Expression::BooleanLiteral { .. }
                | Expression::StringLiteral { .. }
                | Expression::Error { .. }) => leaf,
    };

    modifier(rebuilt)
}

fn modify_block<E, F>(block: BlockStatement, modifier: &mut F) -> Result<BlockStatement, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    Ok(BlockStatement { statements: modify_statements(block.statements, modifier)?,
                        line:       block.line, })
}

fn modify_statements<E, F>(statements: Vec<Statement>, modifier: &mut F) -> Result<Vec<Statement>, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    statements.into_iter()
              .map(|statement| modify_statement(statement, modifier))
              .collect()
}

fn modify_all<E, F>(expressions: Vec<Expression>, modifier: &mut F) -> Result<Vec<Expression>, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    expressions.into_iter()
               .map(|expression| modify_expression(expression, modifier))
               .collect()
}

fn modify_boxed<E, F>(expression: Box<Expression>, modifier: &mut F) -> Result<Box<Expression>, E>
    where F: FnMut(Expression) -> Result<Expression, E>
{
    modify_expression(*expression, modifier).map(Box::new)
}
