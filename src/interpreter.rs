/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements against
/// a chain of scopes, calls functions and builtins, and produces results.
///
/// # Responsibilities
/// - Evaluates every statement and expression form of the language.
/// - Manages scopes, closures, loops and `return`.
/// - Reports runtime errors stamped with the line of the innermost failing
///   node.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a literal, identifier, keyword, operator or delimiter,
/// tagged with the line it starts on. Characters it does not recognize become
/// `ILLEGAL` tokens, which the parser reports.
pub mod lexer;
/// Collection and expansion of macros.
///
/// Runs between parsing and evaluation: top-level macro definitions are
/// moved into a macro scope, then every call to them is replaced by the
/// syntax the macro returns.
pub mod macro_expansion;
/// Runtime values, hash keys and scopes.
///
/// # Responsibilities
/// - Defines the `Object` enum and its type tags and renderings.
/// - Derives hash keys for integers, booleans and strings.
/// - Provides the shared, nested `Environment` used for variable bindings.
pub mod object;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a Pratt parser over the lexer's token stream. It recovers
/// from a bad statement by skipping to the next `;`, so one pass reports
/// every error in the program.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions with correct precedence
///   and associativity.
/// - Records errors with the line they occurred on.
pub mod parser;
