//! The recursive-descent SQL parser.

use std::collections::HashMap;
use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::types::{Column, DataType, Row, Value};

use super::ast::{JoinClause, Operator, QualifiedColumn, Statement, WhereClause};
use super::lexer::{Lexer, Token};

/// Parses the input string into a statement AST. The entire string must be
/// consumed by a single statement.
pub fn parse(statement: &str) -> Result<Statement> {
    let mut parser = Parser::new(statement);
    let statement = parser.parse_statement()?;
    if let Some(token) = parser.lexer.next() {
        return Err(Error::ParseError(format!("unexpected token {token}")));
    }
    Ok(statement)
}

struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl Parser<'_> {
    fn new(input: &str) -> Parser<'_> {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Fetches the next token, or errors at end of input.
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .ok_or_else(|| Error::ParseError("unexpected end of input".into()))
    }

    /// Peeks the next token without consuming it.
    fn peek(&mut self) -> Option<&Token> {
        self.lexer.peek()
    }

    /// Returns the next token as a bare word, or errors.
    fn next_word(&mut self) -> Result<String> {
        match self.next()? {
            Token::Word(word) => Ok(word),
            token => Err(Error::ParseError(format!("expected word, found {token}"))),
        }
    }

    /// Consumes the next token if it is the given token, or errors.
    fn expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::ParseError(format!(
                "expected {expect}, found {token}"
            )));
        }
        Ok(())
    }

    /// Consumes the next token if it is the given keyword, matched
    /// case-insensitively, or errors.
    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        let token = self.next()?;
        match &token {
            Token::Word(word) if word.eq_ignore_ascii_case(keyword) => Ok(()),
            _ => Err(Error::ParseError(format!(
                "expected {keyword}, found {token}"
            ))),
        }
    }

    /// Consumes the next token if it is the given token, returning true.
    fn next_is(&mut self, token: Token) -> bool {
        if self.peek() == Some(&token) {
            self.lexer.next();
            return true;
        }
        false
    }

    /// Consumes the next token if it is the given keyword, returning true.
    fn next_is_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword) => {
                self.lexer.next();
                true
            }
            _ => false,
        }
    }

    /// Returns true if the next token is the given keyword, without
    /// consuming it.
    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword))
    }

    /// Parses a statement, dispatching on the leading keyword.
    fn parse_statement(&mut self) -> Result<Statement> {
        let token = self
            .lexer
            .next()
            .ok_or_else(|| Error::ParseError("empty query".into()))?;
        let Token::Word(keyword) = token else {
            return Err(Error::ParseError(format!("unexpected token {token}")));
        };
        match keyword.to_uppercase().as_str() {
            "CREATE" => self.parse_create_table(),
            "INSERT" => self.parse_insert(),
            "SELECT" => self.parse_select(),
            "UPDATE" => self.parse_update(),
            "DELETE" => self.parse_delete(),
            _ => Err(Error::ParseError(format!(
                "unsupported command: {keyword}"
            ))),
        }
    }

    /// CREATE TABLE name (col TYPE [PRIMARY KEY] [UNIQUE] [NOT NULL], ...)
    fn parse_create_table(&mut self) -> Result<Statement> {
        self.expect_keyword("TABLE")?;
        let name = self.next_word()?;
        self.expect(Token::OpenParen)?;
        let mut columns = Vec::new();
        while !self.next_is(Token::CloseParen) {
            columns.push(self.parse_column()?);
        }
        Ok(Statement::CreateTable { name, columns })
    }

    fn parse_column(&mut self) -> Result<Column> {
        let name = self.next_word()?;
        let type_name = self.next_word()?;
        let data_type = match type_name.to_uppercase().as_str() {
            "INT" | "INTEGER" => DataType::Int,
            "STRING" | "VARCHAR" | "TEXT" => DataType::Str,
            "FLOAT" | "REAL" => DataType::Float,
            _ => {
                return Err(Error::ParseError(format!("unknown type: {type_name}")));
            }
        };
        let mut column = Column::new(name, data_type);
        loop {
            if self.next_is_keyword("PRIMARY") {
                self.expect_keyword("KEY")?;
                column = column.primary_key();
            } else if self.next_is_keyword("UNIQUE") {
                column = column.unique();
            } else if self.next_is_keyword("NOT") {
                self.expect_keyword("NULL")?;
                column = column.not_null();
            } else {
                return Ok(column);
            }
        }
    }

    /// INSERT INTO table (col, ...) VALUES (val, ...)
    ///
    /// Columns pair with values positionally. Surplus values are dropped
    /// and unmatched columns stay unset, subject to the constraint check.
    fn parse_insert(&mut self) -> Result<Statement> {
        self.expect_keyword("INTO")?;
        let table = self.next_word()?;
        let mut columns = Vec::new();
        if self.next_is(Token::OpenParen) {
            while !self.next_is(Token::CloseParen) {
                columns.push(self.next_word()?);
            }
        }
        self.expect_keyword("VALUES")?;
        self.expect(Token::OpenParen)?;
        let mut literals = Vec::new();
        while !self.next_is(Token::CloseParen) {
            literals.push(parse_value(&self.next_word()?));
        }
        let values: Row = columns.into_iter().zip(literals).collect();
        Ok(Statement::Insert { table, values })
    }

    /// SELECT cols FROM table [JOIN table ON t.c = t.c] [WHERE predicate]
    fn parse_select(&mut self) -> Result<Statement> {
        let mut columns = Vec::new();
        loop {
            if self.next_is_keyword("FROM") {
                break;
            }
            match self.lexer.next() {
                Some(Token::Word(word)) => columns.push(word),
                Some(token) => {
                    return Err(Error::ParseError(format!(
                        "expected column name, found {token}"
                    )));
                }
                None => return Err(Error::ParseError("missing FROM clause".into())),
            }
        }
        let table = self.next_word()?;

        let mut join = None;
        if self.next_is_keyword("JOIN") {
            let join_table = self.next_word()?;
            self.expect_keyword("ON")?;
            let left = self.parse_qualified_column()?;
            self.expect(Token::Word("=".into()))?;
            let right = self.parse_qualified_column()?;
            join = Some(JoinClause {
                table: join_table,
                left,
                right,
            });
        }

        let where_clause = self.parse_where_clause()?;
        Ok(Statement::Select {
            columns,
            table,
            where_clause,
            join,
        })
    }

    fn parse_qualified_column(&mut self) -> Result<QualifiedColumn> {
        let word = self.next_word()?;
        match word.split_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Ok(QualifiedColumn {
                    table: table.into(),
                    column: column.into(),
                })
            }
            _ => Err(Error::ParseError(format!(
                "expected table.column, found {word}"
            ))),
        }
    }

    /// UPDATE table SET col = val, ... [WHERE predicate]
    fn parse_update(&mut self) -> Result<Statement> {
        let table = self.next_word()?;
        self.expect_keyword("SET")?;
        let mut assignments = HashMap::new();
        loop {
            let column = self.next_word()?;
            self.expect(Token::Word("=".into()))?;
            let value = parse_value(&self.next_word()?);
            assignments.insert(column, value);
            if self.peek().is_none() || self.peek_is_keyword("WHERE") {
                break;
            }
        }
        let where_clause = self.parse_where_clause()?;
        Ok(Statement::Update {
            table,
            assignments,
            where_clause,
        })
    }

    /// DELETE FROM table [WHERE predicate]
    fn parse_delete(&mut self) -> Result<Statement> {
        self.expect_keyword("FROM")?;
        let table = self.next_word()?;
        let where_clause = self.parse_where_clause()?;
        Ok(Statement::Delete {
            table,
            where_clause,
        })
    }

    /// Parses the trailing WHERE clause if one is present.
    fn parse_where_clause(&mut self) -> Result<Option<WhereClause>> {
        if !self.next_is_keyword("WHERE") {
            return Ok(None);
        }
        let column = self.next_word()?;
        let symbol = self.next_word()?;
        let op = Operator::from_symbol(&symbol)
            .ok_or_else(|| Error::ParseError(format!("unknown operator: {symbol}")))?;
        let value = parse_value(&self.next_word()?);
        Ok(Some(WhereClause { column, op, value }))
    }
}

/// Parses a literal word into a value: integer first, then float, else a
/// string with its surrounding quotes stripped.
fn parse_value(literal: &str) -> Value {
    if let Ok(i) = literal.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = literal.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Str(
        literal
            .trim_matches(|c| c == '\'' || c == '"')
            .to_string(),
    )
}
