//! Recursive-descent parser over the token stream produced by [`crate::lexer`].
//!
//! The grammar recognized here is intentionally a strict subset of Swift: just
//! enough to drive the two-level extraction in [`crate::extract`]. Anything the
//! parser doesn't recognize is skipped via balanced-brace recovery rather than
//! raised as an error — per the core contract, a malformed or unsupported
//! construct simply contributes nothing.

use crate::lexer::{tokenize, Token};
use crate::syntax::{Attribute, Declaration, FunctionDecl, Member, ParameterDecl, ParsedFile, TypeDecl, VariableDecl};

const NESTED_TYPE_KEYWORDS: [&str; 5] = ["class", "struct", "extension", "enum", "protocol"];
const MEMBER_BOUNDARY_KEYWORDS: [&str; 3] = ["var", "let", "func"];

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Ident(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn is_ident(&self, word: &str) -> bool {
        self.peek_ident() == Some(word)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if self.is_ident(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Parse one source file into a [`ParsedFile`].
pub fn parse(source: &str) -> ParsedFile {
    let tokens = tokenize(source);
    let mut cur = Cursor { tokens: &tokens, pos: 0 };
    let mut file = ParsedFile::default();

    while cur.peek().is_some() {
        if cur.eat_ident("import") {
            for kw in ["struct", "class", "enum", "protocol", "func", "var", "let", "typealias"] {
                if cur.eat_ident(kw) {
                    break;
                }
            }
            let name = parse_dotted_name(&mut cur);
            if !name.is_empty() {
                file.imports.push(name);
            }
            continue;
        }

        let attrs = parse_attributes(&mut cur);

        if cur.eat_ident("class") {
            if let Some(decl) = parse_type_decl(&mut cur, attrs) {
                file.decls.push(Declaration::Class(decl));
            }
            continue;
        }
        if cur.eat_ident("struct") {
            if let Some(decl) = parse_type_decl(&mut cur, attrs) {
                file.decls.push(Declaration::Struct(decl));
            }
            continue;
        }
        if cur.eat_ident("extension") {
            if let Some(decl) = parse_type_decl(&mut cur, attrs) {
                file.decls.push(Declaration::Extension(decl));
            }
            continue;
        }
        if cur.eat_ident("func") {
            if let Some(decl) = parse_function(&mut cur, attrs) {
                file.decls.push(Declaration::Function(decl));
            }
            continue;
        }
        if cur.is_ident("var") || cur.is_ident("let") {
            cur.advance();
            if let Some(decl) = parse_variable(&mut cur, attrs) {
                file.decls.push(Declaration::Variable(decl));
            }
            continue;
        }

        resynchronize(&mut cur);
    }

    file
}

/// Skip one unrecognized construct: a balanced brace block if one opens here,
/// otherwise a single token.
fn resynchronize(cur: &mut Cursor) {
    if cur.eat(&Token::LBrace) {
        skip_balanced_rest(cur);
    } else if cur.advance().is_none() {
        // already at end of input
    }
}

fn skip_balanced_rest(cur: &mut Cursor) {
    let mut depth: i32 = 1;
    loop {
        match cur.advance() {
            None => break,
            Some(Token::LBrace) => depth += 1,
            Some(Token::RBrace) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

fn parse_dotted_name(cur: &mut Cursor) -> String {
    let mut parts = Vec::new();
    loop {
        match cur.peek() {
            Some(Token::Ident(s)) => {
                parts.push(s.clone());
                cur.advance();
            }
            _ => break,
        }
        if cur.eat(&Token::Dot) {
            continue;
        }
        break;
    }
    parts.join(".")
}

/// Parse zero or more `@Name` / `@Name("arg")` attributes.
fn parse_attributes(cur: &mut Cursor) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    while cur.eat(&Token::At) {
        let name = match cur.advance() {
            Some(Token::Ident(s)) => s.clone(),
            _ => continue,
        };
        let mut arg = None;
        if cur.eat(&Token::LParen) {
            let mut depth = 1i32;
            while depth > 0 {
                match cur.advance() {
                    Some(Token::LParen) => depth += 1,
                    Some(Token::RParen) => depth -= 1,
                    Some(Token::StringLit(s)) if arg.is_none() => arg = Some(s.clone()),
                    None => break,
                    _ => {}
                }
            }
        }
        attrs.push(Attribute { name, arg });
    }
    attrs
}

fn parse_type_decl(cur: &mut Cursor, attrs: Vec<Attribute>) -> Option<TypeDecl> {
    let name = match cur.advance() {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };
    skip_generic_suffix(cur);

    let mut conformances = Vec::new();
    if cur.eat(&Token::Colon) {
        loop {
            let spelling = parse_type_spelling(cur)?;
            conformances.push(base_identifier(&spelling));
            if cur.eat(&Token::Comma) {
                continue;
            }
            break;
        }
    }

    // Skip an optional `where` clause or anything else before the body.
    while !matches!(cur.peek(), Some(Token::LBrace) | None) {
        if cur.peek_ident().map(|w| MEMBER_BOUNDARY_KEYWORDS.contains(&w)) == Some(true) {
            return None;
        }
        cur.advance();
    }
    if !cur.eat(&Token::LBrace) {
        return None;
    }

    let members = parse_members(cur);
    Some(TypeDecl { attrs, name, conformances, members })
}

fn base_identifier(spelling: &str) -> String {
    spelling
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .next()
        .unwrap_or(spelling)
        .to_string()
}

fn parse_members(cur: &mut Cursor) -> Vec<Member> {
    let mut members = Vec::new();
    loop {
        match cur.peek() {
            None => break,
            Some(Token::RBrace) => {
                cur.advance();
                break;
            }
            _ => {}
        }

        let attrs = parse_attributes(cur);

        if cur.peek_ident().map(|w| NESTED_TYPE_KEYWORDS.contains(&w)) == Some(true) {
            // Nested type declarations are skipped: the extractor never recurses
            // into them (see the Module Extractor contract).
            cur.advance();
            while !matches!(cur.peek(), Some(Token::LBrace) | None) {
                cur.advance();
            }
            if cur.eat(&Token::LBrace) {
                skip_balanced_rest(cur);
            }
            continue;
        }

        if cur.is_ident("var") || cur.is_ident("let") {
            cur.advance();
            if let Some(decl) = parse_variable(cur, attrs) {
                members.push(Member::Variable(decl));
            }
            continue;
        }
        if cur.eat_ident("func") {
            if let Some(decl) = parse_function(cur, attrs) {
                members.push(Member::Function(decl));
            }
            continue;
        }

        resynchronize(cur);
    }
    members
}

fn parse_variable(cur: &mut Cursor, attrs: Vec<Attribute>) -> Option<VariableDecl> {
    let mut names = Vec::new();
    loop {
        match cur.advance() {
            Some(Token::Ident(s)) => names.push(s.clone()),
            _ => return None,
        }
        if cur.eat(&Token::Comma) {
            continue;
        }
        break;
    }

    let mut ty = None;
    if cur.eat(&Token::Colon) {
        ty = parse_type_spelling(cur);
    }

    let mut has_initializer = false;
    if cur.eat(&Token::Equals) {
        has_initializer = true;
        skip_initializer_expr(cur);
    }

    let mut binding_count = names.len();
    while cur.eat(&Token::Comma) {
        binding_count += 1;
        cur.advance(); // the extra binding's name
        if cur.eat(&Token::Colon) {
            let _ = parse_type_spelling(cur);
        }
        if cur.eat(&Token::Equals) {
            has_initializer = true;
            skip_initializer_expr(cur);
        }
    }

    if cur.eat(&Token::LBrace) {
        skip_balanced_rest(cur);
    }

    Some(VariableDecl {
        attrs,
        binding_count,
        name: names.into_iter().next().unwrap_or_default(),
        ty,
        has_initializer,
    })
}

/// Skip a stored-property initializer expression. Tracks nesting depth so that
/// parenthesized/bracketed/brace-delimited sub-expressions don't trip the
/// top-level terminators (comma, next member keyword, or the enclosing `}`).
fn skip_initializer_expr(cur: &mut Cursor) {
    let mut depth: i32 = 0;
    loop {
        match cur.peek() {
            None => break,
            Some(Token::LParen) | Some(Token::LBracket) | Some(Token::LBrace) => {
                depth += 1;
                cur.advance();
            }
            Some(Token::RParen) | Some(Token::RBracket) => {
                depth -= 1;
                cur.advance();
            }
            Some(Token::RBrace) => {
                if depth > 0 {
                    depth -= 1;
                    cur.advance();
                } else {
                    break;
                }
            }
            Some(Token::Comma) if depth == 0 => break,
            Some(Token::At) if depth == 0 => break,
            _ if depth == 0 && cur.peek_ident().map(|w| MEMBER_BOUNDARY_KEYWORDS.contains(&w) || NESTED_TYPE_KEYWORDS.contains(&w)) == Some(true) => {
                break;
            }
            _ => {
                cur.advance();
            }
        }
    }
}

fn parse_function(cur: &mut Cursor, attrs: Vec<Attribute>) -> Option<FunctionDecl> {
    let name = match cur.advance() {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };
    skip_generic_suffix(cur);

    if !cur.eat(&Token::LParen) {
        return None;
    }
    let mut parameters = Vec::new();
    if cur.peek() != Some(&Token::RParen) {
        loop {
            if let Some(param) = parse_parameter(cur) {
                parameters.push(param);
            }
            if cur.eat(&Token::Comma) {
                continue;
            }
            break;
        }
    }
    if !cur.eat(&Token::RParen) {
        return None;
    }

    while matches!(cur.peek_ident(), Some("throws") | Some("rethrows") | Some("async")) {
        cur.advance();
    }

    let mut return_type = None;
    if cur.eat(&Token::Arrow) {
        return_type = parse_type_spelling(cur);
    }

    // Skip an optional `where` clause, then either consume the body or, for a
    // bodyless declaration (protocol requirement), stop at the next member.
    while !matches!(cur.peek(), Some(Token::LBrace) | None) {
        if cur.peek_ident().map(|w| MEMBER_BOUNDARY_KEYWORDS.contains(&w) || NESTED_TYPE_KEYWORDS.contains(&w)) == Some(true) {
            return Some(FunctionDecl { attrs, name, parameters, return_type });
        }
        cur.advance();
    }
    if cur.eat(&Token::LBrace) {
        skip_balanced_rest(cur);
    }

    Some(FunctionDecl { attrs, name, parameters, return_type })
}

fn parse_parameter(cur: &mut Cursor) -> Option<ParameterDecl> {
    let attrs = parse_attributes(cur);
    let first = match cur.advance() {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };

    let (label, name) = if let Some(Token::Ident(second)) = cur.peek() {
        let second = second.clone();
        cur.advance();
        (first, second)
    } else {
        (first.clone(), first)
    };

    if !cur.eat(&Token::Colon) {
        return None;
    }
    let ty = parse_type_spelling(cur)?;

    let mut default_value = None;
    if cur.eat(&Token::Equals) {
        default_value = Some(capture_default_expr(cur));
    }

    Some(ParameterDecl { attrs, label, name, ty, default_value })
}

/// Capture a parameter default-value expression as raw text, never evaluated;
/// stops at the top-level comma or closing paren that ends the parameter list.
fn capture_default_expr(cur: &mut Cursor) -> String {
    let mut depth: i32 = 0;
    let mut text = String::new();
    loop {
        match cur.peek() {
            None => break,
            Some(Token::RParen) if depth == 0 => break,
            Some(Token::Comma) if depth == 0 => break,
            Some(tok) => {
                match tok {
                    Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                    Token::RParen | Token::RBracket | Token::RBrace => depth -= 1,
                    _ => {}
                }
                text.push_str(&render_compact(tok));
                cur.advance();
            }
        }
    }
    text
}

fn render_compact(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => s.clone(),
        Token::StringLit(s) => format!("\"{s}\""),
        Token::Number(s) => s.clone(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::LBrace => "{".to_string(),
        Token::RBrace => "}".to_string(),
        Token::LBracket => "[".to_string(),
        Token::RBracket => "]".to_string(),
        Token::Colon => ": ".to_string(),
        Token::Comma => ", ".to_string(),
        Token::Dot => ".".to_string(),
        Token::Equals => " = ".to_string(),
        Token::At => "@".to_string(),
        Token::Amp => " & ".to_string(),
        Token::Question => "?".to_string(),
        Token::Lt => "<".to_string(),
        Token::Gt => ">".to_string(),
        Token::Arrow => " -> ".to_string(),
    }
}

/// Parse a type spelling, reconstructing a canonical (not necessarily
/// byte-identical) source string. Leading `@Attribute` wrappers (e.g.
/// `@escaping`) are consumed and dropped, per the parameter-type cleanup rule.
fn parse_type_spelling(cur: &mut Cursor) -> Option<String> {
    while cur.peek() == Some(&Token::At) {
        let _ = parse_attributes(cur);
    }

    let base = match cur.advance() {
        Some(Token::Ident(s)) => s.clone(),
        _ => return None,
    };
    let mut text = base;
    text.push_str(&parse_generic_suffix(cur));

    while cur.eat(&Token::Question) {
        text.push('?');
    }

    while cur.peek() == Some(&Token::Dot) {
        cur.advance();
        match cur.advance() {
            Some(Token::Ident(s)) => {
                text.push('.');
                text.push_str(s);
                text.push_str(&parse_generic_suffix(cur));
            }
            _ => break,
        }
    }

    if cur.eat(&Token::Amp) {
        text.push_str(" & ");
        if let Some(rest) = parse_type_spelling(cur) {
            text.push_str(&rest);
        }
    }

    Some(text)
}

fn skip_generic_suffix(cur: &mut Cursor) {
    let _ = parse_generic_suffix(cur);
}

fn parse_generic_suffix(cur: &mut Cursor) -> String {
    if cur.peek() != Some(&Token::Lt) {
        return String::new();
    }
    let mut depth: i32 = 0;
    let mut text = String::new();
    loop {
        match cur.peek() {
            Some(Token::Lt) => {
                depth += 1;
                text.push('<');
                cur.advance();
            }
            Some(Token::Gt) => {
                depth -= 1;
                text.push('>');
                cur.advance();
                if depth == 0 {
                    break;
                }
            }
            Some(tok) => {
                text.push_str(&render_compact(tok));
                cur.advance();
            }
            None => break,
        }
    }
    text
}
