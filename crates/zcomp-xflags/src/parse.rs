use std::mem;

use proc_macro2::{Delimiter, TokenStream, TokenTree};

use crate::{ast, Error, Result};

macro_rules! format_err {
    ($($tt:tt)*) => {
        Error::Syntax(format!($($tt)*))
    };
}

macro_rules! bail {
    ($($tt:tt)*) => {
        return Err(format_err!($($tt)*))
    };
}

enum Invocation {
    XFlags(TokenStream),
    ParseOrExit(TokenStream),
}

pub(crate) fn source(text: &str) -> Result<ast::Cmd> {
    let ts = text.parse::<TokenStream>().map_err(|err| Error::Lex(err.to_string()))?;
    match find_invocation(ts) {
        Some(Invocation::XFlags(body)) => xflags(body),
        Some(Invocation::ParseOrExit(body)) => parse_or_exit(body),
        None => Err(Error::NotFound),
    }
}

/// Depth-first search for the first `xflags! {}` or `parse_or_exit! {}`,
/// qualified or not.
fn find_invocation(ts: TokenStream) -> Option<Invocation> {
    let tokens = ts.into_iter().collect::<Vec<_>>();
    for (i, tt) in tokens.iter().enumerate() {
        match tt {
            TokenTree::Ident(ident) => {
                let ctor = match ident.to_string().as_str() {
                    "xflags" => Invocation::XFlags,
                    "parse_or_exit" => Invocation::ParseOrExit,
                    _ => continue,
                };
                if let (Some(TokenTree::Punct(bang)), Some(TokenTree::Group(body))) =
                    (tokens.get(i + 1), tokens.get(i + 2))
                {
                    if bang.as_char() == '!' {
                        return Some(ctor(body.stream()));
                    }
                }
            }
            TokenTree::Group(group) => {
                if let Some(res) = find_invocation(group.stream()) {
                    return Some(res);
                }
            }
            _ => (),
        }
    }
    None
}

fn xflags(ts: TokenStream) -> Result<ast::Cmd> {
    let p = &mut Parser::new(ts);
    if p.eat_keyword("src") {
        p.expect_string()?;
    }
    let doc = opt_doc(p)?;
    let mut cmd = cmd(p, false)?;
    cmd.doc = doc;
    if !p.end() {
        bail!("expected a single top-level `cmd`")
    }
    add_help(&mut cmd);
    Ok(cmd)
}

fn parse_or_exit(ts: TokenStream) -> Result<ast::Cmd> {
    let p = &mut Parser::new(ts);
    let mut cmd = cmd(p, true)?;
    add_help(&mut cmd);
    Ok(cmd)
}

fn add_help(cmd: &mut ast::Cmd) {
    let help = ast::Flag {
        arity: ast::Arity::Optional,
        name: "help".to_string(),
        short: Some("h".to_string()),
        doc: Some("Prints help information.".to_string()),
        val: None,
    };
    cmd.flags.push(help);
}

fn cmd(p: &mut Parser, anon: bool) -> Result<ast::Cmd> {
    let name = if anon {
        String::new()
    } else {
        p.expect_keyword("cmd")?;
        cmd_name(p)?
    };

    let mut res = ast::Cmd {
        name,
        doc: None,
        args: Vec::new(),
        flags: Vec::new(),
        subcommands: Vec::new(),
    };

    if !anon {
        // 0.2 syntax: positional arguments sit between the name and the body.
        while !p.at_delim(Delimiter::Brace) {
            let doc = opt_doc(p)?;
            let arity = arity(p)?;
            match opt_val(p)? {
                Some(val) => res.args.push(ast::Arg { arity, doc, val }),
                None => bail!("expected `arg: Type`"),
            }
        }
        p.enter_delim(Delimiter::Brace)?;
    }

    let mut seen_default = false;
    while !p.end() {
        let doc = opt_doc(p)?;
        let default = !anon && p.eat_keyword("default");
        if !anon && (default || p.at_keyword("cmd")) {
            let mut cmd = cmd(p, false)?;
            cmd.doc = doc;
            if default {
                if seen_default {
                    bail!("only one subcommand can be default")
                }
                seen_default = true;
            }
            res.subcommands.push(cmd);
        } else {
            let arity = arity(p)?;
            let is_val = p.lookahead_punct(':', 1);
            let name = p.expect_name()?;
            if name.starts_with('-') {
                let mut flag = flag(p, name)?;
                flag.doc = doc;
                flag.arity = arity;
                res.flags.push(flag)
            } else if is_val {
                p.expect_punct(':')?;
                let ty = p.expect_name()?;
                let val = ast::Val { name, ty };
                res.args.push(ast::Arg { arity, doc, val });
            } else {
                bail!("expected `--flag` or `arg: Type`")
            }
        }
    }
    if !anon {
        p.exit_delim()?;
    }
    Ok(res)
}

fn flag(p: &mut Parser, name: String) -> Result<ast::Flag> {
    let (short, long) = if name.starts_with("--") {
        (None, name)
    } else {
        if !p.eat_punct(',') {
            bail!("long option is required for `{name}`");
        }
        let long = flag_name(p)?;
        if !long.starts_with("--") {
            bail!("long name must begin with `--`: `{long}`");
        }
        (Some(name), long)
    };

    if long == "--help" {
        bail!("`--help` flag is generated automatically")
    }

    let val = opt_val(p)?;
    Ok(ast::Flag {
        arity: ast::Arity::Required,
        name: long[2..].to_string(),
        short: short.map(|it| it[1..].to_string()),
        doc: None,
        val,
    })
}

fn opt_val(p: &mut Parser) -> Result<Option<ast::Val>> {
    if !p.lookahead_punct(':', 1) {
        return Ok(None);
    }

    let name = p.expect_name()?;
    p.expect_punct(':')?;
    let ty = p.expect_name()?;
    Ok(Some(ast::Val { name, ty }))
}

fn arity(p: &mut Parser) -> Result<ast::Arity> {
    if p.eat_keyword("optional") {
        return Ok(ast::Arity::Optional);
    }
    if p.eat_keyword("required") {
        return Ok(ast::Arity::Required);
    }
    if p.eat_keyword("repeated") {
        return Ok(ast::Arity::Repeated);
    }
    if let Some(name) = p.eat_name() {
        bail!("expected one of `optional`, `required`, `repeated`, got `{name}`")
    }
    match p.ts.pop() {
        Some(tt) => bail!("expected one of `optional`, `required`, `repeated`, got `{tt}`"),
        None => bail!("expected one of `optional`, `required`, `repeated`, got end of input"),
    }
}

fn opt_single_doc(p: &mut Parser) -> Result<Option<String>> {
    if !p.eat_punct('#') {
        return Ok(None);
    }
    p.enter_delim(Delimiter::Bracket)?;
    p.expect_keyword("doc")?;
    p.expect_punct('=')?;
    let mut res = p.expect_string()?;
    if let Some(suf) = res.strip_prefix(' ') {
        res = suf.to_string();
    }
    p.exit_delim()?;
    Ok(Some(res))
}

fn opt_doc(p: &mut Parser) -> Result<Option<String>> {
    let lines =
        core::iter::from_fn(|| opt_single_doc(p).transpose()).collect::<Result<Vec<String>>>()?;
    let lines = lines.join("\n");

    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines))
    }
}

fn cmd_name(p: &mut Parser) -> Result<String> {
    let name = p.expect_name()?;
    if name.starts_with('-') {
        bail!("command name can't begin with `-`: `{name}`");
    }
    Ok(name)
}

fn flag_name(p: &mut Parser) -> Result<String> {
    let name = p.expect_name()?;
    if !name.starts_with('-') {
        bail!("flag name should begin with `-`: `{name}`");
    }
    Ok(name)
}

struct Parser {
    stack: Vec<Vec<TokenTree>>,
    ts: Vec<TokenTree>,
}

impl Parser {
    fn new(ts: TokenStream) -> Self {
        let mut ts = ts.into_iter().collect::<Vec<_>>();
        ts.reverse();
        Self { stack: Vec::new(), ts }
    }

    fn at_delim(&self, delimiter: Delimiter) -> bool {
        matches!(self.ts.last(), Some(TokenTree::Group(g)) if g.delimiter() == delimiter)
    }
    fn enter_delim(&mut self, delimiter: Delimiter) -> Result<()> {
        match self.ts.pop() {
            Some(TokenTree::Group(g)) if g.delimiter() == delimiter => {
                let mut ts = g.stream().into_iter().collect::<Vec<_>>();
                ts.reverse();
                let ts = mem::replace(&mut self.ts, ts);
                self.stack.push(ts);
            }
            _ => bail!("expected `{}`", open_delim(delimiter)),
        }
        Ok(())
    }
    fn exit_delim(&mut self) -> Result<()> {
        if !self.end() {
            bail!("unexpected `{}`", self.ts[self.ts.len() - 1])
        }
        match self.stack.pop() {
            Some(ts) => self.ts = ts,
            None => bail!("unbalanced delimiters"),
        }
        Ok(())
    }
    fn end(&self) -> bool {
        self.ts.is_empty()
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if !self.eat_keyword(kw) {
            bail!("expected `{kw}`")
        }
        Ok(())
    }
    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.ts.pop();
            true
        } else {
            false
        }
    }
    fn at_keyword(&self, kw: &str) -> bool {
        match self.ts.last() {
            Some(TokenTree::Ident(ident)) => ident.to_string() == kw,
            _ => false,
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        self.eat_name().ok_or_else(|| {
            let next = self.ts.pop().map(|it| it.to_string()).unwrap_or_default();
            format_err!("expected a name, got: `{next}`")
        })
    }
    /// Glues `-`-separated identifiers back together: `--log-file`.
    fn eat_name(&mut self) -> Option<String> {
        let mut buf = String::new();
        let mut prev_ident = false;
        loop {
            match self.ts.last() {
                Some(TokenTree::Punct(p)) if p.as_char() == '-' => {
                    // `name --flag`: the dashes start the next name.
                    if prev_ident
                        && !matches!(self.ts.iter().rev().nth(1), Some(TokenTree::Ident(_)))
                    {
                        break;
                    }
                    prev_ident = false;
                    buf.push('-');
                }
                Some(TokenTree::Ident(ident)) if !prev_ident => {
                    prev_ident = true;
                    buf.push_str(&ident.to_string());
                }
                _ => break,
            }
            self.ts.pop();
        }
        if buf.is_empty() {
            None
        } else {
            Some(buf)
        }
    }

    fn expect_punct(&mut self, punct: char) -> Result<()> {
        if !self.eat_punct(punct) {
            bail!("expected `{punct}`")
        }
        Ok(())
    }
    fn eat_punct(&mut self, punct: char) -> bool {
        match self.ts.last() {
            Some(TokenTree::Punct(p)) if p.as_char() == punct => {
                self.ts.pop();
                true
            }
            _ => false,
        }
    }
    fn lookahead_punct(&self, punct: char, n: usize) -> bool {
        match self.ts.iter().rev().nth(n) {
            Some(TokenTree::Punct(p)) => p.as_char() == punct,
            _ => false,
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.ts.pop() {
            Some(TokenTree::Literal(lit)) if lit.to_string().starts_with('"') => {
                Ok(str_lit_value(&lit.to_string()))
            }
            _ => bail!("expected a string"),
        }
    }
}

fn open_delim(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Brace => "{",
        Delimiter::Bracket => "[",
        Delimiter::Parenthesis => "(",
        Delimiter::None => "group",
    }
}

/// Value of a plain string literal, as printed by `Literal::to_string`.
///
/// `proc_macro2` has no accessor for the value itself, so undo the common
/// escapes by hand.
fn str_lit_value(lit: &str) -> String {
    let body = lit.strip_prefix('"').and_then(|it| it.strip_suffix('"')).unwrap_or(lit);
    let mut res = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            res.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => res.push('\n'),
            Some('t') => res.push('\t'),
            Some('r') => res.push('\r'),
            Some('0') => res.push('\0'),
            Some('u') => {
                // `\u{200b}`
                let hex = chars.by_ref().skip(1).take_while(|&c| c != '}').collect::<String>();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => res.push(c),
                    None => res.push_str(&format!("\\u{{{hex}}}")),
                }
            }
            Some('x') => {
                let hex = chars.by_ref().take(2).collect::<String>();
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => res.push(char::from(byte)),
                    Err(_) => res.push_str(&format!("\\x{hex}")),
                }
            }
            Some(other) => res.push(other),
            None => res.push('\\'),
        }
    }
    res
}
