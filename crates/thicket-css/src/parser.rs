//! Selector parser
//!
//! Hand-written recursive descent over the selector text. Offsets in errors
//! are byte offsets into the original string.

use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorList, SimpleSelector,
};
use crate::SelectorError;

pub(crate) struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        if self.input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let list = self.list()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(list),
            Some(found) => Err(self.unexpected(found)),
        }
    }

    /// complex ("," complex)*, stopping at end of input or an unmatched ')'
    fn list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = vec![self.complex()?];
        loop {
            self.skip_whitespace();
            if self.peek() != Some(',') {
                break;
            }
            self.bump();
            selectors.push(self.complex()?);
        }
        Ok(SelectorList(selectors))
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        while let Some(combinator) = self.combinator() {
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    /// Consume a combinator if one follows; whitespace alone is a descendant
    /// combinator unless the selector ends there.
    fn combinator(&mut self) -> Option<Combinator> {
        let had_space = self.skip_whitespace();
        let explicit = match self.peek()? {
            '>' => Combinator::Child,
            '+' => Combinator::NextSibling,
            '~' => Combinator::SubsequentSibling,
            ',' | ')' => return None,
            _ if had_space => return Some(Combinator::Descendant),
            _ => return None,
        };
        self.bump();
        self.skip_whitespace();
        Some(explicit)
    }

    fn compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut parts = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                parts.push(SimpleSelector::Universal);
            }
            Some(c) if is_ident_start(c) => {
                let name = self.ident()?;
                parts.push(SimpleSelector::Type(name.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    parts.push(SimpleSelector::Id(self.ident()?));
                }
                Some('.') => {
                    self.bump();
                    parts.push(SimpleSelector::Class(self.ident()?));
                }
                Some('[') => {
                    self.bump();
                    parts.push(SimpleSelector::Attribute(self.attribute()?));
                }
                Some(':') => {
                    self.bump();
                    parts.push(SimpleSelector::PseudoClass(self.pseudo_class()?));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => self.end(),
            });
        }
        Ok(CompoundSelector(parts))
    }

    fn attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                self.expect('=')?;
                c
            }
            Some(found) => return Err(self.unexpected(found)),
            None => return Err(self.end()),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.string(quote)?,
            Some(_) => self.ident()?,
            None => return Err(self.end()),
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.bump();
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_whitespace();
        }
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn pseudo_class(&mut self) -> Result<PseudoClass, SelectorError> {
        let name = self.ident()?.to_ascii_lowercase();

        if self.peek() == Some('(') {
            self.bump();
            let pseudo = match name.as_str() {
                "not" => {
                    let inner = self.list()?;
                    PseudoClass::Not(inner)
                }
                "nth-child" => PseudoClass::NthChild(self.nth()?),
                "nth-last-child" => PseudoClass::NthLastChild(self.nth()?),
                "nth-of-type" => PseudoClass::NthOfType(self.nth()?),
                "nth-last-of-type" => PseudoClass::NthLastOfType(self.nth()?),
                _ => return Err(SelectorError::UnsupportedPseudoClass { name }),
            };
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(pseudo);
        }

        Ok(match name.as_str() {
            "root" => PseudoClass::Root,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            _ => return Err(SelectorError::UnsupportedPseudoClass { name }),
        })
    }

    fn nth(&mut self) -> Result<NthExpression, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ')' {
                break;
            }
            self.bump();
        }
        let raw = &self.input[start..self.pos];
        NthExpression::parse(raw).ok_or_else(|| SelectorError::InvalidNth(raw.trim().to_string()))
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) || c.is_ascii_digit() || c == '-' => {}
            Some(found) => return Err(self.unexpected(found)),
            None => return Err(self.end()),
        }
        while let Some(c) = self.peek() {
            if !(is_ident_start(c) || c.is_ascii_digit() || c == '-') {
                break;
            }
            self.bump();
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorError> {
        self.bump();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.input[start..self.pos].to_string();
                self.bump();
                return Ok(value);
            }
            self.bump();
        }
        Err(self.end())
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(self.unexpected(found)),
            None => Err(self.end()),
        }
    }

    /// Returns true if any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    #[inline]
    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.input.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn end(&self) -> SelectorError {
        SelectorError::UnexpectedEnd {
            selector: self.input.to_string(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}
