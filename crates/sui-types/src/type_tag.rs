//! Move type tags: parsing and canonical encoding.
//!
//! Supports:
//! - Primitive types: `bool`, `u8`, `u16`, `u32`, `u64`, `u128`, `u256`, `address`, `signer`
//! - Vector types: `vector<T>`
//! - Struct types: `0x2::module::Struct` or `0x2::module::Struct<T1, T2>`
//!
//! Whitespace between tokens is ignored. The encoded variant order of
//! [`TypeTag`] is fixed by the chain and must not be reordered: new variants
//! are only ever appended.
//!
//! # Examples
//!
//! ```
//! use sui_ptb_types::TypeTag;
//!
//! let tag: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
//! assert_eq!(
//!     tag.to_string(),
//!     "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<\
//!      0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI>"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::TypesError;

/// A Move type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// A fully-qualified struct type with its type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// True when the nominal head (ignoring type parameters) matches.
    pub fn is(&self, address: &Address, module: &str, name: &str) -> bool {
        self.address == *address && self.module == module && self.name == name
    }
}

/// Deepest type nesting the parser accepts. Each level costs at most two
/// containers when encoded, which keeps parsed tags inside bcs's limit.
pub const MAX_TYPE_DEPTH: usize = 128;

/// Check an identifier against `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Parse a Move type string into a [`TypeTag`].
pub fn parse_type_tag(type_str: &str) -> Result<TypeTag, TypesError> {
    let mut parser = Parser::new(type_str);
    let tag = parser.parse_type()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(tag)
}

/// Parse a Move struct type string into a [`StructTag`].
pub fn parse_struct_tag(type_str: &str) -> Result<StructTag, TypesError> {
    match parse_type_tag(type_str)? {
        TypeTag::Struct(tag) => Ok(*tag),
        _ => Err(TypesError::type_tag(type_str, "not a struct type")),
    }
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: &str) -> TypesError {
        TypesError::type_tag(self.input, format!("{} at offset {}", reason, self.pos))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypesError> {
        if self.eat(token) {
            Ok(())
        } else if self.at_end() {
            Err(self.error(&format!("expected '{}' but input ended", token)))
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    /// Read a run of `[A-Za-z0-9_]` characters.
    fn word(&mut self) -> &'a str {
        self.skip_whitespace();
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn identifier(&mut self) -> Result<String, TypesError> {
        let word = self.word();
        if !is_valid_identifier(word) {
            return Err(self.error(&format!("invalid identifier '{}'", word)));
        }
        Ok(word.to_string())
    }

    fn parse_type(&mut self) -> Result<TypeTag, TypesError> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        self.depth += 1;
        let tag = self.parse_type_inner();
        self.depth -= 1;
        tag
    }

    fn parse_type_inner(&mut self) -> Result<TypeTag, TypesError> {
        let word = self.word();
        if word.is_empty() {
            return Err(match self.peek() {
                None => self.error("expected a type but input ended"),
                Some(b) => self.error(&format!("unexpected character '{}'", b as char)),
            });
        }

        if word.as_bytes()[0].is_ascii_digit() {
            return self.parse_struct(word).map(|s| TypeTag::Struct(Box::new(s)));
        }

        let tag = match word {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.parse_type()?;
                self.expect(">")?;
                TypeTag::Vector(Box::new(inner))
            }
            other => return Err(self.error(&format!("unknown primitive type '{}'", other))),
        };
        Ok(tag)
    }

    fn parse_struct(&mut self, address_literal: &str) -> Result<StructTag, TypesError> {
        let address = Address::from_hex(address_literal)?;
        self.expect("::")?;
        let module = self.identifier()?;
        self.expect("::")?;
        let name = self.identifier()?;

        let mut type_params = Vec::new();
        if self.eat("<") {
            loop {
                type_params.push(self.parse_type()?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        Ok(StructTag {
            address,
            module,
            name,
            type_params,
        })
    }
}

// =============================================================================
// Display / FromStr
// =============================================================================

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", param)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_tag(s)
    }
}

impl FromStr for StructTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_struct_tag(s)
    }
}
