//! Contract interface metadata — method descriptors and JSON ABI loading
//!
//! A [`Contract`] maps method names to [`MethodDescriptor`]s. It is built
//! either from a JSON ABI (a bare entry array or a build artifact carrying an
//! `abi` field) or from individual signature strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::types::ParamType;
use crate::{Error, Result};

/// Reserved method name that designates the constructor
pub const CONSTRUCTOR: &str = "constructor";

/// One declared input of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

/// A method's name plus its ordered parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl MethodDescriptor {
    /// Build a descriptor from unnamed parameter types
    pub fn new(name: impl Into<String>, types: Vec<ParamType>) -> Self {
        MethodDescriptor {
            name: name.into(),
            inputs: types
                .into_iter()
                .map(|ty| Param {
                    name: String::new(),
                    ty,
                })
                .collect(),
        }
    }

    /// Parse a signature such as `transfer(address,uint256)`
    pub fn parse_signature(signature: &str) -> Result<Self> {
        let signature = signature.trim();
        let open = signature
            .find('(')
            .ok_or_else(|| Error::AbiError(format!("missing '(' in signature '{}'", signature)))?;
        let body = signature[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| Error::AbiError(format!("missing ')' in signature '{}'", signature)))?;
        let name = signature[..open].trim();
        if name.is_empty() {
            return Err(Error::AbiError(format!("missing name in signature '{}'", signature)));
        }
        Ok(MethodDescriptor::new(name, ParamType::parse_list(body)?))
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p.ty)?;
        }
        write!(f, ")")
    }
}

// ── Contract ──────────────────────────────────────────────

/// A contract's callable interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    constructor: MethodDescriptor,
    methods: BTreeMap<String, MethodDescriptor>,
}

impl Default for Contract {
    fn default() -> Self {
        Contract {
            constructor: MethodDescriptor::new(CONSTRUCTOR, Vec::new()),
            methods: BTreeMap::new(),
        }
    }
}

impl Contract {
    /// Build a contract from method descriptors; later duplicates are renamed
    pub fn from_methods(methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        let mut contract = Contract::default();
        for method in methods {
            contract.insert(method);
        }
        contract
    }

    /// Load a JSON ABI document
    pub fn from_json(text: &str) -> Result<Self> {
        let document: AbiDocument =
            serde_json::from_str(text).map_err(|e| Error::AbiError(e.to_string()))?;
        let entries = match document {
            AbiDocument::Entries(entries) => entries,
            AbiDocument::Artifact { abi } => abi,
        };

        let mut contract = Contract::default();
        for entry in entries {
            match entry.kind.as_str() {
                "function" | "constructor" => {
                    let inputs = entry
                        .inputs
                        .iter()
                        .map(|p| {
                            Ok(Param {
                                name: p.name.clone(),
                                ty: p.resolve()?,
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    if entry.kind == "constructor" {
                        contract.constructor = MethodDescriptor {
                            name: CONSTRUCTOR.to_string(),
                            inputs,
                        };
                    } else {
                        contract.insert(MethodDescriptor {
                            name: entry.name,
                            inputs,
                        });
                    }
                }
                other => {
                    tracing::trace!(kind = other, name = %entry.name, "skipping ABI entry");
                }
            }
        }
        Ok(contract)
    }

    /// Look up a method by exact name; `constructor` yields the constructor
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        if name == CONSTRUCTOR {
            Some(&self.constructor)
        } else {
            self.methods.get(name)
        }
    }

    pub fn constructor(&self) -> &MethodDescriptor {
        &self.constructor
    }

    /// Methods in name order, keyed by their lookup name
    pub fn methods(&self) -> impl Iterator<Item = (&str, &MethodDescriptor)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overloads keep the first name and take `name0`, `name1`, ... after it
    fn insert(&mut self, method: MethodDescriptor) {
        let mut key = method.name.clone();
        let mut suffix = 0;
        while self.methods.contains_key(&key) {
            key = format!("{}{}", method.name, suffix);
            suffix += 1;
        }
        self.methods.insert(key, method);
    }
}

// ── JSON schema ───────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum AbiDocument {
    Entries(Vec<AbiEntry>),
    Artifact { abi: Vec<AbiEntry> },
}

#[derive(Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
}

fn default_entry_kind() -> String {
    "function".to_string()
}

#[derive(Deserialize)]
struct AbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    components: Vec<AbiParam>,
}

impl AbiParam {
    /// `tuple` types spell their components out of line
    fn resolve(&self) -> Result<ParamType> {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let components = self
                    .components
                    .iter()
                    .map(|c| c.resolve().map(|t| t.to_string()))
                    .collect::<Result<Vec<_>>>()?;
                ParamType::parse(&format!("({}){}", components.join(","), suffix))
            }
            None => ParamType::parse(&self.ty),
        }
    }
}
