//! abicall core - typed contract-call arguments from human-typed text
//!
//! Turns a call such as `transfer(0x5FfC014343cd971B7eb70732021E26C35B744cc4, 100)`
//! into an ordered list of typed values matching the method's declared ABI
//! inputs, ready for an ABI encoder.
//!
//! # Architecture
//!
//! ```text
//! Call Text → Tokenizer → Parser → CallNode
//!                                     ↓ walk (structural events)
//!                                  Assembler ← Contract (ABI)
//!                                     ↓ coerce / ArrayStack
//!                                  Vec<Value>
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same contract and text always give the same result
//! - **Type-directed**: every value has exactly its declared kind and width
//! - **Homogeneous arrays**: an array never mixes element types
//! - **No unwinding**: the first error is recorded and the event stream drained

pub mod abi;
pub mod assembler;
pub mod coerce;
pub mod error;
pub mod parser;
pub mod stack;
pub mod types;
pub mod value;

pub use abi::{Contract, MethodDescriptor, Param, CONSTRUCTOR};
pub use assembler::Assembler;
pub use error::{Error, Result};
pub use types::{ParamType, ScalarKind};
pub use value::{ArrayValue, IntValue, UintValue, Value};

/// A call resolved against a contract interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCall {
    pub method: MethodDescriptor,
    pub args: Vec<Value>,
}

impl ParsedCall {
    /// JSON view: method, signature and typed arguments
    pub fn to_json(&self) -> serde_json::Value {
        let arguments: Vec<serde_json::Value> = self
            .method
            .inputs
            .iter()
            .zip(&self.args)
            .map(|(param, value)| {
                serde_json::json!({
                    "name": param.name,
                    "type": param.ty.to_string(),
                    "value": value.to_json(),
                })
            })
            .collect();
        serde_json::json!({
            "method": self.method.name,
            "signature": self.method.signature(),
            "arguments": arguments,
        })
    }
}

/// Parse call text against a contract interface
///
/// # Errors
/// `SyntaxError` for malformed text; otherwise the first error raised while
/// assembling arguments (unknown method, arity, coercion, shape).
///
/// # Example
/// ```
/// use abicall_core::{parse_call, Contract, MethodDescriptor};
///
/// let contract = Contract::from_methods(vec![
///     MethodDescriptor::parse_signature("transfer(address,uint256)").unwrap(),
/// ]);
/// let call = parse_call(&contract, "transfer(0x5FfC014343cd971B7eb70732021E26C35B744cc4, 100)").unwrap();
/// assert_eq!(call.args.len(), 2);
/// ```
pub fn parse_call(contract: &Contract, text: &str) -> Result<ParsedCall> {
    let call = parser::parse_call(text)?;
    tracing::debug!(method = %call.name, args = call.args.len(), "parsed call text");

    let mut assembler = Assembler::new(contract);
    parser::walk_call(&call, &mut assembler);
    let (method, args) = assembler.finish()?;
    Ok(ParsedCall { method, args })
}

/// Parse a bare comma-separated value list against a list of types
///
/// This is the `--types bool,uint256 --data false,2` form used when
/// preparing data for signing.
pub fn parse_values(types: &[ParamType], text: &str) -> Result<Vec<Value>> {
    let args = parser::parse_arguments(text)?;
    tracing::debug!(types = types.len(), args = args.len(), "parsed value list");

    let mut assembler = Assembler::for_method(MethodDescriptor::new("", types.to_vec()));
    parser::walk_arguments(&args, &mut assembler);
    let (_, values) = assembler.finish()?;
    Ok(values)
}
