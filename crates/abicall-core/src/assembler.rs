//! Argument assembler — builds typed arguments from structural call events
//!
//! The assembler implements [`CallListener`]. It resolves the method named by
//! the call, checks arity, coerces each literal against the declared type of
//! the current argument, and drives the [`ArrayStack`] for array arguments.
//!
//! # Error handling
//!
//! The first error is kept and every later event is ignored, so a walk always
//! runs to completion without unwinding. [`Assembler::finish`] reports the
//! stored error, if any.

use crate::abi::{Contract, MethodDescriptor};
use crate::coerce;
use crate::parser::ast::LiteralKind;
use crate::parser::CallListener;
use crate::stack::ArrayStack;
use crate::types::{ParamType, ScalarKind};
use crate::value::Value;
use crate::{Error, Result};

/// Parse state for one call
pub struct Assembler<'a> {
    contract: Option<&'a Contract>,
    method: Option<MethodDescriptor>,
    arg_index: usize,
    stack: ArrayStack,
    args: Vec<Value>,
    error: Option<Error>,
}

impl<'a> Assembler<'a> {
    /// Assembler that resolves the method from the call's function name
    pub fn new(contract: &'a Contract) -> Self {
        Assembler {
            contract: Some(contract),
            method: None,
            arg_index: 0,
            stack: ArrayStack::new(),
            args: Vec::new(),
            error: None,
        }
    }

    /// Assembler for a bare argument list against an already known method
    pub fn for_method(method: MethodDescriptor) -> Self {
        Assembler {
            contract: None,
            method: Some(method),
            arg_index: 0,
            stack: ArrayStack::new(),
            args: Vec::new(),
            error: None,
        }
    }

    /// The first error recorded, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Consume the state into the resolved method and its argument list
    pub fn finish(self) -> Result<(MethodDescriptor, Vec<Value>)> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let method = self
            .method
            .ok_or_else(|| Error::EventOrder("no method name received".to_string()))?;
        if !self.stack.is_empty() {
            return Err(Error::EventOrder(format!(
                "{} array levels left open",
                self.stack.depth()
            )));
        }
        if self.args.len() < method.inputs.len() {
            return Err(Error::TooFewArguments {
                expected: method.inputs.len(),
                found: self.args.len(),
            });
        }
        Ok((method, self.args))
    }

    /// Run `step` unless an error is already stored; store the first failure
    fn guard(&mut self, step: impl FnOnce(&mut Self) -> Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = step(self) {
            tracing::debug!(error = %err, arg = self.arg_index, "call rejected");
            self.error = Some(err);
        }
    }

    /// Declared type of the current top-level argument
    fn current_param(&self) -> Result<ParamType> {
        let method = self
            .method
            .as_ref()
            .ok_or_else(|| Error::EventOrder("argument before method name".to_string()))?;
        method
            .inputs
            .get(self.arg_index)
            .map(|p| p.ty.clone())
            .ok_or(Error::TooManyArguments {
                expected: method.inputs.len(),
            })
    }

    fn try_function_name(&mut self, name: &str) -> Result<()> {
        let contract = self
            .contract
            .ok_or_else(|| Error::EventOrder("method name for a preset method".to_string()))?;
        let method = contract
            .method(name)
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))?;
        tracing::trace!(method = %method, "resolved method");
        self.method = Some(method.clone());
        Ok(())
    }

    fn try_argument_start(&mut self) -> Result<()> {
        if self.stack.is_empty() {
            // Bounds check only; the type is looked up again per literal
            self.current_param()?;
        }
        Ok(())
    }

    fn try_argument_end(&mut self) -> Result<()> {
        if self.stack.is_empty() {
            self.arg_index += 1;
        }
        Ok(())
    }

    fn try_literal(&mut self, kind: LiteralKind, text: &str) -> Result<()> {
        let param = self.current_param()?;
        let base = param.base_type();
        let value = coerce_literal(kind, base, text)?;
        tracing::trace!(arg = self.arg_index, %value, "literal");

        if self.stack.is_empty() {
            if param.array_depth() != 0 {
                return Err(Error::ShapeMismatch(format!(
                    "expected an array for parameter of type {}, found scalar {}",
                    param, value
                )));
            }
            self.args.push(value);
            Ok(())
        } else {
            self.stack.push_scalar(value)
        }
    }

    fn try_array_start(&mut self) -> Result<()> {
        let param = self.current_param()?;
        if param.array_depth() == 0 {
            return Err(Error::ShapeMismatch(format!(
                "expected a scalar for parameter of type {}, found array",
                param
            )));
        }
        self.stack.open_level(&param)
    }

    fn try_array_end(&mut self) -> Result<()> {
        if let Some(value) = self.stack.close_level()? {
            self.args.push(value);
        }
        Ok(())
    }
}

/// Coerce a literal, first checking its lexical kind can denote the declared kind
fn coerce_literal(kind: LiteralKind, base: &ScalarKind, text: &str) -> Result<Value> {
    if !base.has_literal_form() {
        return Err(Error::UnhandledType(base.to_string()));
    }
    let compatible = match kind {
        LiteralKind::Integer => matches!(base, ScalarKind::Int(_) | ScalarKind::Uint(_)),
        LiteralKind::Hex => matches!(
            base,
            ScalarKind::Address | ScalarKind::Hash | ScalarKind::Bytes | ScalarKind::FixedBytes(_)
        ),
        LiteralKind::String => matches!(base, ScalarKind::String),
        LiteralKind::Boolean => matches!(base, ScalarKind::Bool),
    };
    if !compatible {
        return Err(Error::UnknownScalarType {
            literal: kind.to_string(),
            declared: base.to_string(),
        });
    }
    coerce::coerce(base, text)
}

impl CallListener for Assembler<'_> {
    fn function_name(&mut self, name: &str) {
        self.guard(|s| s.try_function_name(name));
    }

    fn argument_start(&mut self) {
        self.guard(Self::try_argument_start);
    }

    fn argument_end(&mut self) {
        self.guard(Self::try_argument_end);
    }

    fn literal(&mut self, kind: LiteralKind, text: &str) {
        self.guard(|s| s.try_literal(kind, text));
    }

    fn array_start(&mut self) {
        self.guard(Self::try_array_start);
    }

    fn array_end(&mut self) {
        self.guard(Self::try_array_end);
    }
}
