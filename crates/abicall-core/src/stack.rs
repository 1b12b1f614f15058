//! Array construction stack — builds one argument's nested container
//!
//! Each open bracket in the call text opens exactly one frame, so the stack
//! mirrors the bracket nesting of the current argument. Frames are typed at
//! creation from the declared parameter type; the innermost frame at leaf
//! depth collects scalars and every closed frame is handed to its parent.

use crate::types::ParamType;
use crate::value::{ArrayValue, Value};
use crate::{Error, Result};

/// One in-progress nesting level
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayFrame {
    /// Nesting level, 1 for the outermost array of an argument
    pub level: usize,
    /// Declared element count when this level is `T[N]`
    pub fixed_len: Option<usize>,
    /// Declared type of this level, for error messages
    pub ty: String,
    pub container: ArrayValue,
}

/// Stack of open array frames for the current argument
#[derive(Debug, Default)]
pub struct ArrayStack {
    frames: Vec<ArrayFrame>,
}

impl ArrayStack {
    pub fn new() -> Self {
        ArrayStack::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Open the next nesting level of `param` below the current innermost frame
    pub fn open_level(&mut self, param: &ParamType) -> Result<()> {
        let declared = param.array_depth();
        let level = self.frames.len() + 1;
        if level > declared {
            return Err(Error::ShapeMismatch(format!(
                "array nested {} levels deep for parameter of type {}",
                level, param
            )));
        }

        let base = param.base_type();
        if !base.has_literal_form() {
            return Err(Error::UnhandledType(param.to_string()));
        }

        let level_ty = param.level(level - 1).ok_or_else(|| {
            Error::UnhandledType(format!("nesting level {} of {}", level, param))
        })?;

        tracing::trace!(level, ty = %level_ty, "opening array level");
        self.frames.push(ArrayFrame {
            level,
            fixed_len: level_ty.fixed_len(),
            ty: level_ty.to_string(),
            container: ArrayValue::new(base.clone(), declared - level + 1),
        });
        Ok(())
    }

    /// Append a coerced scalar to the innermost frame
    pub fn push_scalar(&mut self, value: Value) -> Result<()> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| Error::EventOrder("scalar pushed with no open array".to_string()))?;
        if frame.container.depth() != 1 {
            return Err(Error::ShapeMismatch(format!(
                "expected an array for element of {}, found scalar {}",
                frame.ty, value
            )));
        }
        frame.container.push(value)
    }

    /// Close the innermost frame
    ///
    /// Returns the finished container when the outermost frame closes;
    /// otherwise the container is appended to its parent and `None` returned.
    pub fn close_level(&mut self) -> Result<Option<Value>> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| Error::EventOrder("array closed with no open array".to_string()))?;

        if let Some(expected) = frame.fixed_len {
            if frame.container.len() != expected {
                return Err(Error::ArrayLength {
                    ty: frame.ty,
                    expected,
                    found: frame.container.len(),
                });
            }
        }

        let value = Value::Array(frame.container);
        match self.frames.last_mut() {
            Some(parent) => {
                parent.container.push(value)?;
                Ok(None)
            }
            None => Ok(Some(value)),
        }
    }
}
