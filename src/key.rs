use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::RowsetError;

/// How a row, column or result is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A column name.
    Name(String),
    /// A position; negative values count from the end.
    Index(isize),
    /// A `start:stop:step` range of positions.
    Slice(Slice),
}

impl Key {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Key::Name(_) => "name",
            Key::Index(_) => "index",
            Key::Slice(_) => "slice",
        }
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Name(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::Name(v)
    }
}

impl From<&String> for Key {
    fn from(v: &String) -> Self {
        Key::Name(v.clone())
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Key::Index(v as isize)
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Index(v as isize)
    }
}

impl From<isize> for Key {
    fn from(v: isize) -> Self {
        Key::Index(v)
    }
}

impl From<usize> for Key {
    fn from(v: usize) -> Self {
        Key::Index(isize::try_from(v).unwrap_or(isize::MAX))
    }
}

impl From<Slice> for Key {
    fn from(v: Slice) -> Self {
        Key::Slice(v)
    }
}

impl From<Range<isize>> for Key {
    fn from(v: Range<isize>) -> Self {
        Key::Slice(v.into())
    }
}

impl From<RangeFrom<isize>> for Key {
    fn from(v: RangeFrom<isize>) -> Self {
        Key::Slice(v.into())
    }
}

impl From<RangeTo<isize>> for Key {
    fn from(v: RangeTo<isize>) -> Self {
        Key::Slice(v.into())
    }
}

impl From<RangeFull> for Key {
    fn from(v: RangeFull) -> Self {
        Key::Slice(v.into())
    }
}

/// Half-open `start:stop:step` selection with negative-index support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Positions selected from a sequence of length `len`, in selection
    /// order. Bounds are clamped; a zero step is an error.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>, RowsetError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(RowsetError::InvalidArgument {
                message: "slice step cannot be zero".to_string(),
            });
        }

        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step < 0 { upper } else { lower });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step < 0 { lower } else { upper });

        let mut out = Vec::new();
        let mut next = Some(start);
        while let Some(i) = next
            && ((step > 0 && i < stop) || (step < 0 && i > stop))
        {
            out.push(i as usize);
            next = i.checked_add(step);
        }
        Ok(out)
    }
}

impl From<Range<isize>> for Slice {
    fn from(r: Range<isize>) -> Self {
        Slice::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(r: RangeFrom<isize>) -> Self {
        Slice::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(r: RangeTo<isize>) -> Self {
        Slice::new(None, Some(r.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

/// Resolve a possibly negative index against `len`.
pub(crate) fn resolve_index(index: isize, len: usize) -> Result<usize, RowsetError> {
    let out_of_range = || RowsetError::IndexOutOfRange { index, len };
    let resolved = if index < 0 {
        isize::try_from(len)
            .ok()
            .and_then(|l| l.checked_add(index))
            .filter(|i| *i >= 0)
            .ok_or_else(out_of_range)? as usize
    } else {
        index as usize
    };
    if resolved >= len {
        return Err(out_of_range());
    }
    Ok(resolved)
}
