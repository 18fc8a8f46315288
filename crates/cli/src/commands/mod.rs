pub(crate) mod eval;
pub(crate) mod parse;
