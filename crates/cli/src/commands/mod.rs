mod check;
mod convert;
mod rules;

pub(crate) use check::cmd_check;
pub(crate) use convert::{cmd_convert, ConvertArgs};
pub(crate) use rules::cmd_rules;
