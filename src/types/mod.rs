mod date;
mod errors;
mod money;
#[cfg(test)]
mod tests;

pub use date::Date;
pub use errors::FormatError;
pub use money::Money;
