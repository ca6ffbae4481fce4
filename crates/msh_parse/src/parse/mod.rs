pub mod command;
pub mod parser;

#[cfg(test)]
mod tests;
