pub mod access;
pub mod health;
pub mod matching;

#[cfg(test)]
mod test_support;
