pub mod chat;
pub mod health;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;
